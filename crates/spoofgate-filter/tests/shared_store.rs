#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::thread;

use uuid::Uuid;

use spoofgate_core::model::{AccountId, NetworkDescriptor, NetworkId, ProvisionRequest, RequestId};
use spoofgate_filter::config;
use spoofgate_filter::{PolicyStore, ProvisionFilter, ProvisionHook};

const ACCT: &str = "fb7f31ad-52d6-4e92-83d2-9f9d94ceef3f";
const NET_X: &str = "3f9fc37a-43c4-11e8-88b5-42004d19d401";
const NET_Y: &str = "9c1d7a8e-1b2f-4c3d-8e9f-0a1b2c3d4e5f";

#[test]
fn one_store_serves_concurrent_requests() {
    let cfg = config::load_from_str(&format!(r#"{{"user_networks": {{"{ACCT}": ["{NET_X}"]}}}}"#))
        .unwrap();
    let store = Arc::new(PolicyStore::load(&cfg).unwrap());

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let filter = ProvisionFilter::new(Arc::clone(&store));
            thread::spawn(move || {
                let req_id = RequestId::from_uuid(uuid_for(i));
                let networks = if i % 2 == 0 {
                    vec![
                        NetworkDescriptor::new(NET_X.parse().unwrap()),
                        NetworkDescriptor::new(NET_Y.parse().unwrap()),
                    ]
                } else {
                    vec![NetworkDescriptor::new(NET_Y.parse().unwrap())
                        .with_ipv4_uuid(NET_X.parse().unwrap())]
                };
                let mut req = ProvisionRequest::new(ACCT.parse::<AccountId>().unwrap(), req_id, networks);
                filter.apply(&mut req).unwrap();
                (i, req)
            })
        })
        .collect();

    for h in handles {
        let (i, req) = h.join().unwrap();
        if i % 2 == 0 {
            assert!(req.networks[0].is_privileged());
            assert!(!req.networks[1].is_privileged());
        } else {
            assert!(req.networks[0].is_privileged());
        }
    }

    let x: NetworkId = NET_X.parse().unwrap();
    assert!(store.is_permitted(&ACCT.parse().unwrap(), &x));
}

fn uuid_for(i: u8) -> Uuid {
    Uuid::from_bytes([i; 16])
}
