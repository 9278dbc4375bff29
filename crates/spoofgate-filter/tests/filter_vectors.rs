//! Provisioning filter vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use spoofgate_core::model::ProvisionRequest;
use spoofgate_core::Result;
use spoofgate_filter::config::SpoofingConfig;
use spoofgate_filter::{ProvisionFilter, ProvisionHook};

use vector_loader::{load, TestVector};

fn run(v: &TestVector) -> Result<ProvisionRequest> {
    let cfg: SpoofingConfig = serde_json::from_value(v.config.clone()).unwrap();
    let filter = ProvisionFilter::from_config(&cfg).unwrap();
    let mut req = ProvisionRequest::from_value(v.request.clone())?;
    filter.apply(&mut req)?;
    Ok(req)
}

#[test]
fn filter_vectors() {
    let files = [
        "unknown_account.json",
        "permitted_subset.json",
        "ipv4_uuid_precedence.json",
        "blank_ipv4_uuid.json",
        "empty_networks.json",
        "already_annotated.json",
        "missing_account.json",
        "missing_req_id.json",
        "networks_not_a_list.json",
        "non_uuid_network.json",
        "non_uuid_network_unknown_account.json",
    ];

    for f in files {
        let v = load(f);
        let res = run(&v);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let req = res.unwrap_or_else(|e| panic!("vector={}: {e}", v.description));
        let ex = v.expect.expect("missing expect block");
        let flags: Vec<Option<bool>> = req.networks.iter().map(|n| n.allow_ip_spoofing).collect();
        assert_eq!(flags, ex.flags, "vector={}", v.description);

        // Positional correspondence and pass-through of untouched fields.
        let input = v.request["networks"].as_array().unwrap();
        let output = serde_json::to_value(&req).unwrap();
        let output = output["networks"].as_array().unwrap();
        assert_eq!(input.len(), output.len(), "vector={}", v.description);
        for (i, o) in input.iter().zip(output) {
            assert_eq!(i.get("mac"), o.get("mac"), "vector={}", v.description);
            assert_eq!(i.get("uuid"), o.get("uuid"), "vector={}", v.description);
        }
    }
}

#[test]
fn rejected_request_is_left_untouched() {
    let v = load("missing_account.json");
    let cfg: SpoofingConfig = serde_json::from_value(v.config.clone()).unwrap();
    let filter = ProvisionFilter::from_config(&cfg).unwrap();

    let mut req = ProvisionRequest::from_value(v.request.clone()).unwrap();
    let before = req.clone();
    assert!(filter.apply(&mut req).is_err());
    assert_eq!(req, before);
}
