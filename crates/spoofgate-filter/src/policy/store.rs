//! Account → permitted networks table.
//!
//! Built once from `SpoofingConfig` at startup and never mutated afterwards;
//! share it via `Arc` across concurrent requests.

use std::collections::{BTreeSet, HashMap};

use spoofgate_core::error::{Result, SpoofGateError};
use spoofgate_core::model::{AccountId, NetworkId};

use crate::config::SpoofingConfig;

static NO_NETWORKS: BTreeSet<NetworkId> = BTreeSet::new();

#[derive(Debug, Clone, Default)]
pub struct PolicyStore {
    user_networks: HashMap<AccountId, BTreeSet<NetworkId>>,
}

impl PolicyStore {
    /// Validate and compile the plugin config. Every key must be an account
    /// UUID and every entry a network UUID; anything else fails the load.
    pub fn load(cfg: &SpoofingConfig) -> Result<Self> {
        let mut user_networks = HashMap::with_capacity(cfg.user_networks.len());

        for (account_s, networks_raw) in &cfg.user_networks {
            let account: AccountId = account_s.parse().map_err(|e| {
                SpoofGateError::Config(format!("user_networks: invalid account uuid {account_s:?}: {e}"))
            })?;

            let mut networks = BTreeSet::new();
            for n in networks_raw {
                let id: NetworkId = n.parse().map_err(|e| {
                    SpoofGateError::Config(format!(
                        "user_networks[{account_s}]: invalid network uuid {n:?}: {e}"
                    ))
                })?;
                networks.insert(id);
            }

            // Keys differing only in case collapse onto the same account.
            user_networks
                .entry(account)
                .or_insert_with(BTreeSet::new)
                .extend(networks);
        }

        let store = Self { user_networks };
        tracing::info!(
            accounts = store.user_networks.len(),
            networks = store.user_networks.values().map(BTreeSet::len).sum::<usize>(),
            "ip spoofing policy loaded"
        );
        Ok(store)
    }

    /// Networks on which `account` may spoof; empty for unknown accounts.
    pub fn permitted_networks(&self, account: &AccountId) -> &BTreeSet<NetworkId> {
        self.user_networks.get(account).unwrap_or(&NO_NETWORKS)
    }

    pub fn is_permitted(&self, account: &AccountId, network: &NetworkId) -> bool {
        self.permitted_networks(account).contains(network)
    }

    pub fn account_count(&self) -> usize {
        self.user_networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_networks.values().all(BTreeSet::is_empty)
    }
}
