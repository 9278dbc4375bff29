use std::sync::Arc;

use spoofgate_core::error::Result;
use spoofgate_core::model::ProvisionRequest;

use super::store::PolicyStore;
use crate::config::{SpoofingConfig, SpoofingPlugin};

/// Hook run by the host pipeline over the networks of a new instance.
///
/// `Ok(())` tells the pipeline to continue. An error means the request was
/// rejected before evaluation and nothing in it was changed.
pub trait ProvisionHook: Send + Sync {
    fn apply(&self, req: &mut ProvisionRequest) -> Result<()>;
}

/// Marks `allow_ip_spoofing` on every network the account is allowed to
/// spoof on. Never rejects a request because of policy: unknown accounts and
/// unmatched networks are simply left alone.
#[derive(Debug, Clone)]
pub struct ProvisionFilter {
    store: Arc<PolicyStore>,
}

impl ProvisionFilter {
    pub fn new(store: Arc<PolicyStore>) -> Self {
        Self { store }
    }

    /// Compile a plugin config into a ready filter. Fails loudly on a bad table.
    pub fn from_config(cfg: &SpoofingConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(PolicyStore::load(cfg)?)))
    }

    /// `None` when the host has the plugin disabled or does not list it.
    pub fn from_plugin(plugin: &SpoofingPlugin) -> Result<Option<Self>> {
        match plugin.config() {
            Some(cfg) => Self::from_config(cfg).map(Some),
            None => {
                tracing::info!(?plugin, "ip spoofing filter not installed");
                Ok(None)
            }
        }
    }

    pub fn store(&self) -> &PolicyStore {
        &self.store
    }

    /// Same decision as `apply`, on a copy; `req` is left untouched.
    pub fn annotate(&self, req: &ProvisionRequest) -> Result<ProvisionRequest> {
        let mut out = req.clone();
        self.apply(&mut out)?;
        Ok(out)
    }
}

impl ProvisionHook for ProvisionFilter {
    fn apply(&self, req: &mut ProvisionRequest) -> Result<()> {
        // Reject before touching any descriptor.
        let (account, req_id) = req.identity()?;
        tracing::debug!(%req_id, %account, "running ip spoofing filter");

        let permitted = self.store.permitted_networks(&account);
        tracing::trace!(%req_id, %account, networks = ?permitted, "permitted networks for account");
        if permitted.is_empty() {
            return Ok(());
        }

        for n in req.networks.iter_mut() {
            let Some(net) = n.effective_ref() else {
                continue;
            };
            let Some(id) = net.as_id() else {
                tracing::trace!(%req_id, network = ?net, "provision network id is not a uuid");
                continue;
            };
            tracing::trace!(%req_id, network = %id, "checking provision network");

            if permitted.contains(&id) {
                tracing::info!(%req_id, network = %id, %account, "network set spoofable for account");
                n.grant_ip_spoofing();
            }
        }
        Ok(())
    }
}
