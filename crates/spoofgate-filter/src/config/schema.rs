use std::collections::BTreeMap;

use serde::Deserialize;
use spoofgate_core::error::{Result, SpoofGateError};

/// Name under which the host registers this plugin.
pub const PLUGIN_NAME: &str = "allow_ip_spoofing";

/// Free-form `config` object of the plugin entry.
///
/// Keys and values are kept as strings here; `PolicyStore::load` turns them
/// into UUIDs and rejects anything else.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpoofingConfig {
    pub user_networks: BTreeMap<String, Vec<String>>,
}

/// One element of the host's plugin list (`CLOUDAPI_PLUGINS`, `DOCKER_PLUGINS`).
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginEntry {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Left untyped: entries for other plugins carry their own shapes.
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

fn default_enabled() -> bool {
    true
}

impl PluginEntry {
    pub fn is_spoofing_plugin(&self) -> bool {
        self.name == PLUGIN_NAME
    }

    /// Decode the `config` object of an `allow_ip_spoofing` entry.
    pub fn spoofing_config(&self) -> Result<SpoofingConfig> {
        let raw = self.config.clone().ok_or_else(|| {
            SpoofGateError::Config(format!("plugin {PLUGIN_NAME}: missing config"))
        })?;
        serde_json::from_value(raw)
            .map_err(|e| SpoofGateError::Config(format!("plugin {PLUGIN_NAME}: {e}")))
    }
}

/// Outcome of selecting this plugin out of a host plugin list.
#[derive(Debug, Clone)]
pub enum SpoofingPlugin {
    /// Entry present, enabled, config decoded.
    Enabled(SpoofingConfig),
    /// Entry present with `enabled: false`.
    Disabled,
    /// No entry named `allow_ip_spoofing`.
    Absent,
}

impl SpoofingPlugin {
    pub fn from_entries(entries: &[PluginEntry]) -> Result<Self> {
        let mut ours = entries.iter().filter(|e| e.is_spoofing_plugin());
        let Some(entry) = ours.next() else {
            return Ok(SpoofingPlugin::Absent);
        };
        if ours.next().is_some() {
            return Err(SpoofGateError::Config(format!(
                "plugin {PLUGIN_NAME} listed more than once"
            )));
        }
        if !entry.enabled {
            return Ok(SpoofingPlugin::Disabled);
        }
        Ok(SpoofingPlugin::Enabled(entry.spoofing_config()?))
    }

    pub fn config(&self) -> Option<&SpoofingConfig> {
        match self {
            SpoofingPlugin::Enabled(cfg) => Some(cfg),
            SpoofingPlugin::Disabled | SpoofingPlugin::Absent => None,
        }
    }
}
