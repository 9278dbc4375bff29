//! Plugin config loader (strict parsing).
//!
//! Accepts either the bare plugin `config` object or the host's whole plugin
//! list. serde_yaml reads both YAML and the JSON the host publishes.

pub mod schema;

use std::fs;
use std::path::Path;

use spoofgate_core::error::{Result, SpoofGateError};

pub use schema::{PluginEntry, SpoofingConfig, SpoofingPlugin, PLUGIN_NAME};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<SpoofingConfig> {
    load_from_str(&read(path.as_ref())?)
}

pub fn load_from_str(s: &str) -> Result<SpoofingConfig> {
    serde_yaml::from_str(s).map_err(|e| SpoofGateError::Config(format!("invalid config: {e}")))
}

pub fn load_plugins_from_file(path: impl AsRef<Path>) -> Result<SpoofingPlugin> {
    load_plugins_from_str(&read(path.as_ref())?)
}

pub fn load_plugins_from_str(s: &str) -> Result<SpoofingPlugin> {
    let entries: Vec<PluginEntry> = serde_yaml::from_str(s)
        .map_err(|e| SpoofGateError::Config(format!("invalid plugin list: {e}")))?;
    SpoofingPlugin::from_entries(&entries)
}

/// Load whichever shape the document has: a sequence is a plugin list,
/// anything else is a bare plugin config.
pub fn load_any_from_str(s: &str) -> Result<SpoofingPlugin> {
    let doc: serde_yaml::Value = serde_yaml::from_str(s)
        .map_err(|e| SpoofGateError::Config(format!("invalid config: {e}")))?;
    if doc.is_sequence() {
        load_plugins_from_str(s)
    } else {
        load_from_str(s).map(SpoofingPlugin::Enabled)
    }
}

pub fn load_any_from_file(path: impl AsRef<Path>) -> Result<SpoofingPlugin> {
    load_any_from_str(&read(path.as_ref())?)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        SpoofGateError::Config(format!("read config failed ({}): {e}", path.display()))
    })
}
