//! spoofgate filter library entry.
//!
//! Wires the plugin config loader, the policy table, and the provisioning
//! filter together. Consumed by the `spoofgate-filter` binary, by host
//! pipelines embedding the hook, and by integration tests.

pub mod config;
pub mod policy;

pub use policy::{PolicyStore, ProvisionFilter, ProvisionHook};
