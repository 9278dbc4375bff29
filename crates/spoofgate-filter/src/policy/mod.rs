//! Policy layer: the account/network table and the provisioning filter.
//!
//! `PolicyStore` is compiled once from config; `ProvisionFilter` consults it
//! for every request the host pipeline hands over.

pub mod filter;
pub mod store;

pub use filter::{ProvisionFilter, ProvisionHook};
pub use store::PolicyStore;
