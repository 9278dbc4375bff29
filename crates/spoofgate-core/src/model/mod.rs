//! Provisioning data model shared with the host pipeline.
//!
//! Identifiers are UUID newtypes so an account can never be compared against a
//! network by accident. Request and descriptor types mirror the host's JSON
//! opts and keep every field they do not interpret, including network ids
//! that are not UUIDs.

pub mod ids;
pub mod request;

pub use ids::{AccountId, NetworkId, RequestId};
pub use request::{Account, NetworkDescriptor, NetworkRef, ProvisionRequest};
