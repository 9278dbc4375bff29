//! Shared vocabulary of the ip spoofing filter.
//!
//! Holds the error enum, the UUID-backed identifiers and the request model
//! that host pipelines exchange with `spoofgate-filter`. Pure data: nothing
//! here opens files or spawns threads.
//!
//! Production paths may not panic: `unwrap`, `expect` and `panic!` are
//! rejected by clippy below, so bad input always comes back as a
//! `SpoofGateError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;

pub use error::{ErrorCode, Result, SpoofGateError};
pub use model::{
    Account, AccountId, NetworkDescriptor, NetworkId, NetworkRef, ProvisionRequest, RequestId,
};
