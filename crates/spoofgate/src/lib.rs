//! Single-dependency entry point for hosts embedding the ip spoofing filter.
//!
//! `core` carries the request model and errors, `filter` the config loaders,
//! `PolicyStore` and `ProvisionFilter`.

pub mod core {
    pub use spoofgate_core::*;
}

pub mod filter {
    pub use spoofgate_filter::*;
}
