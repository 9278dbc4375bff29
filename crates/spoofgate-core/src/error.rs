//! Shared error type across spoofgate crates.

use thiserror::Error;

/// Stable error codes reported to the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Policy configuration is missing or malformed.
    Config,
    /// Provisioning request is missing identifiers or is structurally malformed.
    InvalidRequest,
}

impl ErrorCode {
    /// String representation used in logs and tool output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, SpoofGateError>;

/// Unified error type used by core and filter.
#[derive(Debug, Error)]
pub enum SpoofGateError {
    /// Fatal at startup: the filter must not run with an ambiguous policy.
    #[error("config error: {0}")]
    Config(String),
    /// Reported to the caller; no descriptor has been touched.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl SpoofGateError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SpoofGateError::Config(_) => ErrorCode::Config,
            SpoofGateError::InvalidRequest(_) => ErrorCode::InvalidRequest,
        }
    }
}
