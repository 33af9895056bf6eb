use crate::dns::{Family, LookupErrorKind};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Resolution Errors
    #[error("DNS lookup of {family} records for {domain} failed ({kind}): {message}")]
    DnsLookupFailed {
        domain: String,
        family: Family,
        kind: LookupErrorKind,
        message: String,
    },

    // Usage Errors
    #[error("invalid family {0}, must be one of the {{4, 6}}")]
    InvalidFamily(u8),
    #[error("invalid DNS server address: {0}")]
    InvalidServerAddress(String),
    #[error("invalid resolver configuration: {0}")]
    InvalidConfig(String),
}

/// Chromium `ERR_DNS_SERVER_FAILED`.
pub const DNS_SERVER_FAILED: i32 = -802;
/// Chromium `ERR_DNS_TIMED_OUT`.
pub const DNS_TIMED_OUT: i32 = -803;

impl NetError {
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::DnsLookupFailed { kind, .. } => match kind {
                LookupErrorKind::TimedOut | LookupErrorKind::Cancelled => DNS_TIMED_OUT,
                _ => DNS_SERVER_FAILED,
            },
            // Usage errors (custom codes starting at -10000)
            NetError::InvalidFamily(_) => -10000,
            NetError::InvalidServerAddress(_) => -10001,
            NetError::InvalidConfig(_) => -10002,
        }
    }

    /// Builds the error reported when a single-family lookup fails hard.
    pub fn lookup_failed(
        domain: &str,
        family: Family,
        kind: LookupErrorKind,
        message: impl Into<String>,
    ) -> Self {
        NetError::DnsLookupFailed {
            domain: domain.to_string(),
            family,
            kind,
            message: message.into(),
        }
    }
}
