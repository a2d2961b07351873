//! Error Types
//!
//! Every operation in this crate is a pure, synchronous computation, so
//! failures are always caused by bad input and are never worth retrying.

use thiserror::Error;

/// Errors produced while building or inspecting domain socket addresses
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input cannot describe a domain socket address
    ///
    /// Raised for empty paths, address byte slices that are not 16 bytes
    /// long, and paths the native transport layer refuses to represent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input is well formed but carries no filesystem path
    ///
    /// Raised for unnamed sockets, abstract-namespace sockets, and endpoints
    /// that do not use the `unix:` scheme.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl AddressError {
    /// Build an [`AddressError::InvalidArgument`]
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    /// Build an [`AddressError::Unsupported`]
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported(reason.into())
    }

    /// Whether this error was caused by malformed input
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Whether this error was caused by an input without a path
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
