use thiserror::Error;

/// Errors raised by host player or platform calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The capability does not exist in this environment
    #[error("{capability} is not supported")]
    Unsupported {
        /// Capability that was requested
        capability: &'static str,
    },

    /// The platform refused the request
    #[error("{operation} was rejected: {reason}")]
    Rejected {
        /// Operation that was attempted
        operation: &'static str,
        /// Reason given by the platform
        reason: String,
    },

    /// The current media cannot be repositioned
    #[error("media is not seekable")]
    NotSeekable,
}

impl PlatformError {
    /// Shorthand for a rejection with a reason.
    pub fn rejected(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}

/// Errors raised by an asset transport before a response was obtained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),

    /// The asset path cannot be expressed for this transport
    #[error("invalid asset path '{0}'")]
    InvalidPath(String),
}
