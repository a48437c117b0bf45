//! Error types for config generation
//!
//! Every failure in the pipeline is terminal. The variants only exist so the
//! binary and the tests can tell the stages apart; none of them is retried.

use thiserror::Error;

/// Result type alias for config generation operations
pub type ConfigGenResult<T> = Result<T, ConfigGenError>;

/// Main error type for config generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigGenError {
    /// Bad command-line arguments
    #[error("{0}")]
    Usage(String),

    /// Missing or empty environment configuration
    #[error("{0}")]
    Config(String),

    /// Transport failures: DNS, refused connections, timeouts
    #[error("{0}")]
    Network(String),

    /// Non-200 status or an error object inside the response body
    #[error("{0}")]
    Upstream(String),

    /// Response body is not valid JSON or has the wrong shape
    #[error("{0}")]
    Decode(String),

    /// Directory creation, file creation or write failures
    #[error("{0}")]
    Filesystem(String),
}

impl ConfigGenError {
    /// Create a new usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a new upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Create a new filesystem error
    pub fn filesystem(message: impl Into<String>) -> Self {
        Self::Filesystem(message.into())
    }

    /// Stable code for programmatic handling and log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage_error",
            Self::Config(_) => "config_error",
            Self::Network(_) => "network_error",
            Self::Upstream(_) => "upstream_error",
            Self::Decode(_) => "decode_error",
            Self::Filesystem(_) => "filesystem_error",
        }
    }

    /// Whether the binary should print its usage text along with the message
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
