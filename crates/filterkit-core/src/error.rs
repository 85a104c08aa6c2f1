//! Error types for the Filterkit core library
//!
//! Filters themselves never fail: every unsupported input degrades to
//! [`Value::Null`](crate::Value::Null). The errors defined here cover the
//! host-facing surface around them (registry dispatch and value conversion).

use thiserror::Error;

/// Main error type for Filterkit operations
#[derive(Error, Debug)]
pub enum Error {
    /// A filter name was looked up that is not registered
    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid registry or context configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an unknown filter error
    pub fn unknown_filter(name: impl Into<String>) -> Self {
        Self::UnknownFilter { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
