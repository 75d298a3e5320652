//! Error types and handling for Recycler

/// Result type alias for Recycler operations
pub type Result<T> = std::result::Result<T, RecyclerError>;

/// Error types for the recycling pool
#[derive(Debug, thiserror::Error)]
pub enum RecyclerError {
    /// Pool bookkeeping was violated by the caller (double release, foreign instance)
    #[error("Invalid pool state: {message}")]
    InvalidState { message: String },

    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// I/O related errors (config files)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Lock poisoning on a shared pool
    #[error("Concurrency error: {message}")]
    Concurrency { message: String },
}

impl RecyclerError {
    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a standard I/O error
    pub fn from_io(source: std::io::Error, context: &str) -> Self {
        Self::Io {
            message: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a concurrency error
    pub fn concurrency(message: impl Into<String>) -> Self {
        Self::Concurrency {
            message: message.into(),
        }
    }

    /// True for errors that signal a broken pool contract rather than an environment failure
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::InvalidState { .. })
    }
}

impl From<std::io::Error> for RecyclerError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(err, "I/O operation failed")
    }
}

impl From<serde_json::Error> for RecyclerError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
