//! Error types for the compass library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// The only failure text a user ever sees for a generation attempt.
///
/// Transport failures, refused requests and malformed payloads all collapse
/// into this message; the underlying detail is logged for operators.
pub const GENERATION_FAILED_MESSAGE: &str = "Could not generate plan. Please try again.";

/// Comprehensive error type for all compass operations.
#[derive(Error, Debug)]
pub enum CompassError {
    /// The generation service could not be reached or the request failed in
    /// flight (timeout, connect failure, broken body)
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },
    /// The generation service answered with a non-success status
    #[error("Generation service returned status {status}: {message}")]
    Api { status: u16, message: String },
    /// The payload could not be turned into a plan
    #[error("Could not generate plan. Please try again.")]
    Generation { detail: String },
    /// Another generation is already in flight
    #[error("A plan is already being generated")]
    Busy,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating transport errors with context.
pub struct TransportErrorBuilder {
    message: String,
}

impl TransportErrorBuilder {
    /// Create a new transport error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: reqwest::Error) -> CompassError {
        CompassError::Transport {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CompassError {
        CompassError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CompassError {
    /// Creates a builder for transport errors.
    pub fn transport(message: impl Into<String>) -> TransportErrorBuilder {
        TransportErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a generation error carrying an operator-facing detail.
    pub fn generation(detail: impl Into<String>) -> Self {
        Self::Generation {
            detail: detail.into(),
        }
    }

    /// Whether this error came out of the generation path (service call or
    /// payload handling) rather than from local input or setup.
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Api { .. } | Self::Generation { .. }
        )
    }

    /// The message to show a user.
    ///
    /// Generation failures never leak their subtype; everything else is
    /// already phrased for the person who caused it.
    pub fn user_message(&self) -> String {
        if self.is_generation_failure() {
            GENERATION_FAILED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add lazy context to any error type, converting to CompassError.
    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context_lazy<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| CompassError::Configuration {
            message: format!("{}: {}", f(), e),
        })
    }
}

/// Result type alias for compass operations
pub type Result<T> = std::result::Result<T, CompassError>;
