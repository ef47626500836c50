//! Error types for reactlog.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! the exact failure. The dispatch path never logs its own errors; it may be
//! the logging sink itself.

use std::io;

use thiserror::Error;

/// Validation errors raised while building triggers or rules.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A trigger was registered or configured with empty text.
    #[error("Trigger cannot be empty")]
    EmptyTrigger,
}

/// Top-level error type for reactlog.
#[derive(Debug, Error)]
pub enum ReactError {
    /// Invalid trigger or rule input.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The reaction for `trigger` failed, typically on its secondary write.
    #[error("Reaction for trigger '{trigger}' failed: {source}")]
    Reaction {
        /// The trigger whose reaction failed.
        trigger: String,
        /// The reaction's own error.
        #[source]
        source: io::Error,
    },

    /// Forwarding the record to the primary sink failed.
    #[error("Primary sink write failed: {0}")]
    Sink(#[source] io::Error),

    /// The configuration could not be parsed or applied.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong.
        message: String,
    },

    /// A shared lock was poisoned by a panicking holder.
    #[error("Poisoned lock: {context}")]
    Poisoned {
        /// Which lock.
        context: &'static str,
    },
}

impl ReactError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if a reaction handler failed.
    #[must_use]
    pub const fn is_reaction(&self) -> bool {
        matches!(self, Self::Reaction { .. })
    }

    /// Returns true if the primary sink failed.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, Self::Sink(_))
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

impl From<ReactError> for io::Error {
    fn from(err: ReactError) -> Self {
        match err {
            ReactError::Sink(e) => e,
            ReactError::Reaction { trigger, source } => io::Error::new(
                source.kind(),
                format!("reaction for trigger '{trigger}' failed: {source}"),
            ),
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}

/// Result type alias for reactlog operations.
pub type ReactResult<T> = Result<T, ReactError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_empty_trigger() {
        let msg = format!("{}", ValidationError::EmptyTrigger);
        assert!(msg.contains("empty"));
    }

    #[test]
    fn test_reaction_error_names_trigger() {
        let err = ReactError::Reaction {
            trigger: "INFO".to_string(),
            source: io::Error::new(io::ErrorKind::BrokenPipe, "gone"),
        };
        assert!(err.is_reaction());
        assert!(!err.is_sink());
        let msg = format!("{err}");
        assert!(msg.contains("INFO"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_react_error_from_validation() {
        let err: ReactError = ValidationError::EmptyTrigger.into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_sink_error_converts_back_to_io_error() {
        let err = ReactError::Sink(io::Error::new(io::ErrorKind::WriteZero, "full"));
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::WriteZero);
        assert_eq!(io_err.to_string(), "full");
    }

    #[test]
    fn test_reaction_error_keeps_kind_as_io_error() {
        let err = ReactError::Reaction {
            trigger: "AUDIT".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::PermissionDenied);
        assert!(io_err.to_string().contains("AUDIT"));
    }

    #[test]
    fn test_config_error() {
        let err = ReactError::config("bad json");
        assert!(err.is_config());
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::Other);
        assert!(io_err.to_string().contains("bad json"));
    }
}
