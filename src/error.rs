//! Error types for shell-console.
//!
//! The parser has no error type of its own: malformed or unrecognized
//! control sequences are consumed and the scan continues, so bad input
//! degrades to plain-text display instead of failing.

use thiserror::Error;

/// Main error type for shell-console operations.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// PTY-related error.
    #[error("PTY error: {0}")]
    Pty(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The subprocess output stream has closed; no further chunks will
    /// arrive after the final drain.
    #[error("producer closed")]
    ProducerClosed,

    /// Cross-context handoff failed, e.g. the consumer loop was torn
    /// down. The chunk in flight is dropped.
    #[error("handoff failed: {0}")]
    HandoffFailure(String),

    /// Channel receive failed.
    #[error("channel closed")]
    ChannelClosed,

    /// Invalid console status transition attempted.
    #[error("invalid status transition from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: crate::status::ConsoleStatus,
        to: crate::status::ConsoleStatus,
    },
}

/// Convenience Result type for shell-console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ConsoleStatus;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe gone");
        let err: ConsoleError = io_err.into();
        assert!(matches!(err, ConsoleError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_pty_error_display() {
        let err = ConsoleError::Pty("failed to spawn".into());
        assert!(err.to_string().contains("PTY error"));
        assert!(err.to_string().contains("failed to spawn"));
    }

    #[test]
    fn test_handoff_failure_display() {
        let err = ConsoleError::HandoffFailure("consumer gone".into());
        assert!(err.to_string().contains("handoff failed"));
        assert!(err.to_string().contains("consumer gone"));
    }

    #[test]
    fn test_status_transition_display() {
        let err = ConsoleError::InvalidStatusTransition {
            from: ConsoleStatus::Terminated,
            to: ConsoleStatus::Running,
        };
        assert!(err.to_string().contains("Terminated"));
        assert!(err.to_string().contains("Running"));
    }
}
