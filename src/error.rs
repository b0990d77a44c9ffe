//! Escape-sequence error taxonomy.

use thiserror::Error;

/// Why a terminated sequence could not be dispatched.
///
/// No variant is fatal: the terminal reports one diagnostic, resets the
/// recognizer to idle, and resumes at the next scalar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A terminated sequence with no dispatch rule, or a parameter that
    /// failed to parse as an integer.
    #[error("unknown escape sequence {0:?}")]
    Unknown(String),

    /// A second ESC arrived in the middle of a sequence.
    #[error("incomplete escape sequence")]
    Incomplete,

    /// A recognized final byte whose mode or code is not implemented.
    #[error("unsupported escape sequence {0:?}")]
    Unsupported(String),
}
