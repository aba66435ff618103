//! Error types for impsort-edit.
//!
//! This module defines error types that distinguish between:
//! - Blocks (exit code 2): the file changed on disk since it was checked
//! - Runtime errors (exit code 1): invalid edits, I/O errors

use thiserror::Error;

/// The top-level error type for impsort-edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// An edit cannot be applied to the text it targets (exit code 1).
    #[error("invalid edit: {0}")]
    InvalidEdit(#[from] InvalidEditError),

    /// The file's content hash no longer matches the one captured before fixing (exit code 2).
    #[error("precondition mismatch: {message}")]
    PreconditionMismatch {
        /// Which file changed, with expected and actual digests.
        message: String,
    },

    /// A runtime/tool error occurred (exit code 1).
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

/// Why a set of edits was rejected. Nothing is applied when any edit is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEditError {
    #[error("range {start}..{end} is outside a text of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("offset {offset} is not on a UTF-8 character boundary")]
    NotCharBoundary { offset: usize },

    #[error("range {first_start}..{first_end} overlaps {second_start}..{second_end}")]
    Overlapping {
        first_start: usize,
        first_end: usize,
        second_start: usize,
        second_end: usize,
    },
}

impl EditError {
    /// Returns true if the file changed underneath us (exit code 2).
    pub fn is_precondition_mismatch(&self) -> bool {
        matches!(self, EditError::PreconditionMismatch { .. })
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            EditError::PreconditionMismatch { .. } => 2,
            EditError::InvalidEdit(_) | EditError::Runtime(_) => 1,
        }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::{EditError, InvalidEditError};

    #[test]
    fn precondition_mismatch_reports_exit_code_2() {
        let err = EditError::PreconditionMismatch {
            message: "src/app.ts changed".to_string(),
        };
        assert!(err.is_precondition_mismatch());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("precondition mismatch"));
    }

    #[test]
    fn runtime_error_reports_exit_code_1() {
        let err = EditError::from(anyhow::anyhow!("boom"));
        assert!(!err.is_precondition_mismatch());
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("runtime error"));
    }

    #[test]
    fn invalid_edit_display_includes_range() {
        let err = EditError::from(InvalidEditError::OutOfBounds {
            start: 4,
            end: 40,
            len: 10,
        });
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "invalid edit: range 4..40 is outside a text of 10 bytes"
        );
    }
}
