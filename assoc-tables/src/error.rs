//! Error types for table generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Errors that abort a generation run.
///
/// Non-matching log lines are never errors; everything here means the
/// tables would come out incomplete, so nothing gets written.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed expression `{expression}`: {reason}")]
    MalformedExpression { expression: String, reason: String },

    /// The constructor is not one of the five known operators
    #[error("unknown operator `{op}` in `{expression}`")]
    UnknownOperator { op: String, expression: String },

    #[error("expression `{expression}` has no root operator")]
    MissingRootOperator { expression: String },
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(expression: impl Into<String>, reason: impl Into<String>) -> Self {
        GenError::MalformedExpression {
            expression: expression.into(),
            reason: reason.into(),
        }
    }
}
