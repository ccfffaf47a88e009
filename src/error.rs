use std::io;
use thiserror::Error;

use crate::MatrixPolicy;

/// Reasons a loaded graph fails to load
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source could not be opened or read
    #[error("{source_id}: I/O error: {source}")]
    Io {
        source_id: String,
        #[source]
        source: io::Error,
    },

    /// Missing, extra or non-integer tokens
    #[error("{source_id}: format error: {reason}")]
    Format { source_id: String, reason: String },

    /// Tokens parsed but the matrix breaks the active policy
    #[error("{source_id}: validation error: {violation}")]
    Validation {
        source_id: String,
        violation: Violation,
    },
}

impl LoadError {
    pub fn source_id(&self) -> &str {
        match self {
            LoadError::Io { source_id, .. }
            | LoadError::Format { source_id, .. }
            | LoadError::Validation { source_id, .. } => source_id,
        }
    }
}

/// A constraint of the matrix policy that does not hold
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("vertex count must be positive")]
    EmptyGraph,

    #[error("entry [{row}][{col}] = {value} is outside the range allowed by the {policy} policy")]
    ValueOutOfRange {
        row: usize,
        col: usize,
        value: i128,
        policy: MatrixPolicy,
    },

    #[error("matrix is not symmetric: [{row}][{col}] = {forward} but [{col}][{row}] = {backward}")]
    Asymmetric {
        row: usize,
        col: usize,
        forward: u64,
        backward: u64,
    },
}

/// A row whose length differs from the number of rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {row} has {len} entries, expected {expected}")]
pub struct ShapeError {
    pub row: usize,
    pub len: usize,
    pub expected: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_source_and_constraint() {
        let err = LoadError::Validation {
            source_id: "g1.txt".to_string(),
            violation: Violation::Asymmetric {
                row: 0,
                col: 1,
                forward: 1,
                backward: 0,
            },
        };
        let text = err.to_string();
        assert!(text.starts_with("g1.txt: validation error"));
        assert!(text.contains("not symmetric"));
        assert_eq!(err.source_id(), "g1.txt");

        let range = Violation::ValueOutOfRange {
            row: 1,
            col: 0,
            value: 2,
            policy: MatrixPolicy::Strict,
        };
        assert_eq!(
            range.to_string(),
            "entry [1][0] = 2 is outside the range allowed by the strict policy"
        );
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;

        let err = LoadError::Io {
            source_id: "missing.txt".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.txt"));
    }
}
