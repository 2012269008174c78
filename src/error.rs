//! Error types for matching runs.

use std::fmt::Display;

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::{ValidationError, Violation};

/// Main error type for matching operations.
#[derive(Debug, Error)]
pub enum MatchError {
    /// An advisor's program is missing from the category lookup.
    #[error("advisor '{advisor_id}' has program '{program}' which is not in the category lookup")]
    UnknownProgram {
        /// Offending advisor.
        advisor_id: String,
        /// Program tag that could not be resolved.
        program: String,
    },

    /// Remaining advisor capacity could not absorb every candidate.
    #[error(
        "no feasible assignment: {} candidate(s) left unassigned after {committed} commit(s): {}",
        .unassigned.len(),
        .unassigned.join(", ")
    )]
    Infeasible {
        /// Matches committed before the pool ran dry.
        committed: usize,
        /// IDs of candidates that were never matched.
        unassigned: Vec<String>,
    },

    /// A search result broke a completeness or capacity invariant.
    #[error("assignment violates {} invariant(s): {}", .0.len(), join_messages(.0))]
    InvariantViolation(Vec<Violation>),

    /// Input records failed structural validation.
    #[error("invalid input ({} error(s)): {}", .0.len(), join_messages(.0))]
    InvalidInput(Vec<ValidationError>),

    /// Invalid run configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type alias for matching operations.
pub type Result<T> = std::result::Result<T, MatchError>;

fn join_messages<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infeasible_message_lists_candidates() {
        let err = MatchError::Infeasible {
            committed: 1,
            unassigned: vec!["11".into(), "12".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 candidate(s)"));
        assert!(msg.contains("after 1 commit(s)"));
        assert!(msg.contains("11, 12"));
    }

    #[test]
    fn test_unknown_program_message() {
        let err = MatchError::UnknownProgram {
            advisor_id: "P1".into(),
            program: "Alchemy".into(),
        };
        assert!(err.to_string().contains("'Alchemy'"));
    }
}
