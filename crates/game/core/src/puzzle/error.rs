use crate::error::{ErrorSeverity, GameError};

/// Errors raised while assembling a puzzle or an assignment for it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("puzzle already has the maximum of {max} variables")]
    TooManyVariables { max: usize },

    #[error("variable {name} has {len} values, at most {max} are allowed")]
    DomainTooLarge { name: String, len: usize, max: usize },

    #[error("variable {0} has an empty domain")]
    EmptyDomain(String),

    #[error("variable {0} is declared twice")]
    DuplicateVariable(String),

    #[error("unknown variable {0}")]
    UnknownVariable(String),

    #[error("constraint references variable index {0} which is not declared")]
    UnknownVariableIndex(usize),
}

impl GameError for PuzzleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            PuzzleError::TooManyVariables { .. } => "PUZZLE_TOO_MANY_VARIABLES",
            PuzzleError::DomainTooLarge { .. } => "PUZZLE_DOMAIN_TOO_LARGE",
            PuzzleError::EmptyDomain(_) => "PUZZLE_EMPTY_DOMAIN",
            PuzzleError::DuplicateVariable(_) => "PUZZLE_DUPLICATE_VARIABLE",
            PuzzleError::UnknownVariable(_) => "PUZZLE_UNKNOWN_VARIABLE",
            PuzzleError::UnknownVariableIndex(_) => "PUZZLE_UNKNOWN_VARIABLE_INDEX",
        }
    }
}
