use thiserror::Error;

/// Errors raised while building or querying a grid world.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Invalid state {state}: expected a state in [0, {n_states})")]
    InvalidState { state: usize, n_states: usize },

    #[error("Invalid action {action}: expected an action in [0, {n_actions})")]
    InvalidAction { action: usize, n_actions: usize },

    #[error("Grid dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("Grid design is empty")]
    EmptyDesign,

    #[error("Design row {row} has {found} cells, expected {expected}")]
    RaggedDesign {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Cannot place {requested} special cells on a grid with {available} cells")]
    TooManySpecialCells { requested: usize, available: usize },

    #[error("Expected {expected} entries (one per state), got {found}")]
    LengthMismatch { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_display() {
        let e = EnvironmentError::InvalidState {
            state: 30,
            n_states: 25,
        };
        assert_eq!(e.to_string(), "Invalid state 30: expected a state in [0, 25)");
    }

    #[test]
    fn ragged_design_display() {
        let e = EnvironmentError::RaggedDesign {
            row: 2,
            expected: 5,
            found: 4,
        };
        assert_eq!(e.to_string(), "Design row 2 has 4 cells, expected 5");
    }

    #[test]
    fn error_equality() {
        assert_eq!(EnvironmentError::EmptyDesign, EnvironmentError::EmptyDesign);
        assert_ne!(
            EnvironmentError::EmptyDesign,
            EnvironmentError::InvalidDimensions {
                rows: 0,
                columns: 0
            }
        );
    }
}
