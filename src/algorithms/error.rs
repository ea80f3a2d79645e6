use thiserror::Error;

use crate::environment::EnvironmentError;

/// Errors that stop a solver before it produces a [`Solution`](super::Solution).
///
/// Reaching an iteration or episode cap is not an error; it is reported
/// through [`Termination`](super::Termination).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error("Invalid hyperparameter {name} = {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    #[error("Environment has no states or no actions")]
    EmptyEnvironment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_error_is_transparent() {
        let inner = EnvironmentError::InvalidAction {
            action: 7,
            n_actions: 5,
        };
        let e = SolverError::from(inner.clone());
        assert_eq!(e.to_string(), inner.to_string());
    }

    #[test]
    fn invalid_hyperparameter_display() {
        let e = SolverError::InvalidHyperparameter {
            name: "gamma",
            value: 1.5,
        };
        assert_eq!(e.to_string(), "Invalid hyperparameter gamma = 1.5");
    }
}
