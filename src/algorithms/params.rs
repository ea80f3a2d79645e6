//! Hyperparameter checks shared by the solvers.

use super::error::SolverError;
use crate::environment::Environment;

/// Discount factor must lie in `(0, 1]`.
pub(crate) fn check_gamma(gamma: f64) -> Result<(), SolverError> {
    if gamma > 0.0 && gamma <= 1.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidHyperparameter {
            name: "gamma",
            value: gamma,
        })
    }
}

pub(crate) fn check_positive(name: &'static str, value: f64) -> Result<(), SolverError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SolverError::InvalidHyperparameter { name, value })
    }
}

/// Probabilities must lie in `[0, 1]`.
pub(crate) fn check_probability(name: &'static str, value: f64) -> Result<(), SolverError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SolverError::InvalidHyperparameter { name, value })
    }
}

pub(crate) fn check_environment(env: &dyn Environment) -> Result<(), SolverError> {
    if env.n_states() == 0 || env.n_actions() == 0 {
        return Err(SolverError::EmptyEnvironment);
    }
    Ok(())
}
