//! Value iteration with synchronous (Jacobi) sweeps.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithms::params::{check_environment, check_gamma, check_positive};
use crate::algorithms::q_table::{squared_distance, QTable};
use crate::algorithms::{Solution, Solver, SolverError, Termination};
use crate::environment::Environment;

/// Value iteration solver.
///
/// Every sweep computes the full Q-table from a copy of the previous value
/// vector, then takes the greedy policy and `V = max_a Q`. The run converges
/// when the summed squared change of `V` drops below `threshold`.
///
/// # Iteration cap
///
/// The cap check is `iterations > max_iterations` after the counter has been
/// incremented, so up to `max_iterations + 1` sweeps run before
/// [`Termination::IterationCap`] is reported. Sweep counts in existing
/// results depend on this boundary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ValueIteration {
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Convergence tolerance on the summed squared value change.
    pub threshold: f64,
    /// Nominal sweep cap.
    pub max_iterations: usize,
}

impl ValueIteration {
    fn validate(&self) -> Result<(), SolverError> {
        check_gamma(self.gamma)?;
        check_positive("threshold", self.threshold)
    }
}

impl Default for ValueIteration {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            threshold: 1e-6,
            max_iterations: 200,
        }
    }
}

impl Solver for ValueIteration {
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError> {
        self.validate()?;
        check_environment(env)?;

        let mut value = vec![0.0; env.n_states()];
        let mut q_table = QTable::zeros(env.n_states(), env.n_actions());
        let mut iterations = 0;

        loop {
            let previous = value.clone();
            q_table.fill_from_values(env, &previous, self.gamma)?;

            let policy = q_table.greedy_policy();
            value = q_table.max_values();

            let diff = squared_distance(&value, &previous);
            iterations += 1;

            if iterations % 10 == 0 {
                debug!(iterations, diff, "value iteration sweep");
            }
            if diff < self.threshold {
                info!(iterations, "value iteration converged");
                return Ok(Solution::new(policy, value, iterations, Termination::Converged));
            }
            if iterations > self.max_iterations {
                info!(iterations, diff, "value iteration stopped at iteration cap");
                return Ok(Solution::new(
                    policy,
                    value,
                    iterations,
                    Termination::IterationCap,
                ));
            }
        }
    }

    fn name(&self) -> &str {
        "value-iteration"
    }
}
