pub mod dp;
pub mod error;
pub mod mc;
pub(crate) mod params;
pub mod q_table;
pub mod solution;


pub use dp::{PolicyIteration, ValueIteration};
pub use error::SolverError;
pub use mc::{MonteCarloBasic, MonteCarloEpsilonGreedy, MonteCarloExploringStarts};
pub use q_table::QTable;
pub use solution::{Solution, Termination};

use crate::environment::Environment;

/// Algorithm that computes a policy and value function for an environment.
///
/// Each solver is a pure function of the environment and its own
/// hyperparameters: every call builds fresh tables, and randomized solvers
/// draw only from a generator seeded by their configuration, so repeated
/// calls return identical solutions.
pub trait Solver {
    /// Solves `env`.
    ///
    /// # Returns
    ///
    /// A [`Solution`] whose policy and value vectors are indexed by state.
    /// Hitting an iteration cap still returns `Ok`, flagged through
    /// [`Solution::termination`].
    ///
    /// # Errors
    ///
    /// * [`SolverError::InvalidHyperparameter`] for out-of-range settings
    /// * [`SolverError::EmptyEnvironment`] if there are no states or actions
    /// * [`SolverError::Environment`] if the model rejects a transition
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError>;

    /// Short identifier used in logs and by the demo driver.
    fn name(&self) -> &str;
}
