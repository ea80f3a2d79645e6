//! Solver output: a policy, its value function and how the run ended.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Termination {
    /// The stability criterion fired (value change below threshold, or an
    /// unchanged policy).
    Converged,
    /// The iteration cap was reached first. The result is the best estimate
    /// so far.
    IterationCap,
    /// A fixed-budget sampler ran all of its episodes. These solvers have no
    /// stability criterion.
    EpisodeBudget,
}

impl Termination {
    pub fn is_converged(&self) -> bool {
        matches!(self, Termination::Converged)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::IterationCap => write!(f, "stopped at iteration cap"),
            Termination::EpisodeBudget => write!(f, "episode budget exhausted"),
        }
    }
}

/// Policy and value function produced by a solver.
///
/// Both vectors are indexed by state in row-major order
/// (`state = row * columns + col`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    /// Action chosen in each state.
    pub policy: Vec<usize>,
    /// Estimated return from each state.
    pub value: Vec<f64>,
    /// Sweeps, outer iterations or episodes performed, depending on the solver.
    pub iterations: usize,
    /// How the run ended.
    pub termination: Termination,
}

impl Solution {
    pub fn new(
        policy: Vec<usize>,
        value: Vec<f64>,
        iterations: usize,
        termination: Termination,
    ) -> Self {
        Self {
            policy,
            value,
            iterations,
            termination,
        }
    }

    /// Number of states covered by this solution.
    pub fn n_states(&self) -> usize {
        self.policy.len()
    }
}
