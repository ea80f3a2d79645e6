//! Monte Carlo basic: one deterministic rollout per state-action pair.

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithms::params::{check_environment, check_gamma, check_positive};
use crate::algorithms::q_table::{random_policy, QTable};
use crate::algorithms::{Solution, Solver, SolverError, Termination};
use crate::environment::{checked_transition, Environment, EnvironmentError};

/// Monte Carlo basic solver.
///
/// Each outer iteration refills the whole Q-table: for every `(s, a)` it
/// rolls out `episode_length` steps starting with `a` and following the
/// current policy afterwards, and stores the discounted return. Because
/// transitions are deterministic one rollout is an exact sample, so no
/// averaging is done. The run converges when the greedy policy stops
/// changing; with a long enough rollout it reaches the value-iteration fixed
/// point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloBasic {
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Steps per rollout.
    pub episode_length: usize,
    /// Cap on whole-table refills.
    pub max_iterations: usize,
    /// Seed for the initial policy.
    pub seed: u64,
}

impl MonteCarloBasic {
    fn validate(&self) -> Result<(), SolverError> {
        check_gamma(self.gamma)?;
        check_positive("episode_length", self.episode_length as f64)
    }

    /// Discounted return of one rollout.
    fn rollout_return(
        &self,
        env: &dyn Environment,
        policy: &[usize],
        start_state: usize,
        start_action: usize,
    ) -> Result<f64, EnvironmentError> {
        let mut state = start_state;
        let mut action = start_action;
        let mut discount = 1.0;
        let mut total = 0.0;

        for _ in 0..self.episode_length {
            let (next_state, reward) = checked_transition(env, state, action)?;
            total += discount * reward;
            discount *= self.gamma;
            state = next_state;
            action = policy[state];
        }

        Ok(total)
    }
}

impl Default for MonteCarloBasic {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            episode_length: 50,
            max_iterations: 200,
            seed: 42,
        }
    }
}

impl Solver for MonteCarloBasic {
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError> {
        self.validate()?;
        check_environment(env)?;

        let (n_states, n_actions) = (env.n_states(), env.n_actions());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut policy = random_policy(&mut rng, n_states, n_actions);
        let mut q_table = QTable::zeros(n_states, n_actions);
        let mut iterations = 0;

        loop {
            for state in 0..n_states {
                for action in 0..n_actions {
                    let ret = self.rollout_return(env, &policy, state, action)?;
                    q_table.set(state, action, ret);
                }
            }

            let new_policy = q_table.greedy_policy();
            let stable = new_policy == policy;
            policy = new_policy;
            let value = q_table.max_values();

            iterations += 1;
            if iterations % 10 == 0 {
                debug!(iterations, "monte carlo basic refill");
            }
            if stable {
                info!(iterations, "monte carlo basic converged");
                return Ok(Solution::new(policy, value, iterations, Termination::Converged));
            }
            if iterations >= self.max_iterations {
                info!(iterations, "monte carlo basic stopped at iteration cap");
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
        "mc-basic"
    }
}
