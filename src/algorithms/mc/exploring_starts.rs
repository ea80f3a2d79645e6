//! Every-visit Monte Carlo control with exploring starts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::episode::{generate_episode, EveryVisitEstimator};
use crate::algorithms::params::{check_environment, check_gamma, check_positive};
use crate::algorithms::q_table::random_policy;
use crate::algorithms::{Solution, Solver, SolverError, Termination};
use crate::environment::Environment;

/// Monte Carlo exploring-starts solver (every-visit).
///
/// Every episode starts from a uniformly drawn `(state, action)` pair and then
/// follows the stored policy. Returns are folded into the Q-table with an
/// incremental mean at every visit, and the policy is replaced by the greedy
/// policy after each episode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloExploringStarts {
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Steps per episode.
    pub episode_length: usize,
    /// Number of episodes to sample.
    pub max_episodes: usize,
    /// Seed for the initial policy and the exploring starts.
    pub seed: u64,
}

impl MonteCarloExploringStarts {
    fn validate(&self) -> Result<(), SolverError> {
        check_gamma(self.gamma)?;
        check_positive("episode_length", self.episode_length as f64)
    }

    /// Runs all episodes and returns the estimator with the final policy.
    pub(crate) fn train(
        &self,
        env: &dyn Environment,
    ) -> Result<(EveryVisitEstimator, Vec<usize>), SolverError> {
        self.validate()?;
        check_environment(env)?;

        let (n_states, n_actions) = (env.n_states(), env.n_actions());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut policy = random_policy(&mut rng, n_states, n_actions);
        let mut estimator = EveryVisitEstimator::new(n_states, n_actions);

        for episode in 1..=self.max_episodes {
            let start_state = rng.gen_range(0..n_states);
            let start_action = rng.gen_range(0..n_actions);

            let steps = generate_episode(
                env,
                start_state,
                start_action,
                self.episode_length,
                |state| policy[state],
            )?;
            estimator.update(&steps, self.gamma);
            policy = estimator.q_table().greedy_policy();

            if episode % 500 == 0 {
                debug!(episode, "exploring starts episode done");
            }
        }

        Ok((estimator, policy))
    }
}

impl Default for MonteCarloExploringStarts {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            episode_length: 50,
            max_episodes: 50,
            seed: 42,
        }
    }
}

impl Solver for MonteCarloExploringStarts {
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError> {
        let (estimator, policy) = self.train(env)?;
        info!(episodes = self.max_episodes, "exploring starts finished");
        Ok(Solution::new(
            policy,
            estimator.q_table().max_values(),
            self.max_episodes,
            Termination::EpisodeBudget,
        ))
    }

    fn name(&self) -> &str {
        "mc-exploring-starts"
    }
}
