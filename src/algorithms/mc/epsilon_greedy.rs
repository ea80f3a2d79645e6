//! Every-visit Monte Carlo control with exploring starts and epsilon-greedy
//! behaviour.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::episode::{generate_episode, EveryVisitEstimator};
use crate::algorithms::params::{
    check_environment, check_gamma, check_positive, check_probability,
};
use crate::algorithms::{Solution, Solver, SolverError, Termination};
use crate::environment::Environment;

/// Geometric exploration schedule.
///
/// After each episode `epsilon <- max(min_epsilon, epsilon * decay_rate)`
/// when decay is enabled; otherwise epsilon stays fixed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonSchedule {
    epsilon: f64,
    min_epsilon: f64,
    decay_rate: f64,
    decay: bool,
}

impl EpsilonSchedule {
    pub fn new(epsilon: f64, min_epsilon: f64, decay_rate: f64, decay: bool) -> Self {
        Self {
            epsilon,
            min_epsilon,
            decay_rate,
            decay,
        }
    }

    /// Exploration probability for the next episode.
    pub fn current(&self) -> f64 {
        self.epsilon
    }

    /// Advances the schedule by one episode.
    pub fn advance(&mut self) {
        if self.decay {
            self.epsilon = self.min_epsilon.max(self.epsilon * self.decay_rate);
        }
    }
}

/// Monte Carlo epsilon-greedy exploring-starts solver (every-visit).
///
/// Same every-visit update as
/// [`MonteCarloExploringStarts`](super::MonteCarloExploringStarts), but after
/// the forced first step actions are drawn epsilon-greedily from the Q-table
/// instead of from a stored policy. The returned policy is greedy in the
/// final Q-table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MonteCarloEpsilonGreedy {
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Steps per episode.
    pub episode_length: usize,
    /// Number of episodes to sample.
    pub max_episodes: usize,
    /// Initial exploration probability.
    pub epsilon: f64,
    /// Whether epsilon decays after each episode.
    pub epsilon_decay: bool,
    /// Floor for the decayed epsilon.
    pub min_epsilon: f64,
    /// Multiplicative decay per episode, in `(0, 1]`.
    pub epsilon_decay_rate: f64,
    /// Seed for the exploring starts and the exploration draws.
    pub seed: u64,
}

impl MonteCarloEpsilonGreedy {
    fn validate(&self) -> Result<(), SolverError> {
        check_gamma(self.gamma)?;
        check_positive("episode_length", self.episode_length as f64)?;
        check_probability("epsilon", self.epsilon)?;
        check_probability("min_epsilon", self.min_epsilon)?;
        check_positive("epsilon_decay_rate", self.epsilon_decay_rate)?;
        check_probability("epsilon_decay_rate", self.epsilon_decay_rate)
    }

    /// Schedule described by this configuration.
    pub fn schedule(&self) -> EpsilonSchedule {
        EpsilonSchedule::new(
            self.epsilon,
            self.min_epsilon,
            self.epsilon_decay_rate,
            self.epsilon_decay,
        )
    }

    /// Runs all episodes and returns the estimator with the final schedule.
    pub(crate) fn train(
        &self,
        env: &dyn Environment,
    ) -> Result<(EveryVisitEstimator, EpsilonSchedule), SolverError> {
        self.validate()?;
        check_environment(env)?;

        let (n_states, n_actions) = (env.n_states(), env.n_actions());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut estimator = EveryVisitEstimator::new(n_states, n_actions);
        let mut schedule = self.schedule();

        for episode in 1..=self.max_episodes {
            let start_state = rng.gen_range(0..n_states);
            let start_action = rng.gen_range(0..n_actions);
            let epsilon = schedule.current();

            let q_table = estimator.q_table();
            let steps = generate_episode(
                env,
                start_state,
                start_action,
                self.episode_length,
                |state| {
                    if rng.gen::<f64>() < epsilon {
                        rng.gen_range(0..n_actions)
                    } else {
                        q_table.greedy_action(state)
                    }
                },
            )?;
            estimator.update(&steps, self.gamma);
            schedule.advance();

            if episode % 500 == 0 {
                debug!(episode, epsilon = schedule.current(), "epsilon-greedy episode done");
            }
        }

        Ok((estimator, schedule))
    }
}

impl Default for MonteCarloEpsilonGreedy {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            episode_length: 50,
            max_episodes: 1500,
            epsilon: 0.5,
            epsilon_decay: true,
            min_epsilon: 0.01,
            epsilon_decay_rate: 0.9,
            seed: 42,
        }
    }
}

impl Solver for MonteCarloEpsilonGreedy {
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError> {
        let (estimator, schedule) = self.train(env)?;
        info!(
            episodes = self.max_episodes,
            epsilon = schedule.current(),
            "epsilon-greedy exploring starts finished"
        );
        let q_table = estimator.q_table();
        Ok(Solution::new(
            q_table.greedy_policy(),
            q_table.max_values(),
            self.max_episodes,
            Termination::EpisodeBudget,
        ))
    }

    fn name(&self) -> &str {
        "mc-epsilon-greedy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Action, GridWorld, GridWorldConfig};

    #[test]
    fn schedule_decays_to_floor() {
        let mut schedule = EpsilonSchedule::new(0.5, 0.01, 0.9, true);
        schedule.advance();
        assert!((schedule.current() - 0.45).abs() < 1e-12);
        for _ in 0..100 {
            schedule.advance();
        }
        assert_eq!(schedule.current(), 0.01);
    }

    #[test]
    fn schedule_without_decay_is_constant() {
        let mut schedule = EpsilonSchedule::new(0.3, 0.01, 0.5, false);
        for _ in 0..10 {
            schedule.advance();
        }
        assert_eq!(schedule.current(), 0.3);
    }

    #[test]
    fn training_applies_one_decay_per_episode() {
        let env = GridWorld::from_design(&["0*"], &GridWorldConfig::default()).unwrap();
        let solver = MonteCarloEpsilonGreedy {
            max_episodes: 5,
            epsilon: 0.8,
            min_epsilon: 0.0,
            epsilon_decay_rate: 0.5,
            ..MonteCarloEpsilonGreedy::default()
        };
        let (_, schedule) = solver.train(&env).unwrap();
        assert!((schedule.current() - 0.8 * 0.5f64.powi(5)).abs() < 1e-12);
    }

    #[test]
    fn accumulators_stay_consistent_with_q_table() {
        let env = GridWorld::random(&GridWorldConfig::default()).unwrap();
        let solver = MonteCarloEpsilonGreedy {
            max_episodes: 200,
            ..MonteCarloEpsilonGreedy::default()
        };
        let (estimator, _) = solver.train(&env).unwrap();
        for s in 0..env.n_states() {
            for a in 0..env.n_actions() {
                let count = estimator.returns_count(s, a);
                if count > 0 {
                    let mean = estimator.returns_sum(s, a) / count as f64;
                    assert!((estimator.q_table().get(s, a) - mean).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn zero_epsilon_rollouts_follow_greedy_q() {
        let env = GridWorld::random(&GridWorldConfig::default()).unwrap();
        let train = |episodes| {
            MonteCarloEpsilonGreedy {
                max_episodes: episodes,
                epsilon: 0.0,
                min_epsilon: 0.0,
                ..MonteCarloEpsilonGreedy::default()
            }
            .train(&env)
            .unwrap()
            .0
        };

        // The same seed replays the first k episodes, so the count difference
        // is exactly the visits of episode k + 1.
        for k in 0..10 {
            let before = train(k);
            let after = train(k + 1);
            let mut total = 0;
            let mut off_greedy = 0;
            for s in 0..env.n_states() {
                for a in 0..env.n_actions() {
                    let visits = after.returns_count(s, a) - before.returns_count(s, a);
                    total += visits;
                    if a != before.q_table().greedy_action(s) {
                        off_greedy += visits;
                    }
                }
            }
            assert_eq!(total, 50);
            // Only the forced start pair may leave the greedy action.
            assert!(off_greedy <= 1, "episode {}: {off_greedy} off-greedy visits", k + 1);
        }
    }

    #[test]
    fn single_target_cell_learns_to_stay() {
        let env = GridWorld::from_design(&["*"], &GridWorldConfig::default()).unwrap();
        let solver = MonteCarloEpsilonGreedy {
            gamma: 0.5,
            episode_length: 10,
            max_episodes: 200,
            ..MonteCarloEpsilonGreedy::default()
        };
        let solution = solver.solve(&env).unwrap();
        assert_eq!(solution.termination, Termination::EpisodeBudget);
        assert_eq!(solution.policy, vec![Action::Stay.index()]);
        assert!(solution.value[0] > 0.0);
    }

    #[test]
    fn rejects_out_of_range_epsilon() {
        let env = GridWorld::from_design(&["*"], &GridWorldConfig::default()).unwrap();
        let solver = MonteCarloEpsilonGreedy {
            epsilon: 1.5,
            ..MonteCarloEpsilonGreedy::default()
        };
        assert!(matches!(
            solver.solve(&env),
            Err(SolverError::InvalidHyperparameter {
                name: "epsilon",
                ..
            })
        ));
        let solver = MonteCarloEpsilonGreedy {
            epsilon_decay_rate: 0.0,
            ..MonteCarloEpsilonGreedy::default()
        };
        assert!(matches!(
            solver.solve(&env),
            Err(SolverError::InvalidHyperparameter {
                name: "epsilon_decay_rate",
                ..
            })
        ));
    }
}
