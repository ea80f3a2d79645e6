//! Policy iteration with in-place (Gauss-Seidel) policy evaluation.

use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::algorithms::params::{check_environment, check_gamma, check_positive};
use crate::algorithms::q_table::{random_policy, QTable};
use crate::algorithms::{Solution, Solver, SolverError, Termination};
use crate::environment::{checked_transition, Environment, EnvironmentError};

/// Policy iteration solver.
///
/// Starts from a random policy drawn from `seed`. Each outer iteration
/// evaluates the current policy for at most `max_policy_evaluations` sweeps,
/// then improves it greedily. The run converges when improvement leaves the
/// policy unchanged.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolicyIteration {
    /// Discount factor in `(0, 1]`.
    pub gamma: f64,
    /// Early-exit tolerance for one evaluation sweep.
    pub threshold: f64,
    /// Cap on outer (evaluate + improve) iterations.
    pub max_iterations: usize,
    /// Cap on evaluation sweeps per outer iteration.
    pub max_policy_evaluations: usize,
    /// Seed for the initial policy.
    pub seed: u64,
}

impl PolicyIteration {
    fn validate(&self) -> Result<(), SolverError> {
        check_gamma(self.gamma)?;
        check_positive("threshold", self.threshold)
    }

    /// Evaluates `policy` in place and returns the residual of the last sweep.
    ///
    /// States are updated in index order and later states read the values
    /// already written in the same sweep. When the sweep cap cuts evaluation
    /// short, the returned values therefore differ from those of a Jacobi
    /// evaluation that reads only the previous sweep.
    fn evaluate(
        &self,
        env: &dyn Environment,
        policy: &[usize],
        value: &mut [f64],
    ) -> Result<f64, EnvironmentError> {
        let mut residual = 0.0;
        for _ in 0..self.max_policy_evaluations {
            residual = 0.0;
            for state in 0..value.len() {
                let (next_state, reward) = checked_transition(env, state, policy[state])?;
                let old = value[state];
                value[state] = reward + self.gamma * value[next_state];
                residual += (value[state] - old).powi(2);
            }
            if residual < self.threshold {
                break;
            }
        }
        Ok(residual)
    }
}

impl Default for PolicyIteration {
    fn default() -> Self {
        Self {
            gamma: 0.9,
            threshold: 1e-6,
            max_iterations: 200,
            max_policy_evaluations: 50,
            seed: 42,
        }
    }
}

impl Solver for PolicyIteration {
    fn solve(&self, env: &dyn Environment) -> Result<Solution, SolverError> {
        self.validate()?;
        check_environment(env)?;

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut policy = random_policy(&mut rng, env.n_states(), env.n_actions());
        let mut value = vec![0.0; env.n_states()];
        let mut q_table = QTable::zeros(env.n_states(), env.n_actions());
        let mut iterations = 0;

        loop {
            let residual = self.evaluate(env, &policy, &mut value)?;

            q_table.fill_from_values(env, &value, self.gamma)?;
            let new_policy = q_table.greedy_policy();
            let stable = new_policy == policy;
            policy = new_policy;

            iterations += 1;
            if iterations % 10 == 0 {
                debug!(iterations, residual, "policy iteration step");
            }
            if stable {
                info!(iterations, "policy iteration converged");
                return Ok(Solution::new(policy, value, iterations, Termination::Converged));
            }
            if iterations >= self.max_iterations {
                info!(iterations, "policy iteration stopped at iteration cap");
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
        "policy-iteration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{Action, GridWorld, GridWorldConfig};

    /// Two states in a line: 0 -> 1 with action 1, everything else self-loops.
    struct Chain;

    impl Environment for Chain {
        fn n_states(&self) -> usize {
            2
        }

        fn n_actions(&self) -> usize {
            2
        }

        fn transition(
            &self,
            state: usize,
            action: usize,
        ) -> Result<(usize, f64), EnvironmentError> {
            match (state, action) {
                (0, 1) => Ok((1, 0.0)),
                (1, _) => Ok((1, 1.0)),
                (s, _) => Ok((s, 0.0)),
            }
        }
    }

    #[test]
    fn evaluation_reads_values_written_earlier_in_the_sweep() {
        // State 0 moves to state 1 (reward 0), state 1 moves to state 0 (reward 1).
        struct Swap;
        impl Environment for Swap {
            fn n_states(&self) -> usize {
                2
            }
            fn n_actions(&self) -> usize {
                1
            }
            fn transition(
                &self,
                state: usize,
                _action: usize,
            ) -> Result<(usize, f64), EnvironmentError> {
                Ok((1 - state, state as f64))
            }
        }

        let solver = PolicyIteration {
            gamma: 0.5,
            max_policy_evaluations: 1,
            ..PolicyIteration::default()
        };
        let mut value = vec![0.0, 0.0];
        solver.evaluate(&Swap, &[0, 0], &mut value).unwrap();
        // V[0] = 0 + 0.5 * 0 = 0, then V[1] = 1 + 0.5 * V[0] = 1
        assert_eq!(value, vec![0.0, 1.0]);

        solver.evaluate(&Swap, &[0, 0], &mut value).unwrap();
        // V[0] = 0.5 * 1 = 0.5, then V[1] = 1 + 0.5 * 0.5 = 1.25
        assert_eq!(value, vec![0.5, 1.25]);
    }

    #[test]
    fn chain_policy_moves_toward_reward() {
        let solver = PolicyIteration {
            gamma: 0.5,
            threshold: 1e-12,
            max_policy_evaluations: 500,
            ..PolicyIteration::default()
        };
        let solution = solver.solve(&Chain).unwrap();
        assert!(solution.termination.is_converged());
        assert_eq!(solution.policy, vec![1, 0]);
        assert!((solution.value[1] - 2.0).abs() < 1e-6);
        assert!((solution.value[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn target_single_cell_stays() {
        let env = GridWorld::from_design(&["*"], &GridWorldConfig::default()).unwrap();
        let solution = PolicyIteration::default().solve(&env).unwrap();
        assert!(solution.termination.is_converged());
        assert_eq!(solution.policy, vec![Action::Stay.index()]);
    }

    #[test]
    fn iteration_cap_is_reported() {
        let env = GridWorld::random(&GridWorldConfig::default()).unwrap();
        let solver = PolicyIteration {
            max_iterations: 1,
            max_policy_evaluations: 1,
            ..PolicyIteration::default()
        };
        let solution = solver.solve(&env).unwrap();
        assert_eq!(solution.iterations, 1);
        // A single one-sweep evaluation cannot confirm stability of a random start.
        assert_eq!(solution.termination, Termination::IterationCap);
    }

    #[test]
    fn same_seed_same_solution() {
        let env = GridWorld::random(&GridWorldConfig::default()).unwrap();
        let solver = PolicyIteration::default();
        assert_eq!(solver.solve(&env).unwrap(), solver.solve(&env).unwrap());
    }
}
