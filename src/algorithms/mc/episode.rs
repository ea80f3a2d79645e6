//! Episode generation and every-visit return accumulation.

use crate::algorithms::q_table::QTable;
use crate::environment::{checked_transition, Environment, EnvironmentError};

/// One recorded transition of an episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub state: usize,
    pub action: usize,
    pub reward: f64,
}

/// Rolls out `length` steps from `(start_state, start_action)`.
///
/// The first step uses `start_action`; every later action is chosen by
/// `next_action` from the state just reached.
pub fn generate_episode<F>(
    env: &dyn Environment,
    start_state: usize,
    start_action: usize,
    length: usize,
    mut next_action: F,
) -> Result<Vec<Step>, EnvironmentError>
where
    F: FnMut(usize) -> usize,
{
    let mut steps = Vec::with_capacity(length);
    let mut state = start_state;
    let mut action = start_action;

    for t in 0..length {
        let (next_state, reward) = checked_transition(env, state, action)?;
        steps.push(Step {
            state,
            action,
            reward,
        });
        state = next_state;
        if t + 1 < length {
            action = next_action(state);
        }
    }

    Ok(steps)
}

/// Every-visit Monte Carlo estimate of `Q(s, a)`.
///
/// Keeps the running return sum and visit count of every pair next to the
/// Q-table. For visited pairs `Q[s][a] == returns_sum / returns_count` up to
/// rounding.
#[derive(Debug, Clone)]
pub struct EveryVisitEstimator {
    q_table: QTable,
    returns_sum: Vec<f64>,
    returns_count: Vec<u64>,
}

impl EveryVisitEstimator {
    pub fn new(n_states: usize, n_actions: usize) -> Self {
        Self {
            q_table: QTable::zeros(n_states, n_actions),
            returns_sum: vec![0.0; n_states * n_actions],
            returns_count: vec![0; n_states * n_actions],
        }
    }

    /// Folds one episode into the estimate.
    ///
    /// Walks the episode backward with `G <- gamma * G + r_t` and applies an
    /// incremental-mean update at every occurrence of each pair.
    pub fn update(&mut self, episode: &[Step], gamma: f64) {
        let n_actions = self.q_table.n_actions();
        let mut g = 0.0;
        for step in episode.iter().rev() {
            g = gamma * g + step.reward;

            let idx = step.state * n_actions + step.action;
            self.returns_sum[idx] += g;
            self.returns_count[idx] += 1;

            let q = self.q_table.get(step.state, step.action);
            let count = self.returns_count[idx] as f64;
            self.q_table.set(step.state, step.action, q + (g - q) / count);
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn returns_sum(&self, state: usize, action: usize) -> f64 {
        self.returns_sum[state * self.q_table.n_actions() + action]
    }

    pub fn returns_count(&self, state: usize, action: usize) -> u64 {
        self.returns_count[state * self.q_table.n_actions() + action]
    }
}
