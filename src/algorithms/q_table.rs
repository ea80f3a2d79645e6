//! Dense action-value table and the greedy helpers built on it.

use rand::Rng;

use crate::environment::{checked_transition, Environment, EnvironmentError};

/// Row-major `n_states x n_actions` table of action values.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    n_states: usize,
    n_actions: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Creates a table filled with zeros.
    pub fn zeros(n_states: usize, n_actions: usize) -> Self {
        Self {
            n_states,
            n_actions,
            values: vec![0.0; n_states * n_actions],
        }
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[state * self.n_actions + action]
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        self.values[state * self.n_actions + action] = value;
    }

    /// Action values of one state.
    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.n_actions;
        &self.values[start..start + self.n_actions]
    }

    /// Best action in `state`, lowest index on ties.
    pub fn greedy_action(&self, state: usize) -> usize {
        argmax(self.row(state))
    }

    /// Greedy action for every state.
    pub fn greedy_policy(&self) -> Vec<usize> {
        (0..self.n_states).map(|s| self.greedy_action(s)).collect()
    }

    /// `max_a Q[s][a]` for every state.
    pub fn max_values(&self) -> Vec<f64> {
        (0..self.n_states)
            .map(|s| self.row(s).iter().copied().fold(f64::NEG_INFINITY, f64::max))
            .collect()
    }

    /// One-step lookahead: `Q[s][a] = r + gamma * value[s']` for every pair.
    ///
    /// Reads only `value`, so every entry sees the same value vector.
    pub fn fill_from_values(
        &mut self,
        env: &dyn Environment,
        value: &[f64],
        gamma: f64,
    ) -> Result<(), EnvironmentError> {
        for state in 0..self.n_states {
            for action in 0..self.n_actions {
                let (next_state, reward) = checked_transition(env, state, action)?;
                self.set(state, action, reward + gamma * value[next_state]);
            }
        }
        Ok(())
    }
}

/// Index of the first maximum.
///
/// Returns 0 for an empty slice.
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

/// Sum of squared element-wise differences.
pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Uniformly random deterministic policy.
pub fn random_policy<R: Rng>(rng: &mut R, n_states: usize, n_actions: usize) -> Vec<usize> {
    (0..n_states).map(|_| rng.gen_range(0..n_actions)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::{GridWorld, GridWorldConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        assert_eq!(argmax(&[1.0, 3.0, 3.0, 2.0]), 1);
        assert_eq!(argmax(&[0.0, 0.0, 0.0]), 0);
        assert_eq!(argmax(&[-2.0, -1.0, -1.0]), 1);
        assert_eq!(argmax(&[]), 0);
    }

    #[test]
    fn greedy_policy_and_max_values() {
        let mut q = QTable::zeros(2, 3);
        q.set(0, 2, 1.5);
        q.set(1, 0, -1.0);
        q.set(1, 1, -0.5);
        q.set(1, 2, -0.5);
        assert_eq!(q.greedy_policy(), vec![2, 1]);
        assert_eq!(q.max_values(), vec![1.5, -0.5]);
        assert_eq!(q.row(1), &[-1.0, -0.5, -0.5]);
    }

    #[test]
    fn lookahead_uses_given_values() {
        let env = GridWorld::from_design(&["0*"], &GridWorldConfig::default()).unwrap();
        let mut q = QTable::zeros(2, 5);
        q.fill_from_values(&env, &[2.0, 4.0], 0.5).unwrap();
        // up from 0 bumps the border: -1 + 0.5 * 2
        assert_eq!(q.get(0, 0), 0.0);
        // right from 0 enters the target: 1 + 0.5 * 4
        assert_eq!(q.get(0, 1), 3.0);
        // stay in 0: 0 + 0.5 * 2
        assert_eq!(q.get(0, 4), 1.0);
        assert_eq!(q.greedy_action(0), 1);
    }

    #[test]
    fn squared_distance_sums_squares() {
        assert_eq!(squared_distance(&[1.0, 2.0], &[0.0, 4.0]), 5.0);
    }

    #[test]
    fn random_policy_in_range_and_seeded() {
        let a = random_policy(&mut StdRng::seed_from_u64(3), 50, 5);
        let b = random_policy(&mut StdRng::seed_from_u64(3), 50, 5);
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| x < 5));
    }
}
