//! Grid-world environment model.
//!
//! Holds the immutable reward map and the one-step transition function
//! consumed by every solver. Solvers see the model only through the
//! [`Environment`] trait.

pub mod config;
pub mod error;
pub mod grid;
mod render;
pub mod types;

pub use config::GridWorldConfig;
pub use error::EnvironmentError;
pub use grid::{GridWorld, BOUNDARY_PENALTY};
pub use types::{Action, Cell};

/// A finite deterministic MDP with integer states and actions.
///
/// Implementations must be pure: `transition` takes `&self` and returns the
/// same result for the same input, so a model can be shared by concurrent
/// solver runs.
pub trait Environment: Send + Sync {
    /// Number of states. Valid states are `0..n_states()`.
    fn n_states(&self) -> usize;

    /// Number of actions available in every state.
    fn n_actions(&self) -> usize;

    /// Applies `action` in `state`, returning `(next_state, reward)`.
    fn transition(&self, state: usize, action: usize) -> Result<(usize, f64), EnvironmentError>;
}

/// Calls [`Environment::transition`] and checks that the returned state is in
/// range.
///
/// # Errors
///
/// Whatever `transition` returns, or [`EnvironmentError::InvalidState`]
/// naming the out-of-range next state.
pub fn checked_transition(
    env: &dyn Environment,
    state: usize,
    action: usize,
) -> Result<(usize, f64), EnvironmentError> {
    let n_states = env.n_states();
    let (next_state, reward) = env.transition(state, action)?;
    if next_state >= n_states {
        return Err(EnvironmentError::InvalidState {
            state: next_state,
            n_states,
        });
    }
    Ok((next_state, reward))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OffByOne;

    impl Environment for OffByOne {
        fn n_states(&self) -> usize {
            3
        }
        fn n_actions(&self) -> usize {
            1
        }
        fn transition(&self, state: usize, _: usize) -> Result<(usize, f64), EnvironmentError> {
            Ok((state + 1, 0.5))
        }
    }

    #[test]
    fn checked_transition_passes_valid_results_through() {
        assert_eq!(checked_transition(&OffByOne, 1, 0), Ok((2, 0.5)));
    }

    #[test]
    fn checked_transition_rejects_out_of_range_next_state() {
        assert_eq!(
            checked_transition(&OffByOne, 2, 0),
            Err(EnvironmentError::InvalidState {
                state: 3,
                n_states: 3
            })
        );
    }
}
