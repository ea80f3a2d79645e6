//! gridmdp - tabular solvers for deterministic grid-world MDPs
//!
//! A finite, fully observable grid world with forbidden and target cells,
//! solved by dynamic programming (value iteration, policy iteration) and
//! Monte Carlo control (basic, exploring starts, epsilon-greedy exploring
//! starts).
//!
//! ```
//! use gridmdp::algorithms::{Solver, ValueIteration};
//! use gridmdp::environment::{GridWorld, GridWorldConfig};
//!
//! let env = GridWorld::from_design(&["00", "0*"], &GridWorldConfig::default()).unwrap();
//! let solution = ValueIteration::default().solve(&env).unwrap();
//! assert_eq!(solution.policy.len(), env.n_states());
//! assert!(solution.termination.is_converged());
//! ```

pub mod algorithms;
pub mod environment;

pub use algorithms::{Solution, Solver, SolverError, Termination};
pub use environment::{Action, Environment, EnvironmentError, GridWorld, GridWorldConfig};
