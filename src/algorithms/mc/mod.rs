//! Sample-based Monte Carlo control.
//!
//! - [`MonteCarloBasic`] re-simulates one rollout per state-action pair each
//!   iteration.
//! - [`MonteCarloExploringStarts`] and [`MonteCarloEpsilonGreedy`] sample
//!   episodes from random starts and average returns at every visit.

mod basic;
mod epsilon_greedy;
pub mod episode;
mod exploring_starts;

pub use basic::MonteCarloBasic;
pub use epsilon_greedy::{EpsilonSchedule, MonteCarloEpsilonGreedy};
pub use episode::{EveryVisitEstimator, Step};
pub use exploring_starts::MonteCarloExploringStarts;
