//! Configuration for grid-world construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::EnvironmentError;

/// Parameters used to build a [`GridWorld`](super::GridWorld).
///
/// `rows`, `columns`, `seed` and the two cell counts only matter for random
/// generation; a literal design fixes the dimensions and layout itself. The
/// two scores apply to both construction paths.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridWorldConfig {
    /// Number of grid rows.
    pub rows: usize,
    /// Number of grid columns.
    pub columns: usize,
    /// Seed for the random layout shuffle.
    pub seed: u64,
    /// Number of forbidden cells placed by random generation.
    pub forbidden_area_nums: usize,
    /// Reward for entering a forbidden cell.
    pub forbidden_area_score: f64,
    /// Number of target cells placed by random generation.
    pub target_nums: usize,
    /// Reward for entering a target cell.
    pub target_score: f64,
}

impl GridWorldConfig {
    /// Total number of cells for the configured dimensions.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::InvalidDimensions`] if either dimension is zero
    ///   or the product does not fit in `usize`
    pub fn n_cells(&self) -> Result<usize, EnvironmentError> {
        match self.rows.checked_mul(self.columns) {
            Some(n) if n > 0 => Ok(n),
            _ => Err(EnvironmentError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            }),
        }
    }
}

impl Default for GridWorldConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 5,
            seed: 42,
            forbidden_area_nums: 4,
            forbidden_area_score: -1.0,
            target_nums: 1,
            target_score: 1.0,
        }
    }
}
