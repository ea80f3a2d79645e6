//! Deterministic grid-world MDP.
//!
//! The reward map is fixed at construction and exposed read-only; the
//! transition function is a pure lookup over it.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::config::GridWorldConfig;
use super::error::EnvironmentError;
use super::types::{Action, Cell};
use super::Environment;

/// Reward for a move that would leave the grid. The agent stays in place.
pub const BOUNDARY_PENALTY: f64 = -1.0;

/// A rectangular grid world with forbidden and target cells.
///
/// States are row-major cell indices, `state = row * columns + col`.
/// Entering a cell yields that cell's reward; bumping into the border yields
/// [`BOUNDARY_PENALTY`] and leaves the state unchanged.
///
/// # Construction
///
/// * [`GridWorld::from_design`] parses a literal layout.
/// * [`GridWorld::random`] places cells over a seeded shuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct GridWorld {
    rows: usize,
    columns: usize,
    cells: Vec<Cell>,
    forbidden_score: f64,
    target_score: f64,
}

impl GridWorld {
    /// Creates a randomly generated grid world. Same as [`GridWorld::random`].
    pub fn new(config: &GridWorldConfig) -> Result<Self, EnvironmentError> {
        Self::random(config)
    }

    /// Builds a grid world from a literal layout.
    ///
    /// Each string is one row: `#` marks a forbidden cell, `*` a target and
    /// any other character a free cell. Dimensions come from the design;
    /// only the scores are read from `config`.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::EmptyDesign`] if there are no rows or the first row is empty
    /// * [`EnvironmentError::RaggedDesign`] if rows differ in length
    pub fn from_design<S: AsRef<str>>(
        design: &[S],
        config: &GridWorldConfig,
    ) -> Result<Self, EnvironmentError> {
        let columns = design
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or(0);
        if columns == 0 {
            return Err(EnvironmentError::EmptyDesign);
        }

        let mut cells = Vec::with_capacity(design.len() * columns);
        for (i, row) in design.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != columns {
                return Err(EnvironmentError::RaggedDesign {
                    row: i,
                    expected: columns,
                    found,
                });
            }
            cells.extend(row.chars().map(Cell::from_design_char));
        }

        debug!(rows = design.len(), columns, "loaded grid design");

        Ok(Self {
            rows: design.len(),
            columns,
            cells,
            forbidden_score: config.forbidden_area_score,
            target_score: config.target_score,
        })
    }

    /// Generates a layout by shuffling all cell indices with a seeded RNG.
    ///
    /// The first `forbidden_area_nums` shuffled cells become forbidden and the
    /// last `target_nums` become targets. When the two ranges overlap the
    /// target wins.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::InvalidDimensions`] for a zero-sized or overflowing grid
    /// * [`EnvironmentError::TooManySpecialCells`] if either count exceeds the cell count
    pub fn random(config: &GridWorldConfig) -> Result<Self, EnvironmentError> {
        let n = config.n_cells()?;
        let requested = config.forbidden_area_nums.max(config.target_nums);
        if requested > n {
            return Err(EnvironmentError::TooManySpecialCells {
                requested,
                available: n,
            });
        }

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(&mut rng);

        let mut cells = vec![Cell::Free; n];
        for &i in &order[..config.forbidden_area_nums] {
            cells[i] = Cell::Forbidden;
        }
        for &i in &order[n - config.target_nums..] {
            cells[i] = Cell::Target;
        }

        debug!(
            rows = config.rows,
            columns = config.columns,
            seed = config.seed,
            "generated random grid"
        );

        Ok(Self {
            rows: config.rows,
            columns: config.columns,
            cells,
            forbidden_score: config.forbidden_area_score,
            target_score: config.target_score,
        })
    }

    /// Applies `action` in `state` and returns `(next_state, reward)`.
    ///
    /// A move that would cross the border keeps the agent in `state` and
    /// yields [`BOUNDARY_PENALTY`], whatever the current cell's reward.
    ///
    /// # Errors
    ///
    /// * [`EnvironmentError::InvalidState`] if `state >= n_states()`
    /// * [`EnvironmentError::InvalidAction`] if `action >= n_actions()`
    pub fn transition(
        &self,
        state: usize,
        action: usize,
    ) -> Result<(usize, f64), EnvironmentError> {
        let (row, col) = self.coordinates(state)?;
        let (d_row, d_col) = Action::from_index(action)?.delta();

        let next_row = row.checked_add_signed(d_row).filter(|&r| r < self.rows);
        let next_col = col.checked_add_signed(d_col).filter(|&c| c < self.columns);

        match (next_row, next_col) {
            (Some(r), Some(c)) => {
                let next_state = r * self.columns + c;
                Ok((next_state, self.reward_of(self.cells[next_state])))
            }
            _ => Ok((state, BOUNDARY_PENALTY)),
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of states (`rows * columns`).
    pub fn n_states(&self) -> usize {
        self.rows * self.columns
    }

    /// Number of actions, always [`Action::COUNT`].
    pub fn n_actions(&self) -> usize {
        Action::COUNT
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.columns {
            Some(self.cells[row * self.columns + col])
        } else {
            None
        }
    }

    /// Reward for entering `(row, col)`, or `None` outside the grid.
    pub fn reward_at(&self, row: usize, col: usize) -> Option<f64> {
        self.cell(row, col).map(|cell| self.reward_of(cell))
    }

    /// Reward associated with a cell kind.
    pub fn reward_of(&self, cell: Cell) -> f64 {
        match cell {
            Cell::Free => 0.0,
            Cell::Forbidden => self.forbidden_score,
            Cell::Target => self.target_score,
        }
    }

    /// Reward for entering a forbidden cell.
    pub fn forbidden_score(&self) -> f64 {
        self.forbidden_score
    }

    /// Reward for entering a target cell.
    pub fn target_score(&self) -> f64 {
        self.target_score
    }

    /// Decomposes a state into `(row, col)`.
    pub fn coordinates(&self, state: usize) -> Result<(usize, usize), EnvironmentError> {
        if state >= self.n_states() {
            return Err(EnvironmentError::InvalidState {
                state,
                n_states: self.n_states(),
            });
        }
        Ok((state / self.columns, state % self.columns))
    }

    /// Flattens `(row, col)` into a state index, or `None` outside the grid.
    pub fn state_index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }
}

impl Environment for GridWorld {
    fn n_states(&self) -> usize {
        GridWorld::n_states(self)
    }

    fn n_actions(&self) -> usize {
        GridWorld::n_actions(self)
    }

    fn transition(&self, state: usize, action: usize) -> Result<(usize, f64), EnvironmentError> {
        GridWorld::transition(self, state, action)
    }
}
