//! Core types for the grid-world environment.
//!
//! Defines the five movement actions and the cell kinds that make up the
//! reward map.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::EnvironmentError;

/// Movement action of the agent.
///
/// The discriminant is the action index used by policies and Q-tables:
/// `Up = 0`, `Right = 1`, `Down = 2`, `Left = 3`, `Stay = 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Up,
    Right,
    Down,
    Left,
    Stay,
}

impl Action {
    /// Number of actions available in every state.
    pub const COUNT: usize = 5;

    /// Returns all actions in index order.
    pub fn all() -> [Action; Self::COUNT] {
        [
            Action::Up,
            Action::Right,
            Action::Down,
            Action::Left,
            Action::Stay,
        ]
    }

    /// Returns the index of this action.
    pub fn index(&self) -> usize {
        match self {
            Action::Up => 0,
            Action::Right => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Stay => 4,
        }
    }

    /// Looks up the action with the given index.
    pub fn from_index(index: usize) -> Result<Self, EnvironmentError> {
        Self::all()
            .get(index)
            .copied()
            .ok_or(EnvironmentError::InvalidAction {
                action: index,
                n_actions: Self::COUNT,
            })
    }

    /// Displacement `(d_row, d_col)` applied by this action.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Stay => (0, 0),
        }
    }

    /// Emoji arrow used when rendering a policy grid.
    pub fn symbol(&self) -> &'static str {
        match self {
            Action::Up => "⏫",
            Action::Right => "⏩",
            Action::Down => "⏬",
            Action::Left => "⏪",
            Action::Stay => "🔄",
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = EnvironmentError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Action::from_index(index)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Up => write!(f, "up"),
            Action::Right => write!(f, "right"),
            Action::Down => write!(f, "down"),
            Action::Left => write!(f, "left"),
            Action::Stay => write!(f, "stay"),
        }
    }
}

/// Kind of a grid cell, which determines the reward for entering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Cell {
    #[default]
    Free,
    Forbidden,
    Target,
}

impl Cell {
    /// Parses a design character: `#` is forbidden, `*` is a target and
    /// anything else is free.
    pub fn from_design_char(ch: char) -> Self {
        match ch {
            '#' => Cell::Forbidden,
            '*' => Cell::Target,
            _ => Cell::Free,
        }
    }

    /// Emoji used when rendering the map.
    pub fn symbol(&self) -> &'static str {
        match self {
            Cell::Free => "⬜️",
            Cell::Forbidden => "❌",
            Cell::Target => "✅",
        }
    }
}
