//! Grid coordinates and their two-character token form (`A1`..`E5`).

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use super::config::{COL_LABELS, GRID_SIZE, ROW_LABELS};

/// Why a token is not a legal position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Anything that is not exactly one row letter followed by one column digit.
    #[error("{0:?} is not a two-character position like B2")]
    Shape(String),
    #[error("row {0:?} is outside A-E")]
    Row(char),
    #[error("column {0:?} is outside 1-5")]
    Column(char),
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
}

/// A validated cell on the 5×5 grid, stored zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(try_from = "String", into = "String"))]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Build from zero-based row and column indices.
    pub fn new(row: usize, col: usize) -> Result<Self, PositionError> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return Err(PositionError::OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    /// Parse a token such as `"E3"`. Surrounding whitespace is ignored and
    /// lowercase letters are accepted.
    pub fn parse(token: &str) -> Result<Self, PositionError> {
        let trimmed = token.trim();
        let mut chars = trimmed.chars();
        let (row_ch, col_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(c), None) => (r.to_ascii_uppercase(), c),
            _ => return Err(PositionError::Shape(trimmed.to_string())),
        };
        let row = ROW_LABELS
            .iter()
            .position(|&l| l == row_ch)
            .ok_or(PositionError::Row(row_ch))?;
        let col = COL_LABELS
            .iter()
            .position(|&l| l == col_ch)
            .ok_or(PositionError::Column(col_ch))?;
        Self::new(row, col)
    }

    pub fn row(&self) -> usize {
        self.row as usize
    }

    pub fn col(&self) -> usize {
        self.col as usize
    }

    /// Every legal cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|r| {
            (0..GRID_SIZE).map(move |c| Position {
                row: r as u8,
                col: c as u8,
            })
        })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW_LABELS[self.row()], COL_LABELS[self.col()])
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::parse(s)
    }
}

impl TryFrom<String> for Position {
    type Error = PositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Position::parse(&value)
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}
