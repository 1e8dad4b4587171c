//! Error types for the flood engine.
//!
//! None of these are fatal: a rejected move or an empty undo leaves the session
//! exactly as it was, and a bad configuration never builds a session at all.

use thiserror::Error;

use crate::config::{MAX_CELLS, MAX_STRAINS, MIN_SIDE, MIN_STRAINS};
use crate::types::Strain;

/// A game configuration that cannot produce a board.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid must be at least {min}x{min}, got {width}x{height}", min = MIN_SIDE)]
    GridTooSmall { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds {max} cells", max = MAX_CELLS)]
    GridTooLarge { width: usize, height: usize },

    #[error(
        "strain count must be within {lo}..={hi}, got {strains}",
        lo = MIN_STRAINS,
        hi = MAX_STRAINS
    )]
    StrainCount { strains: u8 },

    /// A supplied board does not match its configuration.
    #[error("board is {width}x{height} with {cells} cells, expected {expected_width}x{expected_height}")]
    BoardShape {
        width: usize,
        height: usize,
        cells: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("cell {index} holds strain {strain}, but the board has {strains} strains")]
    CellStrain { index: usize, strain: Strain, strains: u8 },
}

/// A move the session refused to apply.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveRejected {
    /// The infected region already has this strain.
    #[error("strain {strain} is already the infected strain")]
    SameStrain { strain: Strain },

    #[error("the grid is already fully infected")]
    AlreadyWon,

    #[error("strain {strain} does not exist (board has {strains} strains)")]
    UnknownStrain { strain: Strain, strains: u8 },

    /// A picked cell lies outside the grid.
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: usize, y: usize },
}

/// A score store that could not persist a change.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend refused the write or removal, e.g. a full quota.
    #[error("storage rejected {key}: {reason}")]
    Rejected { key: String, reason: String },

    #[error("storage has no {method} method")]
    Unsupported { method: &'static str },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoError {
    #[error("no move to undo")]
    EmptyHistory,
}
