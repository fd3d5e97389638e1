//! Error types for the board, the game tree, and SGF parsing.
//!
//! All errors are recoverable values. A rejected move never changes the
//! position or the tree it was checked against.

use thiserror::Error;

use crate::board::Color;
use crate::coord::Coordinate;
use crate::position::Position;

/// Why a placement was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectReason {
    /// Point lies outside the board
    #[error("point is off the board")]
    OffBoard,
    /// Point is not empty
    #[error("point is not empty")]
    Occupied,
    /// Move would restore the board from before the opponent's last move
    #[error("retakes ko")]
    Ko,
    /// Move would leave its own group without liberties after captures
    #[error("suicide")]
    Suicide,
}

/// A move refused by [`Position::apply`].
///
/// Carries the offending coordinate and the position it was checked
/// against, so a caller can explain the rejection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move: {color} at {coordinate}: {reason}")]
pub struct MoveRejected {
    pub coordinate: Coordinate,
    pub color: Color,
    pub reason: RejectReason,
    pub position: Position,
}

/// Crate-wide error type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A coordinate axis was negative
    #[error("invalid coordinate ({x},{y}): axes must be non-negative")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error(transparent)]
    MoveRejected(#[from] Box<MoveRejected>),

    /// Child index beyond the number of children
    #[error("variation index {index} out of range ({len} children)")]
    IndexOutOfRange { index: usize, len: usize },

    /// SGF text that does not follow the FF[4] grammar or this crate's subset
    #[error("malformed SGF at byte {offset}: {message}")]
    MalformedSgf { offset: usize, message: String },

    /// Setup stones that cannot form a legal position
    #[error("invalid setup at {coordinate}: {reason}")]
    InvalidSetup {
        coordinate: Coordinate,
        reason: RejectReason,
    },
}

impl From<MoveRejected> for Error {
    fn from(rejected: MoveRejected) -> Self {
        Error::MoveRejected(Box::new(rejected))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
