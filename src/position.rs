//! Go position representation and move legality.
//!
//! A [`Position`] is an immutable snapshot of the stones on the board.
//! Playing a move never changes a position; it produces a successor:
//! - Place the stone
//! - Remove opponent groups left without liberties
//! - Reject the move if its own group then has no liberties (suicide)
//! - Reject the move if the board would repeat the one before the
//!   opponent's last move (basic ko)
//!
//! Boards are shared behind [`Arc`], so cloning a position or keeping one
//! per tree node is cheap.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::board::{Board, Color};
use crate::coord::Coordinate;
use crate::error::{Error, MoveRejected, RejectReason, Result};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    /// Stones after the last move
    board: Arc<Board>,
    /// Stones before the last move (the ko reference), `None` at the start
    previous: Option<Arc<Board>>,
}

impl Position {
    /// The empty board.
    pub fn empty(size: usize) -> Self {
        Self {
            board: Arc::new(Board::new(size)),
            previous: None,
        }
    }

    /// A starting position with setup stones (handicap or problem setup).
    ///
    /// # Errors
    /// `InvalidSetup` if a stone is off the board, placed twice, or part of
    /// a group with no liberties.
    pub fn setup(size: usize, stones: &[(Coordinate, Color)]) -> Result<Self> {
        let mut board = Board::new(size);
        for &(c, color) in stones {
            if !board.contains(c) {
                return Err(Error::InvalidSetup {
                    coordinate: c,
                    reason: RejectReason::OffBoard,
                });
            }
            if board.get(c).is_some() {
                return Err(Error::InvalidSetup {
                    coordinate: c,
                    reason: RejectReason::Occupied,
                });
            }
            board.set(c, Some(color));
        }
        if let Some(c) = board.find_dead_stone() {
            return Err(Error::InvalidSetup {
                coordinate: c,
                reason: RejectReason::Suicide,
            });
        }
        Ok(Self {
            board: Arc::new(board),
            previous: None,
        })
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// Stone at `c`, `None` for an empty or off-board point.
    pub fn get(&self, c: Coordinate) -> Option<Color> {
        self.board.get(c)
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        self.board.contains(c)
    }

    /// All stones on the board.
    pub fn stones(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        self.board.stones()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_legal(&self, c: Coordinate, color: Color) -> bool {
        self.resolve(c, color).is_ok()
    }

    /// Play `color` at `c` and return the resulting position.
    ///
    /// # Errors
    /// `MoveRejected` carrying `c` and a copy of `self` if the point is off
    /// the board, occupied, a ko retake, or suicide.
    pub fn apply(&self, c: Coordinate, color: Color) -> Result<Position, MoveRejected> {
        match self.resolve(c, color) {
            Ok(board) => Ok(Position {
                board: Arc::new(board),
                previous: Some(Arc::clone(&self.board)),
            }),
            Err(reason) => Err(MoveRejected {
                coordinate: c,
                color,
                reason,
                position: self.clone(),
            }),
        }
    }

    /// The position after a pass: same stones, no ko restriction.
    pub fn pass(&self) -> Position {
        Position {
            board: Arc::clone(&self.board),
            previous: Some(Arc::clone(&self.board)),
        }
    }

    /// Liberties of the group holding the stone at `c`.
    ///
    /// Empty for an empty or off-board point.
    pub fn liberties_of(&self, c: Coordinate) -> HashSet<Coordinate> {
        self.board.liberties(c)
    }

    /// Stones of the group containing `c`.
    pub fn group_of(&self, c: Coordinate) -> Vec<Coordinate> {
        self.board.group(c)
    }

    fn resolve(&self, c: Coordinate, color: Color) -> Result<Board, RejectReason> {
        let mut next = Board::clone(&self.board);
        next.play(c, color)?;
        if self.previous.as_deref() == Some(&next) {
            return Err(RejectReason::Ko);
        }
        Ok(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
