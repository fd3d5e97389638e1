//! Goban-Record: a Go game recorder.
//!
//! This crate keeps an in-memory record of a game of Go: the board position
//! after every move, the branching tree of variations that led there, and
//! the match metadata. Records can be written to and read from SGF FF[4].
//!
//! ## Modules
//!
//! - [`constants`] - Program identity, SGF property names, handicap points
//! - [`coord`] - Board coordinates and pass
//! - [`board`] - Stone colors and the raw grid (groups, liberties, captures)
//! - [`position`] - Immutable positions and move legality (suicide, ko)
//! - [`tree`] - The branching move tree
//! - [`game`] - Game records: tree, cursor and metadata
//! - [`sgf`] - SGF serialization and parsing
//! - [`playout`] - Random legal games
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use goban_record::board::Color;
//! use goban_record::coord::{Coordinate, Vertex};
//! use goban_record::game::GameRecord;
//! use goban_record::sgf;
//!
//! let mut record = GameRecord::new(9);
//! record.info_mut().black_name = "Lee".into();
//!
//! record.play(Color::Black, Vertex::Point(Coordinate::at(4, 4))).unwrap();
//! record.play(Color::White, Vertex::Point(Coordinate::at(4, 5))).unwrap();
//!
//! // Occupied points are rejected and nothing changes
//! let err = record.play(Color::Black, Vertex::Point(Coordinate::at(4, 4)));
//! assert!(err.is_err());
//!
//! let text = sgf::serialize(&record);
//! assert!(text.starts_with("(;FF[4]GM[1]"));
//! assert!(text.contains(";B[ee];W[ed]"));
//! ```

pub mod board;
pub mod constants;
pub mod coord;
pub mod error;
pub mod game;
pub mod playout;
pub mod position;
pub mod sgf;
pub mod tree;

pub use error::{Error, MoveRejected, RejectReason};
