//! Random game generation.
//!
//! Plays uniformly random legal moves from the record's cursor. Used by the
//! `demo` command and to stress the tree and the SGF round trip.

use fastrand::Rng;
use tracing::debug;

use crate::board::Color;
use crate::coord::{Coordinate, Vertex};
use crate::game::GameRecord;
use crate::position::Position;

/// True if every on-board neighbour of `c` holds a `color` stone.
///
/// Filling such a point only destroys one's own eye, so random play skips it.
/// This may also match false eyes.
fn is_own_eyeish(pos: &Position, c: Coordinate, color: Color) -> bool {
    pos.board().neighbors(c).all(|n| pos.get(n) == Some(color))
}

/// Pick a random legal move for `color`, or `None` if only passing is left.
pub fn choose_random_move(pos: &Position, color: Color, rng: &mut Rng) -> Option<Coordinate> {
    let size = pos.size() as u32;
    let mut candidates: Vec<Coordinate> = (0..size)
        .flat_map(|y| (0..size).map(move |x| Coordinate::at(x, y)))
        .filter(|&c| pos.get(c).is_none() && !is_own_eyeish(pos, c, color))
        .collect();

    // Shuffle lazily and stop at the first legal candidate
    let n = candidates.len();
    for i in 0..n {
        let j = rng.usize(i..n);
        candidates.swap(i, j);
        if pos.is_legal(candidates[i], color) {
            return Some(candidates[i]);
        }
    }
    None
}

/// Play up to `max_moves` random moves from the cursor, alternating colors.
///
/// Passes when no move is left; two consecutive passes end the game.
/// Returns the number of moves played, passes included.
pub fn random_game(record: &mut GameRecord, max_moves: usize, rng: &mut Rng) -> usize {
    let mut passes = 0;
    let mut played = 0;

    while passes < 2 && played < max_moves {
        let color = record.to_move();
        let vertex = match choose_random_move(record.current_position(), color, rng) {
            Some(c) => {
                passes = 0;
                Vertex::Point(c)
            }
            None => {
                passes += 1;
                Vertex::Pass
            }
        };
        if let Err(rejected) = record.play(color, vertex) {
            // choose_random_move only returns legal points
            debug!(%rejected, "random move rejected");
            break;
        }
        played += 1;
    }
    debug!(played, nodes = record.len(), "random game finished");
    played
}
