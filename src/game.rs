//! Game records: the move tree, a play cursor, and match metadata.

use tracing::trace;

use crate::board::Color;
use crate::constants::{handicap_points, star_points, DEFAULT_KOMI, MAX_SIZE};
use crate::coord::{Coordinate, Vertex};
use crate::error::{Error, MoveRejected, Result};
use crate::position::Position;
use crate::tree::{MoveNode, MoveTree, NodeId};

/// Match metadata. Text fields default to the empty string.
#[derive(Debug, Clone, PartialEq)]
pub struct GameInfo {
    pub game_name: String,
    pub event: String,
    pub result: String,
    pub date: String,
    pub place: String,
    /// Free-text notes about the game (SGF `GC`)
    pub notes: String,
    pub white_name: String,
    /// Traditional rank, e.g. "3d" or "5k"
    pub white_rank: String,
    pub black_name: String,
    pub black_rank: String,
    pub handicap: u32,
    /// Points given to White
    pub komi: f32,
    pub ruleset: String,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            game_name: String::new(),
            event: String::new(),
            result: String::new(),
            date: String::new(),
            place: String::new(),
            notes: String::new(),
            white_name: String::new(),
            white_rank: String::new(),
            black_name: String::new(),
            black_rank: String::new(),
            handicap: 0,
            komi: DEFAULT_KOMI,
            ruleset: String::new(),
        }
    }
}

/// A recorded game.
///
/// Owns the whole move tree. The cursor marks the node that [`play`]
/// attaches to; moving it never deletes anything, so variations survive
/// undo.
///
/// [`play`]: GameRecord::play
#[derive(Debug, Clone)]
pub struct GameRecord {
    tree: MoveTree,
    cursor: NodeId,
    size: usize,
    info: GameInfo,
}

impl GameRecord {
    /// A record starting from the empty board.
    ///
    /// # Panics
    /// If `size` is 0 or larger than [`MAX_SIZE`].
    pub fn new(size: usize) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&size),
            "board size must be between 1 and {MAX_SIZE}, got {size}"
        );
        Self::from_position(Position::empty(size))
    }

    /// A record whose root holds setup stones.
    pub fn with_setup(size: usize, stones: &[(Coordinate, Color)]) -> Result<Self> {
        assert!(
            (1..=MAX_SIZE).contains(&size),
            "board size must be between 1 and {MAX_SIZE}, got {size}"
        );
        Ok(Self::from_position(Position::setup(size, stones)?))
    }

    /// A record with `stones` black handicap stones on the standard star
    /// points. White moves first.
    ///
    /// # Errors
    /// `IndexOutOfRange` if the board has no fixed layout for that many stones.
    pub fn with_handicap(size: usize, stones: u32) -> Result<Self> {
        let points = handicap_points(size, stones as usize);
        if points.is_empty() {
            return Err(Error::IndexOutOfRange {
                index: stones as usize,
                len: star_points(size).len(),
            });
        }
        let setup: Vec<(Coordinate, Color)> = points
            .into_iter()
            .map(|p| (Coordinate::from(p), Color::Black))
            .collect();
        let mut record = Self::with_setup(size, &setup)?;
        record.info.handicap = stones;
        Ok(record)
    }

    fn from_position(start: Position) -> Self {
        let size = start.size();
        let tree = MoveTree::new(start);
        Self {
            cursor: tree.root(),
            tree,
            size,
            info: GameInfo::default(),
        }
    }

    pub fn board_size(&self) -> usize {
        self.size
    }

    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut GameInfo {
        &mut self.info
    }

    pub fn tree(&self) -> &MoveTree {
        &self.tree
    }

    /// Root of the move tree.
    pub fn moves_root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn node(&self, id: NodeId) -> &MoveNode {
        self.tree.node(id)
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True when no move has been recorded.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Propose a move from any node without touching the cursor.
    pub fn propose(&mut self, at: NodeId, color: Color, vertex: Vertex) -> Result<NodeId, MoveRejected> {
        self.tree.propose(at, color, vertex)
    }

    pub fn current(&self) -> NodeId {
        self.cursor
    }

    pub fn current_node(&self) -> &MoveNode {
        self.tree.node(self.cursor)
    }

    pub fn current_position(&self) -> &Position {
        self.current_node().position()
    }

    /// Color to play at the cursor.
    pub fn to_move(&self) -> Color {
        match self.current_node().color() {
            Some(color) => color.opponent(),
            None if self.info.handicap >= 2 => Color::White,
            None => Color::Black,
        }
    }

    /// Play at the cursor and advance to the new (or existing) child.
    pub fn play(&mut self, color: Color, vertex: Vertex) -> Result<NodeId, MoveRejected> {
        let id = self.tree.propose(self.cursor, color, vertex)?;
        self.cursor = id;
        Ok(id)
    }

    /// Play for whoever is to move.
    pub fn play_next(&mut self, vertex: Vertex) -> Result<NodeId, MoveRejected> {
        self.play(self.to_move(), vertex)
    }

    /// Step the cursor back to the parent. Returns `None` at the root.
    pub fn undo(&mut self) -> Option<NodeId> {
        let parent = self.current_node().parent()?;
        trace!(from = self.cursor.index(), to = parent.index(), "undo");
        self.cursor = parent;
        Some(parent)
    }

    /// Step the cursor forward into variation `i` (0 is the main line).
    pub fn redo(&mut self, i: usize) -> Result<NodeId> {
        let child = self.current_node().next_at(i)?;
        trace!(from = self.cursor.index(), to = child.index(), "redo");
        self.cursor = child;
        Ok(child)
    }

    /// Put the cursor on any node of this record.
    pub fn goto(&mut self, id: NodeId) {
        trace!(from = self.cursor.index(), to = id.index(), "goto");
        self.cursor = id;
    }

    pub fn set_comment(&mut self, id: NodeId, comment: impl Into<String>) {
        self.tree.set_comment(id, comment);
    }

    /// Main-line nodes after the root.
    pub fn main_line(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tree.line_from(self.tree.root())
    }

    /// Nodes from the root down to `id`, both included.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        self.tree.path_to(id)
    }

    /// Moves (passes included) played to reach `id`.
    pub fn move_number(&self, id: NodeId) -> usize {
        self.tree.path_to(id).len() - 1
    }
}
