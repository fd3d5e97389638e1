//! The branching move tree.
//!
//! Nodes live in an arena ([`MoveTree`]) and refer to each other by
//! [`NodeId`]. Children are owned through the arena in insertion order
//! (the first child is the main line); the parent link is a plain handle
//! used for navigation only.

use tracing::debug;

use crate::board::Color;
use crate::coord::{Coordinate, Vertex};
use crate::error::{Error, MoveRejected, Result};
use crate::position::Position;

/// Handle to a node inside one [`MoveTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);

    /// Arena index of this node; the root is 0.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The move a node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Root,
    Place { color: Color, at: Coordinate },
    Pass { color: Color },
}

impl Move {
    pub fn new(color: Color, vertex: Vertex) -> Self {
        match vertex {
            Vertex::Point(at) => Move::Place { color, at },
            Vertex::Pass => Move::Pass { color },
        }
    }
}

/// A node in the game tree.
#[derive(Debug, Clone)]
pub struct MoveNode {
    mv: Move,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    position: Position,
    comment: Option<String>,
}

impl MoveNode {
    pub fn is_root(&self) -> bool {
        self.mv == Move::Root
    }

    pub fn mv(&self) -> Move {
        self.mv
    }

    /// Color of the move, `None` at the root.
    pub fn color(&self) -> Option<Color> {
        match self.mv {
            Move::Root => None,
            Move::Place { color, .. } | Move::Pass { color } => Some(color),
        }
    }

    /// Where the move was played, `None` at the root.
    pub fn vertex(&self) -> Option<Vertex> {
        match self.mv {
            Move::Root => None,
            Move::Place { at, .. } => Some(Vertex::Point(at)),
            Move::Pass { .. } => Some(Vertex::Pass),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    /// The `i`-th variation (0 is the main line).
    pub fn next_at(&self, i: usize) -> Result<NodeId> {
        self.children.get(i).copied().ok_or(Error::IndexOutOfRange {
            index: i,
            len: self.children.len(),
        })
    }

    /// The main-line continuation, `None` at a leaf.
    pub fn next(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    /// Position after this node's move.
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Arena owning every node of one game tree.
#[derive(Debug, Clone)]
pub struct MoveTree {
    nodes: Vec<MoveNode>,
}

impl MoveTree {
    /// A tree holding only a root with the given starting position.
    pub fn new(start: Position) -> Self {
        Self {
            nodes: vec![MoveNode {
                mv: Move::Root,
                parent: None,
                children: Vec::new(),
                position: start,
                comment: None,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node.
    ///
    /// # Panics
    /// If `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> &MoveNode {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Play `color` at `vertex` from node `at`.
    ///
    /// On success the new node is appended as the last child of `at` (the
    /// main line if it is the first). An identical existing child is
    /// returned instead of adding a duplicate variation. Passing is always
    /// legal. On rejection the tree is unchanged.
    pub fn propose(&mut self, at: NodeId, color: Color, vertex: Vertex) -> Result<NodeId, MoveRejected> {
        let mv = Move::new(color, vertex);
        if let Some(&existing) = self.nodes[at.0]
            .children
            .iter()
            .find(|&&child| self.nodes[child.0].mv == mv)
        {
            return Ok(existing);
        }

        let parent_pos = &self.nodes[at.0].position;
        let position = match vertex {
            Vertex::Point(c) => parent_pos.apply(c, color).inspect_err(|rejected| {
                debug!(%rejected, node = at.0, "move rejected");
            })?,
            Vertex::Pass => parent_pos.pass(),
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(MoveNode {
            mv,
            parent: Some(at),
            children: Vec::new(),
            position,
            comment: None,
        });
        self.nodes[at.0].children.push(id);
        debug!(
            node = id.0,
            parent = at.0,
            %color,
            %vertex,
            variation = self.nodes[at.0].children.len() - 1,
            "move added"
        );
        Ok(id)
    }

    /// Replace (or clear, with an empty string) the comment on a node.
    pub fn set_comment(&mut self, id: NodeId, comment: impl Into<String>) {
        let comment = comment.into();
        self.nodes[id.0].comment = if comment.is_empty() { None } else { Some(comment) };
    }

    /// Nodes from the root down to `id`, both included.
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut node = id;
        while let Some(parent) = self.nodes[node.0].parent {
            path.push(parent);
            node = parent;
        }
        path.reverse();
        path
    }

    /// Main-line nodes after `from`, following first children.
    pub fn line_from(&self, from: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[from.0].next(), |&id| self.nodes[id.0].next())
    }

    /// Number of branch points with more than one child.
    pub fn variation_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.children.len().saturating_sub(1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: u32, y: u32) -> Vertex {
        Vertex::Point(Coordinate::at(x, y))
    }

    #[test]
    fn test_fresh_tree() {
        let tree = MoveTree::new(Position::empty(9));
        let root = tree.node(tree.root());
        assert!(root.is_root());
        assert_eq!(root.num_children(), 0);
        assert_eq!(root.next(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(root.color(), None);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_propose_appends_child() {
        let mut tree = MoveTree::new(Position::empty(9));
        let root = tree.root();
        let b = tree.propose(root, Color::Black, pt(4, 4)).unwrap();

        assert_eq!(tree.node(root).num_children(), 1);
        assert_eq!(tree.node(root).next(), Some(b));
        assert_eq!(tree.node(b).parent(), Some(root));
        assert_eq!(tree.node(b).color(), Some(Color::Black));
        assert_eq!(tree.node(b).vertex(), Some(pt(4, 4)));
        assert_eq!(
            tree.node(b).position().get(Coordinate::at(4, 4)),
            Some(Color::Black)
        );
    }

    #[test]
    fn test_variations_keep_order() {
        let mut tree = MoveTree::new(Position::empty(9));
        let root = tree.root();
        let first = tree.propose(root, Color::Black, pt(2, 2)).unwrap();
        let second = tree.propose(root, Color::Black, pt(6, 6)).unwrap();
        let again = tree.propose(root, Color::Black, pt(2, 2)).unwrap();

        assert_eq!(again, first);
        assert_eq!(tree.node(root).children(), &[first, second]);
        assert_eq!(tree.node(root).next_at(1).unwrap(), second);
        assert_eq!(
            tree.node(root).next_at(2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(tree.variation_count(), 1);
    }

    #[test]
    fn test_rejection_leaves_tree_unchanged() {
        let mut tree = MoveTree::new(Position::empty(9));
        let root = tree.root();
        let b = tree.propose(root, Color::Black, pt(4, 4)).unwrap();
        let err = tree.propose(b, Color::White, pt(4, 4)).unwrap_err();

        assert_eq!(err.coordinate, Coordinate::at(4, 4));
        assert_eq!(&err.position, tree.node(b).position());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.node(b).num_children(), 0);
    }

    #[test]
    fn test_pass_keeps_stones() {
        let mut tree = MoveTree::new(Position::empty(9));
        let b = tree.propose(tree.root(), Color::Black, pt(4, 4)).unwrap();
        let p = tree.propose(b, Color::White, Vertex::Pass).unwrap();

        assert_eq!(tree.node(p).mv(), Move::Pass { color: Color::White });
        assert_eq!(
            tree.node(p).position().board(),
            tree.node(b).position().board()
        );
    }

    #[test]
    fn test_path_and_line() {
        let mut tree = MoveTree::new(Position::empty(9));
        let root = tree.root();
        let a = tree.propose(root, Color::Black, pt(2, 2)).unwrap();
        let b = tree.propose(a, Color::White, pt(6, 6)).unwrap();
        let c = tree.propose(b, Color::Black, pt(2, 6)).unwrap();
        let side = tree.propose(a, Color::White, pt(6, 2)).unwrap();

        assert_eq!(tree.path_to(c), vec![root, a, b, c]);
        assert_eq!(tree.path_to(side), vec![root, a, side]);
        assert_eq!(tree.line_from(root).collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(tree.line_from(c).count(), 0);
    }

    #[test]
    fn test_comment() {
        let mut tree = MoveTree::new(Position::empty(9));
        let root = tree.root();
        tree.set_comment(root, "opening");
        assert_eq!(tree.node(root).comment(), Some("opening"));
        tree.set_comment(root, "");
        assert_eq!(tree.node(root).comment(), None);
    }
}
