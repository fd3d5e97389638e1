//! Board coordinates.
//!
//! A [`Coordinate`] is a point on a Cartesian grid with (0,0) at the
//! lower-left corner of the board. It knows nothing about board size;
//! bounds are checked by [`Position`](crate::position::Position).
//! A pass is not a coordinate: it is the [`Vertex::Pass`] variant.

use std::fmt;

use crate::error::{Error, Result};

/// An immutable (x, y) grid location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    x: u32,
    y: u32,
}

impl Coordinate {
    /// Create a coordinate, rejecting negative axes.
    pub fn new(x: i32, y: i32) -> Result<Self> {
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) => Ok(Self { x, y }),
            _ => Err(Error::InvalidCoordinate { x, y }),
        }
    }

    /// Create a coordinate from axes that are already known to be valid.
    pub const fn at(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal distance from the left edge.
    pub const fn x(self) -> u32 {
        self.x
    }

    /// Vertical distance from the bottom edge.
    pub const fn y(self) -> u32 {
        self.y
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Coordinate {
    fn from((x, y): (u32, u32)) -> Self {
        Self::at(x, y)
    }
}

/// Where a move goes: a board point, or nowhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertex {
    Point(Coordinate),
    Pass,
}

impl Vertex {
    /// The coordinate, if this is not a pass.
    pub fn point(self) -> Option<Coordinate> {
        match self {
            Vertex::Point(c) => Some(c),
            Vertex::Pass => None,
        }
    }

    pub fn is_pass(self) -> bool {
        self == Vertex::Pass
    }
}

impl From<Coordinate> for Vertex {
    fn from(c: Coordinate) -> Self {
        Vertex::Point(c)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vertex::Point(c) => fmt::Display::fmt(c, f),
            Vertex::Pass => f.write_str("pass"),
        }
    }
}
