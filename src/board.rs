//! Stone colors and the raw 2D grid.
//!
//! [`Board`] is a plain grid with in-place stone placement and capture.
//! It is the scratch space [`Position`](crate::position::Position) uses to
//! compute successors; positions themselves never mutate a board once it
//! has been shared.

use std::collections::HashSet;
use std::fmt;

use crate::coord::Coordinate;
use crate::error::RejectReason;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// SGF property identifier for a move of this color.
    pub fn sgf_letter(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("black"),
            Color::White => f.write_str("white"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, c: Coordinate) -> usize {
        c.y() as usize * self.size + c.x() as usize
    }

    pub fn contains(&self, c: Coordinate) -> bool {
        (c.x() as usize) < self.size && (c.y() as usize) < self.size
    }

    /// Stone at `c`, or `None` for an empty or off-board point.
    pub fn get(&self, c: Coordinate) -> Option<Color> {
        if !self.contains(c) {
            return None;
        }
        self.cells[self.idx(c)]
    }

    /// Put a stone (or nothing) at an on-board point without any rule checks.
    pub(crate) fn set(&mut self, c: Coordinate, stone: Option<Color>) {
        let i = self.idx(c);
        self.cells[i] = stone;
    }

    /// On-board 4-connected neighbours. No wraparound at the edges.
    pub fn neighbors(&self, c: Coordinate) -> std::vec::IntoIter<Coordinate> {
        let s = self.size as u32;
        let (x, y) = (c.x(), c.y());
        let mut v = Vec::with_capacity(4);
        if x > 0 {
            v.push(Coordinate::at(x - 1, y));
        }
        if x + 1 < s {
            v.push(Coordinate::at(x + 1, y));
        }
        if y > 0 {
            v.push(Coordinate::at(x, y - 1));
        }
        if y + 1 < s {
            v.push(Coordinate::at(x, y + 1));
        }
        v.into_iter()
    }

    /// All stones on the board with their colors, bottom row first.
    pub fn stones(&self) -> impl Iterator<Item = (Coordinate, Color)> + '_ {
        let s = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| (Coordinate::at((i % s) as u32, (i / s) as u32), color))
        })
    }

    /// Place `color` at `c`, removing opponent groups left without liberties.
    ///
    /// Returns the captured stones. On error the board is left as it was.
    pub fn play(&mut self, c: Coordinate, color: Color) -> Result<Vec<Coordinate>, RejectReason> {
        if !self.contains(c) {
            return Err(RejectReason::OffBoard);
        }
        if self.get(c).is_some() {
            return Err(RejectReason::Occupied);
        }
        self.set(c, Some(color));

        let opp = color.opponent();
        let mut to_remove: Vec<Coordinate> = Vec::new();
        for n in self.neighbors(c) {
            if self.get(n) == Some(opp) && !to_remove.contains(&n) && self.group_liberties(n) == 0 {
                self.collect_group(n, &mut to_remove);
            }
        }
        for &r in &to_remove {
            self.set(r, None);
        }

        if to_remove.is_empty() && self.group_liberties(c) == 0 {
            self.set(c, None); // undo suicidal move
            return Err(RejectReason::Suicide);
        }
        Ok(to_remove)
    }

    /// Every stone of the group containing `c`; empty if `c` holds no stone.
    pub fn group(&self, c: Coordinate) -> Vec<Coordinate> {
        let mut out = Vec::new();
        if self.get(c).is_some() {
            self.collect_group(c, &mut out);
        }
        out
    }

    fn collect_group(&self, start: Coordinate, out: &mut Vec<Coordinate>) -> usize {
        let color = self.get(start);
        let mut stack = vec![start];
        let mut visited = vec![false; self.size * self.size];
        let mut count = 0;
        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            if self.get(pt) == color {
                out.push(pt);
                count += 1;
                for n in self.neighbors(pt) {
                    if !visited[self.idx(n)] && self.get(n) == color {
                        stack.push(n);
                    }
                }
            }
        }
        count
    }

    /// Distinct empty points adjacent to the group containing `c`.
    pub fn liberties(&self, c: Coordinate) -> HashSet<Coordinate> {
        let mut libs = HashSet::new();
        for stone in self.group(c) {
            libs.extend(self.neighbors(stone).filter(|&n| self.get(n).is_none()));
        }
        libs
    }

    /// Count distinct liberties of the group at `start`, 0 for an empty point.
    fn group_liberties(&self, start: Coordinate) -> usize {
        let Some(color) = self.get(start) else {
            return 0;
        };
        let mut stack = vec![start];
        let mut visited = vec![false; self.size * self.size];
        let mut liberty_visited = vec![false; self.size * self.size];
        let mut liberties = 0;
        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for n in self.neighbors(pt) {
                let ni = self.idx(n);
                match self.get(n) {
                    None => {
                        if !liberty_visited[ni] {
                            liberty_visited[ni] = true;
                            liberties += 1;
                        }
                    }
                    Some(c) if c == color && !visited[ni] => stack.push(n),
                    _ => {}
                }
            }
        }
        liberties
    }

    /// First stone found whose group has no liberties.
    pub(crate) fn find_dead_stone(&self) -> Option<Coordinate> {
        self.stones()
            .map(|(c, _)| c)
            .find(|&c| self.group_liberties(c) == 0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..self.size).rev() {
            for x in 0..self.size {
                let ch = match self.get(Coordinate::at(x as u32, y as u32)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
