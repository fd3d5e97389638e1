//! SGF (Smart Game Format, FF[4]) reading and writing.
//!
//! ## Writing
//!
//! [`serialize`] renders a header, the game-info block, and then the move
//! tree. A node with one child continues the current sequence; a node with
//! several children wraps each child subtree in parentheses:
//!
//! ```text
//! (;FF[4]GM[1] ... ;B[pd](;W[dp];B[pp])(;W[pp]))
//! ```
//!
//! ## Reading
//!
//! [`parse`] reads the first game tree of a collection and replays its
//! moves through [`GameRecord::propose`], so illegal moves in the file are
//! reported as [`Error::MoveRejected`].
//!
//! ## Points
//!
//! Columns map to `a`, `b`, ... from the left edge; rows map to `a`, `b`,
//! ... from the top edge, so (0,0) on a 19x19 board is `as`.
//!
//! ## Example
//!
//! ```
//! use goban_record::coord::{Coordinate, Vertex};
//! use goban_record::game::GameRecord;
//! use goban_record::sgf;
//!
//! let mut record = GameRecord::new(9);
//! record.play_next(Vertex::Point(Coordinate::at(4, 4))).unwrap();
//! let text = sgf::serialize(&record);
//! assert!(text.contains(";B[ee]"));
//!
//! let back = sgf::parse(&text).unwrap();
//! assert_eq!(back.main_line().count(), 1);
//! ```

use std::path::Path;

use tracing::debug;

use crate::board::Color;
use crate::constants::*;
use crate::coord::{Coordinate, Vertex};
use crate::error::{Error, Result};
use crate::game::GameRecord;
use crate::tree::{Move, NodeId};

// =============================================================================
// Points and escaping
// =============================================================================

/// Encode an on-board coordinate as two SGF letters.
pub fn encode_point(c: Coordinate, size: usize) -> String {
    debug_assert!((c.x() as usize) < size && (c.y() as usize) < size);
    let col = (b'a' + c.x() as u8) as char;
    let row = (b'a' + (size - 1 - c.y() as usize) as u8) as char;
    format!("{col}{row}")
}

/// Decode two SGF letters into a coordinate on a `size` board.
///
/// Returns `None` for anything that is not exactly two in-range letters.
pub fn decode_point(s: &str, size: usize) -> Option<Coordinate> {
    let &[col, row] = s.as_bytes() else {
        return None;
    };
    let x = col.checked_sub(b'a')? as usize;
    let from_top = row.checked_sub(b'a')? as usize;
    if x >= size || from_top >= size {
        return None;
    }
    Some(Coordinate::at(x as u32, (size - 1 - from_top) as u32))
}

/// Escape a text value: `]`, `\` and `:` get a leading backslash.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, ']' | '\\' | ':') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// True if `path` names an SGF file (`.sgf`, any case).
pub fn is_sgf_path(path: impl AsRef<Path>) -> bool {
    let Some(name) = path.as_ref().file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let suffix = format!(".{SGF_EXTENSION}");
    name.len() >= suffix.len()
        && name.as_bytes()[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

// =============================================================================
// Writing
// =============================================================================

fn push_prop(out: &mut String, ident: &str, value: &str) {
    out.push_str(ident);
    out.push('[');
    out.push_str(&escape(value));
    out.push(']');
}

fn push_points(out: &mut String, ident: &str, points: &[Coordinate], size: usize) {
    if points.is_empty() {
        return;
    }
    out.push_str(ident);
    for &p in points {
        out.push('[');
        out.push_str(&encode_point(p, size));
        out.push(']');
    }
    out.push('\n');
}

/// Render a game record as SGF FF[4] text.
pub fn serialize(record: &GameRecord) -> String {
    let info = record.info();
    let size = record.board_size();
    let mut out = String::new();

    out.push_str(&format!(
        "(;{FILEFORMAT}[{FORMAT_VERSION}]{GAMETYPE}[{GAME_GO}]\n\n"
    ));
    out.push_str(&format!("{APPLICATION}[{PROG_NAME}:{VERSION}]\n\n"));

    push_prop(&mut out, GAMENAME, &info.game_name);
    out.push('\n');
    push_prop(&mut out, EVENT, &info.event);
    out.push('\n');
    push_prop(&mut out, RESULT, &info.result);
    out.push('\n');
    push_prop(&mut out, DATE, &info.date);
    out.push(' ');
    push_prop(&mut out, PLACE, &info.place);
    out.push('\n');
    push_prop(&mut out, GAMEINFO, &info.notes);
    out.push_str("\n\n");

    push_prop(&mut out, PLAYERWHITE, &info.white_name);
    out.push(' ');
    push_prop(&mut out, WHITERANK, &info.white_rank);
    out.push('\n');
    push_prop(&mut out, PLAYERBLACK, &info.black_name);
    out.push(' ');
    push_prop(&mut out, BLACKRANK, &info.black_rank);
    out.push_str("\n\n");

    out.push_str(&format!(
        "{HANDICAP}[{}] {KOMI}[{}] {SIZE}[{size}]\n",
        info.handicap, info.komi
    ));
    push_prop(&mut out, RULES, &info.ruleset);
    out.push('\n');

    let root = record.node(record.moves_root());
    let (black, white): (Vec<_>, Vec<_>) =
        root.position().stones().partition(|&(_, color)| color == Color::Black);
    let black: Vec<Coordinate> = black.into_iter().map(|(c, _)| c).collect();
    let white: Vec<Coordinate> = white.into_iter().map(|(c, _)| c).collect();
    push_points(&mut out, ADD_BLACK, &black, size);
    push_points(&mut out, ADD_WHITE, &white, size);
    if let Some(comment) = root.comment() {
        push_prop(&mut out, COMMENT, comment);
        out.push('\n');
    }
    out.push('\n');

    write_moves(record, &mut out);

    out.push_str(")\n");
    out
}

enum Step {
    Node(NodeId),
    Open,
    Close,
}

/// Render the move tree with an explicit stack, depth first, children in
/// insertion order.
fn write_moves(record: &GameRecord, out: &mut String) {
    let size = record.board_size();
    let mut stack = vec![Step::Node(record.moves_root())];

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Open => {
                out.push('(');
                continue;
            }
            Step::Close => {
                out.push(')');
                continue;
            }
            Step::Node(id) => id,
        };

        let node = record.node(id);
        match node.mv() {
            Move::Root => {}
            Move::Place { color, at } => {
                out.push(';');
                out.push(color.sgf_letter());
                out.push('[');
                out.push_str(&encode_point(at, size));
                out.push(']');
            }
            Move::Pass { color } => {
                out.push(';');
                out.push(color.sgf_letter());
                out.push_str("[]");
            }
        }
        if let Some(comment) = node.comment().filter(|_| !node.is_root()) {
            push_prop(out, COMMENT, comment);
        }

        match node.children() {
            [only] => stack.push(Step::Node(*only)),
            children => {
                for &child in children.iter().rev() {
                    stack.push(Step::Close);
                    stack.push(Step::Node(child));
                    stack.push(Step::Open);
                }
            }
        }
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Root-node properties consumed by [`root_record`].
const ROOT_PROPERTIES: &[&str] = &[
    FILEFORMAT,
    GAMETYPE,
    APPLICATION,
    SIZE,
    GAMENAME,
    EVENT,
    RESULT,
    DATE,
    PLACE,
    GAMEINFO,
    PLAYERWHITE,
    WHITERANK,
    PLAYERBLACK,
    BLACKRANK,
    HANDICAP,
    KOMI,
    RULES,
    ADD_BLACK,
    ADD_WHITE,
];

struct Property {
    ident: String,
    values: Vec<String>,
    offset: usize,
}

impl Property {
    /// The single value of a property that must have exactly one.
    fn single(&self) -> Result<&str> {
        match self.values.as_slice() {
            [value] => Ok(value.as_str()),
            _ => Err(malformed(
                self.offset,
                format!("{} expects one value, got {}", self.ident, self.values.len()),
            )),
        }
    }
}

fn malformed(offset: usize, message: impl Into<String>) -> Error {
    Error::MalformedSgf {
        offset,
        message: message.into(),
    }
}

struct Parser<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let src = text.as_bytes();
        let pos = if src.starts_with("\u{feff}".as_bytes()) { 3 } else { 0 };
        Self { src, pos }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: u8) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(b) if b == want => Ok(()),
            Some(b) => Err(malformed(
                self.pos - 1,
                format!("expected '{}', found '{}'", want as char, b as char),
            )),
            None => Err(malformed(
                self.pos,
                format!("expected '{}', found end of input", want as char),
            )),
        }
    }

    /// Properties of one node; the leading `;` is already consumed.
    fn properties(&mut self) -> Result<Vec<Property>> {
        let mut props = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(b) if b.is_ascii_alphabetic() => props.push(self.property()?),
                _ => return Ok(props),
            }
        }
    }

    fn property(&mut self) -> Result<Property> {
        let offset = self.pos;
        let mut ident = String::new();
        while let Some(b) = self.peek().filter(u8::is_ascii_alphabetic) {
            // FF[3] allowed lower-case letters inside identifiers; FF[4] ignores them
            if b.is_ascii_uppercase() {
                ident.push(b as char);
            }
            self.pos += 1;
        }
        if ident.is_empty() {
            return Err(malformed(offset, "property identifier without upper-case letters"));
        }

        let mut values = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() != Some(b'[') {
                break;
            }
            self.pos += 1;
            values.push(self.value()?);
        }
        if values.is_empty() {
            return Err(malformed(offset, format!("property {ident} has no value")));
        }
        Ok(Property {
            ident,
            values,
            offset,
        })
    }

    /// A value body up to the closing `]`, with escapes resolved.
    fn value(&mut self) -> Result<String> {
        let start = self.pos;
        let mut bytes = Vec::new();
        loop {
            match self.bump() {
                None => return Err(malformed(start, "unterminated property value")),
                Some(b']') => break,
                Some(b'\\') => match self.bump() {
                    None => return Err(malformed(start, "unterminated property value")),
                    // soft line break
                    Some(b'\n') => {
                        if self.peek() == Some(b'\r') {
                            self.pos += 1;
                        }
                    }
                    Some(b'\r') => {
                        if self.peek() == Some(b'\n') {
                            self.pos += 1;
                        }
                    }
                    Some(b) => bytes.push(b),
                },
                Some(b) => bytes.push(b),
            }
        }
        String::from_utf8(bytes).map_err(|_| malformed(start, "property value is not valid UTF-8"))
    }
}

/// Parse the first game tree of an SGF collection.
///
/// # Errors
/// - `MalformedSgf` for text outside the FF[4] grammar, a non-Go game,
///   unsupported board sizes, or unreadable points and numbers
/// - `MoveRejected` for an illegal move in the file
/// - `InvalidSetup` for setup stones that cannot stand on the board
pub fn parse(text: &str) -> Result<GameRecord> {
    let mut p = Parser::new(text);
    p.expect(b'(')?;
    p.expect(b';')?;
    let root_props = p.properties()?;
    let mut record = root_record(&root_props)?;

    let root = record.moves_root();
    let mut current = apply_node(&mut record, root, &root_props, true)?;
    let mut branches: Vec<NodeId> = Vec::new();

    loop {
        p.skip_ws();
        let offset = p.pos;
        match p.bump() {
            Some(b';') => {
                let props = p.properties()?;
                current = apply_node(&mut record, current, &props, false)?;
            }
            Some(b'(') => {
                branches.push(current);
                p.skip_ws();
                if p.peek() != Some(b';') {
                    return Err(malformed(p.pos, "game tree must start with a node"));
                }
            }
            Some(b')') => match branches.pop() {
                Some(id) => current = id,
                None => break,
            },
            Some(b) => {
                return Err(malformed(offset, format!("unexpected '{}'", b as char)));
            }
            None => return Err(malformed(offset, "unexpected end of input, missing ')'")),
        }
    }

    record.goto(root);
    Ok(record)
}

/// Build the record from the root node's game-info and setup properties.
fn root_record(props: &[Property]) -> Result<GameRecord> {
    let find = |ident: &str| props.iter().find(|p| p.ident == ident);

    if let Some(gm) = find(GAMETYPE) {
        let game = gm.single()?.trim();
        if game != GAME_GO.to_string() {
            return Err(malformed(gm.offset, format!("game type {game} is not Go")));
        }
    }

    let size = match find(SIZE) {
        Some(sz) => {
            let value = sz.single()?.trim();
            value
                .parse::<usize>()
                .ok()
                .filter(|s| (1..=MAX_SIZE).contains(s))
                .ok_or_else(|| malformed(sz.offset, format!("unsupported board size {value}")))?
        }
        None => DEFAULT_SIZE,
    };

    let mut setup = Vec::new();
    for prop in props {
        let color = match prop.ident.as_str() {
            ADD_BLACK => Color::Black,
            ADD_WHITE => Color::White,
            _ => continue,
        };
        for value in &prop.values {
            for c in point_list(value, size, prop.offset)? {
                setup.push((c, color));
            }
        }
    }

    let mut record = if setup.is_empty() {
        GameRecord::new(size)
    } else {
        GameRecord::with_setup(size, &setup)?
    };

    let info = record.info_mut();
    for prop in props {
        let target = match prop.ident.as_str() {
            GAMENAME => &mut info.game_name,
            EVENT => &mut info.event,
            RESULT => &mut info.result,
            DATE => &mut info.date,
            PLACE => &mut info.place,
            GAMEINFO => &mut info.notes,
            PLAYERWHITE => &mut info.white_name,
            WHITERANK => &mut info.white_rank,
            PLAYERBLACK => &mut info.black_name,
            BLACKRANK => &mut info.black_rank,
            RULES => &mut info.ruleset,
            HANDICAP => {
                info.handicap = number(prop)?;
                continue;
            }
            KOMI => {
                info.komi = number(prop)?;
                continue;
            }
            _ => continue,
        };
        *target = prop.single()?.to_string();
    }
    Ok(record)
}

fn number<T: std::str::FromStr + Default>(prop: &Property) -> Result<T> {
    let value = prop.single()?.trim();
    if value.is_empty() {
        return Ok(T::default());
    }
    value
        .parse()
        .map_err(|_| malformed(prop.offset, format!("{} is not a number: {value}", prop.ident)))
}

/// Points of a setup value: a single point or an `aa:cc` rectangle.
fn point_list(value: &str, size: usize, offset: usize) -> Result<Vec<Coordinate>> {
    let bad = || malformed(offset, format!("bad point '{value}' for size {size}"));
    match value.split_once(':') {
        None => Ok(vec![decode_point(value, size).ok_or_else(bad)?]),
        Some((from, to)) => {
            let a = decode_point(from, size).ok_or_else(bad)?;
            let b = decode_point(to, size).ok_or_else(bad)?;
            let mut points = Vec::new();
            for y in a.y().min(b.y())..=a.y().max(b.y()) {
                for x in a.x().min(b.x())..=a.x().max(b.x()) {
                    points.push(Coordinate::at(x, y));
                }
            }
            Ok(points)
        }
    }
}

/// Apply the move and comment of one node below `at`.
///
/// Returns the new node, or `at` itself for a node without a move (its
/// comment is appended to `at`).
fn apply_node(record: &mut GameRecord, at: NodeId, props: &[Property], root: bool) -> Result<NodeId> {
    let size = record.board_size();
    let mut play: Option<(Color, Vertex)> = None;
    let mut comment: Option<&str> = None;

    for prop in props {
        let color = match prop.ident.as_str() {
            BLACK => Color::Black,
            WHITE => Color::White,
            COMMENT => {
                comment = Some(prop.single()?);
                continue;
            }
            ident if root && ROOT_PROPERTIES.contains(&ident) => continue,
            other => {
                debug!(property = other, offset = prop.offset, "ignoring SGF property");
                continue;
            }
        };
        if play.is_some() {
            return Err(malformed(prop.offset, "node holds more than one move"));
        }
        let value = prop.single()?;
        let vertex = if value.is_empty() || (value == "tt" && size <= TT_PASS_MAX_SIZE) {
            Vertex::Pass
        } else {
            Vertex::Point(decode_point(value, size).ok_or_else(|| {
                malformed(prop.offset, format!("bad point '{value}' for size {size}"))
            })?)
        };
        play = Some((color, vertex));
    }

    let id = match play {
        Some((color, vertex)) => record.propose(at, color, vertex)?,
        None => at,
    };
    if let Some(text) = comment {
        let merged = match record.node(id).comment() {
            Some(existing) if id == at => format!("{existing}\n{text}"),
            _ => text.to_string(),
        };
        record.set_comment(id, merged);
    }
    Ok(id)
}
