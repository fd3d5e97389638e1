//! Program identity, SGF property identifiers, and game defaults.
//!
//! Everything here is a plain constant; runtime options come from the
//! command line (see `main.rs`).

// =============================================================================
// Program Identity
// =============================================================================

/// Program name written into the SGF `AP` property.
pub const PROG_NAME: &str = "goban-record";

/// Program version written into the SGF `AP` property.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN). Standard Go sizes are 9, 13, or 19.
pub const DEFAULT_SIZE: usize = 19;

/// Largest board the lower-case SGF point encoding can address.
pub const MAX_SIZE: usize = 25;

/// Largest board on which `tt` is read as a pass.
pub const TT_PASS_MAX_SIZE: usize = 19;

/// Default komi for a new record.
pub const DEFAULT_KOMI: f32 = 0.0;

// =============================================================================
// SGF Properties
// =============================================================================

/// SGF file format version we write.
pub const FORMAT_VERSION: u32 = 4;

/// Game type number for Go.
pub const GAME_GO: u32 = 1;

pub const FILEFORMAT: &str = "FF";
pub const GAMETYPE: &str = "GM";
pub const APPLICATION: &str = "AP";
pub const GAMENAME: &str = "GN";
pub const EVENT: &str = "EV";
pub const RESULT: &str = "RE";
pub const DATE: &str = "DT";
pub const PLACE: &str = "PC";
pub const GAMEINFO: &str = "GC";
pub const PLAYERWHITE: &str = "PW";
pub const WHITERANK: &str = "WR";
pub const PLAYERBLACK: &str = "PB";
pub const BLACKRANK: &str = "BR";
pub const HANDICAP: &str = "HA";
pub const KOMI: &str = "KM";
pub const SIZE: &str = "SZ";
pub const RULES: &str = "RU";
pub const COMMENT: &str = "C";
pub const BLACK: &str = "B";
pub const WHITE: &str = "W";
pub const ADD_BLACK: &str = "AB";
pub const ADD_WHITE: &str = "AW";

/// File suffix for persisted game records (compared case-insensitively).
pub const SGF_EXTENSION: &str = "sgf";

// =============================================================================
// Handicap Placement
// =============================================================================

/// Star points used for fixed handicap placement, as (x, y) from the
/// lower-left corner, in placement order.
///
/// Returns an empty slice for sizes without a standard layout.
pub fn star_points(size: usize) -> &'static [(u32, u32)] {
    match size {
        9 => &[(6, 6), (2, 2), (6, 2), (2, 6), (4, 4)],
        13 => &[
            (9, 9),
            (3, 3),
            (9, 3),
            (3, 9),
            (6, 6),
            (3, 6),
            (9, 6),
            (6, 3),
            (6, 9),
        ],
        19 => &[
            (15, 15),
            (3, 3),
            (15, 3),
            (3, 15),
            (9, 9),
            (3, 9),
            (15, 9),
            (9, 3),
            (9, 15),
        ],
        _ => &[],
    }
}

/// Star points for `stones` handicap stones.
///
/// With an even count above four the center point is skipped, matching the
/// usual fixed placement (6 stones = corners + left/right sides).
pub fn handicap_points(size: usize, stones: usize) -> Vec<(u32, u32)> {
    let stars = star_points(size);
    if stones < 2 || stones > stars.len() {
        return Vec::new();
    }
    if stones <= 4 {
        return stars[..stones].to_vec();
    }
    let mut points: Vec<(u32, u32)> = stars[..4].to_vec();
    let sides = &stars[5..];
    if stones % 2 == 1 {
        points.extend_from_slice(&sides[..stones - 5]);
        points.push(stars[4]);
    } else {
        points.extend_from_slice(&sides[..stones - 4]);
    }
    points
}
