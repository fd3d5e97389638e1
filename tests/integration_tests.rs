//! Integration tests for goban-record
//!
//! These exercise the public API end to end: rules through `GameRecord`,
//! the tree shape as seen by a renderer, and SGF output and round trips.

use fastrand::Rng;

use goban_record::board::Color;
use goban_record::coord::{Coordinate, Vertex};
use goban_record::error::{Error, RejectReason};
use goban_record::game::GameRecord;
use goban_record::playout::random_game;
use goban_record::sgf::{parse, serialize};
use goban_record::tree::NodeId;

// =============================================================================
// Helper functions for setting up test records
// =============================================================================

fn pt(x: u32, y: u32) -> Vertex {
    Vertex::Point(Coordinate::at(x, y))
}

/// Play a sequence of moves on a fresh record, alternating from Black.
/// `None` is a pass. Panics on any rejected move.
fn setup_record(size: usize, moves: &[Option<(u32, u32)>]) -> GameRecord {
    let mut record = GameRecord::new(size);
    for mv in moves {
        let vertex = match *mv {
            Some((x, y)) => pt(x, y),
            None => Vertex::Pass,
        };
        if let Err(e) = record.play_next(vertex) {
            panic!("illegal move in setup: {e}");
        }
    }
    record
}

/// A record with every metadata field, a branch and comments.
fn full_record() -> GameRecord {
    let mut record = GameRecord::new(19);
    {
        let info = record.info_mut();
        info.game_name = "Round trip".into();
        info.event = "Club [league]: round 3".into();
        info.result = "W+R".into();
        info.date = "2017-05-27".into();
        info.place = "Wuzhen".into();
        info.notes = "Notes with \\ backslash\nand a second line".into();
        info.white_name = "White Player".into();
        info.white_rank = "9p".into();
        info.black_name = "Black Player".into();
        info.black_rank = "1d".into();
        info.handicap = 0;
        info.komi = 7.5;
        info.ruleset = "Chinese".into();
    }
    let b = record.play(Color::Black, pt(15, 15)).unwrap();
    record.set_comment(b, "A classic opening");
    let w = record.play(Color::White, pt(3, 3)).unwrap();
    record.play(Color::Black, pt(15, 3)).unwrap();
    record.goto(b);
    let side = record.play(Color::White, pt(15, 3)).unwrap();
    record.set_comment(side, "Variation: approach]");
    record.play(Color::Black, Vertex::Pass).unwrap();
    record.goto(w);
    record.play(Color::Black, pt(3, 15)).unwrap();
    record
}

/// Check that two records have the same moves, comments and branch shape.
fn assert_same_tree(a: &GameRecord, b: &GameRecord) {
    let mut stack: Vec<(NodeId, NodeId)> = vec![(a.moves_root(), b.moves_root())];
    while let Some((x, y)) = stack.pop() {
        let (nx, ny) = (a.node(x), b.node(y));
        assert_eq!(nx.mv(), ny.mv());
        assert_eq!(nx.comment(), ny.comment());
        assert_eq!(nx.position(), ny.position());
        assert_eq!(nx.num_children(), ny.num_children());
        for (&cx, &cy) in nx.children().iter().zip(ny.children()) {
            stack.push((cx, cy));
        }
    }
}

/// Every stone of every position in the tree has at least one liberty.
fn assert_all_groups_alive(record: &GameRecord) {
    let mut stack = vec![record.moves_root()];
    while let Some(id) = stack.pop() {
        let node = record.node(id);
        let pos = node.position();
        for (c, _) in pos.stones() {
            assert!(
                !pos.liberties_of(c).is_empty(),
                "group at {c} without liberties:\n{pos}"
            );
        }
        stack.extend_from_slice(node.children());
    }
}

// =============================================================================
// Coordinate tests
// =============================================================================

#[test]
fn test_coordinate_display_has_no_whitespace() {
    for x in [0, 1, 8, 18, 250] {
        for y in [0, 2, 13, 18] {
            let c = Coordinate::new(x, y).unwrap();
            let s = c.to_string();
            assert_eq!(s, format!("({x},{y})"));
            assert!(!s.contains(char::is_whitespace));
        }
    }
}

#[test]
fn test_coordinate_rejects_negative() {
    assert!(matches!(
        Coordinate::new(-1, 3),
        Err(Error::InvalidCoordinate { x: -1, y: 3 })
    ));
    assert!(matches!(
        Coordinate::new(3, -1),
        Err(Error::InvalidCoordinate { x: 3, y: -1 })
    ));
}

// =============================================================================
// Rule tests
// =============================================================================

#[test]
fn test_suicide_single_stone() {
    // White surrounds (4,4) while Black passes
    let mut record = GameRecord::new(9);
    for (x, y) in [(3, 4), (5, 4), (4, 3), (4, 5)] {
        record.play(Color::Black, Vertex::Pass).unwrap();
        record.play(Color::White, pt(x, y)).unwrap();
    }
    let before = record.current();
    let err = record.play(Color::Black, pt(4, 4)).unwrap_err();
    assert_eq!(err.reason, RejectReason::Suicide);
    assert_eq!(err.coordinate, Coordinate::at(4, 4));
    assert_eq!(&err.position, record.current_position());
    assert_eq!(record.current(), before);
    assert_eq!(record.current_node().num_children(), 0);
}

#[test]
fn test_capture_removes_whole_group() {
    // White (3,0),(4,0) on the edge; Black fills the last liberty at (5,0)
    let record = setup_record(
        9,
        &[
            Some((2, 0)),
            Some((3, 0)),
            Some((3, 1)),
            Some((4, 0)),
            Some((4, 1)),
            Some((8, 8)),
            Some((5, 0)),
        ],
    );
    let pos = record.current_position();
    assert_eq!(pos.get(Coordinate::at(3, 0)), None);
    assert_eq!(pos.get(Coordinate::at(4, 0)), None);
    assert_eq!(pos.get(Coordinate::at(8, 8)), Some(Color::White));
    assert!(!pos.liberties_of(Coordinate::at(5, 0)).is_empty());
}

#[test]
fn test_simple_ko() {
    let mut record = setup_record(
        9,
        &[
            Some((3, 4)),
            Some((6, 4)),
            Some((4, 5)),
            Some((5, 5)),
            Some((4, 3)),
            Some((5, 3)),
            Some((5, 4)),
            Some((4, 4)), // White takes the ko
        ],
    );
    assert_eq!(record.current_position().get(Coordinate::at(5, 4)), None);

    let err = record.play_next(pt(5, 4)).unwrap_err();
    assert_eq!(err.reason, RejectReason::Ko);

    // Ko threat and answer, then the retake is legal
    record.play_next(pt(0, 8)).unwrap();
    record.play_next(pt(8, 8)).unwrap();
    record.play_next(pt(5, 4)).unwrap();
    assert_eq!(record.current_position().get(Coordinate::at(4, 4)), None);
}

#[test]
fn test_apply_is_deterministic_along_a_game() {
    let mut record = GameRecord::new(9);
    random_game(&mut record, 50, &mut Rng::with_seed(11));
    for id in record.main_line() {
        let node = record.node(id);
        let parent = record.node(node.parent().unwrap()).position();
        if let Some(Vertex::Point(c)) = node.vertex() {
            let color = node.color().unwrap();
            assert_eq!(&parent.apply(c, color).unwrap(), node.position());
            assert_eq!(parent.apply(c, color), parent.apply(c, color));
        }
    }
}

// =============================================================================
// Tree tests
// =============================================================================

#[test]
fn test_fresh_tree() {
    let mut record = GameRecord::new(19);
    let root = record.moves_root();
    assert!(record.node(root).is_root());
    assert_eq!(record.node(root).num_children(), 0);

    let b = record.propose(root, Color::Black, pt(3, 3)).unwrap();
    assert_eq!(record.node(root).num_children(), 1);
    assert_eq!(record.node(b).parent(), Some(root));
    assert!(!record.node(b).is_root());
    assert_eq!(record.node(b).next(), None);
}

#[test]
fn test_branching_output() {
    let mut record = GameRecord::new(19);
    let root = record.moves_root();
    let b = record.propose(root, Color::Black, pt(15, 15)).unwrap();
    record.propose(b, Color::White, pt(3, 3)).unwrap();
    record.propose(b, Color::White, pt(15, 3)).unwrap();
    assert_eq!(record.node(b).num_children(), 2);

    let text = serialize(&record);
    assert!(text.contains(";B[pd](;W[dp])(;W[pp]))"), "{text}");
}

#[test]
fn test_variation_inside_variation() {
    let mut record = GameRecord::new(19);
    let root = record.moves_root();
    let b = record.propose(root, Color::Black, pt(15, 15)).unwrap();
    let w1 = record.propose(b, Color::White, pt(3, 3)).unwrap();
    record.propose(b, Color::White, pt(15, 3)).unwrap();
    record.propose(w1, Color::Black, pt(3, 15)).unwrap();
    record.propose(w1, Color::Black, pt(2, 2)).unwrap();

    let text = serialize(&record);
    assert!(
        text.contains(";B[pd](;W[dp](;B[dd])(;B[cq]))(;W[pp]))"),
        "{text}"
    );
    let back = parse(&text).unwrap();
    assert_same_tree(&record, &back);
}

// =============================================================================
// SGF tests
// =============================================================================

#[test]
fn test_end_to_end_9x9() {
    let record = setup_record(9, &[Some((4, 4)), Some((4, 5))]);
    let text = serialize(&record);
    assert!(text.starts_with("(;FF[4]GM[1]"));
    assert!(text.contains(";B[ee];W[ed]"));
    assert!(text.trim_end().ends_with(')'));
    assert!(text.contains("SZ[9]"));
}

#[test]
fn test_round_trip() {
    let record = full_record();
    let text = serialize(&record);
    let back = parse(&text).unwrap();

    assert_eq!(back.info(), record.info());
    assert_eq!(back.board_size(), 19);
    assert_same_tree(&record, &back);
    assert_eq!(serialize(&back), text);
}

#[test]
fn test_round_trip_handicap() {
    let mut record = GameRecord::with_handicap(19, 3).unwrap();
    record.info_mut().komi = 0.5;
    record.set_comment(record.moves_root(), "Three stones");
    record.play_next(pt(9, 9)).unwrap();
    assert_eq!(
        record.node(record.current()).color(),
        Some(Color::White)
    );

    let text = serialize(&record);
    assert!(text.contains("HA[3]"));
    assert!(text.contains("AB["));
    let back = parse(&text).unwrap();
    assert_eq!(back.info().handicap, 3);
    assert_eq!(back.to_move(), Color::White);
    assert_same_tree(&record, &back);
}

#[test]
fn test_round_trip_random_games_with_variations() {
    let mut rng = Rng::with_seed(2024);
    for size in [5, 9, 13] {
        let mut record = GameRecord::new(size);
        random_game(&mut record, 80, &mut rng);
        // Branch off a few points of the main line
        let line: Vec<_> = record.main_line().collect();
        for &id in line.iter().step_by(17) {
            record.goto(id);
            random_game(&mut record, 10, &mut rng);
        }
        assert_all_groups_alive(&record);

        let back = parse(&serialize(&record)).unwrap();
        assert_same_tree(&record, &back);
    }
}

#[test]
fn test_long_main_line() {
    let mut record = GameRecord::new(19);
    for _ in 0..20_000 {
        record.play_next(Vertex::Pass).unwrap();
    }
    let text = serialize(&record);
    let back = parse(&text).unwrap();
    assert_eq!(back.main_line().count(), 20_000);
}

#[test]
fn test_parse_rejects_illegal_file() {
    // Black suicides in the corner
    let text = "(;GM[1]SZ[9];B[];W[bi];B[];W[ah];B[ai])";
    match parse(text) {
        Err(Error::MoveRejected(rejected)) => {
            assert_eq!(rejected.reason, RejectReason::Suicide);
            assert_eq!(rejected.coordinate, Coordinate::at(0, 0));
        }
        other => panic!("expected MoveRejected, got {other:?}"),
    }
}
