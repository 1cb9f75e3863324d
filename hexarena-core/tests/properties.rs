//! Geometry properties
//!
//! Exhaustive on the standard board (37 cells), property-based over random
//! board shapes.

use hexarena_core::{
    BoardShape, CubeCoordinate, Direction, GeometryError, HexBoard, Position, Step,
};
use proptest::prelude::*;
use rustc_hash::FxHashSet;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn hex(row: u8, col: u8) -> Position {
    Position::new(row, col)
}

/// Neighbours according to cube arithmetic alone
fn cube_neighbors(board: &HexBoard, pos: Position) -> FxHashSet<Position> {
    let cube = board.to_cube(pos).unwrap();
    Direction::ALL
        .into_iter()
        .filter_map(|d| board.from_cube(cube + d.cube_delta()))
        .collect()
}

fn check_adjacency(board: &HexBoard) {
    for p in board.positions() {
        let adj = board.adjacent_positions(p).unwrap();
        assert!(!adj.contains(&p), "{p} is adjacent to itself");
        assert!(adj.len() <= 6);
        assert_eq!(adj, cube_neighbors(board, p), "row rule disagrees with cube at {p}");
        for &q in &adj {
            assert!(board.adjacent_positions(q).unwrap().contains(&p), "{p} -> {q} not symmetric");
            assert_eq!(board.distance(p, q), Ok(1));
        }
    }
}

fn check_roundtrip(board: &HexBoard) {
    for p in board.positions() {
        let cube = board.to_cube(p).unwrap();
        assert_eq!(cube.x() + cube.y() + cube.z(), 0);
        assert_eq!(board.from_cube(cube), Some(p));
    }
}

// ============================================================================
// STANDARD BOARD (EXHAUSTIVE)
// ============================================================================

#[test]
fn test_roundtrip_every_position() {
    check_roundtrip(&HexBoard::standard());
}

#[test]
fn test_adjacency_properties() {
    let board = HexBoard::standard();
    check_adjacency(&board);

    // Exactly six for every cell off the outer ring
    let origin = CubeCoordinate::new(0, 0);
    for p in board.positions() {
        let ring = board.to_cube(p).unwrap().distance_to(origin);
        let count = board.adjacent_positions(p).unwrap().len();
        if ring < 3 {
            assert_eq!(count, 6, "{p}");
        } else {
            assert!(count < 6, "{p}");
        }
    }
    assert_eq!(board.adjacent_positions(hex(4, 4)).unwrap().len(), 6);
}

#[test]
fn test_distance_is_a_metric() {
    let board = HexBoard::standard();
    let all: Vec<_> = board.positions().collect();
    for &a in &all {
        assert_eq!(board.distance(a, a), Ok(0));
        for &b in &all {
            let ab = board.distance(a, b).unwrap();
            assert_eq!(board.distance(b, a), Ok(ab));
            assert_eq!(ab == 0, a == b);
            for &c in &all {
                let via = board.distance(a, c).unwrap() + board.distance(c, b).unwrap();
                assert!(ab <= via, "{a} {b} via {c}");
            }
        }
    }
}

#[test]
fn test_straight_line_symmetric_and_walkable() {
    let board = HexBoard::standard();
    let empty: Vec<Position> = Vec::new();
    for a in board.positions() {
        for b in board.positions() {
            let straight = board.is_straight_line(a, b).unwrap();
            assert_eq!(board.is_straight_line(b, a), Ok(straight));
            // On an empty board, visibility is exactly "distinct and straight"
            assert_eq!(
                board.is_visible_in_straight_line(a, b, &empty),
                Ok(straight && a != b),
                "{a} -> {b}"
            );
        }
    }
}

#[test]
fn test_midline_diagonal_path() {
    let board = HexBoard::standard();
    let from = board.parse("hex-3-3").unwrap();
    let to = board.parse("hex-7-4").unwrap();
    let empty: FxHashSet<Position> = FxHashSet::default();

    assert_eq!(board.is_visible_in_straight_line(from, to, &empty), Ok(true));

    let direction = board.direction_between(from, to).unwrap().unwrap();
    let path: Vec<_> = board
        .walk_ray(from, direction, board.distance(from, to).unwrap() as usize)
        .unwrap()
        .collect();
    let ids: Vec<_> = path.iter().map(|p| p.to_string()).collect();
    assert_eq!(ids, ["hex-4-4", "hex-5-4", "hex-6-4", "hex-7-4"]);

    // Raw categories flip at row 4, yet every consecutive pair continues
    let mut cells = vec![from];
    cells.extend(path);
    let steps: Vec<_> = cells.windows(2).map(|w| Step::between(w[0], w[1])).collect();
    let categories: Vec<_> = steps.iter().map(|&s| board.classify_step(s)).collect();
    assert_eq!(
        categories,
        vec![
            Some(Direction::SouthEast),
            Some(Direction::SouthWest),
            Some(Direction::SouthEast),
            Some(Direction::SouthEast),
        ]
    );
    for pair in steps.windows(2) {
        assert!(board.is_same_direction(pair[0], pair[1]), "{:?}", pair);
    }

    let blocked: FxHashSet<Position> = [hex(5, 4)].into_iter().collect();
    assert_eq!(board.is_visible_in_straight_line(from, to, &blocked), Ok(false));
}

#[test]
fn test_repeated_queries_agree() {
    let board = HexBoard::standard();
    let occupied = vec![hex(5, 4), hex(2, 2), hex(4, 6)];
    for a in board.positions() {
        let first = board.visible_from(a, &occupied).unwrap();
        let second = board.visible_from(a, &occupied).unwrap();
        assert_eq!(first, second);
        assert_eq!(board.adjacent_positions(a), board.adjacent_positions(a));
    }
}

#[test]
fn test_invalid_positions_rejected_everywhere() {
    let board = HexBoard::standard();
    let off = hex(2, 6);
    let on = hex(2, 5);
    let empty: Vec<Position> = Vec::new();
    let is_invalid = |e: GeometryError| matches!(e, GeometryError::InvalidPosition(_));

    assert!(is_invalid(board.to_cube(off).unwrap_err()));
    assert!(is_invalid(board.adjacent_positions(off).unwrap_err()));
    assert!(is_invalid(board.distance(on, off).unwrap_err()));
    assert!(is_invalid(board.is_straight_line(off, on).unwrap_err()));
    assert!(is_invalid(board.is_visible_in_straight_line(on, off, &empty).unwrap_err()));
    assert!(is_invalid(board.walk_ray(off, Direction::East, 1).unwrap_err()));
    for bad in ["hex-2-6", "hex-2", "hex-two-1", "cell-2-2", "hex-2-2-2"] {
        assert!(is_invalid(board.parse(bad).unwrap_err()), "{bad}");
    }
}

// ============================================================================
// RANDOM SHAPES (PROPERTY-BASED)
// ============================================================================

/// Valid shapes: widen from `first` for `up` rows, then narrow for `down` rows
fn shape_strategy() -> impl Strategy<Value = BoardShape> {
    (1u8..6, 0u8..6, 0u8..6).prop_map(|(first, up, down)| {
        let peak = first + up;
        let down = down.min(peak - 1);
        let rows: Vec<u8> = (first..=peak).chain((peak - down..peak).rev()).collect();
        BoardShape::new(rows).expect("strategy builds valid shapes")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip_and_adjacency(shape in shape_strategy()) {
        let board = HexBoard::new(shape);
        check_roundtrip(&board);
        check_adjacency(&board);
        prop_assert_eq!(board.positions().count(), board.len());
    }

    #[test]
    fn prop_rays_match_lines(shape in shape_strategy(), seed in any::<u64>()) {
        let board = HexBoard::new(shape);
        let all: Vec<_> = board.positions().collect();
        let a = all[(seed % all.len() as u64) as usize];
        let empty: Vec<Position> = Vec::new();

        for b in &all {
            let straight = board.is_straight_line(a, *b).unwrap();
            prop_assert_eq!(board.is_straight_line(*b, a).unwrap(), straight);
            prop_assert_eq!(
                board.is_visible_in_straight_line(a, *b, &empty).unwrap(),
                straight && a != *b
            );
        }

        // Each ray is straight and its consecutive steps continue each other
        for direction in Direction::ALL {
            let path: Vec<_> = board.walk_ray(a, direction, usize::MAX).unwrap().collect();
            for (i, p) in path.iter().enumerate() {
                prop_assert_eq!(board.distance(a, *p).unwrap() as usize, i + 1);
                prop_assert!(board.is_straight_line(a, *p).unwrap());
            }
        }
    }

    #[test]
    fn prop_from_cube_never_leaves_board(shape in shape_strategy(), x in any::<i8>(), z in any::<i8>()) {
        let board = HexBoard::new(shape);
        if let Some(p) = board.from_cube(CubeCoordinate::new(x, z)) {
            prop_assert!(board.is_on_board(p));
            prop_assert_eq!(board.to_cube(p).unwrap(), CubeCoordinate::new(x, z));
        }
    }
}
