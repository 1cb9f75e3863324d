//! Ray trace commands: visible, walk, targets
//!
//! Structure:
//! - Level 1: run_visible(), run_walk(), run_targets() - orchestration
//! - Level 2: trace_visible(), trace_walk(), targets_report()
//! - Level 3: trace_steps() - per-step classification
//! - Level 4: occupancy parsing, text formatting

use anyhow::Result;
use clap::Args;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use hexarena_core::{Direction, HexBoard, Position, Step};

use crate::render::{self, MARKED, OCCUPIED, ORIGIN};
use crate::session::Session;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct VisibleArgs {
    /// Viewing position
    pub from: String,

    /// Target position
    pub to: String,

    /// Cells holding a piece
    #[arg(long, value_delimiter = ',', value_name = "POS")]
    pub occupied: Vec<String>,
}

#[derive(Args)]
pub struct WalkArgs {
    /// Starting position
    pub from: String,

    /// Direction: E, W, NE, NW, SE, SW (or spelled out)
    pub direction: Direction,

    /// Stop after this many cells
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Cells holding a piece; the walk stops on the first one
    #[arg(long, value_delimiter = ',', value_name = "POS")]
    pub occupied: Vec<String>,
}

#[derive(Args)]
pub struct TargetsArgs {
    /// Viewing position
    pub from: String,

    /// Cells holding a piece
    #[arg(long, value_delimiter = ',', value_name = "POS")]
    pub occupied: Vec<String>,
}

// ============================================================================
// REPORTS
// ============================================================================

/// One cell entered along a ray
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep {
    pub position: Position,
    pub d_row: i8,
    pub d_col: i8,
    pub category: Option<Direction>,
    /// Whether this step keeps the direction of the previous one
    pub continues: bool,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct VisibleReport {
    pub from: Position,
    pub to: Position,
    pub straight: bool,
    pub visible: bool,
    pub path: Vec<TraceStep>,
    pub blocked_at: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Edge,
    MaxSteps,
    Blocked(Position),
}

#[derive(Debug, PartialEq, Serialize)]
pub struct WalkReport {
    pub from: Position,
    pub direction: Direction,
    pub steps: Vec<TraceStep>,
    pub stop: StopReason,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct TargetsReport {
    pub from: Position,
    pub occupied: Vec<Position>,
    pub targets: Vec<Position>,
}

// ============================================================================
// COMMANDS (Level 1 - Orchestration)
// ============================================================================

pub fn run_visible(session: &Session, args: VisibleArgs) -> Result<()> {
    let from = session.position(&args.from)?;
    let to = session.position(&args.to)?;
    let occupied = occupancy(session, &args.occupied)?;

    let report = trace_visible(&session.board, from, to, &occupied)?;
    tracing::info!(
        "{} -> {}: visible={} ({} steps)",
        report.from,
        report.to,
        report.visible,
        report.path.len()
    );

    session.emit(&report, format_visible)
}

pub fn run_walk(session: &Session, args: WalkArgs) -> Result<()> {
    let from = session.position(&args.from)?;
    let occupied = occupancy(session, &args.occupied)?;
    let max_steps = args.max_steps.unwrap_or(usize::MAX);

    let report = trace_walk(&session.board, from, args.direction, max_steps, &occupied)?;
    session.emit(&report, format_walk)
}

pub fn run_targets(session: &Session, args: TargetsArgs) -> Result<()> {
    let from = session.position(&args.from)?;
    let occupied = occupancy(session, &args.occupied)?;

    let report = targets_report(&session.board, from, &occupied)?;
    tracing::info!("{} sees {} positions", report.from, report.targets.len());

    session.emit(&report, |r| {
        let mut marks = FxHashMap::default();
        marks.extend(r.occupied.iter().map(|&p| (p, OCCUPIED)));
        marks.extend(r.targets.iter().map(|&p| (p, MARKED)));
        marks.insert(r.from, ORIGIN);

        let list: Vec<_> = r.targets.iter().map(Position::to_string).collect();
        format!(
            "{}\n\n{} sees {}: {}",
            render::render_board(&session.board, &marks),
            r.from,
            r.targets.len(),
            list.join(" ")
        )
    })
}

// ============================================================================
// TRACES (Level 2)
// ============================================================================

/// Walk from `from` towards `to`, recording every step until `to` or a blocker
pub fn trace_visible(
    board: &HexBoard,
    from: Position,
    to: Position,
    occupied: &FxHashSet<Position>,
) -> Result<VisibleReport> {
    let straight = board.is_straight_line(from, to)?;
    let visible = board.is_visible_in_straight_line(from, to, occupied)?;

    let mut cells = Vec::new();
    let mut blocked_at = None;
    if let Some(direction) = board.direction_between(from, to)? {
        let steps = board.distance(from, to)? as usize;
        for pos in board.walk_ray(from, direction, steps)? {
            cells.push(pos);
            if pos == to {
                break;
            }
            if occupied.contains(&pos) {
                blocked_at = Some(pos);
                break;
            }
        }
    }

    Ok(VisibleReport {
        from,
        to,
        straight,
        visible,
        path: trace_steps(board, from, &cells),
        blocked_at,
    })
}

/// Walk a ray until the edge, the step limit, or the first occupied cell
pub fn trace_walk(
    board: &HexBoard,
    from: Position,
    direction: Direction,
    max_steps: usize,
    occupied: &FxHashSet<Position>,
) -> Result<WalkReport> {
    let mut cells = Vec::new();
    let mut stop = None;
    for pos in board.walk_ray(from, direction, max_steps)? {
        cells.push(pos);
        if occupied.contains(&pos) {
            stop = Some(StopReason::Blocked(pos));
            break;
        }
    }

    let stop = match stop {
        Some(reason) => reason,
        None => {
            let last = cells.last().copied().unwrap_or(from);
            if cells.len() == max_steps && board.neighbor(last, direction)?.is_some() {
                StopReason::MaxSteps
            } else {
                StopReason::Edge
            }
        }
    };

    Ok(WalkReport {
        from,
        direction,
        steps: trace_steps(board, from, &cells),
        stop,
    })
}

pub fn targets_report(
    board: &HexBoard,
    from: Position,
    occupied: &FxHashSet<Position>,
) -> Result<TargetsReport> {
    let mut targets = board.visible_from(from, occupied)?;
    targets.sort();

    let mut occupied: Vec<_> = occupied.iter().copied().collect();
    occupied.sort();

    Ok(TargetsReport {
        from,
        occupied,
        targets,
    })
}

// ============================================================================
// STEP CLASSIFICATION (Level 3)
// ============================================================================

fn trace_steps(board: &HexBoard, from: Position, cells: &[Position]) -> Vec<TraceStep> {
    let mut previous: Option<Step> = None;
    let mut current = from;

    cells
        .iter()
        .map(|&pos| {
            let step = Step::between(current, pos);
            let continues = previous.map_or(true, |p| board.is_same_direction(p, step));
            previous = Some(step);
            current = pos;
            TraceStep {
                position: pos,
                d_row: step.d_row,
                d_col: step.d_col,
                category: board.classify_step(step),
                continues,
            }
        })
        .collect()
}

// ============================================================================
// UTILITIES (Level 4)
// ============================================================================

fn occupancy(session: &Session, ids: &[String]) -> Result<FxHashSet<Position>> {
    Ok(session.positions(ids)?.into_iter().collect())
}

fn format_steps(steps: &[TraceStep]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let category = s.category.map_or("?", Direction::abbreviation);
            let mark = if s.continues { "" } else { "  (breaks line)" };
            format!(
                "  {:>2}. {}  ({:+}, {:+}) {}{}",
                i + 1,
                s.position,
                s.d_row,
                s.d_col,
                category,
                mark
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_visible(r: &VisibleReport) -> String {
    let verdict = match (r.straight, r.blocked_at) {
        (false, _) => "not on a straight line".to_string(),
        (true, Some(blocker)) => format!("blocked at {blocker}"),
        (true, None) if r.visible => "visible".to_string(),
        (true, None) => "not visible".to_string(),
    };

    if r.path.is_empty() {
        format!("{} -> {}: {}", r.from, r.to, verdict)
    } else {
        format!("{} -> {}: {}\n{}", r.from, r.to, verdict, format_steps(&r.path))
    }
}

fn format_walk(r: &WalkReport) -> String {
    let stop = match r.stop {
        StopReason::Edge => "board edge".to_string(),
        StopReason::MaxSteps => "step limit".to_string(),
        StopReason::Blocked(pos) => format!("blocked at {pos}"),
    };
    let header = format!(
        "{} walking {}: {} cells, stopped at {}",
        r.from,
        r.direction,
        r.steps.len(),
        stop
    );

    if r.steps.is_empty() {
        header
    } else {
        format!("{header}\n{}", format_steps(&r.steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: &str) -> Position {
        id.parse().unwrap()
    }

    fn occupied(ids: &[&str]) -> FxHashSet<Position> {
        ids.iter().map(|id| p(id)).collect()
    }

    #[test]
    fn test_visible_across_midline() {
        let board = HexBoard::standard();
        let report = trace_visible(&board, p("hex-3-3"), p("hex-7-4"), &occupied(&[])).unwrap();

        assert!(report.straight);
        assert!(report.visible);
        assert_eq!(report.blocked_at, None);

        let cells: Vec<_> = report.path.iter().map(|s| s.position).collect();
        assert_eq!(cells, [p("hex-4-4"), p("hex-5-4"), p("hex-6-4"), p("hex-7-4")]);

        let categories: Vec<_> = report.path.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            [
                Some(Direction::SouthEast),
                Some(Direction::SouthWest),
                Some(Direction::SouthEast),
                Some(Direction::SouthEast),
            ]
        );
        assert!(report.path.iter().all(|s| s.continues));
    }

    #[test]
    fn test_visible_blocked() {
        let board = HexBoard::standard();
        let report =
            trace_visible(&board, p("hex-3-3"), p("hex-7-4"), &occupied(&["hex-5-4"])).unwrap();

        assert!(!report.visible);
        assert_eq!(report.blocked_at, Some(p("hex-5-4")));
        assert_eq!(report.path.len(), 2);
        assert!(format_visible(&report).contains("blocked at hex-5-4"));
    }

    #[test]
    fn test_visible_not_straight() {
        let board = HexBoard::standard();
        let report = trace_visible(&board, p("hex-1-1"), p("hex-3-2"), &occupied(&[])).unwrap();
        assert!(!report.straight);
        assert!(!report.visible);
        assert!(report.path.is_empty());
        assert_eq!(format_visible(&report), "hex-1-1 -> hex-3-2: not on a straight line");
    }

    #[test]
    fn test_visible_target_occupied() {
        let board = HexBoard::standard();
        let report =
            trace_visible(&board, p("hex-4-1"), p("hex-4-4"), &occupied(&["hex-4-4"])).unwrap();
        assert!(report.visible);
        assert_eq!(report.blocked_at, None);
    }

    #[test]
    fn test_walk_stop_reasons() {
        let board = HexBoard::standard();
        let empty = occupied(&[]);

        let report = trace_walk(&board, p("hex-4-1"), Direction::East, usize::MAX, &empty).unwrap();
        assert_eq!(report.steps.len(), 6);
        assert_eq!(report.stop, StopReason::Edge);

        let report = trace_walk(&board, p("hex-4-1"), Direction::East, 2, &empty).unwrap();
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.stop, StopReason::MaxSteps);

        // Limit reached exactly at the edge
        let report = trace_walk(&board, p("hex-4-1"), Direction::East, 6, &empty).unwrap();
        assert_eq!(report.stop, StopReason::Edge);

        let report = trace_walk(
            &board,
            p("hex-4-1"),
            Direction::East,
            usize::MAX,
            &occupied(&["hex-4-3"]),
        )
        .unwrap();
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.stop, StopReason::Blocked(p("hex-4-3")));
    }

    #[test]
    fn test_walk_from_edge_is_empty() {
        let board = HexBoard::standard();
        let report =
            trace_walk(&board, p("hex-1-1"), Direction::NorthWest, usize::MAX, &occupied(&[]))
                .unwrap();
        assert!(report.steps.is_empty());
        assert_eq!(report.stop, StopReason::Edge);
        assert_eq!(
            format_walk(&report),
            "hex-1-1 walking NW: 0 cells, stopped at board edge"
        );
    }

    #[test]
    fn test_stop_reason_json() {
        let json = serde_json::to_value(StopReason::Blocked(p("hex-5-4"))).unwrap();
        assert_eq!(json, serde_json::json!({ "blocked": "hex-5-4" }));
        assert_eq!(serde_json::to_value(StopReason::MaxSteps).unwrap(), "max_steps");
    }

    #[test]
    fn test_targets_sorted() {
        let board = HexBoard::standard();
        let report = targets_report(&board, p("hex-4-4"), &occupied(&["hex-4-5", "hex-5-4"]))
            .unwrap();
        assert_eq!(report.targets.len(), 14);
        assert!(report.targets.windows(2).all(|w| w[0] < w[1]));
        assert!(report.targets.contains(&p("hex-4-5")));
        assert!(!report.targets.contains(&p("hex-4-6")));
        assert_eq!(report.occupied, [p("hex-4-5"), p("hex-5-4")]);
    }
}
