//! Single-query commands: cube, neighbors, distance, line

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hexarena_core::{CubeCoordinate, Direction, Position};

use crate::session::Session;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PositionArgs {
    /// Position identifier, e.g. hex-4-4
    pub position: String,
}

#[derive(Args)]
pub struct PairArgs {
    /// First position
    pub from: String,

    /// Second position
    pub to: String,
}

// ============================================================================
// REPORTS
// ============================================================================

#[derive(Debug, PartialEq, Serialize)]
pub struct CubeReport {
    pub position: Position,
    pub cube: CubeCoordinate,
    pub distance_to_center: u8,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct NeighborsReport {
    pub position: Position,
    pub neighbors: Vec<Position>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct PairReport {
    pub from: Position,
    pub to: Position,
    pub distance: u8,
    pub straight: bool,
    pub direction: Option<Direction>,
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn run_cube(session: &Session, args: PositionArgs) -> Result<()> {
    let report = cube_report(session, &args.position)?;
    session.emit(&report, |r| {
        format!("{} -> cube {} (ring {})", r.position, r.cube, r.distance_to_center)
    })
}

pub fn run_neighbors(session: &Session, args: PositionArgs) -> Result<()> {
    let report = neighbors_report(session, &args.position)?;
    session.emit(&report, |r| {
        let list: Vec<_> = r.neighbors.iter().map(Position::to_string).collect();
        format!("{} has {} neighbors: {}", r.position, r.neighbors.len(), list.join(" "))
    })
}

pub fn run_distance(session: &Session, args: PairArgs) -> Result<()> {
    let report = pair_report(session, &args.from, &args.to)?;
    session.emit(&report, |r| r.distance.to_string())
}

pub fn run_line(session: &Session, args: PairArgs) -> Result<()> {
    let report = pair_report(session, &args.from, &args.to)?;
    session.emit(&report, |r| match (r.straight, r.direction) {
        (true, Some(direction)) => format!(
            "{} -> {}: straight line, {} x {}",
            r.from, r.to, r.distance, direction
        ),
        (true, None) => format!("{} -> {}: same cell", r.from, r.to),
        (false, _) => format!("{} -> {}: not a straight line", r.from, r.to),
    })
}

// ============================================================================
// REPORT BUILDERS
// ============================================================================

pub fn cube_report(session: &Session, id: &str) -> Result<CubeReport> {
    let position = session.position(id)?;
    Ok(CubeReport {
        position,
        cube: session.board.to_cube(position)?,
        distance_to_center: session.board.distance_to_center(position)?,
    })
}

pub fn neighbors_report(session: &Session, id: &str) -> Result<NeighborsReport> {
    let position = session.position(id)?;
    let mut neighbors: Vec<_> = session.board.adjacent_positions(position)?.into_iter().collect();
    neighbors.sort();
    Ok(NeighborsReport {
        position,
        neighbors,
    })
}

pub fn pair_report(session: &Session, from: &str, to: &str) -> Result<PairReport> {
    let from = session.position(from)?;
    let to = session.position(to)?;
    let board = &session.board;
    Ok(PairReport {
        from,
        to,
        distance: board.distance(from, to)?,
        straight: board.is_straight_line(from, to)?,
        direction: board.direction_between(from, to)?,
    })
}
