//! Step classification and straight-ray walking
//!
//! A raw `(d_row, d_col)` step does not name a direction on its own: moving
//! straight down a column is a south-west step above the midline and a
//! south-east step below it. [`HexBoard::classify_step`] resolves that from
//! the step's origin row, and [`HexBoard::is_same_direction`] accepts the one
//! place where the raw category flips along a straight line (the step that
//! leaves the midline).
//!
//! Which cell comes next on a ray is always decided by cube coordinates; the
//! classification only confirms the continuation.

use crate::board::HexBoard;
use crate::error::{GeometryError, GeometryResult};
use crate::position::{CubeCoordinate, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

/// The six directions of the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// One step along this direction in cube coordinates
    pub const fn cube_delta(self) -> CubeCoordinate {
        match self {
            Direction::East => CubeCoordinate::new(1, 0),
            Direction::West => CubeCoordinate::new(-1, 0),
            Direction::NorthEast => CubeCoordinate::new(1, -1),
            Direction::NorthWest => CubeCoordinate::new(0, -1),
            Direction::SouthEast => CubeCoordinate::new(0, 1),
            Direction::SouthWest => CubeCoordinate::new(-1, 1),
        }
    }

    /// Unit cube step back to a direction
    pub fn from_cube_delta(delta: CubeCoordinate) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.cube_delta() == delta)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::NorthWest => Direction::SouthEast,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
        }
    }

    /// -1 going up, 1 going down, 0 along a row
    pub fn row_sign(self) -> i8 {
        match self {
            Direction::East | Direction::West => 0,
            Direction::NorthEast | Direction::NorthWest => -1,
            Direction::SouthEast | Direction::SouthWest => 1,
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Direction::East => "E",
            Direction::West => "W",
            Direction::NorthEast => "NE",
            Direction::NorthWest => "NW",
            Direction::SouthEast => "SE",
            Direction::SouthWest => "SW",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl FromStr for Direction {
    type Err = GeometryError;

    /// Accepts `ne`, `NE`, `northeast`, `north-east`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "e" | "east" => Ok(Direction::East),
            "w" | "west" => Ok(Direction::West),
            "ne" | "northeast" => Ok(Direction::NorthEast),
            "nw" | "northwest" => Ok(Direction::NorthWest),
            "se" | "southeast" => Ok(Direction::SouthEast),
            "sw" | "southwest" => Ok(Direction::SouthWest),
            _ => Err(GeometryError::InvalidDirection(s.to_string())),
        }
    }
}

/// A one-cell displacement and the row it starts from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub d_row: i8,
    pub d_col: i8,
    pub origin_row: u8,
}

impl Step {
    pub const fn new(d_row: i8, d_col: i8, origin_row: u8) -> Self {
        Self {
            d_row,
            d_col,
            origin_row,
        }
    }

    /// Raw displacement from `from` to `to`
    ///
    /// Displacements beyond `i8` saturate, so they never classify as a step.
    pub fn between(from: Position, to: Position) -> Self {
        Self {
            d_row: saturating_delta(from.row, to.row),
            d_col: saturating_delta(from.col, to.col),
            origin_row: from.row,
        }
    }
}

fn saturating_delta(from: u8, to: u8) -> i8 {
    let delta = i16::from(to) - i16::from(from);
    i8::try_from(delta).unwrap_or(if delta < 0 { i8::MIN } else { i8::MAX })
}

impl HexBoard {
    /// Raw direction category of a one-cell step
    ///
    /// Pure row moves (`d_col == 0`) resolve by origin: down is south-west
    /// from the midline or above and south-east below it; up is north-east
    /// from the midline or above and north-west below it. `None` for the
    /// zero step and for anything larger than one cell.
    pub fn classify_step(&self, step: Step) -> Option<Direction> {
        let upper_half = step.origin_row <= self.midline();
        match (step.d_row, step.d_col) {
            (0, 1) => Some(Direction::East),
            (0, -1) => Some(Direction::West),
            (1, 1) => Some(Direction::SouthEast),
            (1, -1) => Some(Direction::SouthWest),
            (1, 0) if upper_half => Some(Direction::SouthWest),
            (1, 0) => Some(Direction::SouthEast),
            (-1, 1) => Some(Direction::NorthEast),
            (-1, -1) => Some(Direction::NorthWest),
            (-1, 0) if upper_half => Some(Direction::NorthEast),
            (-1, 0) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// True if `second` continues the line `first` was moving along
    ///
    /// Both must move the same way vertically (one row up, one row down, or
    /// along the row). Their categories then match, or form a south-east /
    /// south-west (north-east / north-west going up) pair where one of the
    /// steps is a pure row move leaving the midline.
    pub fn is_same_direction(&self, first: Step, second: Step) -> bool {
        if first.d_row != second.d_row || first.d_row.unsigned_abs() > 1 {
            return false;
        }
        let (Some(a), Some(b)) = (self.classify_step(first), self.classify_step(second)) else {
            return false;
        };
        if a == b {
            return true;
        }

        let leaves_midline = |s: Step| s.origin_row == self.midline() && s.d_col == 0;
        let flip_pair = matches!(
            (a, b),
            (Direction::SouthEast, Direction::SouthWest)
                | (Direction::SouthWest, Direction::SouthEast)
                | (Direction::NorthEast, Direction::NorthWest)
                | (Direction::NorthWest, Direction::NorthEast)
        );
        flip_pair && (leaves_midline(first) || leaves_midline(second))
    }

    /// Direction from `a` to `b` if they are distinct and on a straight line
    pub fn direction_between(&self, a: Position, b: Position) -> GeometryResult<Option<Direction>> {
        let delta = self.to_cube(b)? - self.to_cube(a)?;
        let origin = CubeCoordinate::new(0, 0);
        let steps = i16::from(delta.board_distance(origin));
        if steps == 0 || !delta.shares_axis(origin) {
            return Ok(None);
        }
        let unit = CubeCoordinate::from_axes(delta.x() / steps, delta.z() / steps);
        Ok(Direction::from_cube_delta(unit))
    }

    /// The adjacent cell one step along `direction`, `None` at the edge
    pub fn neighbor(&self, pos: Position, direction: Direction) -> GeometryResult<Option<Position>> {
        let pos = self.validate(pos)?;
        Ok(self.next_in_direction(pos, direction))
    }

    /// Pick, among the adjacent cells, the one continuing the cube line
    fn next_in_direction(&self, pos: Position, direction: Direction) -> Option<Position> {
        let target = self.cube(pos) + direction.cube_delta();
        self.neighbors(pos).find(|&n| self.cube(n) == target)
    }

    /// Lazily walk from `from` along `direction`, at most `max_steps` cells
    ///
    /// The first item is the cell next to `from`. The walk ends at the board
    /// edge or when a step stops continuing the line.
    pub fn walk_ray(
        &self,
        from: Position,
        direction: Direction,
        max_steps: usize,
    ) -> GeometryResult<RayWalk<'_>> {
        let from = self.validate(from)?;
        Ok(RayWalk {
            board: self,
            current: from,
            direction,
            previous: None,
            remaining: max_steps,
        })
    }
}

/// Iterator over the cells of a ray, see [`HexBoard::walk_ray`]
#[derive(Debug)]
pub struct RayWalk<'a> {
    board: &'a HexBoard,
    current: Position,
    direction: Direction,
    previous: Option<Step>,
    remaining: usize,
}

impl RayWalk<'_> {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Iterator for RayWalk<'_> {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.remaining == 0 {
            return None;
        }

        let Some(next) = self.board.next_in_direction(self.current, self.direction) else {
            tracing::trace!("Ray {} reached the edge at {}", self.direction, self.current);
            self.remaining = 0;
            return None;
        };

        let step = Step::between(self.current, next);
        if let Some(previous) = self.previous {
            if !self.board.is_same_direction(previous, step) {
                tracing::trace!(
                    "Ray {} stopped at {}: {:?} does not continue {:?}",
                    self.direction,
                    self.current,
                    step,
                    previous
                );
                self.remaining = 0;
                return None;
            }
        }

        self.previous = Some(step);
        self.current = next;
        self.remaining -= 1;
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for RayWalk<'_> {}
