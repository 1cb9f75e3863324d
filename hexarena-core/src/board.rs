//! Hex board geometry: row/column positions mapped onto cube coordinates
//!
//! Rows run top to bottom. With `m` the midline (widest row) and `k` the
//! centre column of that row:
//!
//! ```text
//! x = col - k + max(0, m - row)
//! z = row - m
//! y = -x - z
//! ```
//!
//! On the standard board the centre cell `hex-4-4` sits at the origin and the
//! corners `hex-1-1`, `hex-1-4`, `hex-4-1`, `hex-4-7`, `hex-7-1`, `hex-7-4`
//! are the six cells at distance 3.

use crate::error::{GeometryError, GeometryResult};
use crate::position::{CubeCoordinate, Position};
use crate::shape::BoardShape;

/// Geometry engine for one board shape
///
/// Stateless apart from the immutable shape; every query is a pure function
/// of its arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexBoard {
    shape: BoardShape,
}

impl HexBoard {
    pub fn new(shape: BoardShape) -> Self {
        if shape != BoardShape::standard() {
            tracing::debug!(
                "Building board with custom shape {:?} (midline row {})",
                shape.rows(),
                shape.midline()
            );
        }
        Self { shape }
    }

    /// The 4-5-6-7-6-5-4 arena
    pub fn standard() -> Self {
        Self {
            shape: BoardShape::standard(),
        }
    }

    pub fn shape(&self) -> &BoardShape {
        &self.shape
    }

    /// Row where the neighbour-offset rule flips
    pub fn midline(&self) -> u8 {
        self.shape.midline()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.shape.cell_count()
    }

    /// Always false, shapes have at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    // ========================================================================
    // VALIDATION & PARSING
    // ========================================================================

    /// Check if a position is on this board
    pub fn is_on_board(&self, pos: Position) -> bool {
        match self.shape.width(pos.row) {
            Some(width) => pos.col >= 1 && pos.col <= width,
            None => false,
        }
    }

    /// Pass a position through unchanged if it is on the board
    pub fn validate(&self, pos: Position) -> GeometryResult<Position> {
        if self.is_on_board(pos) {
            Ok(pos)
        } else {
            Err(GeometryError::off_board(pos.row, pos.col))
        }
    }

    /// Checked constructor
    pub fn position(&self, row: u8, col: u8) -> GeometryResult<Position> {
        self.validate(Position::new(row, col))
    }

    /// Parse a `hex-{row}-{col}` identifier and range-check it
    pub fn parse(&self, id: &str) -> GeometryResult<Position> {
        self.validate(id.parse()?)
    }

    /// Every cell, row-major
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.shape
            .rows()
            .iter()
            .enumerate()
            .flat_map(|(i, &width)| (1..=width).map(move |col| Position::new(i as u8 + 1, col)))
    }

    // ========================================================================
    // COORDINATE MAPPER
    // ========================================================================

    /// Map a position onto cube coordinates
    pub fn to_cube(&self, pos: Position) -> GeometryResult<CubeCoordinate> {
        self.validate(pos).map(|pos| self.cube(pos))
    }

    /// Inverse of [`HexBoard::to_cube`]; `None` for coordinates off this board
    pub fn from_cube(&self, cube: CubeCoordinate) -> Option<Position> {
        let row = cube.z() + i16::from(self.midline());
        if row < 1 || row > i16::from(self.shape.row_count()) {
            return None;
        }
        let col = cube.x() + i16::from(self.shape.center_col())
            - i16::from(self.widening_shift(row as u8));
        let pos = Position::new(row as u8, u8::try_from(col).ok()?);
        self.is_on_board(pos).then_some(pos)
    }

    /// Cube coordinate of a position already known to be on the board
    pub(crate) fn cube(&self, pos: Position) -> CubeCoordinate {
        let x = i16::from(pos.col) - i16::from(self.shape.center_col())
            + i16::from(self.widening_shift(pos.row));
        let z = i16::from(pos.row) - i16::from(self.midline());
        CubeCoordinate::from_axes(x, z)
    }

    /// Half-cell shift of rows above the midline, counted in columns
    fn widening_shift(&self, row: u8) -> u8 {
        self.midline().saturating_sub(row)
    }

    /// Cube distance from the midline's centre cell
    pub fn distance_to_center(&self, pos: Position) -> GeometryResult<u8> {
        let origin = CubeCoordinate::new(0, 0);
        Ok(self.to_cube(pos)?.board_distance(origin))
    }
}

impl Default for HexBoard {
    fn default() -> Self {
        Self::standard()
    }
}
