//! Board shape table (row -> width)

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Row widths of the standard arena, top to bottom
pub const STANDARD_ROWS: [u8; 7] = [4, 5, 6, 7, 6, 5, 4];

/// Largest row count or row width a shape may have (keeps board distances in `u8`)
pub const MAX_EXTENT: u8 = 63;

/// On-disk form of a shape, validated on the way in
#[derive(Deserialize)]
struct ShapeTable {
    rows: Vec<u8>,
}

/// Immutable row -> width table describing a hex board
///
/// Widths grow by one per row down to a single widest row (the midline) and
/// shrink by one per row after it. Rows and columns are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShapeTable")]
pub struct BoardShape {
    rows: Vec<u8>,
    #[serde(skip)]
    midline: u8,
}

impl BoardShape {
    /// Validate a width table
    pub fn new(rows: Vec<u8>) -> GeometryResult<Self> {
        if rows.is_empty() {
            return Err(GeometryError::InvalidShape("no rows".to_string()));
        }
        if rows.len() > MAX_EXTENT as usize {
            return Err(GeometryError::InvalidShape(format!(
                "{} rows exceeds the limit of {}",
                rows.len(),
                MAX_EXTENT
            )));
        }
        if let Some(row) = rows.iter().position(|&w| w == 0 || w > MAX_EXTENT) {
            return Err(GeometryError::InvalidShape(format!(
                "row {} has width {} (allowed 1..={})",
                row + 1,
                rows[row],
                MAX_EXTENT
            )));
        }

        // First widest row; every row before it must be one narrower than
        // the next, every row after it one narrower than the previous.
        let widest = rows.iter().copied().max().unwrap_or(0);
        let mid = rows.iter().position(|&w| w == widest).unwrap_or(0);

        for i in 1..rows.len() {
            let expected = if i <= mid {
                rows[i - 1] + 1
            } else {
                rows[i - 1].wrapping_sub(1)
            };
            if rows[i] != expected {
                return Err(GeometryError::InvalidShape(format!(
                    "row {} has width {}, expected {}",
                    i + 1,
                    rows[i],
                    expected
                )));
            }
        }

        Ok(Self {
            rows,
            midline: mid as u8 + 1,
        })
    }

    /// The 4-5-6-7-6-5-4 arena board
    pub fn standard() -> Self {
        Self {
            rows: STANDARD_ROWS.to_vec(),
            midline: 4,
        }
    }

    /// Widths, top row first
    pub fn rows(&self) -> &[u8] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Width of a 1-based row, `None` off the board
    pub fn width(&self, row: u8) -> Option<u8> {
        if row == 0 {
            return None;
        }
        self.rows.get(row as usize - 1).copied()
    }

    /// The widest row, where the neighbour-offset rule flips
    pub fn midline(&self) -> u8 {
        self.midline
    }

    /// Width of the midline row
    pub fn max_width(&self) -> u8 {
        self.rows[self.midline as usize - 1]
    }

    /// Centre column of the midline row (column 4 on the standard board)
    pub fn center_col(&self) -> u8 {
        self.max_width().div_ceil(2)
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|&w| w as usize).sum()
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let shape: BoardShape = serde_json::from_str(&content)?;
        Ok(shape)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl TryFrom<ShapeTable> for BoardShape {
    type Error = GeometryError;

    fn try_from(table: ShapeTable) -> Result<Self, Self::Error> {
        BoardShape::new(table.rows)
    }
}

impl Default for BoardShape {
    fn default() -> Self {
        Self::standard()
    }
}
