//! Error types for the geometry engine

/// Errors raised at the engine's boundary
///
/// Everything past parsing and validation works on well-formed positions,
/// so these are the only failures the engine reports.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// Malformed identifier, or a row/column outside the board shape
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// Unrecognised direction name
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    /// Board shape table that cannot describe a hex board
    #[error("invalid board shape: {0}")]
    InvalidShape(String),
}

impl GeometryError {
    pub(crate) fn off_board(row: u8, col: u8) -> Self {
        GeometryError::InvalidPosition(format!("hex-{row}-{col} is not on the board"))
    }
}

/// Result alias used throughout the engine
pub type GeometryResult<T> = Result<T, GeometryError>;
