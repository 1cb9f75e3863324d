//! HEXARENA Core - Board geometry engine
//!
//! This crate provides the geometry the arena rules are built on:
//! - Board shape table and `hex-{row}-{col}` positions
//! - Row/column to cube coordinate mapping
//! - Adjacency with the midline offset flip
//! - Distance, straight lines and line of sight
//! - Step classification and lazy ray walks
//!
//! Everything is a pure function of its inputs. A [`HexBoard`] is an
//! immutable value and can be shared freely between threads.
//!
//! ```
//! use hexarena_core::{HexBoard, Position};
//!
//! let board = HexBoard::standard();
//! let from = board.parse("hex-3-3").unwrap();
//! let to = board.parse("hex-7-4").unwrap();
//! let occupied = vec![Position::new(5, 4)];
//!
//! assert!(board.is_straight_line(from, to).unwrap());
//! assert!(!board.is_visible_in_straight_line(from, to, &occupied).unwrap());
//! ```

pub mod error;
pub mod shape;
pub mod position;
pub mod board;
pub mod adjacency;
pub mod line;
pub mod walker;

// Re-exports for convenient access
pub use error::{GeometryError, GeometryResult};
pub use shape::{BoardShape, STANDARD_ROWS};
pub use position::{CubeCoordinate, Position};
pub use board::HexBoard;
pub use line::Occupancy;
pub use walker::{Direction, RayWalk, Step};
