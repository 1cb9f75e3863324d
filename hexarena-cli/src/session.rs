//! Shared command state: the board being inspected and the output mode

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use hexarena_core::{BoardShape, HexBoard, Position};

pub struct Session {
    pub board: HexBoard,
    pub json: bool,
}

impl Session {
    /// Build the board from an optional shape file
    pub fn open(shape: Option<&Path>, json: bool) -> Result<Self> {
        let shape = match shape {
            Some(path) => {
                let shape = BoardShape::load(path)
                    .with_context(|| format!("Failed to load board shape: {}", path.display()))?;
                tracing::info!("Loaded board shape {:?} from {}", shape.rows(), path.display());
                shape
            }
            None => BoardShape::standard(),
        };

        Ok(Self {
            board: HexBoard::new(shape),
            json,
        })
    }

    /// Parse and range-check one `hex-{row}-{col}` argument
    pub fn position(&self, id: &str) -> Result<Position> {
        self.board
            .parse(id)
            .with_context(|| format!("Bad position argument {id:?}"))
    }

    pub fn positions(&self, ids: &[String]) -> Result<Vec<Position>> {
        ids.iter().map(|id| self.position(id)).collect()
    }

    /// Print a report as JSON or through its text formatter
    pub fn emit<T: Serialize>(&self, report: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(report)?);
        } else {
            println!("{}", text(report));
        }
        Ok(())
    }
}
