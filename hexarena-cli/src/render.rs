//! Board command - ASCII rendering of the board
//!
//! Rows are indented by half a cell per column of width difference, so the
//! picture shows the real hex offsets:
//!
//! ```text
//! 1        .   .   .   .
//! 2      .   .   .   .   .
//! 3    .   .   .   .   .   .
//! 4  .   .   .   .   .   .   .
//! ```

use anyhow::Result;
use clap::Args;
use rustc_hash::FxHashMap;
use serde::Serialize;

use hexarena_core::{CubeCoordinate, HexBoard, Position};

use crate::session::Session;

pub const EMPTY: char = '.';
pub const MARKED: char = '*';
pub const OCCUPIED: char = 'o';
pub const ORIGIN: char = '@';

#[derive(Args)]
pub struct BoardArgs {
    /// Cells to highlight
    #[arg(long, value_delimiter = ',', value_name = "POS")]
    pub mark: Vec<String>,

    /// Cells holding a piece
    #[arg(long, value_delimiter = ',', value_name = "POS")]
    pub occupied: Vec<String>,
}

#[derive(Serialize)]
struct BoardReport {
    rows: Vec<u8>,
    midline: u8,
    cells: Vec<CellReport>,
}

#[derive(Serialize)]
struct CellReport {
    position: Position,
    cube: CubeCoordinate,
    marked: bool,
    occupied: bool,
}

pub fn run(session: &Session, args: BoardArgs) -> Result<()> {
    let marked = session.positions(&args.mark)?;
    let occupied = session.positions(&args.occupied)?;

    let mut marks = FxHashMap::default();
    marks.extend(occupied.iter().map(|&p| (p, OCCUPIED)));
    marks.extend(marked.iter().map(|&p| (p, MARKED)));

    let board = &session.board;
    let report = BoardReport {
        rows: board.shape().rows().to_vec(),
        midline: board.midline(),
        cells: board
            .positions()
            .map(|p| -> Result<CellReport> {
                Ok(CellReport {
                    position: p,
                    cube: board.to_cube(p)?,
                    marked: marked.contains(&p),
                    occupied: occupied.contains(&p),
                })
            })
            .collect::<Result<_>>()?,
    };

    session.emit(&report, |_| render_board(board, &marks))
}

/// Draw the board, one line per row, with per-cell marker characters
pub fn render_board(board: &HexBoard, marks: &FxHashMap<Position, char>) -> String {
    let shape = board.shape();
    let max_width = shape.max_width() as usize;
    let label_width = shape.row_count().to_string().len();
    let mut out = String::new();

    for (i, &width) in shape.rows().iter().enumerate() {
        let row = i as u8 + 1;
        let mut line = format!("{row:<label_width$} ");
        line.push_str(&" ".repeat((max_width - width as usize) * 2));
        for col in 1..=width {
            let mark = marks.get(&Position::new(row, col)).copied().unwrap_or(EMPTY);
            line.push_str(&format!(" {mark}  "));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.pop();
    out
}
