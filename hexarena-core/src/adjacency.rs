//! Neighbour lookup with the board's asymmetric row offsets
//!
//! A row is offset half a cell against the rows around it, and the side of
//! the offset depends on which of the two is wider:
//!
//! | origin row         | row above        | row below        |
//! |--------------------|------------------|------------------|
//! | above the midline  | `col-1`, `col`   | `col`, `col+1`   |
//! | on the midline     | `col-1`, `col`   | `col-1`, `col`   |
//! | below the midline  | `col`, `col+1`   | `col-1`, `col`   |
//!
//! Looking into a narrower row reaches `col-1`/`col`, looking into a wider
//! one reaches `col`/`col+1`. The midline is the only row whose neighbours
//! on both sides are narrower.

use crate::board::HexBoard;
use crate::error::GeometryResult;
use crate::position::Position;
use rustc_hash::FxHashSet;

impl HexBoard {
    /// All positions sharing an edge with `pos` (at most 6)
    pub fn adjacent_positions(&self, pos: Position) -> GeometryResult<FxHashSet<Position>> {
        let pos = self.validate(pos)?;
        Ok(self.neighbors(pos).collect())
    }

    /// True if `a` and `b` share an edge
    pub fn is_adjacent(&self, a: Position, b: Position) -> GeometryResult<bool> {
        let a = self.validate(a)?;
        let b = self.validate(b)?;
        Ok(self.neighbors(a).any(|n| n == b))
    }

    /// Neighbours of an on-board position, unordered
    pub(crate) fn neighbors(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        let Position { row, col } = pos;
        let midline = self.midline();

        // Column offsets into the row above / below
        let above: [i16; 2] = if row <= midline { [-1, 0] } else { [0, 1] };
        let below: [i16; 2] = if row < midline { [0, 1] } else { [-1, 0] };

        let same_row = [(0i16, -1i16), (0, 1)];
        let up = above.map(|dc| (-1i16, dc));
        let down = below.map(|dc| (1i16, dc));

        same_row
            .into_iter()
            .chain(up)
            .chain(down)
            .filter_map(move |(dr, dc)| {
                let row = u8::try_from(i16::from(row) + dr).ok()?;
                let col = u8::try_from(i16::from(col) + dc).ok()?;
                let candidate = Position::new(row, col);
                self.is_on_board(candidate).then_some(candidate)
            })
    }
}
