//! Distance, straight lines and line of sight

use crate::board::HexBoard;
use crate::error::GeometryResult;
use crate::position::Position;
use crate::walker::Direction;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Read-only view of which cells hold a piece
///
/// The engine only borrows an occupancy for the duration of one call.
pub trait Occupancy {
    fn is_occupied(&self, pos: Position) -> bool;
}

impl<S: BuildHasher> Occupancy for HashSet<Position, S> {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

impl Occupancy for BTreeSet<Position> {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

impl Occupancy for [Position] {
    fn is_occupied(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

impl Occupancy for Vec<Position> {
    fn is_occupied(&self, pos: Position) -> bool {
        self.as_slice().is_occupied(pos)
    }
}

impl HexBoard {
    /// Hex distance (number of steps)
    pub fn distance(&self, a: Position, b: Position) -> GeometryResult<u8> {
        Ok(self.to_cube(a)?.board_distance(self.to_cube(b)?))
    }

    /// True if `a` and `b` lie on one of the grid's straight lines
    ///
    /// Shared cube axis, nothing else. A position is on a line with itself.
    pub fn is_straight_line(&self, a: Position, b: Position) -> GeometryResult<bool> {
        Ok(self.to_cube(a)?.shares_axis(self.to_cube(b)?))
    }

    /// True if `b` can be seen from `a` along a straight, unblocked line
    ///
    /// Occupied cells strictly between the two block the view; `a` and `b`
    /// themselves may be occupied.
    pub fn is_visible_in_straight_line<O>(
        &self,
        a: Position,
        b: Position,
        occupied: &O,
    ) -> GeometryResult<bool>
    where
        O: Occupancy + ?Sized,
    {
        let Some(direction) = self.direction_between(a, b)? else {
            return Ok(false);
        };
        let steps = self.cube(a).board_distance(self.cube(b));

        for pos in self.walk_ray(a, direction, steps as usize)? {
            if pos == b {
                return Ok(true);
            }
            if occupied.is_occupied(pos) {
                tracing::trace!("Line {} -> {} blocked at {}", a, b, pos);
                return Ok(false);
            }
        }

        Ok(false)
    }

    /// Every position visible from `from`, each direction ending at the
    /// first occupied cell (which is itself visible)
    pub fn visible_from<O>(&self, from: Position, occupied: &O) -> GeometryResult<Vec<Position>>
    where
        O: Occupancy + ?Sized,
    {
        let mut visible = Vec::new();
        for direction in Direction::ALL {
            for pos in self.walk_ray(from, direction, usize::MAX)? {
                visible.push(pos);
                if occupied.is_occupied(pos) {
                    break;
                }
            }
        }
        Ok(visible)
    }

    /// Empty cells reachable by sliding from `from` until blocked or off the board
    pub fn slide<O>(
        &self,
        from: Position,
        direction: Direction,
        occupied: &O,
    ) -> GeometryResult<Vec<Position>>
    where
        O: Occupancy + ?Sized,
    {
        Ok(self
            .walk_ray(from, direction, usize::MAX)?
            .take_while(|&pos| !occupied.is_occupied(pos))
            .collect())
    }

    /// All positions at exactly `radius` from `center`
    pub fn ring(&self, center: Position, radius: u8) -> GeometryResult<Vec<Position>> {
        let origin = self.to_cube(center)?;
        Ok(self
            .positions()
            .filter(|&p| self.cube(p).board_distance(origin) == radius)
            .collect())
    }

    /// All positions within `range` of `center`, `center` included
    pub fn positions_within(&self, center: Position, range: u8) -> GeometryResult<Vec<Position>> {
        let origin = self.to_cube(center)?;
        Ok(self
            .positions()
            .filter(|&p| self.cube(p).board_distance(origin) <= range)
            .collect())
    }
}
