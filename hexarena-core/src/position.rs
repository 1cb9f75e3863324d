//! Cell addressing: `hex-{row}-{col}` positions and cube coordinates

use crate::error::GeometryError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Prefix of the boundary identifier
const ID_PREFIX: &str = "hex";

/// A board cell addressed by 1-based row and column
///
/// Range checks against a shape happen on [`crate::HexBoard`]; the value type
/// only guarantees both parts are non-zero when it came from parsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", ID_PREFIX, self.row, self.col)
    }
}

impl FromStr for Position {
    type Err = GeometryError;

    /// Parse `hex-{row}-{col}` (syntax only, no board range check)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::InvalidPosition(format!("malformed identifier {s:?}"));

        let mut parts = s.split('-');
        let (Some(prefix), Some(row), Some(col), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(malformed());
        };
        if prefix != ID_PREFIX {
            return Err(malformed());
        }

        let parse_part = |part: &str| -> Result<u8, GeometryError> {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            match part.parse::<u8>() {
                Ok(0) | Err(_) => Err(GeometryError::InvalidPosition(format!(
                    "{s:?} is outside any board"
                ))),
                Ok(n) => Ok(n),
            }
        };

        Ok(Position::new(parse_part(row)?, parse_part(col)?))
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Largest magnitude of the `x` and `z` axes; `y` then always fits in `i16`
const AXIS_LIMIT: i16 = i16::MAX / 2;

/// Cube coordinate `(x, y, z)` with `x + y + z == 0`
///
/// Only ever built from two axes, so the invariant always holds. Axes are
/// stored wider than the `i8` inputs and `+`/`-` saturate at `AXIS_LIMIT`,
/// which lies far outside any board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CubeCoordinate {
    x: i16,
    y: i16,
    z: i16,
}

impl CubeCoordinate {
    /// Build from the x and z axes; y is derived
    pub const fn new(x: i8, z: i8) -> Self {
        let (x, z) = (x as i16, z as i16);
        Self { x, y: -x - z, z }
    }

    /// Build from wide axes, clamping each to the axis limit
    pub(crate) fn from_axes(x: i16, z: i16) -> Self {
        let x = x.clamp(-AXIS_LIMIT, AXIS_LIMIT);
        let z = z.clamp(-AXIS_LIMIT, AXIS_LIMIT);
        Self { x, y: -x - z, z }
    }

    pub fn x(&self) -> i16 {
        self.x
    }

    pub fn y(&self) -> i16 {
        self.y
    }

    pub fn z(&self) -> i16 {
        self.z
    }

    /// Cube distance
    pub fn distance_to(&self, other: CubeCoordinate) -> u16 {
        let axis = |a: i16, b: i16| (i32::from(a) - i32::from(b)).unsigned_abs();
        let d = axis(self.x, other.x)
            .max(axis(self.y, other.y))
            .max(axis(self.z, other.z));
        u16::try_from(d).unwrap_or(u16::MAX)
    }

    /// Distance between two cells of one board (at most twice the widest row)
    pub(crate) fn board_distance(&self, other: CubeCoordinate) -> u8 {
        u8::try_from(self.distance_to(other)).unwrap_or(u8::MAX)
    }

    /// True if the two coordinates share at least one axis value
    pub fn shares_axis(&self, other: CubeCoordinate) -> bool {
        self.x == other.x || self.y == other.y || self.z == other.z
    }
}

impl Add for CubeCoordinate {
    type Output = CubeCoordinate;

    fn add(self, rhs: CubeCoordinate) -> CubeCoordinate {
        CubeCoordinate::from_axes(self.x.saturating_add(rhs.x), self.z.saturating_add(rhs.z))
    }
}

impl Sub for CubeCoordinate {
    type Output = CubeCoordinate;

    fn sub(self, rhs: CubeCoordinate) -> CubeCoordinate {
        CubeCoordinate::from_axes(self.x.saturating_sub(rhs.x), self.z.saturating_sub(rhs.z))
    }
}

impl fmt::Display for CubeCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
