//! Board dimensions and edge handling

use super::{Coordinate, LifeError};
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How neighbor lookups behave at the board edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Off-board neighbors do not exist and contribute nothing.
    #[default]
    Bounded,
    /// The board wraps on all four edges.
    Toroidal,
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgePolicy::Bounded => write!(f, "bounded"),
            EdgePolicy::Toroidal => write!(f, "toroidal"),
        }
    }
}

/// Dimensions and edge policy of a simulation run.
///
/// A [`super::CoordinateSet`] is always interpreted against exactly one board. The
/// fields are public so a board can be reinterpreted under another policy, which
/// means a `BoardConfig` may be invalid until [`BoardConfig::validate`] says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub edge_policy: EdgePolicy,
}

impl BoardConfig {
    /// Create a validated board
    pub fn new(width: i64, height: i64, edge_policy: EdgePolicy) -> Result<Self, LifeError> {
        let config = Self {
            width,
            height,
            edge_policy,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn bounded(width: i64, height: i64) -> Result<Self, LifeError> {
        Self::new(width, height, EdgePolicy::Bounded)
    }

    pub fn toroidal(width: i64, height: i64) -> Result<Self, LifeError> {
        Self::new(width, height, EdgePolicy::Toroidal)
    }

    /// Check that both dimensions are at least 1
    pub fn validate(&self) -> Result<(), LifeError> {
        if self.width < 1 || self.height < 1 {
            return Err(LifeError::InvalidConfig {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Same dimensions, different edge policy
    pub fn with_edge_policy(&self, edge_policy: EdgePolicy) -> Self {
        Self {
            edge_policy,
            ..*self
        }
    }

    /// Number of cells on the board, saturating at `i64::MAX`
    pub fn area(&self) -> i64 {
        self.width.saturating_mul(self.height)
    }

    #[inline]
    pub fn in_bounds(&self, c: Coordinate) -> bool {
        c.x >= 0 && c.x < self.width && c.y >= 0 && c.y < self.height
    }

    /// Normalize a raw coordinate under this board's edge policy.
    ///
    /// Bounded boards reject anything off the board; toroidal boards wrap it.
    pub fn normalize(&self, c: Coordinate) -> Result<Coordinate, LifeError> {
        match self.edge_policy {
            EdgePolicy::Bounded if self.in_bounds(c) => Ok(c),
            EdgePolicy::Bounded => Err(LifeError::InvalidCoordinate {
                x: c.x,
                y: c.y,
                width: self.width,
                height: self.height,
            }),
            EdgePolicy::Toroidal => Ok(self.wrap(c)),
        }
    }

    #[inline]
    fn wrap(&self, c: Coordinate) -> Coordinate {
        Coordinate::new(c.x.rem_euclid(self.width), c.y.rem_euclid(self.height))
    }

    /// The cell at offset (dx, dy) from `c`, or `None` when a bounded board has no
    /// such cell.
    #[inline]
    pub fn neighbor(&self, c: Coordinate, dx: i64, dy: i64) -> Option<Coordinate> {
        let raw = Coordinate::new(c.x + dx, c.y + dy);
        match self.edge_policy {
            EdgePolicy::Bounded => self.in_bounds(raw).then_some(raw),
            EdgePolicy::Toroidal => Some(self.wrap(raw)),
        }
    }

    /// Moore neighborhood of `c` after edge handling.
    ///
    /// On toroidal boards narrower than 3 cells the same coordinate can appear more
    /// than once; each appearance counts as a separate neighbor.
    pub fn neighbors(&self, c: Coordinate) -> impl Iterator<Item = Coordinate> + '_ {
        MOORE_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.neighbor(c, dx, dy))
    }
}

impl fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} ({})", self.width, self.height, self.edge_policy)
    }
}

/// The 8 offsets of the Moore neighborhood
pub const MOORE_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Offsets of the Moore neighborhood including the cell itself
pub fn moore_offsets_with_center() -> impl Iterator<Item = (i64, i64)> {
    iproduct!(-1..=1, -1..=1)
}
