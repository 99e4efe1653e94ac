//! Coordinates and the sparse set of live cells

use super::{BoardConfig, LifeError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A cell position. `x` grows to the right, `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i64, i64)", into = "(i64, i64)")]
pub struct Coordinate {
    pub x: i64,
    pub y: i64,
}

impl Coordinate {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (i64, i64) {
    fn from(c: Coordinate) -> Self {
        (c.x, c.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The live cells of one generation.
///
/// Sets are immutable: every operation that "changes" a set returns a new one and
/// leaves the receiver untouched. Cloning is cheap because the underlying storage
/// is shared until a modified copy is requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Coordinate>", into = "Vec<Coordinate>")]
pub struct CoordinateSet {
    cells: Arc<HashSet<Coordinate>>,
}

impl CoordinateSet {
    /// The empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from untrusted input, validated against `config`.
    ///
    /// Bounded boards reject out-of-range coordinates with
    /// [`LifeError::InvalidCoordinate`]; toroidal boards wrap them onto the board.
    /// Duplicates (including ones produced by wrapping) collapse into one cell.
    pub fn from_raw<I>(cells: I, config: &BoardConfig) -> Result<Self, LifeError>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        config.validate()?;
        let cells = cells
            .into_iter()
            .map(|c| config.normalize(c))
            .collect::<Result<HashSet<_>, _>>()?;
        Ok(Self {
            cells: Arc::new(cells),
        })
    }

    /// Check that every member lies on `config`'s board
    pub fn validate_against(&self, config: &BoardConfig) -> Result<(), LifeError> {
        config.validate()?;
        match self.cells.iter().find(|c| !config.in_bounds(**c)) {
            Some(c) => Err(LifeError::InvalidCoordinate {
                x: c.x,
                y: c.y,
                width: config.width,
                height: config.height,
            }),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn contains(&self, c: Coordinate) -> bool {
        self.cells.contains(&c)
    }

    /// A new set that also contains `c`
    pub fn add(&self, c: Coordinate) -> Self {
        if self.contains(c) {
            return self.clone();
        }
        let mut cells = (*self.cells).clone();
        cells.insert(c);
        Self {
            cells: Arc::new(cells),
        }
    }

    /// A new set without `c`
    pub fn remove(&self, c: Coordinate) -> Self {
        if !self.contains(c) {
            return self.clone();
        }
        let mut cells = (*self.cells).clone();
        cells.remove(&c);
        Self {
            cells: Arc::new(cells),
        }
    }

    /// Flip the state of one cell
    pub fn toggle(&self, c: Coordinate) -> Self {
        if self.contains(c) {
            self.remove(c)
        } else {
            self.add(c)
        }
    }

    /// Number of live cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over live cells in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().copied()
    }

    /// Live cells sorted by row, then column
    pub fn sorted(&self) -> Vec<Coordinate> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }

    /// Smallest and largest corner of the live region
    pub fn bounding_box(&self) -> Option<(Coordinate, Coordinate)> {
        let mut iter = self.iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), c| {
            (
                Coordinate::new(min.x.min(c.x), min.y.min(c.y)),
                Coordinate::new(max.x.max(c.x), max.y.max(c.y)),
            )
        }))
    }

    /// Every cell shifted by (dx, dy), without any board normalization
    pub fn translated(&self, dx: i64, dy: i64) -> Self {
        self.iter()
            .map(|c| Coordinate::new(c.x + dx, c.y + dy))
            .collect()
    }

    /// The shape shifted so that its bounding box starts at (0, 0)
    pub fn normalized(&self) -> Self {
        match self.bounding_box() {
            Some((min, _)) => self.translated(-min.x, -min.y),
            None => self.clone(),
        }
    }
}

impl PartialEq for CoordinateSet {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells) || self.cells == other.cells
    }
}

impl Eq for CoordinateSet {}

impl Hash for CoordinateSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Membership, not storage order, defines identity.
        self.sorted().hash(state);
    }
}

/// Collects without board validation; callers own the board invariant.
impl FromIterator<Coordinate> for CoordinateSet {
    fn from_iter<T: IntoIterator<Item = Coordinate>>(iter: T) -> Self {
        Self {
            cells: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl From<Vec<Coordinate>> for CoordinateSet {
    fn from(cells: Vec<Coordinate>) -> Self {
        cells.into_iter().collect()
    }
}

impl From<CoordinateSet> for Vec<Coordinate> {
    fn from(set: CoordinateSet) -> Self {
        set.sorted()
    }
}

impl<'a> IntoIterator for &'a CoordinateSet {
    type Item = &'a Coordinate;
    type IntoIter = std::collections::hash_set::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl fmt::Display for CoordinateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, c) in self.sorted().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "}}")
    }
}
