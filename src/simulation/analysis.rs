//! Classifying where an evolution path ends up

use crate::game_of_life::{Coordinate, CoordinateSet};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Long-term behavior observed along an evolution path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fate {
    /// Every cell had died by `generation`.
    Extinct { generation: usize },
    /// Unchanged from generation `since` on.
    StillLife { since: usize },
    /// Returns to the same cells every `period` generations.
    Oscillator { since: usize, period: usize },
    /// Returns to the same shape every `period` generations, shifted by (dx, dy).
    Spaceship {
        since: usize,
        period: usize,
        dx: i64,
        dy: i64,
    },
    /// No repetition found within the examined generations.
    Unsettled,
}

impl fmt::Display for Fate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fate::Extinct { generation } => write!(f, "extinct at generation {}", generation),
            Fate::StillLife { since } => write!(f, "still life from generation {}", since),
            Fate::Oscillator { since, period } => {
                write!(f, "oscillator with period {} from generation {}", period, since)
            }
            Fate::Spaceship {
                since,
                period,
                dx,
                dy,
            } => write!(
                f,
                "spaceship with period {} moving ({}, {}) from generation {}",
                period, dx, dy, since
            ),
            Fate::Unsettled => write!(f, "unsettled"),
        }
    }
}

/// Population statistics and fate of an evolution path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternAnalysis {
    pub fate: Fate,
    pub generations_examined: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub min_population: usize,
    pub max_population: usize,
}

impl PatternAnalysis {
    /// Analyze an evolution path where `path[i]` is generation `i`.
    ///
    /// Exact repeats are always detected. A translated repeat only counts as a
    /// spaceship when it recurs within `max_period` generations. On toroidal boards a
    /// shape crossing the seam no longer looks like itself, so spaceships are only
    /// recognized away from the edges.
    pub fn analyze(path: &[CoordinateSet], max_period: usize) -> Self {
        let populations: Vec<usize> = path.iter().map(CoordinateSet::len).collect();

        Self {
            fate: Self::classify(path, max_period),
            generations_examined: path.len().saturating_sub(1),
            initial_population: populations.first().copied().unwrap_or(0),
            final_population: populations.last().copied().unwrap_or(0),
            min_population: populations.iter().copied().min().unwrap_or(0),
            max_population: populations.iter().copied().max().unwrap_or(0),
        }
    }

    fn classify(path: &[CoordinateSet], max_period: usize) -> Fate {
        let mut seen: HashMap<&CoordinateSet, usize> = HashMap::new();
        let mut shapes: HashMap<CoordinateSet, (usize, Coordinate)> = HashMap::new();

        for (generation, state) in path.iter().enumerate() {
            let Some((origin, _)) = state.bounding_box() else {
                return Fate::Extinct { generation };
            };

            if let Some(&since) = seen.get(state) {
                let period = generation - since;
                return if period == 1 {
                    Fate::StillLife { since }
                } else {
                    Fate::Oscillator { since, period }
                };
            }

            let shape = state.normalized();
            if let Some(&(since, earlier)) = shapes.get(&shape) {
                let period = generation - since;
                if period <= max_period {
                    return Fate::Spaceship {
                        since,
                        period,
                        dx: origin.x - earlier.x,
                        dy: origin.y - earlier.y,
                    };
                }
            }

            seen.insert(state, generation);
            shapes.insert(shape, (generation, origin));
        }

        Fate::Unsettled
    }

    /// Whether the pattern settled into a still life or oscillator
    pub fn is_periodic(&self) -> bool {
        matches!(self.fate, Fate::StillLife { .. } | Fate::Oscillator { .. })
    }
}

impl fmt::Display for PatternAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern Analysis:")?;
        writeln!(f, "  Fate: {}", self.fate)?;
        writeln!(f, "  Generations examined: {}", self.generations_examined)?;
        writeln!(
            f,
            "  Population: {} → {} (min {}, max {})",
            self.initial_population, self.final_population, self.min_population, self.max_population
        )
    }
}
