//! Recorded replays of a named pattern

use super::{PatternAnalysis, Simulation};
use crate::game_of_life::{BoardConfig, CoordinateSet, LifeError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::info;

/// A named pattern replayed for a number of generations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Replay {
    /// Name of the replayed configuration
    pub name: String,
    /// Board the replay ran on
    pub board: BoardConfig,
    /// Generation 0 followed by every generation that was computed
    pub generations: Vec<CoordinateSet>,
    /// What became of the pattern
    pub analysis: PatternAnalysis,
    /// Time spent stepping
    #[serde(skip)]
    pub elapsed: Duration,
}

impl Replay {
    /// Replay `initial` on `board` for `generations` ticks
    pub fn record(
        name: impl Into<String>,
        board: BoardConfig,
        initial: CoordinateSet,
        generations: usize,
        max_period: usize,
    ) -> Result<Self, LifeError> {
        let name = name.into();
        let start_time = Instant::now();

        let mut simulation = Simulation::new(board, initial)?.with_history_limit(0);
        let mut path = Vec::with_capacity(generations + 1);
        path.push(simulation.current().clone());
        for _ in 0..generations {
            path.push(simulation.step()?.clone());
        }

        let elapsed = start_time.elapsed();
        let analysis = PatternAnalysis::analyze(&path, max_period);
        info!(
            name = %name,
            generations,
            fate = %analysis.fate,
            elapsed_ms = elapsed.as_millis() as u64,
            "recorded replay"
        );

        Ok(Self {
            name,
            board,
            generations: path,
            analysis,
            elapsed,
        })
    }

    pub fn initial_state(&self) -> Option<&CoordinateSet> {
        self.generations.first()
    }

    pub fn final_state(&self) -> Option<&CoordinateSet> {
        self.generations.last()
    }

    pub fn state_at_generation(&self, generation: usize) -> Option<&CoordinateSet> {
        self.generations.get(generation)
    }

    /// Number of generations computed after the initial one
    pub fn generation_count(&self) -> usize {
        self.generations.len().saturating_sub(1)
    }

    /// Population of every recorded generation
    pub fn populations(&self) -> Vec<usize> {
        self.generations.iter().map(CoordinateSet::len).collect()
    }

    pub fn summary(&self) -> ReplaySummary {
        ReplaySummary {
            name: self.name.clone(),
            board: self.board.to_string(),
            generations: self.generation_count(),
            initial_population: self.analysis.initial_population,
            final_population: self.analysis.final_population,
            fate: self.analysis.fate.to_string(),
            elapsed_ms: self.elapsed.as_millis() as u64,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a replay and check every stored generation against its board
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let replay: Replay = serde_json::from_str(json).context("Failed to parse replay JSON")?;
        for (generation, state) in replay.generations.iter().enumerate() {
            state
                .validate_against(&replay.board)
                .with_context(|| format!("Generation {} does not fit the board", generation))?;
        }
        Ok(replay)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = self.to_json().context("Failed to serialize replay")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write replay to {}", path.as_ref().display()))?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read replay from {}", path.as_ref().display()))?;
        Self::from_json(&json)
    }
}

/// Summary of a replay for display purposes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySummary {
    pub name: String,
    pub board: String,
    pub generations: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub fate: String,
    pub elapsed_ms: u64,
}

impl std::fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} on {}: {} → {} cells over {} generations, {}, {}ms",
            self.name,
            self.board,
            self.initial_population,
            self.final_population,
            self.generations,
            self.fate,
            self.elapsed_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::Coordinate;
    use crate::simulation::Fate;
    use tempfile::tempdir;

    fn blinker() -> CoordinateSet {
        [(1, 0), (1, 1), (1, 2)]
            .iter()
            .map(|&c: &(i64, i64)| Coordinate::from(c))
            .collect()
    }

    #[test]
    fn test_record_blinker() {
        let board = BoardConfig::bounded(10, 10).unwrap();
        let replay = Replay::record("blinker", board, blinker(), 4, 8).unwrap();

        assert_eq!(replay.generation_count(), 4);
        assert_eq!(replay.populations(), vec![3, 3, 3, 3, 3]);
        assert_eq!(replay.initial_state(), Some(&blinker()));
        assert_eq!(replay.state_at_generation(2), Some(&blinker()));
        assert_eq!(replay.analysis.fate, Fate::Oscillator { since: 0, period: 2 });

        let summary = replay.summary();
        assert_eq!(summary.name, "blinker");
        assert!(summary.to_string().contains("oscillator"));
    }

    #[test]
    fn test_record_rejects_invalid_initial_state() {
        let board = BoardConfig::bounded(2, 2).unwrap();
        assert!(Replay::record("blinker", board, blinker(), 1, 8).is_err());
    }

    #[test]
    fn test_json_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("replay.json");
        let board = BoardConfig::toroidal(6, 6).unwrap();
        let replay = Replay::record("blinker", board, blinker(), 2, 8).unwrap();

        replay.save_to_file(&path).unwrap();
        let loaded = Replay::load_from_file(&path).unwrap();

        assert_eq!(loaded.name, replay.name);
        assert_eq!(loaded.board, replay.board);
        assert_eq!(loaded.generations, replay.generations);
        assert_eq!(loaded.analysis, replay.analysis);
    }

    #[test]
    fn test_from_json_rejects_cells_off_the_board() {
        let json = r#"{
            "name": "broken",
            "board": { "width": 3, "height": 3, "edge_policy": "bounded" },
            "generations": [[[0, 0], [5, 5]]],
            "analysis": {
                "fate": { "kind": "unsettled" },
                "generations_examined": 0,
                "initial_population": 2,
                "final_population": 2,
                "min_population": 2,
                "max_population": 2
            }
        }"#;
        assert!(Replay::from_json(json).is_err());
    }
}
