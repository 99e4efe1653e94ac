//! Sparse Game of Life simulation
//!
//! This library steps Conway's Game of Life on bounded or toroidal boards using a
//! sparse set of live cells, and provides the tooling to replay and analyze
//! named patterns.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{BoardConfig, Coordinate, CoordinateSet, EdgePolicy, GameOfLifeRules, LifeError};
pub use simulation::{Replay, Simulation};

use anyhow::{Context, Result};

/// Replay the pattern described by `settings`
pub fn replay_from_settings(settings: &Settings) -> Result<Replay> {
    let board = settings.board_config()?;
    let pattern = game_of_life::load_pattern_from_file(&settings.input.pattern_file)?;
    let initial = pattern
        .place(&board, settings.pattern_offset())
        .with_context(|| {
            format!(
                "Pattern {} does not fit the {} board",
                settings.input.pattern_file.display(),
                board
            )
        })?;

    let name = settings
        .input
        .pattern_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("pattern");

    Ok(Replay::record(
        name,
        board,
        initial,
        settings.simulation.generations,
        settings.simulation.max_period,
    )?)
}
