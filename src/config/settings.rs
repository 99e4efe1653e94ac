//! Configuration settings for replaying Game of Life patterns

use crate::game_of_life::{BoardConfig, Coordinate, EdgePolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardSettings,
    pub simulation: SimulationConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSettings {
    pub width: i64,
    pub height: i64,
    #[serde(default)]
    pub edge_policy: EdgePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Generations replayed by `run`, and the horizon of `analyze`
    pub generations: usize,
    /// Longest period looked for when classifying a pattern
    pub max_period: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: PathBuf,
    #[serde(default)]
    pub offset_x: i64,
    #[serde(default)]
    pub offset_y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub show_grid: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board: BoardSettings {
                width: 32,
                height: 24,
                edge_policy: EdgePolicy::Bounded,
            },
            simulation: SimulationConfig {
                generations: 10,
                max_period: 30,
            },
            input: InputConfig {
                pattern_file: PathBuf::from("patterns/glider.txt"),
                offset_x: 1,
                offset_y: 1,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output/replays"),
                show_grid: true,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.board_config().context("Invalid board settings")?;

        if self.simulation.max_period == 0 {
            anyhow::bail!("Maximum period must be positive");
        }

        Ok(())
    }

    /// The board described by these settings
    pub fn board_config(&self) -> Result<BoardConfig> {
        Ok(BoardConfig::new(
            self.board.width,
            self.board.height,
            self.board.edge_policy,
        )?)
    }

    /// Where the pattern's top-left corner is placed on the board
    pub fn pattern_offset(&self) -> Coordinate {
        Coordinate::new(self.input.offset_x, self.input.offset_y)
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.simulation.generations = generations;
        }
        if let Some(edge_policy) = cli_overrides.edge_policy {
            self.board.edge_policy = edge_policy;
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = pattern_file.clone();
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub edge_policy: Option<EdgePolicy>,
    pub pattern_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub format: Option<OutputFormat>,
}
