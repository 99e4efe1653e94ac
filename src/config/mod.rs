//! Configuration management for the replay tool

pub mod settings;

pub use settings::{
    BoardSettings, CliOverrides, InputConfig, OutputConfig, OutputFormat, Settings,
    SimulationConfig,
};
