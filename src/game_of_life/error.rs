//! Errors raised by the simulation core

use thiserror::Error;

/// Input-validation failures of the core. Both are local to the failing call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifeError {
    #[error("invalid board configuration: {width}x{height} (width and height must be at least 1)")]
    InvalidConfig { width: i64, height: i64 },

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    InvalidCoordinate {
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    },
}
