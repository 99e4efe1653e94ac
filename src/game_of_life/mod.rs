//! Game of Life core functionality

pub mod board;
pub mod coordinate;
pub mod error;
pub mod io;
pub mod rules;

pub use board::{BoardConfig, EdgePolicy};
pub use coordinate::{Coordinate, CoordinateSet};
pub use error::LifeError;
pub use io::{create_example_patterns, load_pattern_from_file, save_generation_to_file, Pattern};
pub use rules::GameOfLifeRules;
