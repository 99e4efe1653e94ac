//! Driving, recording and analyzing simulation runs

pub mod analysis;
pub mod driver;
pub mod replay;

pub use analysis::{Fate, PatternAnalysis};
pub use driver::Simulation;
pub use replay::{Replay, ReplaySummary};
