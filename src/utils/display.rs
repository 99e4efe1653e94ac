//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::io::MAX_DENSE_CELLS;
use crate::game_of_life::{BoardConfig, Coordinate, CoordinateSet};
use crate::simulation::{Fate, Replay};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format generations and replays for display
pub struct PatternFormatter;

impl PatternFormatter {
    /// Format a whole replay for console output
    pub fn format_replay(replay: &Replay, show_grid: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("=== {} ===\n", replay.name));
        output.push_str(&format!("Board: {}\n", replay.board));
        output.push_str(&format!("Generations: {}\n", replay.generation_count()));
        output.push_str(&format!("Step Time: {:.3}s\n", replay.elapsed.as_secs_f64()));
        output.push_str(&format!("Fate: {}\n", replay.analysis.fate));
        output.push('\n');

        for (i, generation) in replay.generations.iter().enumerate() {
            output.push_str(&format!("Generation {} (Living: {}):\n", i, generation.len()));
            if show_grid && Self::can_draw(&replay.board) {
                output.push_str(&Self::format_generation_compact(generation, &replay.board));
            } else {
                output.push_str(&format!("{}\n", generation));
            }
            output.push('\n');
        }

        output
    }

    /// One line per generation: index and population
    pub fn format_population_table(replay: &Replay) -> String {
        let mut output = String::new();

        output.push_str("Gen    | Living | Change\n");
        output.push_str("-------|--------|-------\n");

        let populations = replay.populations();
        for (i, population) in populations.iter().enumerate() {
            let change = if i == 0 {
                String::from("-")
            } else {
                format!("{:+}", *population as i64 - populations[i - 1] as i64)
            };
            output.push_str(&format!("{:6} | {:6} | {}\n", i, population, change));
        }

        output
    }

    /// Whether `board` is small enough to draw cell by cell
    pub fn can_draw(board: &BoardConfig) -> bool {
        board.area() <= MAX_DENSE_CELLS
    }

    fn too_large_notice(board: &BoardConfig) -> String {
        format!("(board {} too large to draw)\n", board)
    }

    /// Format a generation in compact form
    pub fn format_generation_compact(generation: &CoordinateSet, board: &BoardConfig) -> String {
        if !Self::can_draw(board) {
            return Self::too_large_notice(board);
        }

        let mut output = String::new();
        for y in 0..board.height {
            for x in 0..board.width {
                output.push(if generation.contains(Coordinate::new(x, y)) { '█' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Format a generation with coordinates
    pub fn format_generation_with_coords(generation: &CoordinateSet, board: &BoardConfig) -> String {
        if !Self::can_draw(board) {
            return format!("{}{}\n", Self::too_large_notice(board), generation);
        }

        let mut output = String::new();

        output.push_str("   ");
        for x in 0..board.width {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for y in 0..board.height {
            output.push_str(&format!("{:2} ", y));
            for x in 0..board.width {
                output.push_str(if generation.contains(Coordinate::new(x, y)) { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    /// Save a replay to `output_dir` in the requested format, returning the files written
    pub fn save_replay<P: AsRef<Path>>(
        replay: &Replay,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<Vec<PathBuf>> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;

        let stem = Self::file_stem(&replay.name);
        let mut written = Vec::new();

        match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("{}.txt", stem));
                std::fs::write(&path, Self::format_replay(replay, true))?;
                written.push(path);
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("{}.json", stem));
                replay.save_to_file(&path)?;
                written.push(path);

                let summary_path = output_dir.join(format!("{}_summary.json", stem));
                let summary_json = serde_json::to_string_pretty(&replay.summary())?;
                std::fs::write(&summary_path, summary_json)?;
                written.push(summary_path);
            }
            OutputFormat::Visual => {
                let path = output_dir.join(format!("{}_visual.txt", stem));
                std::fs::write(&path, Self::create_visual_evolution(replay))?;
                written.push(path);
            }
        }

        Ok(written)
    }

    /// Create a visual representation of the evolution
    fn create_visual_evolution(replay: &Replay) -> String {
        let mut output = String::new();

        output.push_str(&format!("Visual Evolution - {}\n", replay.name));
        output.push_str(&"=".repeat(50));
        output.push('\n');

        for (i, generation) in replay.generations.iter().enumerate() {
            output.push_str(&format!("\nGeneration {} (Living: {}):\n", i, generation.len()));
            output.push_str(&Self::format_generation_with_coords(generation, &replay.board));
        }

        output.push_str("\nReplay Statistics:\n");
        output.push_str(&Self::format_population_table(replay));
        output.push_str(&replay.analysis.to_string());

        output
    }

    fn file_stem(name: &str) -> String {
        let stem: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        if stem.is_empty() {
            String::from("replay")
        } else {
            stem
        }
    }
}

/// ANSI coloring for console messages
pub struct ColorOutput;

impl ColorOutput {
    /// Wrap `text` in `color`, unless `NO_COLOR` is set or the terminal is dumb
    pub fn paint(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var_os("NO_COLOR").is_none() && std::env::var("TERM").map_or(true, |t| t != "dumb")
    }

    pub fn heading(text: &str) -> String {
        Self::paint(text, Color::Blue)
    }

    pub fn success(text: &str) -> String {
        Self::paint(text, Color::Green)
    }

    pub fn warning(text: &str) -> String {
        Self::paint(text, Color::Yellow)
    }

    /// A fate, colored by how it ended
    pub fn fate(fate: &Fate) -> String {
        Self::paint(&fate.to_string(), Color::for_fate(fate))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }

    /// Green once a pattern repeats in place, yellow while it moves or has not
    /// settled, red when it died out
    pub fn for_fate(fate: &Fate) -> Self {
        match fate {
            Fate::StillLife { .. } | Fate::Oscillator { .. } => Color::Green,
            Fate::Spaceship { .. } | Fate::Unsettled => Color::Yellow,
            Fate::Extinct { .. } => Color::Red,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn blinker_replay() -> Replay {
        let board = BoardConfig::bounded(3, 3).unwrap();
        let initial: CoordinateSet = vec![
            Coordinate::new(1, 0),
            Coordinate::new(1, 1),
            Coordinate::new(1, 2),
        ]
        .into();
        Replay::record("my blinker", board, initial, 2, 4).unwrap()
    }

    #[test]
    fn test_generation_formatting() {
        let board = BoardConfig::bounded(3, 3).unwrap();
        let generation: CoordinateSet = vec![Coordinate::new(0, 0), Coordinate::new(2, 2)].into();

        let compact = PatternFormatter::format_generation_compact(&generation, &board);
        assert_eq!(compact, "█··\n···\n··█\n");

        let with_coords = PatternFormatter::format_generation_with_coords(&generation, &board);
        assert!(with_coords.contains(" 0 1 2"));
        assert!(with_coords.contains("██"));
    }

    #[test]
    fn test_population_table() {
        let table = PatternFormatter::format_population_table(&blinker_replay());
        assert!(table.contains("     0 |      3 | -"));
        assert!(table.contains("     1 |      3 | +0"));
    }

    #[test]
    fn test_save_replay_formats() {
        let temp_dir = tempdir().unwrap();
        let replay = blinker_replay();

        let text = PatternFormatter::save_replay(&replay, temp_dir.path(), OutputFormat::Text).unwrap();
        assert_eq!(text, vec![temp_dir.path().join("my_blinker.txt")]);

        let json = PatternFormatter::save_replay(&replay, temp_dir.path(), OutputFormat::Json).unwrap();
        assert_eq!(json.len(), 2);
        assert!(json.iter().all(|p| p.exists()));
        let loaded = Replay::load_from_file(&json[0]).unwrap();
        assert_eq!(loaded.generations, replay.generations);

        let visual = PatternFormatter::save_replay(&replay, temp_dir.path(), OutputFormat::Visual).unwrap();
        let content = std::fs::read_to_string(&visual[0]).unwrap();
        assert!(content.contains("Pattern Analysis"));
    }

    #[test]
    fn test_huge_board_is_not_drawn() {
        let board = BoardConfig::bounded(1_000_000_000, 1_000_000_000).unwrap();
        let generation: CoordinateSet = vec![Coordinate::new(7, 9)].into();
        assert!(!PatternFormatter::can_draw(&board));

        let compact = PatternFormatter::format_generation_compact(&generation, &board);
        assert!(compact.contains("too large to draw"));
        assert!(compact.len() < 100);

        let with_coords = PatternFormatter::format_generation_with_coords(&generation, &board);
        assert!(with_coords.contains("(7, 9)"));

        let replay = Replay::record("far away", board, generation, 1, 2).unwrap();
        let text = PatternFormatter::format_replay(&replay, true);
        assert!(!text.contains('·'));
        assert!(text.contains("Generation 1 (Living: 0)"));
    }

    #[test]
    fn test_color_output() {
        let painted = ColorOutput::paint("test", Color::Red);
        assert!(painted.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
        assert!(ColorOutput::heading("Setup").contains("Setup"));

        let fate = Fate::Oscillator { since: 0, period: 2 };
        assert!(ColorOutput::fate(&fate).contains("oscillator with period 2"));
    }

    #[test]
    fn test_fate_colors() {
        assert_eq!(Color::for_fate(&Fate::StillLife { since: 1 }), Color::Green);
        assert_eq!(Color::for_fate(&Fate::Oscillator { since: 0, period: 3 }), Color::Green);
        assert_eq!(
            Color::for_fate(&Fate::Spaceship { since: 0, period: 4, dx: 1, dy: 1 }),
            Color::Yellow
        );
        assert_eq!(Color::for_fate(&Fate::Unsettled), Color::Yellow);
        assert_eq!(Color::for_fate(&Fate::Extinct { generation: 2 }), Color::Red);
    }
}
