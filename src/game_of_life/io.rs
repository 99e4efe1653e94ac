//! Loading and saving patterns as plain text

use super::{BoardConfig, Coordinate, CoordinateSet, EdgePolicy, LifeError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Largest board area written or drawn cell by cell
pub const MAX_DENSE_CELLS: i64 = 1 << 22;

/// A pattern read from text, in its own local coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub width: i64,
    pub height: i64,
    pub cells: Vec<Coordinate>,
}

impl Pattern {
    /// Place the pattern on a board with its top-left corner at `offset`.
    ///
    /// The placed cells go through [`CoordinateSet::from_raw`], so a pattern that
    /// does not fit a bounded board fails with [`LifeError::InvalidCoordinate`] and
    /// one that overhangs a toroidal board wraps around. An offset that would push a
    /// cell past `i64::MAX` is reported against a bounded board, with the coordinate
    /// saturated.
    pub fn place(&self, board: &BoardConfig, offset: Coordinate) -> Result<CoordinateSet, LifeError> {
        board.validate()?;

        let offset = match board.edge_policy {
            EdgePolicy::Bounded => offset,
            EdgePolicy::Toroidal => Coordinate::new(
                offset.x.rem_euclid(board.width),
                offset.y.rem_euclid(board.height),
            ),
        };

        let placed = self
            .cells
            .iter()
            .map(|c| match (c.x.checked_add(offset.x), c.y.checked_add(offset.y)) {
                (Some(x), Some(y)) => Ok(Coordinate::new(x, y)),
                _ => Err(LifeError::InvalidCoordinate {
                    x: c.x.saturating_add(offset.x),
                    y: c.y.saturating_add(offset.y),
                    width: board.width,
                    height: board.height,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        CoordinateSet::from_raw(placed, board)
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }
}

/// Load a pattern from a text file
pub fn load_pattern_from_file<P: AsRef<Path>>(path: P) -> Result<Pattern> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    let pattern = parse_pattern_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))?;

    debug!(
        path = %path.as_ref().display(),
        width = pattern.width,
        height = pattern.height,
        population = pattern.population(),
        "loaded pattern"
    );
    Ok(pattern)
}

/// Parse a pattern from its text form.
///
/// Each line is a row. `1`, `#`, `*` and `O` are live cells, `0` and `.` are dead
/// ones. Rows may be shorter than the widest row (missing cells are dead). Lines
/// starting with `!` are comments; blank lines are skipped.
pub fn parse_pattern_from_string(content: &str) -> Result<Pattern> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('!'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let mut cells = Vec::new();
    let mut width = 0;

    for (row_idx, line) in lines.iter().enumerate() {
        let mut row_len = 0;
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '1' | '#' | '*' | 'O' => cells.push(Coordinate::new(col_idx as i64, row_idx as i64)),
                '0' | '.' => {}
                _ => anyhow::bail!(
                    "Invalid character '{}' at row {}, column {}",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
            row_len += 1;
        }
        width = width.max(row_len);
    }

    Ok(Pattern {
        width,
        height: lines.len() as i64,
        cells,
    })
}

/// Save a generation to a text file as full `1`/`0` rows of the board
pub fn save_generation_to_file<P: AsRef<Path>>(
    generation: &CoordinateSet,
    board: &BoardConfig,
    path: P,
) -> Result<()> {
    if board.area() > MAX_DENSE_CELLS {
        anyhow::bail!(
            "Board {} has more than {} cells; refusing to write it as text",
            board,
            MAX_DENSE_CELLS
        );
    }
    let content = generation_to_string(generation, board);

    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write generation to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Text form of a generation, one `1`/`0` row per board row.
///
/// The output grows with the board area; check it against [`MAX_DENSE_CELLS`] first.
pub fn generation_to_string(generation: &CoordinateSet, board: &BoardConfig) -> String {
    let capacity = board.height.saturating_mul(board.width.saturating_add(1));
    let capacity = usize::try_from(capacity)
        .unwrap_or(0)
        .min(MAX_DENSE_CELLS as usize);
    let mut result = String::with_capacity(capacity);

    for y in 0..board.height {
        for x in 0..board.width {
            result.push(if generation.contains(Coordinate::new(x, y)) { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Create example pattern files
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let examples = [
        ("glider.txt", "! Glider\n.#.\n..#\n###\n"),
        ("blinker.txt", "! Blinker (period 2)\n.#.\n.#.\n.#.\n"),
        ("block.txt", "! Block (still life)\n##\n##\n"),
        ("beacon.txt", "! Beacon (period 2)\n##..\n##..\n..##\n..##\n"),
        ("r_pentomino.txt", "! R-pentomino\n.##\n##.\n.#.\n"),
    ];

    for (name, content) in examples {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}
