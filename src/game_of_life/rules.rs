//! Game of Life transition function over sparse coordinate sets

use super::board::moore_offsets_with_center;
use super::{BoardConfig, Coordinate, CoordinateSet, LifeError};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::trace;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Advance `current` by one generation on `config`'s board.
    ///
    /// Only cells that are alive or adjacent to a live cell are ever visited, so the
    /// cost of a tick is proportional to the population rather than to the board area.
    /// `current` must already be valid for `config` (see [`CoordinateSet::from_raw`]);
    /// use [`GameOfLifeRules::step_checked`] for sets of unknown origin.
    pub fn step(current: &CoordinateSet, config: &BoardConfig) -> Result<CoordinateSet, LifeError> {
        config.validate()?;

        let counts = Self::neighbor_counts(current, config);
        let candidates = counts.len();

        let next: CoordinateSet = counts
            .into_iter()
            .filter(|&(cell, n)| Self::should_be_alive(current.contains(cell), n))
            .map(|(cell, _)| cell)
            .collect();

        trace!(
            population = current.len(),
            candidates,
            next_population = next.len(),
            "stepped generation"
        );
        Ok(next)
    }

    /// Like [`GameOfLifeRules::step`], but first checks every member of `current`
    /// against the board and reports the first stray cell as
    /// [`LifeError::InvalidCoordinate`].
    pub fn step_checked(
        current: &CoordinateSet,
        config: &BoardConfig,
    ) -> Result<CoordinateSet, LifeError> {
        current.validate_against(config)?;
        Self::step(current, config)
    }

    /// Live-neighbor count of every cell that has at least one live neighbor
    pub fn neighbor_counts(current: &CoordinateSet, config: &BoardConfig) -> HashMap<Coordinate, u8> {
        let mut counts = HashMap::with_capacity(current.len() * 8);
        for cell in current.iter() {
            for neighbor in config.neighbors(cell) {
                *counts.entry(neighbor).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Count the live neighbors of a single cell
    pub fn live_neighbor_count(current: &CoordinateSet, cell: Coordinate, config: &BoardConfig) -> u8 {
        config
            .neighbors(cell)
            .filter(|&neighbor| current.contains(neighbor))
            .count() as u8
    }

    /// Evolve for multiple generations
    pub fn evolve_generations(
        current: &CoordinateSet,
        config: &BoardConfig,
        generations: usize,
    ) -> Result<CoordinateSet, LifeError> {
        let mut state = current.clone();
        for _ in 0..generations {
            state = Self::step(&state, config)?;
        }
        Ok(state)
    }

    /// `current` followed by each of the next `generations` generations
    pub fn evolution_path(
        current: &CoordinateSet,
        config: &BoardConfig,
        generations: usize,
    ) -> Result<Vec<CoordinateSet>, LifeError> {
        let mut path = Vec::with_capacity(generations + 1);
        path.push(current.clone());
        for _ in 0..generations {
            let next = Self::step(path.last().unwrap_or(current), config)?;
            path.push(next);
        }
        Ok(path)
    }

    /// Step many independent boards at once.
    ///
    /// Each input is validated with [`GameOfLifeRules::step_checked`]; results keep
    /// the order of `inputs`.
    pub fn step_all(
        inputs: &[(CoordinateSet, BoardConfig)],
    ) -> Vec<Result<CoordinateSet, LifeError>> {
        inputs
            .par_iter()
            .map(|(current, config)| Self::step_checked(current, config))
            .collect()
    }

    /// Neighbor counts at which a dead cell is born
    pub const BIRTH: [u8; 1] = [3];

    /// Neighbor counts at which a live cell survives
    pub const SURVIVAL: [u8; 2] = [2, 3];

    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            Self::SURVIVAL.contains(&neighbor_count)
        } else {
            Self::BIRTH.contains(&neighbor_count)
        }
    }

    /// Validate that `predecessor` evolves into `target` after `generations` ticks
    pub fn validate_evolution(
        predecessor: &CoordinateSet,
        target: &CoordinateSet,
        config: &BoardConfig,
        generations: usize,
    ) -> Result<bool, LifeError> {
        let evolved = Self::evolve_generations(predecessor, config, generations)?;
        Ok(evolved == *target)
    }

    /// True if every cell of `next` lies within one Moore step of a cell of `previous`
    pub fn is_local_successor(
        previous: &CoordinateSet,
        next: &CoordinateSet,
        config: &BoardConfig,
    ) -> bool {
        next.iter().all(|cell| {
            moore_offsets_with_center()
                .filter_map(|(dx, dy)| config.neighbor(cell, dx, dy))
                .any(|c| previous.contains(c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::EdgePolicy;
    use rstest::rstest;

    fn set(cells: &[(i64, i64)]) -> CoordinateSet {
        cells.iter().map(|&c| Coordinate::from(c)).collect()
    }

    fn board_10() -> BoardConfig {
        BoardConfig::bounded(10, 10).unwrap()
    }

    #[rstest]
    #[case::blinker(&[(1, 0), (1, 1), (1, 2)], &[(0, 1), (1, 1), (2, 1)])]
    #[case::block(&[(1, 1), (1, 2), (2, 1), (2, 2)], &[(1, 1), (1, 2), (2, 1), (2, 2)])]
    #[case::isolated_cell(&[(5, 5)], &[])]
    #[case::empty_board(&[], &[])]
    #[case::corner_cell_dies(&[(0, 0)], &[])]
    #[case::corner_block_survives(&[(0, 0), (1, 0), (0, 1), (1, 1)], &[(0, 0), (1, 0), (0, 1), (1, 1)])]
    fn test_bounded_scenarios(#[case] current: &[(i64, i64)], #[case] expected: &[(i64, i64)]) {
        let next = GameOfLifeRules::step(&set(current), &board_10()).unwrap();
        assert_eq!(next, set(expected));
    }

    #[test]
    fn test_blinker_oscillates() {
        let board = board_10();
        let vertical = set(&[(1, 0), (1, 1), (1, 2)]);
        let horizontal = GameOfLifeRules::step(&vertical, &board).unwrap();
        let back = GameOfLifeRules::step(&horizontal, &board).unwrap();

        assert_eq!(horizontal, set(&[(0, 1), (1, 1), (2, 1)]));
        assert_eq!(back, vertical);
    }

    #[test]
    fn test_step_does_not_mutate_input() {
        let current = set(&[(1, 0), (1, 1), (1, 2)]);
        let snapshot = current.sorted();
        let _ = GameOfLifeRules::step(&current, &board_10()).unwrap();
        assert_eq!(current.sorted(), snapshot);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(3, 7)]
    #[case(50, 2)]
    fn test_empty_board_is_fixed_point(#[case] width: i64, #[case] height: i64) {
        for policy in [EdgePolicy::Bounded, EdgePolicy::Toroidal] {
            let board = BoardConfig::new(width, height, policy).unwrap();
            let next = GameOfLifeRules::step(&CoordinateSet::new(), &board).unwrap();
            assert!(next.is_empty());
        }
    }

    #[rstest]
    #[case(0, 10)]
    #[case(10, 0)]
    #[case(-3, -3)]
    fn test_invalid_config_is_rejected(#[case] width: i64, #[case] height: i64) {
        let board = BoardConfig {
            width,
            height,
            edge_policy: EdgePolicy::Bounded,
        };
        assert_eq!(
            GameOfLifeRules::step(&CoordinateSet::new(), &board),
            Err(LifeError::InvalidConfig { width, height })
        );
    }

    #[test]
    fn test_step_checked_reports_stray_cells() {
        let stray = set(&[(1, 1), (12, 1)]);
        let result = GameOfLifeRules::step_checked(&stray, &board_10());
        assert!(matches!(
            result,
            Err(LifeError::InvalidCoordinate { x: 12, y: 1, .. })
        ));
    }

    #[test]
    fn test_toroidal_corners_are_neighbors() {
        let board = BoardConfig::toroidal(5, 5).unwrap();
        let current = set(&[(0, 0), (4, 4)]);

        let counts = GameOfLifeRules::neighbor_counts(&current, &board);
        assert_eq!(counts.get(&Coordinate::new(0, 0)), Some(&1));
        assert_eq!(counts.get(&Coordinate::new(4, 4)), Some(&1));
        assert_eq!(
            GameOfLifeRules::live_neighbor_count(&current, Coordinate::new(0, 0), &board),
            1
        );

        // Under the bounded policy the two corners are far apart.
        let bounded = board.with_edge_policy(EdgePolicy::Bounded);
        let counts = GameOfLifeRules::neighbor_counts(&current, &bounded);
        assert_eq!(counts.get(&Coordinate::new(0, 0)), None);
    }

    #[test]
    fn test_toroidal_wrap_births() {
        // A blinker straddling the left/right seam keeps oscillating across it.
        let board = BoardConfig::toroidal(6, 6).unwrap();
        let horizontal = set(&[(5, 2), (0, 2), (1, 2)]);
        let next = GameOfLifeRules::step(&horizontal, &board).unwrap();
        assert_eq!(next, set(&[(0, 1), (0, 2), (0, 3)]));

        let bounded = board.with_edge_policy(EdgePolicy::Bounded);
        let next = GameOfLifeRules::step(&horizontal, &bounded).unwrap();
        assert!(next.is_empty());
    }

    #[test]
    fn test_glider_wraps_around_torus() {
        let board = BoardConfig::toroidal(8, 8).unwrap();
        let glider = set(&[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]);

        // A glider moves one cell diagonally every 4 generations, so after 32 it is home.
        let evolved = GameOfLifeRules::evolve_generations(&glider, &board, 32).unwrap();
        assert_eq!(evolved, glider);
        let shifted = GameOfLifeRules::evolve_generations(&glider, &board, 4).unwrap();
        assert_eq!(shifted, glider.translated(1, 1));
    }

    #[test]
    fn test_survival_and_birth_rules_hold_cellwise() {
        let board = BoardConfig::bounded(8, 8).unwrap();
        let current = set(&[(1, 1), (2, 1), (3, 1), (2, 2), (5, 5), (6, 5), (5, 6), (7, 7), (0, 7)]);
        let next = GameOfLifeRules::step(&current, &board).unwrap();

        for x in 0..board.width {
            for y in 0..board.height {
                let cell = Coordinate::new(x, y);
                let n = GameOfLifeRules::live_neighbor_count(&current, cell, &board);
                let expected = if current.contains(cell) {
                    n == 2 || n == 3
                } else {
                    n == 3
                };
                assert_eq!(next.contains(cell), expected, "cell {} with {} neighbors", cell, n);
            }
        }
    }

    #[test]
    fn test_births_stay_local() {
        let board = BoardConfig::toroidal(12, 9).unwrap();
        let current = set(&[(0, 0), (1, 0), (11, 0), (5, 4), (5, 5), (6, 5), (4, 8)]);
        let next = GameOfLifeRules::step(&current, &board).unwrap();
        assert!(GameOfLifeRules::is_local_successor(&current, &next, &board));

        let far_away = set(&[(8, 8)]);
        assert!(!GameOfLifeRules::is_local_successor(&current, &far_away, &board));
    }

    #[test]
    fn test_construction_order_does_not_matter() {
        let board = board_10();
        let cells = [(3, 3), (4, 3), (5, 3), (5, 2), (4, 1), (0, 9)];
        let forward = set(&cells);
        let mut reversed_cells = cells.to_vec();
        reversed_cells.reverse();
        let reversed = reversed_cells
            .into_iter()
            .fold(CoordinateSet::new(), |acc, c| acc.add(Coordinate::from(c)));

        assert_eq!(
            GameOfLifeRules::step(&forward, &board).unwrap(),
            GameOfLifeRules::step(&reversed, &board).unwrap()
        );
    }

    #[test]
    fn test_tiny_torus_counts_wrap_multiplicity() {
        // On a 1x1 torus every offset lands on the only cell, giving 8 neighbors.
        let board = BoardConfig::toroidal(1, 1).unwrap();
        let current = set(&[(0, 0)]);
        assert_eq!(
            GameOfLifeRules::live_neighbor_count(&current, Coordinate::new(0, 0), &board),
            8
        );
        assert!(GameOfLifeRules::step(&current, &board).unwrap().is_empty());
    }

    #[test]
    fn test_step_all_in_parallel() {
        let inputs = vec![
            (set(&[(1, 0), (1, 1), (1, 2)]), board_10()),
            (set(&[(5, 5)]), board_10()),
            (set(&[(20, 0)]), board_10()),
        ];
        let results = GameOfLifeRules::step_all(&inputs);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &set(&[(0, 1), (1, 1), (2, 1)]));
        assert!(results[1].as_ref().unwrap().is_empty());
        assert!(results[2].is_err());
    }

    #[test]
    fn test_evolution_path_and_validation() {
        let board = board_10();
        let blinker = set(&[(1, 0), (1, 1), (1, 2)]);
        let path = GameOfLifeRules::evolution_path(&blinker, &board, 3).unwrap();

        assert_eq!(path.len(), 4);
        assert_eq!(path[0], blinker);
        assert_eq!(path[2], blinker);
        assert!(GameOfLifeRules::validate_evolution(&blinker, &path[1], &board, 1).unwrap());
        assert!(!GameOfLifeRules::validate_evolution(&blinker, &path[1], &board, 2).unwrap());
    }

    #[test]
    fn test_rule_logic() {
        assert!(GameOfLifeRules::should_be_alive(true, 2));
        assert!(GameOfLifeRules::should_be_alive(true, 3));
        assert!(GameOfLifeRules::should_be_alive(false, 3));
        assert!(!GameOfLifeRules::should_be_alive(true, 1));
        assert!(!GameOfLifeRules::should_be_alive(true, 4));
        assert!(!GameOfLifeRules::should_be_alive(false, 2));
    }

    #[test]
    fn test_rule_table_covers_every_count() {
        let survives: Vec<u8> = (0..=8)
            .filter(|&n| GameOfLifeRules::should_be_alive(true, n))
            .collect();
        let born: Vec<u8> = (0..=8)
            .filter(|&n| GameOfLifeRules::should_be_alive(false, n))
            .collect();

        assert_eq!(survives, GameOfLifeRules::SURVIVAL);
        assert_eq!(born, GameOfLifeRules::BIRTH);
    }

    #[test]
    fn test_step_on_very_wide_torus() {
        let width = i64::MAX / 2 + 10;
        let board = BoardConfig::toroidal(width, 10).unwrap();

        let lone = CoordinateSet::from_raw(vec![Coordinate::new(width - 2, 5)], &board).unwrap();
        assert!(GameOfLifeRules::step(&lone, &board).unwrap().is_empty());

        // A blinker straddling the seam between x = width - 1 and x = 0.
        let blinker = set(&[(width - 1, 5), (0, 5), (1, 5)]);
        let next = GameOfLifeRules::step(&blinker, &board).unwrap();
        assert_eq!(next, set(&[(0, 4), (0, 5), (0, 6)]));
    }
}
