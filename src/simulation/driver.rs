//! Stateful driver that advances one simulation run

use crate::game_of_life::{BoardConfig, Coordinate, CoordinateSet, GameOfLifeRules, LifeError};
use std::collections::VecDeque;
use tracing::debug;

/// Default number of past generations kept for undo
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// A single run: the current generation, its index and an undo history.
///
/// The board is fixed for the lifetime of a run. Every state is an immutable
/// [`CoordinateSet`], so keeping history only costs the sets themselves.
#[derive(Debug, Clone)]
pub struct Simulation {
    board: BoardConfig,
    initial: CoordinateSet,
    current: CoordinateSet,
    generation: usize,
    history: VecDeque<(CoordinateSet, usize)>,
    history_limit: usize,
}

impl Simulation {
    /// Start a run from `initial`, which must lie on `board`
    pub fn new(board: BoardConfig, initial: CoordinateSet) -> Result<Self, LifeError> {
        initial.validate_against(&board)?;
        Ok(Self {
            board,
            current: initial.clone(),
            initial,
            generation: 0,
            history: VecDeque::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        })
    }

    /// Keep at most `limit` past states; zero disables undo
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.trim_history();
        self
    }

    pub fn board(&self) -> &BoardConfig {
        &self.board
    }

    pub fn current(&self) -> &CoordinateSet {
        &self.current
    }

    pub fn initial(&self) -> &CoordinateSet {
        &self.initial
    }

    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.current.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of states `undo` can go back
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Advance one generation
    pub fn step(&mut self) -> Result<&CoordinateSet, LifeError> {
        let next = GameOfLifeRules::step(&self.current, &self.board)?;
        let previous = std::mem::replace(&mut self.current, next);
        self.remember(previous, self.generation);
        self.generation += 1;

        debug!(
            generation = self.generation,
            population = self.current.len(),
            "advanced simulation"
        );
        Ok(&self.current)
    }

    /// Advance `generations` times
    pub fn run(&mut self, generations: usize) -> Result<&CoordinateSet, LifeError> {
        for _ in 0..generations {
            self.step()?;
        }
        Ok(&self.current)
    }

    /// Flip one cell of the current generation.
    ///
    /// The coordinate goes through the board's edge policy, so bounded boards reject
    /// off-board edits and toroidal boards wrap them. An edit can be undone.
    pub fn toggle(&mut self, cell: Coordinate) -> Result<(), LifeError> {
        let cell = self.board.normalize(cell)?;
        let edited = self.current.toggle(cell);
        let previous = std::mem::replace(&mut self.current, edited);
        self.remember(previous, self.generation);
        Ok(())
    }

    /// Go back to the state before the last step or edit.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some((state, generation)) => {
                self.current = state;
                self.generation = generation;
                true
            }
            None => false,
        }
    }

    /// Return to the initial generation and forget the history
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.generation = 0;
        self.history.clear();
    }

    fn remember(&mut self, state: CoordinateSet, generation: usize) {
        if self.history_limit == 0 {
            return;
        }
        self.history.push_back((state, generation));
        self.trim_history();
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}
