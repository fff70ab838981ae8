use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::{
    game::{board::Board, direction::Direction},
    models::{GridConfig, PlacedWord, Puzzle},
    utils::letters::FillerAlphabet,
};

/// Start cells tried for one word before swapping it for another candidate
pub const MAX_ATTEMPTS_PER_WORD: u32 = 30;
/// Candidate swaps allowed in one generation before the remaining words are dropped
pub const MAX_WORD_SUBSTITUTIONS: u32 = 15;
/// Largest accepted grid side
pub const MAX_GRID_SIZE: i32 = 50;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("no level config supplied")]
    MissingConfig,
    #[error("invalid grid size: {width}x{height}")]
    InvalidGridSize { width: i32, height: i32 },
    #[error("no possible words fit a {width}x{height} grid")]
    NoCandidateWords { width: i32, height: i32 },
    #[error("a generation run is already in progress")]
    RunInProgress,
    #[error("no generation run in progress")]
    NoRunInProgress,
}

impl GenerationError {
    /// Missing config and bad dimensions both mean the level itself is unusable
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            GenerationError::MissingConfig | GenerationError::InvalidGridSize { .. }
        )
    }
}

/// Retry ceilings for word placement and the grid size cap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    pub max_attempts_per_word: u32,
    pub max_substitutions: u32,
    pub max_grid_size: i32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            max_attempts_per_word: MAX_ATTEMPTS_PER_WORD,
            max_substitutions: MAX_WORD_SUBSTITUTIONS,
            max_grid_size: MAX_GRID_SIZE,
        }
    }
}

/// How one word was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordOutcome {
    /// The word is in the grid. `attempts` counts start cells tried for this word.
    Placed { word: PlacedWord, attempts: u32 },
    /// The substitution budget ran out; `word` and every word after it were dropped.
    Abandoned { word: String, dropped: usize },
}

/// A single generation, advanced one word at a time.
///
/// All randomness comes from one ChaCha stream seeded at construction, consumed
/// in a fixed order: word selection, then per attempt a start cell followed by
/// a direction shuffle, substitution draws, and finally the filler letters.
#[derive(Debug)]
pub struct GenerationRun {
    board: Board,
    rng: ChaCha8Rng,
    candidates: Vec<String>,
    directions: Vec<Direction>,
    selected: Vec<String>,
    placed: Vec<PlacedWord>,
    cursor: usize,
    substitutions: u32,
    limits: GenerationLimits,
    seed: u64,
    requested: usize,
}

impl GenerationRun {
    pub fn new(
        config: &GridConfig,
        seed: u64,
        limits: GenerationLimits,
    ) -> Result<Self, GenerationError> {
        if config.width <= 0
            || config.height <= 0
            || config.width > limits.max_grid_size
            || config.height > limits.max_grid_size
        {
            return Err(GenerationError::InvalidGridSize {
                width: config.width,
                height: config.height,
            });
        }

        let candidates: Vec<String> = config
            .fitting_words()
            .into_iter()
            .map(str::to_lowercase)
            .collect();

        if candidates.is_empty() {
            return Err(GenerationError::NoCandidateWords {
                width: config.width,
                height: config.height,
            });
        }

        // Selection redraws duplicates, so never ask for more words than are distinct
        let distinct = candidates.iter().collect::<HashSet<_>>().len();
        let requested = config.word_count.min(distinct);

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut selected = Vec::with_capacity(requested);
        while selected.len() < requested {
            let word = candidates[rng.random_range(0..candidates.len())].clone();
            if !selected.contains(&word) {
                selected.push(word);
            }
        }

        tracing::debug!(
            "Starting {}x{} generation with seed {}: {:?}",
            config.width,
            config.height,
            seed,
            selected
        );

        Ok(Self {
            board: Board::new(config.width, config.height),
            rng,
            candidates,
            directions: Direction::allowed(&config.directions),
            selected,
            placed: Vec::with_capacity(requested),
            cursor: 0,
            substitutions: 0,
            limits,
            seed,
            requested,
        })
    }

    /// Resolves the next word. Returns `None` once every word is placed or dropped.
    pub fn step(&mut self) -> Option<WordOutcome> {
        if self.is_complete() {
            return None;
        }

        let mut attempts = 0;
        loop {
            attempts += 1;
            if let Some(word) = self.try_place() {
                self.placed.push(word.clone());
                self.cursor += 1;
                return Some(WordOutcome::Placed { word, attempts });
            }

            if attempts >= self.limits.max_attempts_per_word
                && self.substitutions < self.limits.max_substitutions
            {
                self.substitutions += 1;
                let candidate = self.draw_candidate();
                if !self.selected.contains(&candidate) {
                    tracing::debug!(
                        "Replacing '{}' with '{}' after {} attempts",
                        self.selected[self.cursor],
                        candidate,
                        attempts
                    );
                    self.selected[self.cursor] = candidate;
                    attempts = 0;
                }
            }

            if self.substitutions >= self.limits.max_substitutions {
                let dropped: Vec<String> = self.selected.drain(self.cursor..).collect();
                tracing::warn!(
                    "Giving up on '{}': dropping {} remaining words",
                    dropped[0],
                    dropped.len()
                );
                return Some(WordOutcome::Abandoned {
                    word: dropped[0].clone(),
                    dropped: dropped.len(),
                });
            }
        }
    }

    /// One attempt: a random start cell and every allowed direction in random order
    fn try_place(&mut self) -> Option<PlacedWord> {
        let letters: Vec<char> = self.selected[self.cursor].chars().collect();
        let index = self.rng.random_range(0..self.board.cell_count());
        let start = self.board.coordinate_of(index);

        let mut order = self.directions.clone();
        order.shuffle(&mut self.rng);

        for direction in order {
            let step = direction.offset();
            if self.board.fits(&letters, start, step) {
                let end = self.board.write(&letters, start, step);
                return Some(PlacedWord {
                    word: self.selected[self.cursor].clone(),
                    start,
                    end,
                });
            }
        }

        None
    }

    fn draw_candidate(&mut self) -> String {
        self.candidates[self.rng.random_range(0..self.candidates.len())].clone()
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.selected.len()
    }

    /// Resolves any words left, fills the empty cells and hands back the puzzle
    pub fn finish(mut self, alphabet: &FillerAlphabet) -> Puzzle {
        while self.step().is_some() {}

        for coordinate in self.board.empty_cells() {
            let letter = alphabet.pick(&mut self.rng);
            self.board.set(coordinate, letter);
        }
        debug_assert!(self.board.is_full());

        if self.placed.len() < self.requested {
            tracing::warn!(
                "Placed {} of {} words in a {}x{} grid (seed {})",
                self.placed.len(),
                self.requested,
                self.board.width(),
                self.board.height(),
                self.seed
            );
        }

        let grid = self
            .board
            .rows()
            .into_iter()
            .map(|row| row.into_iter().flatten().collect())
            .collect();

        Puzzle {
            width: self.board.width(),
            height: self.board.height(),
            grid,
            words: self.placed,
            seed: self.seed,
            requested_words: self.requested,
        }
    }
}

impl Iterator for GenerationRun {
    type Item = WordOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

/// Owns at most one generation run at a time
#[derive(Debug, Default)]
pub struct GridGenerator {
    limits: GenerationLimits,
    alphabet: FillerAlphabet,
    run: Option<GenerationRun>,
}

impl GridGenerator {
    pub fn new(limits: GenerationLimits, alphabet: FillerAlphabet) -> Self {
        Self {
            limits,
            alphabet,
            run: None,
        }
    }

    /// Validates the config and selects the words. Nothing is placed yet.
    pub fn begin(&mut self, config: &GridConfig, seed: u64) -> Result<(), GenerationError> {
        if self.run.is_some() {
            return Err(GenerationError::RunInProgress);
        }
        self.run = Some(GenerationRun::new(config, seed, self.limits)?);
        Ok(())
    }

    /// Resolves one word of the current run
    pub fn step(&mut self) -> Option<WordOutcome> {
        self.run.as_mut()?.step()
    }

    /// Completes the current run. Afterwards the generator is free for a new `begin`.
    pub fn finish(&mut self) -> Result<Puzzle, GenerationError> {
        let run = self.run.take().ok_or(GenerationError::NoRunInProgress)?;
        Ok(run.finish(&self.alphabet))
    }

    /// Runs a whole generation without yielding. The service drives runs
    /// through `begin`/`step`/`finish` instead.
    #[cfg(test)]
    pub fn generate(&mut self, config: &GridConfig, seed: u64) -> Result<Puzzle, GenerationError> {
        if self.run.is_some() {
            return Err(GenerationError::RunInProgress);
        }
        let run = GenerationRun::new(config, seed, self.limits)?;
        Ok(run.finish(&self.alphabet))
    }

    /// Drops the current board, word list and random stream
    #[cfg(test)]
    pub fn reset(&mut self) {
        self.run = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DirectionFlags;

    fn config(
        width: i32,
        height: i32,
        directions: DirectionFlags,
        word_count: usize,
        words: &[&str],
    ) -> GridConfig {
        GridConfig {
            width,
            height,
            directions,
            word_count,
            possible_words: words.iter().map(|w| w.to_string()).collect(),
            max_time: 60.0,
        }
    }

    fn horizontal() -> DirectionFlags {
        DirectionFlags {
            horizontal: true,
            ..DirectionFlags::default()
        }
    }

    fn generator() -> GridGenerator {
        GridGenerator::new(GenerationLimits::default(), FillerAlphabet::latin())
    }

    fn assert_words_readable(puzzle: &Puzzle) {
        for placed in &puzzle.words {
            let read: String = placed
                .cells()
                .into_iter()
                .map(|cell| {
                    assert!(puzzle.contains(cell), "{:?} left the grid", cell);
                    puzzle.letter_at(cell).unwrap()
                })
                .collect();
            assert_eq!(read, placed.word);
        }
    }

    const ANIMALS: &[&str] = &[
        "cat", "dog", "horse", "mouse", "tiger", "lion", "zebra", "otter", "eagle", "camel",
    ];

    #[test]
    fn test_single_horizontal_word() {
        let mut generator =
            GridGenerator::new(GenerationLimits::default(), FillerAlphabet::parse("xyz").unwrap());
        let puzzle = generator
            .generate(&config(5, 5, horizontal(), 1, &["cat"]), 42)
            .unwrap();

        assert_eq!(puzzle.words.len(), 1);
        let cat = &puzzle.words[0];
        assert_eq!(cat.word, "cat");
        assert_eq!(cat.end.x, cat.start.x + 2);
        assert_eq!(cat.end.y, cat.start.y);

        let row: String = puzzle.grid[cat.start.y as usize].iter().collect();
        assert!(row.contains("cat"));

        let filler = puzzle
            .grid
            .iter()
            .flatten()
            .filter(|ch| matches!(ch, 'x' | 'y' | 'z'))
            .count();
        assert_eq!(filler, 22);
    }

    #[test]
    fn test_grid_is_fully_populated_with_requested_dimensions() {
        let mut generator = generator();
        let puzzle = generator
            .generate(&config(7, 4, DirectionFlags::all(), 4, ANIMALS), 3)
            .unwrap();

        assert_eq!(puzzle.grid.len(), 4);
        assert!(puzzle.grid.iter().all(|row| row.len() == 7));
        assert!(puzzle.grid.iter().flatten().all(|ch| ch.is_alphabetic()));
    }

    #[test]
    fn test_placed_words_read_back_for_many_seeds() {
        let mut generator = generator();
        for seed in 0..50 {
            let puzzle = generator
                .generate(&config(8, 6, DirectionFlags::all(), 6, ANIMALS), seed)
                .unwrap();
            // Shared cells hold one letter, so every word reading back means overlaps agree
            assert_words_readable(&puzzle);
        }
    }

    #[test]
    fn test_same_seed_same_puzzle() {
        let level = config(9, 9, DirectionFlags::all(), 8, ANIMALS);
        let first = generator().generate(&level, 1234).unwrap();
        let second = generator().generate(&level, 1234).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_step_by_step_matches_generate() {
        let level = config(9, 9, DirectionFlags::forward(), 5, ANIMALS);
        let whole = generator().generate(&level, 77).unwrap();

        let mut stepped = generator();
        stepped.begin(&level, 77).unwrap();
        let mut outcomes = 0;
        while stepped.step().is_some() {
            outcomes += 1;
        }
        assert_eq!(outcomes, 5);
        assert_eq!(stepped.finish().unwrap(), whole);
        assert_eq!(stepped.finish(), Err(GenerationError::NoRunInProgress));
    }

    #[test]
    fn test_word_count_is_clamped_to_pool() {
        let pool = ["cat", "dog", "owl", "ant", "bee"];
        let puzzle = generator()
            .generate(&config(15, 15, DirectionFlags::all(), 20, &pool), 9)
            .unwrap();
        assert_eq!(puzzle.requested_words, 5);
        assert_eq!(puzzle.words.len(), 5);

        let distinct: HashSet<_> = puzzle.words.iter().map(|w| w.word.as_str()).collect();
        assert_eq!(distinct.len(), 5);
    }

    #[test]
    fn test_duplicate_candidates_count_once() {
        let puzzle = generator()
            .generate(&config(6, 6, DirectionFlags::all(), 3, &["Cat", "cat", "dog"]), 5)
            .unwrap();
        assert_eq!(puzzle.requested_words, 2);
        assert!(puzzle.words.iter().all(|w| w.word == "cat" || w.word == "dog"));
    }

    #[test]
    fn test_words_are_lowercased() {
        let puzzle = generator()
            .generate(&config(6, 6, horizontal(), 1, &["OTTER"]), 1)
            .unwrap();
        assert_eq!(puzzle.words[0].word, "otter");
        assert_words_readable(&puzzle);
    }

    #[test]
    fn test_too_long_words_are_never_selected() {
        let pool = ["cat", "elephant", "dog", "crocodile", "owl"];
        for seed in 0..20 {
            let puzzle = generator()
                .generate(&config(4, 4, DirectionFlags::all(), 5, &pool), seed)
                .unwrap();
            assert_eq!(puzzle.requested_words, 3);
            assert!(puzzle.words.iter().all(|w| w.word.len() <= 4));
        }
    }

    #[test]
    fn test_no_candidate_words() {
        let err = generator()
            .generate(&config(3, 3, DirectionFlags::all(), 2, &["horse", "giraffe"]), 1)
            .unwrap_err();
        assert_eq!(err, GenerationError::NoCandidateWords { width: 3, height: 3 });
        assert!(!err.is_configuration_error());
    }

    #[test]
    fn test_invalid_grid_size() {
        let err = generator()
            .generate(&config(0, 5, DirectionFlags::all(), 1, &["cat"]), 1)
            .unwrap_err();
        assert_eq!(err, GenerationError::InvalidGridSize { width: 0, height: 5 });
        assert!(err.is_configuration_error());

        let err = generator()
            .generate(&config(4, -2, DirectionFlags::all(), 1, &["cat"]), 1)
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidGridSize { .. }));
    }

    #[test]
    fn test_unplaceable_word_yields_empty_filled_grid() {
        // "cat" passes the length filter on the width but can only go vertically
        let vertical = DirectionFlags {
            vertical: true,
            ..DirectionFlags::default()
        };
        let mut generator = generator();
        generator.begin(&config(3, 1, vertical, 1, &["cat"]), 42).unwrap();

        assert_eq!(
            generator.step(),
            Some(WordOutcome::Abandoned {
                word: "cat".to_string(),
                dropped: 1
            })
        );
        assert_eq!(generator.step(), None);

        let puzzle = generator.finish().unwrap();
        assert!(puzzle.words.is_empty());
        assert!(puzzle.is_shortfall());
        assert_eq!(puzzle.grid.len(), 1);
        assert_eq!(puzzle.grid[0].len(), 3);
        assert!(puzzle.grid[0].iter().all(|ch| ch.is_ascii_lowercase()));
    }

    #[test]
    fn test_no_directions_enabled() {
        let puzzle = generator()
            .generate(&config(5, 5, DirectionFlags::default(), 3, ANIMALS), 8)
            .unwrap();
        assert!(puzzle.words.is_empty());
        assert_eq!(puzzle.requested_words, 3);
        assert_eq!(puzzle.grid.iter().flatten().count(), 25);
    }

    #[test]
    fn test_unplaceable_word_is_substituted() {
        // One column: only single letters fit horizontally
        let puzzle = generator()
            .generate(&config(1, 3, horizontal(), 1, &["cat", "a"]), 11)
            .unwrap();
        assert_eq!(puzzle.words.len(), 1);
        assert_eq!(puzzle.words[0].word, "a");
        assert_eq!(puzzle.words[0].start, puzzle.words[0].end);
    }

    #[test]
    fn test_abandon_drops_every_following_word() {
        let limits = GenerationLimits {
            max_attempts_per_word: 1,
            max_substitutions: 1,
            ..GenerationLimits::default()
        };
        let mut generator = GridGenerator::new(limits, FillerAlphabet::latin());
        // Nothing fits horizontally in a single column
        generator
            .begin(&config(1, 4, horizontal(), 3, &["cat", "dog", "owl"]), 3)
            .unwrap();

        match generator.step() {
            Some(WordOutcome::Abandoned { dropped, .. }) => assert_eq!(dropped, 3),
            other => panic!("expected abandon, got {:?}", other),
        }
        assert_eq!(generator.step(), None);
        assert_eq!(generator.finish().unwrap().words.len(), 0);
    }

    #[test]
    fn test_begin_twice_requires_reset() {
        let level = config(5, 5, DirectionFlags::all(), 2, ANIMALS);
        let mut generator = generator();
        generator.begin(&level, 1).unwrap();
        assert!(generator.step().is_some());

        assert_eq!(generator.begin(&level, 2), Err(GenerationError::RunInProgress));
        assert_eq!(
            generator.generate(&level, 2).unwrap_err(),
            GenerationError::RunInProgress
        );

        generator.reset();
        assert_eq!(generator.step(), None);
        generator.begin(&level, 2).unwrap();
        let fresh = generator.finish().unwrap();
        assert_eq!(fresh, self::generator().generate(&level, 2).unwrap());
    }

    #[test]
    fn test_run_iterates_per_word() {
        let level = config(10, 10, DirectionFlags::all(), 4, ANIMALS);
        let run = GenerationRun::new(&level, 21, GenerationLimits::default()).unwrap();
        let outcomes: Vec<WordOutcome> = run.collect();
        assert_eq!(outcomes.len(), 4);
        assert!(outcomes
            .iter()
            .all(|o| matches!(o, WordOutcome::Placed { attempts, .. } if *attempts >= 1)));
    }

    #[test]
    fn test_starting_cell_is_in_bounds() {
        let puzzle = generator()
            .generate(&config(2, 6, DirectionFlags::all(), 2, &["ab", "cd"]), 4)
            .unwrap();
        for word in &puzzle.words {
            assert!(puzzle.contains(word.start));
            assert!(puzzle.contains(word.end));
        }
    }

    #[test]
    fn test_finish_without_run() {
        assert_eq!(
            generator().finish(),
            Err(GenerationError::NoRunInProgress)
        );
    }

    #[test]
    fn test_grid_size_cap() {
        let limits = GenerationLimits {
            max_grid_size: 8,
            ..GenerationLimits::default()
        };
        let mut capped = GridGenerator::new(limits, FillerAlphabet::latin());
        assert_eq!(
            capped.generate(&config(9, 4, DirectionFlags::all(), 1, &["cat"]), 1),
            Err(GenerationError::InvalidGridSize { width: 9, height: 4 })
        );
        assert_eq!(
            capped.begin(&config(4, 2000, DirectionFlags::all(), 1, &["cat"]), 1),
            Err(GenerationError::InvalidGridSize { width: 4, height: 2000 })
        );
        assert!(capped
            .generate(&config(8, 8, DirectionFlags::all(), 1, &["cat"]), 1)
            .is_ok());
    }
}
