use crate::models::{Coordinate, PlacedWord, Puzzle};

pub struct SelectionValidator;

impl SelectionValidator {
    /// Check that a selection runs along a row, a column or a 45 degree diagonal
    pub fn is_straight_line(start: Coordinate, end: Coordinate) -> bool {
        let dx = start.x.abs_diff(end.x);
        let dy = start.y.abs_diff(end.y);
        dx == 0 || dy == 0 || dx == dy
    }

    /// Cells from `start` to `end` inclusive, or `None` when the selection
    /// is not a straight line or leaves the grid
    pub fn path(puzzle: &Puzzle, start: Coordinate, end: Coordinate) -> Option<Vec<Coordinate>> {
        if !puzzle.contains(start) || !puzzle.contains(end) {
            return None;
        }
        if !Self::is_straight_line(start, end) {
            return None;
        }

        let step = ((end.x - start.x).signum(), (end.y - start.y).signum());
        let length = (end.x - start.x).abs().max((end.y - start.y).abs());

        Some((0..=length).map(|i| start.offset(step, i)).collect())
    }

    /// Extract the letters covered by a selection
    pub fn extract_word(puzzle: &Puzzle, start: Coordinate, end: Coordinate) -> Option<String> {
        Self::path(puzzle, start, end)?
            .into_iter()
            .map(|cell| puzzle.letter_at(cell))
            .collect()
    }

    /// Check if the selected letters spell `word`, read either way round
    pub fn matches(word: &str, selected: &str) -> bool {
        let word = word.to_lowercase();
        let selected = selected.to_lowercase();
        let reversed: String = selected.chars().rev().collect();
        word == selected || word == reversed
    }

    /// Index of the first word matching the selection, preferring words not found yet
    pub fn find_word(words: &[PlacedWord], found: &[bool], selected: &str) -> Option<usize> {
        let mut already_found = None;
        for (index, placed) in words.iter().enumerate() {
            if !Self::matches(&placed.word, selected) {
                continue;
            }
            if !found.get(index).copied().unwrap_or(false) {
                return Some(index);
            }
            already_found.get_or_insert(index);
        }
        already_found
    }
}
