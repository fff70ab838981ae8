use serde::{Deserialize, Serialize};

/// A cell position on the letter grid. `x` grows to the right, `y` grows down the rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate `steps` cells away along `(dx, dy)`
    pub fn offset(self, (dx, dy): (i32, i32), steps: i32) -> Self {
        Self {
            x: self.x + dx * steps,
            y: self.y + dy * steps,
        }
    }
}

/// Which placement directions a level allows.
///
/// Backwards flags only take effect together with their forward flag.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DirectionFlags {
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
    pub backwards_horizontal: bool,
    pub backwards_vertical: bool,
    pub backwards_diagonal: bool,
}

impl DirectionFlags {
    /// Horizontal, vertical and diagonal placement, forwards only
    pub const fn forward() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            diagonal: true,
            backwards_horizontal: false,
            backwards_vertical: false,
            backwards_diagonal: false,
        }
    }

    /// Every direction, including reversed words
    #[cfg(test)]
    pub const fn all() -> Self {
        Self {
            horizontal: true,
            vertical: true,
            diagonal: true,
            backwards_horizontal: true,
            backwards_vertical: true,
            backwards_diagonal: true,
        }
    }
}

/// Settings of a single word finder level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub directions: DirectionFlags,
    pub word_count: usize,
    pub possible_words: Vec<String>,
    /// Countdown start value in seconds. Not used during generation.
    #[serde(default)]
    pub max_time: f32,
}

impl GridConfig {
    /// Candidate words that fit the grid along at least one axis.
    ///
    /// Blank entries are dropped as well.
    pub fn fitting_words(&self) -> Vec<&str> {
        self.possible_words
            .iter()
            .map(|word| word.trim())
            .filter(|word| {
                if word.is_empty() {
                    return false;
                }
                let length = word.chars().count() as i64;
                if length > self.width as i64 && length > self.height as i64 {
                    tracing::warn!("The word {} is too long to fit in the grid", word);
                    return false;
                }
                true
            })
            .collect()
    }
}

/// A word embedded in the grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlacedWord {
    pub word: String,
    pub start: Coordinate,
    pub end: Coordinate,
}

#[cfg(test)]
impl PlacedWord {
    /// Unit step from the first letter towards the last
    pub fn step(&self) -> (i32, i32) {
        (
            (self.end.x - self.start.x).signum(),
            (self.end.y - self.start.y).signum(),
        )
    }

    /// All coordinates covered by the word, first letter first
    pub fn cells(&self) -> Vec<Coordinate> {
        let step = self.step();
        (0..self.word.chars().count() as i32)
            .map(|i| self.start.offset(step, i))
            .collect()
    }
}

/// A finished grid together with the words hidden in it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Puzzle {
    pub width: i32,
    pub height: i32,
    /// Rows of letters, indexed `grid[y][x]`
    pub grid: Vec<Vec<char>>,
    pub words: Vec<PlacedWord>,
    pub seed: u64,
    /// Word count after clamping to the usable candidates
    pub requested_words: usize,
}

impl Puzzle {
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && coordinate.x < self.width
            && coordinate.y < self.height
    }

    pub fn letter_at(&self, coordinate: Coordinate) -> Option<char> {
        if !self.contains(coordinate) {
            return None;
        }
        self.grid
            .get(coordinate.y as usize)
            .and_then(|row| row.get(coordinate.x as usize))
            .copied()
    }

    /// Fewer words ended up in the grid than were asked for
    pub fn is_shortfall(&self) -> bool {
        self.words.len() < self.requested_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: i32, height: i32, words: &[&str]) -> GridConfig {
        GridConfig {
            width,
            height,
            directions: DirectionFlags::forward(),
            word_count: words.len(),
            possible_words: words.iter().map(|w| w.to_string()).collect(),
            max_time: 30.0,
        }
    }

    #[test]
    fn test_fitting_words_drops_words_longer_than_both_sides() {
        let config = config(3, 5, &["cat", "horse", "giraffe", "  ", "ox"]);
        assert_eq!(config.fitting_words(), vec!["cat", "horse", "ox"]);
    }

    #[test]
    fn test_fitting_words_counts_characters_not_bytes() {
        // Four Arabic letters, eight bytes in UTF-8
        let config = config(4, 4, &["كتاب"]);
        assert_eq!(config.fitting_words().len(), 1);
    }

    #[test]
    fn test_placed_word_cells_follow_direction() {
        let word = PlacedWord {
            word: "dog".to_string(),
            start: Coordinate::new(2, 0),
            end: Coordinate::new(0, 2),
        };
        assert_eq!(word.step(), (-1, 1));
        assert_eq!(
            word.cells(),
            vec![
                Coordinate::new(2, 0),
                Coordinate::new(1, 1),
                Coordinate::new(0, 2)
            ]
        );
    }

    #[test]
    fn test_letter_at_out_of_bounds() {
        let puzzle = Puzzle {
            width: 2,
            height: 1,
            grid: vec![vec!['a', 'b']],
            words: vec![],
            seed: 0,
            requested_words: 0,
        };
        assert_eq!(puzzle.letter_at(Coordinate::new(1, 0)), Some('b'));
        assert_eq!(puzzle.letter_at(Coordinate::new(2, 0)), None);
        assert_eq!(puzzle.letter_at(Coordinate::new(0, -1)), None);
        assert!(!puzzle.is_shortfall());
    }

    #[test]
    fn test_direction_flags_default_from_partial_json() {
        let flags: DirectionFlags = serde_json::from_str(r#"{"horizontal": true}"#).unwrap();
        assert!(flags.horizontal);
        assert!(!flags.vertical);
        assert!(!flags.backwards_horizontal);
    }
}
