use once_cell::sync::Lazy;
use rand::Rng;

/// The 28 letters of the Arabic alphabet, used to fill cells no word covers
pub static ARABIC_LETTERS: Lazy<Vec<char>> =
    Lazy::new(|| "ابتثجحخدذرزسشصضطظعغفقكلمنهوي".chars().collect());

/// Lowercase Latin letters, matching the lowercased words placed in the grid
pub static LATIN_LETTERS: Lazy<Vec<char>> = Lazy::new(|| ('a'..='z').collect());

/// Letters drawn for cells that no word covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillerAlphabet {
    letters: Vec<char>,
}

impl FillerAlphabet {
    pub fn arabic() -> Self {
        Self {
            letters: ARABIC_LETTERS.clone(),
        }
    }

    pub fn latin() -> Self {
        Self {
            letters: LATIN_LETTERS.clone(),
        }
    }

    /// Parse `arabic`, `latin` or a literal string of letters.
    /// Whitespace and repeated letters are ignored; returns `None` when nothing is left.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "arabic" => return Some(Self::arabic()),
            "latin" => return Some(Self::latin()),
            _ => {}
        }

        let mut letters: Vec<char> = Vec::new();
        for ch in value.chars().filter(|ch| !ch.is_whitespace()) {
            if !letters.contains(&ch) {
                letters.push(ch);
            }
        }

        if letters.is_empty() {
            None
        } else {
            Some(Self { letters })
        }
    }

    /// Uniformly random letter from the alphabet
    pub fn pick(&self, rng: &mut impl Rng) -> char {
        self.letters[rng.random_range(0..self.letters.len())]
    }
}

impl Default for FillerAlphabet {
    fn default() -> Self {
        Self::arabic()
    }
}
