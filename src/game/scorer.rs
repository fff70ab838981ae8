/// Difficulty settings for one endless mode level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndlessTier {
    pub difficulty: i32,
    /// Seconds gained on a correct selection and lost on a wrong one
    pub timer_bonus: i64,
}

pub struct Scorer;

impl Scorer {
    /// Stars earned for completing a classic level.
    ///
    /// Scoring rules:
    /// - more than 60% of the time left: 3 stars
    /// - more than 40% of the time left: 2 stars
    /// - otherwise 1 star
    pub fn stars(max_time: f32, time_taken: f32) -> u8 {
        if max_time <= 0.0 {
            return 1;
        }

        let remaining = (max_time - time_taken) / max_time;
        if remaining > 0.6 {
            3
        } else if remaining > 0.4 {
            2
        } else {
            1
        }
    }

    /// Endless levels 1-3 are easy, 4-7 medium, everything after hard
    pub fn endless_tier(level: u32) -> EndlessTier {
        match level {
            0..=3 => EndlessTier {
                difficulty: 1,
                timer_bonus: 3,
            },
            4..=7 => EndlessTier {
                difficulty: 2,
                timer_bonus: 5,
            },
            _ => EndlessTier {
                difficulty: 3,
                timer_bonus: 7,
            },
        }
    }

    /// Score change for one endless mode selection
    pub fn selection_points(tier: EndlessTier, correct: bool) -> i32 {
        let points = tier.difficulty * tier.timer_bonus as i32;
        if correct {
            points
        } else {
            -points
        }
    }

    /// Apply a score change; the score never drops below zero
    pub fn add_points(score: i32, points: i32) -> i32 {
        (score + points).max(0)
    }
}
