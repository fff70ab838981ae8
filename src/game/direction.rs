use crate::models::DirectionFlags;

/// One of the eight straight lines a word can be laid along.
///
/// `y` grows down the rows, so `South` is `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    West,
    South,
    North,
    SouthEast,
    NorthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::South => (0, 1),
            Direction::North => (0, -1),
            Direction::SouthEast => (1, 1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Directions enabled by a level's flags, in a fixed order.
    ///
    /// A backwards flag only adds the reversed vectors when its forward flag is set.
    pub fn allowed(flags: &DirectionFlags) -> Vec<Direction> {
        let mut allowed = Vec::with_capacity(8);

        if flags.horizontal {
            allowed.push(Direction::East);
            if flags.backwards_horizontal {
                allowed.push(Direction::West);
            }
        }

        if flags.vertical {
            allowed.push(Direction::South);
            if flags.backwards_vertical {
                allowed.push(Direction::North);
            }
        }

        if flags.diagonal {
            allowed.push(Direction::SouthEast);
            allowed.push(Direction::NorthEast);
            if flags.backwards_diagonal {
                allowed.push(Direction::SouthWest);
                allowed.push(Direction::NorthWest);
            }
        }

        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_flags_give_eight_directions() {
        let allowed = Direction::allowed(&DirectionFlags::all());
        assert_eq!(allowed.len(), 8);
    }

    #[test]
    fn test_backwards_without_forward_adds_nothing() {
        let flags = DirectionFlags {
            backwards_horizontal: true,
            backwards_vertical: true,
            backwards_diagonal: true,
            ..DirectionFlags::default()
        };
        assert!(Direction::allowed(&flags).is_empty());
    }

    #[test]
    fn test_backwards_vectors_are_negated_forward_vectors() {
        let flags = DirectionFlags {
            diagonal: true,
            backwards_diagonal: true,
            ..DirectionFlags::default()
        };
        let offsets: Vec<_> = Direction::allowed(&flags)
            .into_iter()
            .map(Direction::offset)
            .collect();
        assert_eq!(offsets, vec![(1, 1), (1, -1), (-1, 1), (-1, -1)]);
        for (dx, dy) in &offsets {
            assert!(offsets.contains(&(-dx, -dy)));
        }
    }

    #[test]
    fn test_forward_only() {
        let allowed = Direction::allowed(&DirectionFlags::forward());
        assert_eq!(
            allowed,
            vec![
                Direction::East,
                Direction::South,
                Direction::SouthEast,
                Direction::NorthEast
            ]
        );
    }
}
