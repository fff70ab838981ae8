use crate::models::Coordinate;

/// What a board lookup found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    OutOfBounds,
    Empty,
    Letter(char),
}

/// Letter storage for one generation run.
///
/// Cells are stored row by row; a cell is `None` until a word letter or a
/// filler letter is written to it.
#[derive(Debug, Clone)]
pub struct Board {
    width: i32,
    height: i32,
    cells: Vec<Option<char>>,
}

impl Board {
    /// Both dimensions must be positive; the generator checks this before building a board.
    pub fn new(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self {
            width,
            height,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x >= 0
            && coordinate.y >= 0
            && coordinate.x < self.width
            && coordinate.y < self.height
    }

    /// Coordinate of the cell at a flat index, counting along the rows
    pub fn coordinate_of(&self, index: usize) -> Coordinate {
        let width = self.width as usize;
        Coordinate::new((index % width) as i32, (index / width) as i32)
    }

    fn index_of(&self, coordinate: Coordinate) -> Option<usize> {
        if !self.contains(coordinate) {
            return None;
        }
        Some(coordinate.y as usize * self.width as usize + coordinate.x as usize)
    }

    pub fn get(&self, coordinate: Coordinate) -> Cell {
        match self.index_of(coordinate) {
            None => Cell::OutOfBounds,
            Some(index) => match self.cells[index] {
                None => Cell::Empty,
                Some(letter) => Cell::Letter(letter),
            },
        }
    }

    /// Writes a letter; out of bounds writes are ignored.
    pub fn set(&mut self, coordinate: Coordinate, letter: char) {
        if let Some(index) = self.index_of(coordinate) {
            self.cells[index] = Some(letter);
        }
    }

    /// Whether `letters` can be laid from `start` one `step` at a time.
    ///
    /// Every visited cell must be on the board and either empty or already
    /// holding the same letter.
    pub fn fits(&self, letters: &[char], start: Coordinate, step: (i32, i32)) -> bool {
        letters
            .iter()
            .enumerate()
            .all(|(i, &letter)| match self.get(start.offset(step, i as i32)) {
                Cell::Empty => true,
                Cell::Letter(existing) => existing == letter,
                Cell::OutOfBounds => false,
            })
    }

    /// Lays `letters` from `start` and returns the coordinate of the last one.
    /// Callers check `fits` first.
    pub fn write(&mut self, letters: &[char], start: Coordinate, step: (i32, i32)) -> Coordinate {
        for (i, &letter) in letters.iter().enumerate() {
            self.set(start.offset(step, i as i32), letter);
        }
        start.offset(step, letters.len().saturating_sub(1) as i32)
    }

    /// Empty coordinates, column by column
    pub fn empty_cells(&self) -> Vec<Coordinate> {
        let mut empty = Vec::new();
        for x in 0..self.width {
            for y in 0..self.height {
                let coordinate = Coordinate::new(x, y);
                if self.get(coordinate) == Cell::Empty {
                    empty.push(coordinate);
                }
            }
        }
        empty
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Rows of letters, indexed `[y][x]`. Empty cells become `None`.
    pub fn rows(&self) -> Vec<Vec<Option<char>>> {
        self.cells
            .chunks(self.width.max(1) as usize)
            .map(|row| row.to_vec())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_of_non_square_board() {
        let board = Board::new(4, 2);
        assert_eq!(board.cell_count(), 8);
        assert_eq!(board.coordinate_of(0), Coordinate::new(0, 0));
        assert_eq!(board.coordinate_of(3), Coordinate::new(3, 0));
        assert_eq!(board.coordinate_of(4), Coordinate::new(0, 1));
        assert_eq!(board.coordinate_of(7), Coordinate::new(3, 1));
    }

    #[test]
    fn test_get_reports_bounds_and_letters() {
        let mut board = Board::new(2, 2);
        board.set(Coordinate::new(1, 0), 'a');
        assert_eq!(board.get(Coordinate::new(1, 0)), Cell::Letter('a'));
        assert_eq!(board.get(Coordinate::new(0, 0)), Cell::Empty);
        assert_eq!(board.get(Coordinate::new(2, 0)), Cell::OutOfBounds);
        assert_eq!(board.get(Coordinate::new(0, -1)), Cell::OutOfBounds);
    }

    #[test]
    fn test_fits_allows_shared_letters_only() {
        let mut board = Board::new(3, 3);
        let cat: Vec<char> = "cat".chars().collect();
        let end = board.write(&cat, Coordinate::new(0, 1), (1, 0));
        assert_eq!(end, Coordinate::new(2, 1));

        // "bat" down the middle column shares the 'a'
        let bat: Vec<char> = "bat".chars().collect();
        assert!(board.fits(&bat, Coordinate::new(1, 0), (0, 1)));

        // "dog" down the middle column would overwrite the 'a'
        let dog: Vec<char> = "dog".chars().collect();
        assert!(!board.fits(&dog, Coordinate::new(1, 0), (0, 1)));
    }

    #[test]
    fn test_fits_rejects_leaving_the_board() {
        let board = Board::new(3, 3);
        let cat: Vec<char> = "cat".chars().collect();
        assert!(!board.fits(&cat, Coordinate::new(1, 0), (1, 0)));
        assert!(!board.fits(&cat, Coordinate::new(0, 1), (1, -1)));
        assert!(board.fits(&cat, Coordinate::new(0, 2), (1, -1)));
    }

    #[test]
    fn test_empty_cells_column_major() {
        let mut board = Board::new(2, 2);
        board.set(Coordinate::new(0, 0), 'x');
        assert_eq!(
            board.empty_cells(),
            vec![
                Coordinate::new(0, 1),
                Coordinate::new(1, 0),
                Coordinate::new(1, 1)
            ]
        );
        assert!(!board.is_full());
    }

    #[test]
    fn test_rows_are_y_major() {
        let mut board = Board::new(2, 3);
        board.set(Coordinate::new(1, 2), 'z');
        let rows = board.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][1], Some('z'));
        assert_eq!(rows[0][0], None);
    }
}
