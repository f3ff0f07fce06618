use crate::error::{KeyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the grid.
pub const N: usize = 9;
/// Side length of a block.
pub const BOX_SIZE: usize = 3;
/// Number of cells in the grid.
pub const CELL_COUNT: usize = N * N;

/// A cell position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index in `0..81`
    pub fn index(self) -> usize {
        self.row * N + self.col
    }

    pub fn from_index(index: usize) -> Self {
        Self::new(index / N, index % N)
    }

    /// Iterate over all 81 positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).map(Position::from_index)
    }
}

/// A 9x9 Sudoku board. `0` marks an empty cell, `1..=9` a filled one.
///
/// `Grid` is `Copy`: snapshots before a tentative change are plain
/// assignments, and the puzzle and its solution are independent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    cells: [[u8; N]; N],
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an 81-character grid. `0` and `.` are empty cells.
    pub fn from_string(s: &str) -> Result<Self> {
        let digits: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.len() != CELL_COUNT {
            return Err(KeyError::InvalidGrid(format!(
                "expected {CELL_COUNT} cells, got {}",
                digits.len()
            )));
        }

        let mut grid = Self::new();
        for (index, c) in digits.into_iter().enumerate() {
            let value = match c {
                '.' => 0,
                '0'..='9' => c as u8 - b'0',
                other => {
                    return Err(KeyError::InvalidGrid(format!(
                        "unexpected character {other:?} at cell {index}"
                    )))
                }
            };
            grid.set(Position::from_index(index), value);
        }
        Ok(grid)
    }

    /// Build a grid from row-major cell values
    pub fn from_cells(cells: &[u8; CELL_COUNT]) -> Self {
        let mut grid = Self::new();
        for (index, &value) in cells.iter().enumerate() {
            grid.set(Position::from_index(index), value);
        }
        grid
    }

    /// Row-major cell values
    pub fn to_cells(&self) -> [u8; CELL_COUNT] {
        let mut cells = [0u8; CELL_COUNT];
        for pos in Position::all() {
            cells[pos.index()] = self.value(pos);
        }
        cells
    }

    /// Row-major decimal digits, one per cell (`0` for empty)
    pub fn to_digit_string(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|&v| char::from(b'0' + v))
            .collect()
    }

    /// Raw value at `pos` (`0` when empty)
    pub fn value(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    /// Value at `pos`, `None` when empty
    pub fn get(&self, pos: Position) -> Option<u8> {
        match self.value(pos) {
            0 => None,
            v => Some(v),
        }
    }

    pub fn set(&mut self, pos: Position, value: u8) {
        debug_assert!(value as usize <= N, "cell value out of range: {value}");
        self.cells[pos.row][pos.col] = value;
    }

    pub fn clear(&mut self, pos: Position) {
        self.cells[pos.row][pos.col] = 0;
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.value(pos) == 0
    }

    /// Whether `value` can go at (`row`, `col`) without repeating in the
    /// row, the column or the block.
    pub fn is_valid(&self, row: usize, col: usize, value: u8) -> bool {
        let block_row = (row / BOX_SIZE) * BOX_SIZE;
        let block_col = (col / BOX_SIZE) * BOX_SIZE;
        for i in 0..N {
            if self.cells[row][i] == value || self.cells[i][col] == value {
                return false;
            }
            if self.cells[block_row + i / BOX_SIZE][block_col + i % BOX_SIZE] == value {
                return false;
            }
        }
        true
    }

    /// First empty cell in row-major order
    pub fn first_empty(&self) -> Option<Position> {
        Position::all().find(|&pos| self.is_empty_at(pos))
    }

    pub fn given_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&v| v != 0).count()
    }

    pub fn empty_count(&self) -> usize {
        CELL_COUNT - self.given_count()
    }

    /// No empty cells remain
    pub fn is_complete(&self) -> bool {
        self.first_empty().is_none()
    }

    /// Complete, and every row, column and block holds 1-9 exactly once
    pub fn is_solved(&self) -> bool {
        const ALL: u16 = 0b11_1111_1110;
        for i in 0..N {
            let mut row = 0u16;
            let mut col = 0u16;
            let mut block = 0u16;
            let block_row = (i / BOX_SIZE) * BOX_SIZE;
            let block_col = (i % BOX_SIZE) * BOX_SIZE;
            for j in 0..N {
                row |= 1 << self.cells[i][j];
                col |= 1 << self.cells[j][i];
                block |= 1 << self.cells[block_row + j / BOX_SIZE][block_col + j % BOX_SIZE];
            }
            if row != ALL || col != ALL || block != ALL {
                return false;
            }
        }
        true
    }

    /// Whether every filled cell of `self` holds the same value in `other`
    pub fn is_subset_of(&self, other: &Grid) -> bool {
        Position::all().all(|pos| match self.get(pos) {
            Some(v) => other.value(pos) == v,
            None => true,
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            if row % BOX_SIZE == 0 && row != 0 {
                writeln!(f, "-----------")?;
            }
            for col in 0..N {
                if col % BOX_SIZE == 0 && col != 0 {
                    write!(f, "|")?;
                }
                match self.cells[row][col] {
                    0 => write!(f, " ")?,
                    v => write!(f, "{v}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn parse_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        assert_eq!(grid.to_digit_string(), PUZZLE);
        assert_eq!(grid.value(Position::new(0, 0)), 5);
        assert_eq!(grid.get(Position::new(0, 2)), None);
        assert_eq!(grid.given_count(), 30);
        assert_eq!(grid.empty_count(), 51);
    }

    #[test]
    fn parse_accepts_dots_and_whitespace() {
        let dotted = PUZZLE.replace('0', ".");
        let spaced: String = dotted
            .as_bytes()
            .chunks(9)
            .map(|row| format!("{}\n", std::str::from_utf8(row).unwrap()))
            .collect();
        assert_eq!(Grid::from_string(&spaced).unwrap().to_digit_string(), PUZZLE);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(
            Grid::from_string("123"),
            Err(KeyError::InvalidGrid(_))
        ));
        let bad = format!("x{}", &PUZZLE[1..]);
        assert!(matches!(Grid::from_string(&bad), Err(KeyError::InvalidGrid(_))));
    }

    #[test]
    fn is_valid_checks_row_col_and_block() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        // Row 0 already has 5, 3, 7
        assert!(!grid.is_valid(0, 2, 3));
        // Column 2 already has 8
        assert!(!grid.is_valid(0, 2, 8));
        // Top-left block already has 9
        assert!(!grid.is_valid(0, 2, 9));
        assert!(grid.is_valid(0, 2, 4));
    }

    #[test]
    fn block_arithmetic_uses_containing_block() {
        let mut grid = Grid::new();
        grid.set(Position::new(4, 4), 1);
        assert!(!grid.is_valid(3, 3, 1));
        assert!(!grid.is_valid(5, 5, 1));
        assert!(grid.is_valid(2, 2, 1));
        assert!(grid.is_valid(6, 6, 1));
    }

    #[test]
    fn solved_detection() {
        let solution = Grid::from_string(SOLUTION).unwrap();
        assert!(solution.is_complete());
        assert!(solution.is_solved());

        let mut broken = solution;
        let a = broken.value(Position::new(0, 0));
        let b = broken.value(Position::new(0, 1));
        broken.set(Position::new(0, 0), b);
        broken.set(Position::new(0, 1), a);
        assert!(broken.is_complete());
        assert!(!broken.is_solved());

        assert!(!Grid::from_string(PUZZLE).unwrap().is_solved());
    }

    #[test]
    fn subset_relation() {
        let puzzle = Grid::from_string(PUZZLE).unwrap();
        let solution = Grid::from_string(SOLUTION).unwrap();
        assert!(puzzle.is_subset_of(&solution));
        assert!(!solution.is_subset_of(&puzzle));
    }

    #[test]
    fn cells_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let cells = grid.to_cells();
        assert_eq!(cells[0], 5);
        assert_eq!(cells[80], 9);
        assert_eq!(Grid::from_cells(&cells), grid);
    }

    #[test]
    fn copies_are_independent() {
        let original = Grid::from_string(PUZZLE).unwrap();
        let mut snapshot = original;
        snapshot.clear(Position::new(0, 0));
        assert_eq!(original.value(Position::new(0, 0)), 5);
        assert!(snapshot.is_empty_at(Position::new(0, 0)));
    }

    #[test]
    fn display_draws_block_separators() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let text = grid.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "53 | 7 |   ");
        assert_eq!(lines[3], "-----------");
        assert_eq!(lines[10], "   | 8 | 79");
    }

    #[test]
    fn serde_round_trip() {
        let grid = Grid::from_string(PUZZLE).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
