use std::{fmt, ops::Index, str::FromStr};

use crate::error::MazeError;

pub mod layouts;

/// Grid coordinates `(row, col)`, with row 0 at the top and columns growing rightward
///
/// Signed so that a proposed move off the edge of the grid is still representable
pub type Pos = (i32, i32);

/// The kind of a single maze cell
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Cell {
    #[default]
    Path = 0,
    Wall = 1,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' | '0' => Some(Cell::Path),
            '#' | '1' => Some(Cell::Wall),
            _ => None,
        }
    }

    fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(Cell::Path),
            1 => Some(Cell::Wall),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Path => '.',
            Cell::Wall => '#',
        }
    }
}

/// A static `rows x cols` grid of wall and path cells
///
/// The layout is fixed once built. Anything outside the grid counts as a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Maze {
    /// Build a maze from a row-major matrix of cells
    ///
    /// **Errors** if the matrix is empty or its rows differ in length
    pub fn new(layout: Vec<Vec<Cell>>) -> Result<Self, MazeError> {
        let rows = layout.len();
        let cols = layout.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(MazeError::Empty);
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in layout.into_iter().enumerate() {
            if line.len() != cols {
                return Err(MazeError::RaggedRow {
                    row,
                    expected: cols,
                    got: line.len(),
                });
            }
            cells.extend(line);
        }

        Ok(Self { rows, cols, cells })
    }

    /// Build a maze from a binary matrix where `1` is a wall and `0` is a path
    pub fn from_bits<R: AsRef<[u8]>>(bits: &[R]) -> Result<Self, MazeError> {
        let layout = bits
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        Cell::from_bit(value).ok_or(MazeError::InvalidBit { value, row, col })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(layout)
    }

    /// An all-path maze of the given size
    pub fn open(rows: usize, cols: usize) -> Result<Self, MazeError> {
        Self::new(vec![vec![Cell::Path; cols]; rows])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Check whether a position lies inside the grid
    pub fn contains(&self, (row, col): Pos) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    /// Get the cell at a position, or `None` if it is outside the grid
    pub fn cell(&self, pos: Pos) -> Option<Cell> {
        self.offset(pos).map(|i| self.cells[i])
    }

    /// Determine whether a position is blocked
    ///
    /// Out-of-bounds positions are treated as walls.
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cell(pos).map_or(true, |cell| cell == Cell::Wall)
    }

    /// Iterate over every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.rows as i32).flat_map(move |row| (0..self.cols as i32).map(move |col| (row, col)))
    }

    fn offset(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.0 as usize * self.cols + pos.1 as usize)
    }
}

impl Index<Pos> for Maze {
    type Output = Cell;

    /// **Panics** if `pos` is outside the grid
    fn index(&self, pos: Pos) -> &Self::Output {
        let i = self
            .offset(pos)
            .unwrap_or_else(|| panic!("position {pos:?} is outside the maze"));
        &self.cells[i]
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Parse a text layout, one line per row, `#`/`1` for walls and `.`/`0` for paths
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let layout = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, character)| {
                        Cell::from_char(character).ok_or(MazeError::InvalidCell {
                            character,
                            row,
                            col,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(layout)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.cells.chunks(self.cols) {
            let line: String = line.iter().map(|c| c.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
