//! Grid storage, positions and the visitation overlay

use crate::error::{MapError, Result};
use serde::{Deserialize, Serialize};

/// A cell address. Rows grow downwards, columns to the right.
///
/// Coordinates are signed so that neighbours of edge cells can be formed
/// and rejected by the bounds check instead of underflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `direction`
    pub fn step(self, direction: Direction) -> Position {
        let (dr, dc) = direction.delta();
        Position::new(self.row + dr, self.col + dc)
    }

    /// The four orthogonal neighbours in [`Direction::ALL`] order
    pub fn neighbors(self) -> [Position; 4] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// Orthogonal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed enumeration order used whenever candidates are ranked
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, col) offset of one step
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Raw character grid. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<char>>) -> Self {
        Self { rows }
    }

    /// Parse newline-delimited text. Only `\n` separates rows; every other
    /// character, `\r` included, becomes a cell.
    pub fn from_text(text: &str) -> Self {
        Self {
            rows: text.split('\n').map(|line| line.chars().collect()).collect(),
        }
    }

    /// Build a grid from string cells as delivered by JSON or foreign hosts
    pub fn from_cells<R, S>(rows: R) -> Result<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut grid = Vec::new();
        for (row, cells) in rows.into_iter().enumerate() {
            let mut line = Vec::new();
            for (col, cell) in cells.into_iter().enumerate() {
                let cell = cell.as_ref();
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => line.push(c),
                    _ => {
                        return Err(MapError::MultiCharCell {
                            row,
                            col,
                            cell: cell.to_string(),
                        })
                    }
                }
            }
            grid.push(line);
        }
        Ok(Self { rows: grid })
    }

    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Character at (row, col), `None` when either coordinate falls outside
    /// that particular row
    pub fn char_at(&self, row: i32, col: i32) -> Option<char> {
        if row < 0 || col < 0 {
            return None;
        }
        self.rows
            .get(row as usize)
            .and_then(|line| line.get(col as usize))
            .copied()
    }

    pub fn get(&self, pos: Position) -> Option<char> {
        self.char_at(pos.row, pos.col)
    }

    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, line)| {
            line.iter()
                .enumerate()
                .map(move |(c, &ch)| (Position::new(r as i32, c as i32), ch))
        })
    }

    /// Every position holding `symbol`, row-major. `None` when there is none.
    pub fn find_symbols(&self, symbol: char) -> Option<Vec<Position>> {
        let found: Vec<Position> = self
            .cells()
            .filter(|&(_, ch)| ch == symbol)
            .map(|(pos, _)| pos)
            .collect();
        if found.is_empty() {
            None
        } else {
            Some(found)
        }
    }

    /// Number of cells that are not blank
    pub fn non_blank_count(&self) -> usize {
        self.cells()
            .filter(|&(_, ch)| ch != crate::charset::EMPTY)
            .count()
    }
}

impl From<Vec<Vec<char>>> for Grid {
    fn from(rows: Vec<Vec<char>>) -> Self {
        Self::new(rows)
    }
}

impl From<&str> for Grid {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for ch in line {
                write!(f, "{}", ch)?;
            }
        }
        Ok(())
    }
}

/// A grid together with a same-shaped visitation overlay and a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridModel {
    grid: Grid,
    visited: Vec<Vec<bool>>,
    cursor: Position,
}

impl GridModel {
    /// Wrap a grid with an all-false overlay and the cursor at (0, 0)
    pub fn new(grid: Grid) -> Self {
        let visited = grid.rows().iter().map(|line| vec![false; line.len()]).collect();
        Self {
            grid,
            visited,
            cursor: Position::new(0, 0),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn set_cursor(&mut self, pos: Position) {
        self.cursor = pos;
    }

    pub fn is_visited(&self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        self.visited
            .get(row as usize)
            .and_then(|line| line.get(col as usize))
            .copied()
            .unwrap_or(false)
    }

    /// Flag a cell as visited. Out-of-bounds coordinates are ignored;
    /// returns whether a cell was flagged.
    pub fn mark_visited(&mut self, row: i32, col: i32) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        match self
            .visited
            .get_mut(row as usize)
            .and_then(|line| line.get_mut(col as usize))
        {
            Some(cell) => {
                *cell = true;
                true
            }
            None => false,
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().flatten().filter(|v| **v).count()
    }
}

impl From<Grid> for GridModel {
    fn from(grid: Grid) -> Self {
        Self::new(grid)
    }
}
