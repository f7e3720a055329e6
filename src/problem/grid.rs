use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

use super::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dir {
    N,
    E,
    S,
    W,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn rev(self) -> Self {
        match self {
            Dir::N => Dir::S,
            Dir::E => Dir::W,
            Dir::S => Dir::N,
            Dir::W => Dir::E,
        }
    }

    /// `(d_row, d_col)` of a single step.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Dir::N => (-1, 0),
            Dir::E => (0, 1),
            Dir::S => (1, 0),
            Dir::W => (0, -1),
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dir::N => write!(f, "N"),
            Dir::E => write!(f, "E"),
            Dir::S => write!(f, "S"),
            Dir::W => write!(f, "W"),
        }
    }
}

/// Row-major rectangular map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, ParseError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).ok_or(ParseError::Empty)?;

        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut cells = Vec::with_capacity(width * height);

        for (row, cells_in_row) in rows.into_iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(ParseError::RaggedGrid {
                    row,
                    width: cells_in_row.len(),
                    expected: width,
                });
            }

            cells.extend(cells_in_row);
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn index_of(&self, c: Coord) -> usize {
        c.row * self.width + c.col
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.row < self.height && c.col < self.width
    }

    /// The neighbour of `c` in direction `dir`, if it lies on the grid.
    pub fn step(&self, c: Coord, dir: Dir) -> Option<Coord> {
        let next = match dir {
            Dir::N => Coord::new(c.row.checked_sub(1)?, c.col),
            Dir::E => Coord::new(c.row, c.col + 1),
            Dir::S => Coord::new(c.row + 1, c.col),
            Dir::W => Coord::new(c.row, c.col.checked_sub(1)?),
        };

        self.contains(next).then_some(next)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Coord::new(row, col)))
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Coord> {
        self.coords().find(|&c| pred(&self[c]))
    }

    /// Converts every cell, failing on the first cell `f` rejects.
    pub fn try_map<U, E>(
        &self,
        mut f: impl FnMut(Coord, &T) -> Result<U, E>,
    ) -> Result<Grid<U>, E> {
        let cells = self
            .coords()
            .map(|c| f(c, &self[c]))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Grid {
            width: self.width,
            height: self.height,
            cells,
        })
    }
}

impl Grid<u8> {
    pub fn unexpected(&self, c: Coord) -> ParseError {
        ParseError::UnexpectedCell {
            cell: self[c] as char,
            row: c.row,
            col: c.col,
        }
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, c: Coord) -> &Self::Output {
        debug_assert!(self.contains(c));
        &self.cells[self.index_of(c)]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, c: Coord) -> &mut Self::Output {
        debug_assert!(self.contains(c));
        let i = self.index_of(c);
        &mut self.cells[i]
    }
}
