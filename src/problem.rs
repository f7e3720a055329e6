mod error;
mod grid;
mod params;

use std::{fmt::Display, fs, io, path::Path, str::FromStr};

use proconio::{input, marker::Bytes, source::once::OnceSource};

pub use error::{ParseError, SolveError};
pub use grid::{Coord, Dir, Grid};
pub use params::Params;

#[derive(Debug, Clone)]
pub struct Input {
    text: String,
}

impl Input {
    pub fn read(path: &Path) -> io::Result<Self> {
        fs::read_to_string(path).map(Self::new)
    }

    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        let text = if text.contains('\r') {
            text.replace("\r\n", "\n")
        } else {
            text
        };

        Self { text }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines of the input with trailing blank lines dropped.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.trim_end().lines()
    }

    /// Reads the input as a rectangular grid of bytes.
    pub fn grid(&self) -> Result<Grid<u8>, ParseError> {
        let mut height = 0;
        let mut width = None;

        for (i, line) in self.lines().enumerate() {
            if line.is_empty() || line.contains(char::is_whitespace) {
                return Err(ParseError::line(i + 1, "grid rows must be non-empty and unbroken"));
            }

            match width {
                None => width = Some(line.len()),
                Some(w) if w != line.len() => {
                    return Err(ParseError::RaggedGrid {
                        row: i,
                        width: line.len(),
                        expected: w,
                    })
                }
                Some(_) => {}
            }

            height += 1;
        }

        if height == 0 {
            return Err(ParseError::Empty);
        }

        let source = OnceSource::from(self.text.as_str());

        input! {
            from source,
            rows: [Bytes; height],
        }

        Grid::from_rows(rows)
    }
}

/// Parses a single token, attributing failures to a 1-based line number.
pub fn parse_num<T: FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.trim().parse().map_err(|_| ParseError::Number {
        line,
        token: token.trim().to_string(),
    })
}

/// Parses every whitespace-separated token of `s`.
pub fn parse_nums<T: FromStr>(s: &str, line: usize) -> Result<Vec<T>, ParseError> {
    s.split_whitespace().map(|t| parse_num(t, line)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer {
    part1: i64,
    part2: Option<i64>,
}

impl Answer {
    pub fn new(part1: i64, part2: i64) -> Self {
        Self {
            part1,
            part2: Some(part2),
        }
    }

    pub fn single(part1: i64) -> Self {
        Self { part1, part2: None }
    }

    pub fn part1(&self) -> i64 {
        self.part1
    }

    pub fn part2(&self) -> Option<i64> {
        self.part2
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P1: {}", self.part1)?;

        match self.part2 {
            Some(part2) => write!(f, ", P2: {}", part2),
            None => Ok(()),
        }
    }
}
