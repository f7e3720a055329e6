use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input is empty")]
    Empty,
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("line {line}: invalid number {token:?}")]
    Number { line: usize, token: String },
    #[error("grid row {row} has width {width}, expected {expected}")]
    RaggedGrid {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("unexpected cell {cell:?} at row {row}, column {col}")]
    UnexpectedCell { cell: char, row: usize, col: usize },
}

impl ParseError {
    pub fn line(line: usize, message: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no solver for day {0}")]
    UnknownDay(u8),
    #[error("no solution: {0}")]
    Unsolvable(&'static str),
    #[error("node {0:?} does not exist")]
    MissingNode(String),
}
