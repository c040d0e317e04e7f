use std::fmt;

/// Location of a token's first character, 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

impl Position {
    pub fn line_start(row: usize) -> Self {
        Position { row, col: 1 }
    }

    pub fn next_col(&mut self) {
        self.col += 1;
    }
}
