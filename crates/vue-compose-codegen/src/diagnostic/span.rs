//! Source location tracking.

use std::fmt;
use std::path::{Path, PathBuf};

use graphql_parser::Pos;

/// A position inside a GraphQL source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: PathBuf,
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Builds a location from a parser position.
    pub fn from_pos(file: &Path, pos: Pos) -> Self {
        Self::new(file, pos.line, pos.column)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}
