#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The static crossword grid: which cells can hold a letter and which are blocked.
//!
//! The textual format is one line per row, with `_` marking a fillable cell and
//! any other character marking a blocked cell. Rows shorter than the widest row
//! are padded with blocked cells.

use crate::error::{CrosswordError, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Character marking a fillable cell in a structure file.
pub const FILLABLE: char = '_';

/// Character used when printing blocked cells.
pub const BLOCKED: char = '█';

/// A rectangular grid of fillable and blocked cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Structure {
    height: usize,
    width: usize,
    cells: Vec<Vec<bool>>,
}

impl Structure {
    /// Builds a structure from rows of fillable flags, padding ragged rows with
    /// blocked cells.
    ///
    /// # Errors
    ///
    /// `CrosswordError::EmptyStructure` if `rows` is empty.
    pub fn from_cells(rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.is_empty() {
            return Err(CrosswordError::EmptyStructure);
        }

        let height = rows.len();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();

        Ok(Self {
            height,
            width,
            cells,
        })
    }

    /// Parses the textual structure format.
    ///
    /// # Errors
    ///
    /// `CrosswordError::EmptyStructure` if the text has no lines.
    pub fn parse(text: &str) -> Result<Self> {
        let rows = text
            .lines()
            .map(|line| line.chars().map(|c| c == FILLABLE).collect())
            .collect();
        Self::from_cells(rows)
    }

    /// Reads and parses a structure file.
    ///
    /// # Errors
    ///
    /// `CrosswordError::Io` if the file cannot be read, or any error from [`Structure::parse`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CrosswordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of columns, after padding.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at `(row, col)` is fillable. Cells outside the grid are blocked.
    #[must_use]
    pub fn is_fillable(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Rows top to bottom, each `width` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

/// Every file under `dir` whose name starts with `structure`, sorted by path.
///
/// # Errors
///
/// `CrosswordError::Walk` if a directory entry cannot be read.
pub fn find_structures(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("structure"))
        {
            found.push(entry.into_path());
        }
    }

    found.sort();
    Ok(found)
}

impl Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for &cell in row {
                write!(f, "{}", if cell { FILLABLE } else { BLOCKED })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
