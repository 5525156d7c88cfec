//! Error types for loading crossword inputs.
//!
//! An unsolvable puzzle is not an error: the solver reports it as `None`.
//! Only failures to obtain a well-formed puzzle end up here.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors raised while reading structures and word lists.
#[derive(Error, Debug)]
pub enum CrosswordError {
    /// A structure or word-list file could not be read.
    #[error("Failed to read {path}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The structure description contained no rows.
    #[error("Crossword structure is empty")]
    EmptyStructure,

    /// Walking a puzzle directory failed.
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, CrosswordError>;
