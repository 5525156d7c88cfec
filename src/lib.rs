#![deny(missing_docs)]
//! This crate fills crossword grids from a word list by treating every slot as a
//! variable in a constraint satisfaction problem.
//!
//! ```
//! use crossword_solver::crossword::puzzle::Crossword;
//! use crossword_solver::crossword::solver::{DefaultConfig, Solver};
//!
//! let crossword = Crossword::parse("#_#\n___\n#_#\n", "cat\nbat\nact\n").unwrap();
//! let mut solver = Solver::<DefaultConfig>::new(&crossword);
//! let solution = solver.solve().unwrap();
//! assert!(crossword.verify(&solution));
//! ```

/// The `crossword` module holds the puzzle model, consistency engine and backtracking search.
pub mod crossword;

/// Errors raised while loading puzzles.
pub mod error;

pub use crate::crossword::puzzle::Crossword;
pub use crate::crossword::solver::{DefaultConfig, DynamicConfig, SolutionStats, Solver};
pub use crate::error::{CrosswordError, Result};
