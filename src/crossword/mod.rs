//! The crossword model and its constraint solver.
//!
//! Loading lives in [`structure`] and [`words`], the derived puzzle in [`puzzle`],
//! and the search machinery in the remaining modules, with [`solver`] tying it
//! all together.

pub mod assignment;
pub mod consistency;
pub mod domain;
pub mod puzzle;
pub mod solver;
pub mod structure;
pub mod value_ordering;
pub mod variable;
pub mod variable_selection;
pub mod words;
pub mod worklist;
