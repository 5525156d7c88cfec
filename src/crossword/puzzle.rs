#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The static puzzle model.
//!
//! A [`Crossword`] owns the grid structure and the word list, and derives from
//! the grid the set of variables (slots), the overlap table between crossing
//! slots and each slot's neighbours. Nothing here changes once built; the
//! solver only reads it.
//!
//! The overlap table is stored under both orderings of every crossing pair,
//! with the offsets swapped, so `overlap(x, y)` and `overlap(y, x)` are both
//! direct lookups.

use crate::crossword::assignment::Assignment;
use crate::crossword::structure::{BLOCKED, Structure};
use crate::crossword::variable::{Direction, VarId, Variable};
use crate::crossword::words::WordList;
use crate::error::Result;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::path::Path;

/// Offsets `(i, j)` such that letter `i` of the first slot shares a cell with
/// letter `j` of the second.
pub type Overlap = (usize, usize);

/// An ordered pair of neighbouring variables, the unit of work for arc consistency.
pub type Arc = (VarId, VarId);

type Neighbors = SmallVec<[VarId; 8]>;

/// A grid and word list, with the slots and crossings derived from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crossword {
    structure: Structure,
    words: WordList,
    variables: Vec<Variable>,
    overlaps: FxHashMap<Arc, Overlap>,
    neighbors: Vec<Neighbors>,
}

/// Scans the grid row-major; at each start cell the across slot comes before the down slot.
fn derive_variables(structure: &Structure) -> Vec<Variable> {
    let mut variables = Vec::new();

    for row in 0..structure.height() {
        for col in 0..structure.width() {
            if !structure.is_fillable(row, col) {
                continue;
            }

            if col == 0 || !structure.is_fillable(row, col - 1) {
                let length = (col..structure.width())
                    .take_while(|&c| structure.is_fillable(row, c))
                    .count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }

            if row == 0 || !structure.is_fillable(row - 1, col) {
                let length = (row..structure.height())
                    .take_while(|&r| structure.is_fillable(r, col))
                    .count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }
        }
    }

    variables
}

fn derive_overlaps(variables: &[Variable]) -> FxHashMap<Arc, Overlap> {
    let mut occupants: FxHashMap<(usize, usize), SmallVec<[(VarId, usize); 2]>> =
        FxHashMap::default();

    for (id, var) in variables.iter().enumerate() {
        for (offset, cell) in var.cells().enumerate() {
            occupants.entry(cell).or_default().push((id, offset));
        }
    }

    let mut overlaps = FxHashMap::default();
    for slots in occupants.values() {
        for (&(x, i), &(y, j)) in slots.iter().tuple_combinations() {
            overlaps.insert((x, y), (i, j));
            overlaps.insert((y, x), (j, i));
        }
    }

    overlaps
}

impl Crossword {
    /// Derives the variables, overlaps and neighbour lists of `structure`.
    #[must_use]
    pub fn new(structure: Structure, words: WordList) -> Self {
        let variables = derive_variables(&structure);
        let overlaps = derive_overlaps(&variables);

        let mut neighbors: Vec<Neighbors> = vec![SmallVec::new(); variables.len()];
        for &(x, y) in overlaps.keys() {
            neighbors[x].push(y);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Self {
            structure,
            words,
            variables,
            overlaps,
            neighbors,
        }
    }

    /// Parses a structure description and a newline-separated word list.
    ///
    /// # Errors
    ///
    /// Any error from [`Structure::parse`].
    pub fn parse(structure: &str, words: &str) -> Result<Self> {
        Ok(Self::new(Structure::parse(structure)?, WordList::parse(words)))
    }

    /// Loads a structure file and a word-list file.
    ///
    /// # Errors
    ///
    /// `CrosswordError::Io` if either file cannot be read, or any parse error.
    pub fn from_files(structure: impl AsRef<Path>, words: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(
            Structure::from_file(structure)?,
            WordList::from_file(words)?,
        ))
    }

    /// Every slot, indexed by `VarId`.
    #[must_use]
    pub const fn variables(&self) -> &[Variable] {
        self.variables.as_slice()
    }

    /// The slot with id `id`.
    #[must_use]
    pub fn variable(&self, id: VarId) -> &Variable {
        &self.variables[id]
    }

    /// Number of slots.
    #[must_use]
    pub const fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Every `VarId`, ascending.
    #[must_use]
    pub const fn var_ids(&self) -> std::ops::Range<VarId> {
        0..self.variables.len()
    }

    /// Dense id of `var`, if it is one of this puzzle's slots.
    #[must_use]
    pub fn id_of(&self, var: &Variable) -> Option<VarId> {
        self.variables.iter().position(|v| v == var)
    }

    /// Variables sharing a cell with `id`, in ascending id order.
    #[must_use]
    pub fn neighbors(&self, id: VarId) -> &[VarId] {
        &self.neighbors[id]
    }

    /// Number of neighbours of `id`.
    #[must_use]
    pub fn degree(&self, id: VarId) -> usize {
        self.neighbors[id].len()
    }

    /// Where `x` and `y` cross, as `(offset in x, offset in y)`.
    #[must_use]
    pub fn overlap(&self, x: VarId, y: VarId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Every ordered pair of neighbouring variables.
    pub fn arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.var_ids()
            .flat_map(move |x| self.neighbors(x).iter().map(move |&y| (x, y)))
    }

    /// The candidate vocabulary.
    #[must_use]
    pub const fn words(&self) -> &WordList {
        &self.words
    }

    /// The grid the slots were derived from.
    #[must_use]
    pub const fn structure(&self) -> &Structure {
        &self.structure
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.structure.width()
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.structure.height()
    }

    /// Places the letters of `assignment` on the grid; unfilled cells are `None`.
    #[must_use]
    pub fn letter_grid(&self, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
        let mut letters = vec![vec![None; self.width()]; self.height()];

        for (var, word) in assignment.iter() {
            for (k, (row, col)) in self.variables[var].cells().enumerate() {
                if let Some(letter) = self.words.letter(word, k) {
                    letters[row][col] = Some(letter);
                }
            }
        }

        letters
    }

    /// Text rendering of `assignment`: blocked cells as `█`, empty cells as spaces.
    #[must_use]
    pub fn render(&self, assignment: &Assignment) -> String {
        let letters = self.letter_grid(assignment);
        let mut out = String::with_capacity(self.height() * (self.width() + 1) * 3);

        for (row, cells) in self.structure.rows().enumerate() {
            for (col, &fillable) in cells.iter().enumerate() {
                if fillable {
                    out.push(letters[row][col].unwrap_or(' '));
                } else {
                    out.push(BLOCKED);
                }
            }
            out.push('\n');
        }

        out
    }

    /// The filled slots of `assignment` with their words, in variable order.
    #[must_use]
    pub fn entries(&self, assignment: &Assignment) -> Vec<(Variable, &str)> {
        assignment
            .iter()
            .map(|(var, word)| (self.variables[var], self.words.word(word)))
            .collect()
    }

    /// Whether `assignment` ranges over exactly this puzzle's slots, fills every
    /// one of them and satisfies every constraint.
    #[must_use]
    pub fn verify(&self, assignment: &Assignment) -> bool {
        assignment.num_variables() == self.num_variables()
            && assignment.is_complete()
            && assignment.is_consistent(self)
    }
}
