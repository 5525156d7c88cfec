#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial assignments of words to slots.

use crate::crossword::puzzle::Crossword;
use crate::crossword::variable::VarId;
use crate::crossword::words::WordId;
use core::ops::Index;
use rustc_hash::FxHashSet;

/// A partial map from variables to words, indexed by `VarId`.
///
/// Cloned for every trial branch during search so siblings never alias.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Assignment {
    slots: Vec<Option<WordId>>,
    assigned: usize,
}

impl Index<VarId> for Assignment {
    type Output = Option<WordId>;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.slots[index]
    }
}

impl Assignment {
    /// An empty assignment over `n` variables.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            slots: vec![None; n],
            assigned: 0,
        }
    }

    /// Sets `var = word`, replacing any previous word.
    pub fn assign(&mut self, var: VarId, word: WordId) {
        if self.slots[var].replace(word).is_none() {
            self.assigned += 1;
        }
    }

    /// Clears `var`. Unassigned variables are left as they are.
    pub fn unassign(&mut self, var: VarId) {
        if self.slots[var].take().is_some() {
            self.assigned -= 1;
        }
    }

    /// A copy of this assignment extended with `var = word`.
    #[must_use]
    pub fn with(&self, var: VarId, word: WordId) -> Self {
        let mut next = self.clone();
        next.assign(var, word);
        next
    }

    /// The word given to `var`, if any. Out-of-range ids read as unassigned.
    #[must_use]
    pub fn get(&self, var: VarId) -> Option<WordId> {
        self.slots.get(var).copied().flatten()
    }

    /// Whether `var` has a word.
    #[must_use]
    pub fn is_assigned(&self, var: VarId) -> bool {
        self.get(var).is_some()
    }

    /// Number of assigned variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.assigned
    }

    /// Whether no variable is assigned.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assigned == 0
    }

    /// Number of variables this assignment ranges over.
    #[must_use]
    pub const fn num_variables(&self) -> usize {
        self.slots.len()
    }

    /// Whether every variable this assignment ranges over has a word.
    ///
    /// Says nothing about whether that matches a puzzle; see
    /// [`Crossword::verify`].
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.assigned == self.slots.len()
    }

    /// Assigned `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, WordId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.map(|w| (var, w)))
    }

    /// Variables without a word, ascending.
    pub fn unassigned(&self) -> impl Iterator<Item = VarId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(var, word)| word.is_none().then_some(var))
    }

    /// Checks every constraint among the assigned variables: each word has its
    /// slot's length, crossing slots agree on the shared letter, and no word is
    /// used twice.
    #[must_use]
    pub fn is_consistent(&self, crossword: &Crossword) -> bool {
        let words = crossword.words();

        for (var, word) in self.iter() {
            if words.word_len(word) != crossword.variable(var).length {
                return false;
            }

            for &neighbor in crossword.neighbors(var) {
                let Some(other) = self.get(neighbor) else {
                    continue;
                };
                let Some((i, j)) = crossword.overlap(var, neighbor) else {
                    continue;
                };
                if words.letter(word, i) != words.letter(other, j) {
                    return false;
                }
            }
        }

        let mut seen = FxHashSet::default();
        self.iter().all(|(_, word)| seen.insert(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::puzzle::tests::{CROSS_STRUCTURE, loop_crossword};
    use itertools::Itertools;

    fn word(crossword: &Crossword, text: &str) -> WordId {
        crossword.words().id_of(text).unwrap()
    }

    #[test]
    fn test_assign_and_unassign() {
        let mut assignment = Assignment::new(3);
        assert!(assignment.is_empty());

        assignment.assign(1, 7);
        assignment.assign(1, 8);
        assert_eq!(assignment.len(), 1);
        assert_eq!(assignment[1], Some(8));
        assert_eq!(assignment.unassigned().collect_vec(), vec![0, 2]);

        assignment.unassign(1);
        assignment.unassign(1);
        assert!(assignment.is_empty());
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let base = Assignment::new(2);
        let next = base.with(0, 3);
        assert!(base.is_empty());
        assert_eq!(next.get(0), Some(3));
        assert!(!next.is_complete());
        assert!(next.with(1, 4).is_complete());
    }

    #[test]
    fn test_consistent_fill() {
        let crossword = loop_crossword();
        let mut assignment = Assignment::new(crossword.num_variables());
        for (var, text) in [(0, "SIX"), (1, "SEVEN"), (2, "FIVE"), (3, "NINE")] {
            assignment.assign(var, word(&crossword, text));
        }
        assert!(assignment.is_consistent(&crossword));
        assert!(crossword.verify(&assignment));
    }

    #[test]
    fn test_wrong_length_is_inconsistent() {
        let crossword = loop_crossword();
        let mut assignment = Assignment::new(crossword.num_variables());
        assignment.assign(0, word(&crossword, "SEVEN"));
        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_overlap_conflict_is_inconsistent() {
        let crossword = loop_crossword();
        let mut assignment = Assignment::new(crossword.num_variables());
        assignment.assign(0, word(&crossword, "TWO"));
        assignment.assign(1, word(&crossword, "SEVEN"));
        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_duplicate_word_is_inconsistent() {
        let crossword = Crossword::parse(CROSS_STRUCTURE, "cat\n").unwrap();
        let cat = word(&crossword, "CAT");
        let assignment = Assignment::new(2).with(0, cat).with(1, cat);
        assert!(!assignment.is_consistent(&crossword));
    }

    #[test]
    fn test_partial_assignment_is_not_verified() {
        let crossword = loop_crossword();
        let assignment = Assignment::new(crossword.num_variables()).with(0, word(&crossword, "SIX"));
        assert!(assignment.is_consistent(&crossword));
        assert!(!crossword.verify(&assignment));
    }
}
