#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Live candidate sets for every variable.
//!
//! Each [`Domain`] is a bit set over the whole word list, so removing a word is
//! a single bit flip and cloning a branch snapshot is a handful of word copies.
//! Domains only ever shrink.

use crate::crossword::puzzle::Crossword;
use crate::crossword::variable::VarId;
use crate::crossword::words::WordId;
use bit_vec::BitVec;
use std::ops::{Index, IndexMut};

/// The words still possible for one variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domain {
    words: BitVec,
    len: usize,
}

impl Domain {
    /// A domain holding every one of `num_words` words.
    #[must_use]
    pub fn full(num_words: usize) -> Self {
        Self {
            words: BitVec::from_elem(num_words, true),
            len: num_words,
        }
    }

    /// Number of words left.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether every candidate has been removed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `word` is still a candidate.
    #[must_use]
    pub fn contains(&self, word: WordId) -> bool {
        self.words.get(word).unwrap_or(false)
    }

    /// Removes `word`, returning whether it was present.
    pub fn remove(&mut self, word: WordId) -> bool {
        if self.contains(word) {
            self.words.set(word, false);
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Removes every word for which `keep` returns false; returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(WordId) -> bool) -> usize {
        let doomed: Vec<WordId> = self.iter().filter(|&w| !keep(w)).collect();
        for &word in &doomed {
            self.remove(word);
        }
        doomed.len()
    }

    /// Shrinks the domain to `{word}`, or to nothing if `word` was not in it.
    pub fn restrict_to(&mut self, word: WordId) {
        let present = self.contains(word);
        self.words = BitVec::from_elem(self.words.len(), false);
        if present {
            self.words.set(word, true);
            self.len = 1;
        } else {
            self.len = 0;
        }
    }

    /// Word ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.words
            .iter()
            .enumerate()
            .filter_map(|(word, present)| present.then_some(word))
    }
}

/// The domain of every variable in a puzzle, indexed by `VarId`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Domains(Vec<Domain>);

impl Index<VarId> for Domains {
    type Output = Domain;

    fn index(&self, index: VarId) -> &Self::Output {
        &self.0[index]
    }
}

impl IndexMut<VarId> for Domains {
    fn index_mut(&mut self, index: VarId) -> &mut Self::Output {
        &mut self.0[index]
    }
}

impl Domains {
    /// Every variable starts with the full word list.
    #[must_use]
    pub fn new(crossword: &Crossword) -> Self {
        let num_words = crossword.words().len();
        Self(vec![Domain::full(num_words); crossword.num_variables()])
    }

    /// Number of variables.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no variables at all. See [`Self::any_empty`] for wiped-out domains.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether any variable has run out of candidates.
    #[must_use]
    pub fn any_empty(&self) -> bool {
        self.0.iter().any(Domain::is_empty)
    }

    /// Total number of candidates across all variables.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.0.iter().map(Domain::len).sum()
    }

    /// `(variable, domain)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, &Domain)> {
        self.0.iter().enumerate()
    }
}
