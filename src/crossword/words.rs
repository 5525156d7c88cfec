#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The candidate vocabulary.
//!
//! Words are trimmed, upper-cased and de-duplicated, then stored in sorted order
//! so that every `WordId` (an index into the list) is stable for a given input.
//! Letters are kept pre-split so overlap checks index characters, not bytes.

use crate::error::{CrosswordError, Result};
use itertools::Itertools;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::ops::Index;
use std::path::Path;

/// Index of a word in a [`WordList`].
pub type WordId = usize;

type Letters = SmallVec<[char; 16]>;

/// The deduplicated, sorted word list a puzzle is filled from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordList {
    words: Vec<String>,
    letters: Vec<Letters>,
    by_length: FxHashMap<usize, Vec<WordId>>,
}

impl WordList {
    /// Builds a word list from any iterator of strings.
    #[must_use]
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .sorted()
            .dedup()
            .collect_vec();

        let letters: Vec<Letters> = words.iter().map(|w| w.chars().collect()).collect();

        let mut by_length: FxHashMap<usize, Vec<WordId>> = FxHashMap::default();
        for (id, word) in letters.iter().enumerate() {
            by_length.entry(word.len()).or_default().push(id);
        }

        Self {
            words,
            letters,
            by_length,
        }
    }

    /// Parses a newline-separated word list.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    /// Reads a newline-separated word list from disk.
    ///
    /// # Errors
    ///
    /// `CrosswordError::Io` if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CrosswordError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// Number of distinct words.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list has no words.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The normalised text of word `id`.
    #[must_use]
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    /// Length of a word in characters.
    #[must_use]
    pub fn word_len(&self, id: WordId) -> usize {
        self.letters[id].len()
    }

    /// The character at `offset` in word `id`, if the word is long enough.
    #[must_use]
    pub fn letter(&self, id: WordId, offset: usize) -> Option<char> {
        self.letters[id].get(offset).copied()
    }

    /// Ids of every word of exactly `length` characters, in sorted word order.
    #[must_use]
    pub fn with_length(&self, length: usize) -> &[WordId] {
        self.by_length.get(&length).map_or(&[][..], Vec::as_slice)
    }

    /// Every distinct word length present, ascending.
    pub fn lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_length.keys().copied().sorted()
    }

    /// Id of `word`, which must already be upper-cased.
    #[must_use]
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.words.binary_search_by(|w| w.as_str().cmp(word)).ok()
    }

    /// `(id, word)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (WordId, &str)> {
        self.words.iter().map(String::as_str).enumerate()
    }
}

impl Index<WordId> for WordList {
    type Output = str;

    fn index(&self, index: WordId) -> &Self::Output {
        &self.words[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalises_words() {
        let words = WordList::parse("cat\n  Dog \n\nCAT\nape\n");
        assert_eq!(words.len(), 3);
        assert_eq!(words.iter().map(|(_, w)| w).collect_vec(), vec!["APE", "CAT", "DOG"]);
    }

    #[test]
    fn test_partition_by_length() {
        let words = WordList::new(["one", "three", "two", "four"]);
        let three: Vec<&str> = words.with_length(3).iter().map(|&id| &words[id]).collect();
        assert_eq!(three, vec!["ONE", "TWO"]);
        assert_eq!(words.with_length(4).len(), 1);
        assert_eq!(words.with_length(5).len(), 1);
        assert!(words.with_length(7).is_empty());
        assert_eq!(words.lengths().collect_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_letters_are_characters() {
        let words = WordList::new(["café"]);
        let id = words.id_of("CAFÉ").unwrap();
        assert_eq!(words.word_len(id), 4);
        assert_eq!(words.letter(id, 3), Some('É'));
        assert_eq!(words.letter(id, 4), None);
    }

    #[test]
    fn test_id_of() {
        let words = WordList::new(["b", "a", "c"]);
        assert_eq!(words.id_of("A"), Some(0));
        assert_eq!(words.id_of("C"), Some(2));
        assert_eq!(words.id_of("D"), None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();
        let words = WordList::from_file(&path).unwrap();
        assert_eq!(words.len(), 2);
    }
}
