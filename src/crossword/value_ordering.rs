#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for ordering the candidate words of the chosen slot.

use crate::crossword::assignment::Assignment;
use crate::crossword::domain::Domains;
use crate::crossword::puzzle::Crossword;
use crate::crossword::variable::VarId;
use crate::crossword::words::WordId;
use clap::ValueEnum;
use std::fmt::{Debug, Display};

/// Orders the candidate words tried for a slot during search.
pub trait ValueOrdering: Debug + Clone {
    /// Creates an ordering for `crossword`.
    fn new(crossword: &Crossword) -> Self;

    /// The words of `domains[var]` in the order they should be tried.
    fn order(
        &self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
        var: VarId,
    ) -> Vec<WordId>;
}

/// How many candidates of `var`'s unassigned neighbours would be ruled out by
/// giving `var` the word `word`.
///
/// A neighbour candidate counts if it disagrees with `word` in the shared cell,
/// or if it is `word` itself, since the same word cannot fill two slots.
#[must_use]
pub fn elimination_count(
    crossword: &Crossword,
    domains: &Domains,
    assignment: &Assignment,
    var: VarId,
    word: WordId,
) -> usize {
    let words = crossword.words();

    crossword
        .neighbors(var)
        .iter()
        .filter(|&&neighbor| !assignment.is_assigned(neighbor))
        .filter_map(|&neighbor| {
            crossword
                .overlap(var, neighbor)
                .map(|overlap| (neighbor, overlap))
        })
        .map(|(neighbor, (i, j))| {
            domains[neighbor]
                .iter()
                .filter(|&other| other == word || words.letter(word, i) != words.letter(other, j))
                .count()
        })
        .sum()
}

/// Least-constraining value first; ties keep domain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeastConstrainingValue;

impl ValueOrdering for LeastConstrainingValue {
    fn new(_: &Crossword) -> Self {
        Self
    }

    fn order(
        &self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
        var: VarId,
    ) -> Vec<WordId> {
        let mut candidates: Vec<WordId> = domains[var].iter().collect();
        if candidates.len() <= 1 {
            return candidates;
        }

        candidates.sort_by_cached_key(|&word| {
            elimination_count(crossword, domains, assignment, var, word)
        });
        candidates
    }
}

/// Words in domain order, which is alphabetical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainOrder;

impl ValueOrdering for DomainOrder {
    fn new(_: &Crossword) -> Self {
        Self
    }

    fn order(&self, _: &Crossword, domains: &Domains, _: &Assignment, var: VarId) -> Vec<WordId> {
        domains[var].iter().collect()
    }
}

/// Runtime dispatch over the value orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueOrderingImpls {
    /// See [`LeastConstrainingValue`].
    LeastConstraining(LeastConstrainingValue),
    /// See [`DomainOrder`].
    Domain(DomainOrder),
}

impl ValueOrdering for ValueOrderingImpls {
    fn new(crossword: &Crossword) -> Self {
        Self::LeastConstraining(LeastConstrainingValue::new(crossword))
    }

    fn order(
        &self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
        var: VarId,
    ) -> Vec<WordId> {
        match self {
            Self::LeastConstraining(o) => o.order(crossword, domains, assignment, var),
            Self::Domain(o) => o.order(crossword, domains, assignment, var),
        }
    }
}

/// Command-line name of a value ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum ValueOrderingType {
    /// Least-constraining value first.
    #[default]
    Lcv,
    /// Alphabetical.
    Domain,
}

impl Display for ValueOrderingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lcv => write!(f, "lcv"),
            Self::Domain => write!(f, "domain"),
        }
    }
}

impl ValueOrderingType {
    /// Builds the named ordering.
    #[must_use]
    pub fn to_impl(self, crossword: &Crossword) -> ValueOrderingImpls {
        match self {
            Self::Lcv => ValueOrderingImpls::LeastConstraining(LeastConstrainingValue::new(crossword)),
            Self::Domain => ValueOrderingImpls::Domain(DomainOrder::new(crossword)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::consistency::enforce_node_consistency;
    use crate::crossword::puzzle::tests::CROSS_STRUCTURE;

    fn setup(words: &str) -> (Crossword, Domains) {
        let crossword = Crossword::parse(CROSS_STRUCTURE, words).unwrap();
        let mut domains = Domains::new(&crossword);
        enforce_node_consistency(&crossword, &mut domains);
        (crossword, domains)
    }

    fn id(crossword: &Crossword, word: &str) -> WordId {
        crossword.words().id_of(word).unwrap()
    }

    #[test]
    fn test_elimination_counts_conflicts() {
        // Middle letters: BAT -> A, CAT -> A, DOG -> O.
        let (crossword, domains) = setup("bat\ncat\ndog\n");
        let assignment = Assignment::new(2);

        // BAT rules out itself and DOG in the crossing slot.
        assert_eq!(elimination_count(&crossword, &domains, &assignment, 0, id(&crossword, "BAT")), 2);
        // DOG rules out itself (duplicate) and both A-words (conflict).
        assert_eq!(elimination_count(&crossword, &domains, &assignment, 0, id(&crossword, "DOG")), 3);
    }

    #[test]
    fn test_duplicate_counts_even_when_letters_agree() {
        let (crossword, domains) = setup("cat\n");
        let assignment = Assignment::new(2);
        assert_eq!(elimination_count(&crossword, &domains, &assignment, 0, id(&crossword, "CAT")), 1);
    }

    #[test]
    fn test_assigned_neighbors_are_ignored() {
        let (crossword, domains) = setup("bat\ncat\ndog\n");
        let assignment = Assignment::new(2).with(1, id(&crossword, "CAT"));
        assert_eq!(elimination_count(&crossword, &domains, &assignment, 0, id(&crossword, "DOG")), 0);
    }

    #[test]
    fn test_lcv_orders_ascending_and_stable() {
        let (crossword, domains) = setup("bat\ncat\ndog\n");
        let assignment = Assignment::new(2);
        let order = LeastConstrainingValue.order(&crossword, &domains, &assignment, 0);
        let words: Vec<&str> = order.iter().map(|&w| crossword.words().word(w)).collect();
        assert_eq!(words, vec!["BAT", "CAT", "DOG"]);
    }

    #[test]
    fn test_lcv_singleton_domain_is_returned_as_is() {
        let (crossword, mut domains) = setup("bat\ncat\ndog\n");
        let dog = id(&crossword, "DOG");
        domains[0].restrict_to(dog);
        let assignment = Assignment::new(2);
        assert_eq!(LeastConstrainingValue.order(&crossword, &domains, &assignment, 0), vec![dog]);
    }

    #[test]
    fn test_domain_order() {
        let (crossword, domains) = setup("dog\ncat\n");
        let assignment = Assignment::new(2);
        let order = DomainOrder.order(&crossword, &domains, &assignment, 1);
        assert_eq!(order, vec![id(&crossword, "CAT"), id(&crossword, "DOG")]);
    }

    #[test]
    fn test_type_to_impl() {
        let (crossword, _) = setup("cat\n");
        assert_eq!(
            ValueOrderingType::Domain.to_impl(&crossword),
            ValueOrderingImpls::Domain(DomainOrder)
        );
        assert_eq!(ValueOrderingType::default().to_string(), "lcv");
    }
}
