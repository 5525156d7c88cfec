#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Strategies for choosing which slot to fill next.

use crate::crossword::assignment::Assignment;
use crate::crossword::domain::Domains;
use crate::crossword::puzzle::Crossword;
use crate::crossword::variable::VarId;
use clap::ValueEnum;
use std::cmp::Reverse;
use std::fmt::{Debug, Display};

/// Chooses the next variable for the backtracking search to branch on.
pub trait VariableSelection: Debug + Clone {
    /// Creates a selector for `crossword`.
    fn new(crossword: &Crossword) -> Self;

    /// Chooses an unassigned variable, or `None` if every variable is assigned.
    fn pick(
        &mut self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId>;
}

/// Fewest remaining candidates first; ties go to the variable with the most
/// neighbours, then to the lowest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MinimumRemainingValues;

impl VariableSelection for MinimumRemainingValues {
    fn new(_: &Crossword) -> Self {
        Self
    }

    fn pick(
        &mut self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        assignment
            .unassigned()
            .min_by_key(|&var| (domains[var].len(), Reverse(crossword.degree(var))))
    }
}

/// Lowest unassigned id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn new(_: &Crossword) -> Self {
        Self
    }

    fn pick(&mut self, _: &Crossword, _: &Domains, assignment: &Assignment) -> Option<VarId> {
        assignment.unassigned().next()
    }
}

/// Uniformly random among the unassigned variables, reproducible from a seed.
#[derive(Debug, Clone)]
pub struct RandomOrder(fastrand::Rng);

impl RandomOrder {
    /// A random order that repeats for the same `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self(fastrand::Rng::with_seed(seed))
    }
}

impl VariableSelection for RandomOrder {
    fn new(_: &Crossword) -> Self {
        Self(fastrand::Rng::new())
    }

    fn pick(&mut self, _: &Crossword, _: &Domains, assignment: &Assignment) -> Option<VarId> {
        let unassigned: Vec<VarId> = assignment.unassigned().collect();
        if unassigned.is_empty() {
            return None;
        }
        Some(unassigned[self.0.usize(..unassigned.len())])
    }
}

/// Runtime dispatch over the selection strategies, used by
/// [`DynamicConfig`](crate::crossword::solver::DynamicConfig).
#[derive(Debug, Clone)]
pub enum VariableSelectionImpls {
    /// See [`MinimumRemainingValues`].
    MinimumRemainingValues(MinimumRemainingValues),
    /// See [`FixedOrder`].
    Fixed(FixedOrder),
    /// See [`RandomOrder`].
    Random(RandomOrder),
}

impl VariableSelection for VariableSelectionImpls {
    fn new(crossword: &Crossword) -> Self {
        Self::MinimumRemainingValues(MinimumRemainingValues::new(crossword))
    }

    fn pick(
        &mut self,
        crossword: &Crossword,
        domains: &Domains,
        assignment: &Assignment,
    ) -> Option<VarId> {
        match self {
            Self::MinimumRemainingValues(s) => s.pick(crossword, domains, assignment),
            Self::Fixed(s) => s.pick(crossword, domains, assignment),
            Self::Random(s) => s.pick(crossword, domains, assignment),
        }
    }
}

/// Command-line name of a variable selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum VariableSelectionType {
    /// Minimum remaining values, then highest degree.
    #[default]
    Mrv,
    /// Slot order as read from the grid.
    Fixed,
    /// Random, seeded with `--seed` when given.
    Random,
}

impl Display for VariableSelectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mrv => write!(f, "mrv"),
            Self::Fixed => write!(f, "fixed"),
            Self::Random => write!(f, "random"),
        }
    }
}

impl VariableSelectionType {
    /// Builds the named strategy. `seed` only affects [`Self::Random`].
    #[must_use]
    pub fn to_impl(self, crossword: &Crossword, seed: Option<u64>) -> VariableSelectionImpls {
        match self {
            Self::Mrv => {
                VariableSelectionImpls::MinimumRemainingValues(MinimumRemainingValues::new(crossword))
            }
            Self::Fixed => VariableSelectionImpls::Fixed(FixedOrder::new(crossword)),
            Self::Random => VariableSelectionImpls::Random(
                seed.map_or_else(|| RandomOrder::new(crossword), RandomOrder::with_seed),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::consistency::enforce_node_consistency;
    use crate::crossword::puzzle::tests::loop_crossword;

    fn setup() -> (Crossword, Domains) {
        let crossword = loop_crossword();
        let mut domains = Domains::new(&crossword);
        enforce_node_consistency(&crossword, &mut domains);
        (crossword, domains)
    }

    #[test]
    fn test_mrv_prefers_smallest_domain() {
        let (crossword, domains) = setup();
        let assignment = Assignment::new(crossword.num_variables());
        // Domain sizes: 4, 3, 3, 3. Variables 1 and 3 have degree 2, variable 2 has degree 1.
        let mut selector = MinimumRemainingValues::new(&crossword);
        assert_eq!(selector.pick(&crossword, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_mrv_breaks_ties_by_degree_then_order() {
        let (crossword, mut domains) = setup();
        let mut selector = MinimumRemainingValues::new(&crossword);

        // Shrink variable 2 (degree 1) so it strictly wins on remaining values.
        let first = domains[2].iter().next().unwrap();
        domains[2].restrict_to(first);
        let assignment = Assignment::new(crossword.num_variables());
        assert_eq!(selector.pick(&crossword, &domains, &assignment), Some(2));

        // With 2 assigned, 1 and 3 tie on size and degree; the lower id wins.
        let assignment = assignment.with(2, first);
        assert_eq!(selector.pick(&crossword, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_pick_none_when_complete() {
        let (crossword, domains) = setup();
        let mut assignment = Assignment::new(crossword.num_variables());
        for var in crossword.var_ids() {
            assignment.assign(var, 0);
        }
        assert_eq!(MinimumRemainingValues.pick(&crossword, &domains, &assignment), None);
        assert_eq!(FixedOrder.pick(&crossword, &domains, &assignment), None);
        assert_eq!(
            RandomOrder::with_seed(1).pick(&crossword, &domains, &assignment),
            None
        );
    }

    #[test]
    fn test_fixed_order() {
        let (crossword, domains) = setup();
        let assignment = Assignment::new(crossword.num_variables()).with(0, 0);
        assert_eq!(FixedOrder.pick(&crossword, &domains, &assignment), Some(1));
    }

    #[test]
    fn test_random_order_is_reproducible_and_unassigned() {
        let (crossword, domains) = setup();
        let assignment = Assignment::new(crossword.num_variables()).with(1, 0);

        let mut a = RandomOrder::with_seed(42);
        let mut b = RandomOrder::with_seed(42);
        for _ in 0..20 {
            let pa = a.pick(&crossword, &domains, &assignment);
            assert_eq!(pa, b.pick(&crossword, &domains, &assignment));
            assert_ne!(pa, Some(1));
            assert!(pa.is_some());
        }
    }

    #[test]
    fn test_type_to_impl() {
        let crossword = loop_crossword();
        assert!(matches!(
            VariableSelectionType::Mrv.to_impl(&crossword, None),
            VariableSelectionImpls::MinimumRemainingValues(_)
        ));
        assert!(matches!(
            VariableSelectionType::Random.to_impl(&crossword, Some(7)),
            VariableSelectionImpls::Random(_)
        ));
        assert_eq!(VariableSelectionType::Fixed.to_string(), "fixed");
    }
}
