#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The crossword CSP solver.
//!
//! Solving runs in three phases:
//! 1.  **Node consistency:** every domain is cut down to the words whose length
//!     matches the slot.
//! 2.  **Arc consistency:** AC-3 prunes words with no compatible crossing word.
//!     If a domain empties here the puzzle has no fill and search never starts.
//! 3.  **Backtracking:** depth-first search over partial assignments. Each level
//!     picks a slot with the configured [`VariableSelection`], tries its words in
//!     the order given by the configured [`ValueOrdering`], and recurses on a
//!     copy of the assignment for every consistent word. The first complete
//!     assignment found is returned.
//!
//! With inference enabled, every trial also narrows a copy of the domains to the
//! chosen word and re-runs AC-3 from the arcs pointing at the filled slot, so the
//! deeper levels see the pruned copy while sibling trials keep the original.
//!
//! The solver is generic over a [`SolverConfig`], which fixes the heuristics at
//! compile time; [`DynamicConfig`] swaps them for enum dispatchers so they can be
//! chosen at runtime.

use crate::crossword::assignment::Assignment;
use crate::crossword::consistency::{self, ArcConsistency, PropagationStats};
use crate::crossword::domain::Domains;
use crate::crossword::puzzle::{Arc, Crossword};
use crate::crossword::value_ordering::{LeastConstrainingValue, ValueOrdering, ValueOrderingImpls};
use crate::crossword::variable::VarId;
use crate::crossword::variable_selection::{
    MinimumRemainingValues, VariableSelection, VariableSelectionImpls,
};
use crate::crossword::words::WordId;
use crate::crossword::worklist::{ArcQueue, Worklist, WorklistImpls};
use log::{debug, trace};
use std::fmt::Debug;

/// Compile-time choice of the solver's strategies.
pub trait SolverConfig: Debug + Clone {
    /// Picks the next slot to fill.
    type VariableSelector: VariableSelection;
    /// Orders the words tried for that slot.
    type ValueOrder: ValueOrdering;
    /// Worklist used by arc consistency.
    type Worklist: Worklist;
}

/// Minimum remaining values, least-constraining value, FIFO arc queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MinimumRemainingValues;
    type ValueOrder = LeastConstrainingValue;
    type Worklist = ArcQueue;
}

/// Strategies picked at runtime, e.g. from command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DynamicConfig;

impl SolverConfig for DynamicConfig {
    type VariableSelector = VariableSelectionImpls;
    type ValueOrder = ValueOrderingImpls;
    type Worklist = WorklistImpls;
}

/// Counters describing a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    /// `revise` calls made by arc consistency, including during inference.
    pub revisions: usize,
    /// Words removed by arc consistency.
    pub removals: usize,
    /// Backtracking calls.
    pub nodes: usize,
    /// Words tried as a trial assignment.
    pub candidates: usize,
    /// Trial assignments rejected by the consistency check.
    pub inconsistent: usize,
    /// Backtracking calls that exhausted their candidates.
    pub backtracks: usize,
    /// Trial assignments rejected because inference emptied a domain.
    pub inference_failures: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SearchCounters {
    nodes: usize,
    candidates: usize,
    inconsistent: usize,
    backtracks: usize,
    inference_failures: usize,
}

/// Backtracking crossword solver with pluggable heuristics.
///
/// Owns the live domains; the [`Crossword`] itself is only borrowed.
#[derive(Debug, Clone)]
pub struct Solver<'a, Config: SolverConfig = DefaultConfig> {
    crossword: &'a Crossword,
    domains: Domains,
    selector: Config::VariableSelector,
    ordering: Config::ValueOrder,
    propagator: ArcConsistency<Config::Worklist>,
    inference: bool,
    counters: SearchCounters,
}

impl<'a, Config: SolverConfig> Solver<'a, Config> {
    /// A solver whose domains all start as the full word list.
    #[must_use]
    pub fn new(crossword: &'a Crossword) -> Self {
        Self::from_parts(
            crossword,
            Config::VariableSelector::new(crossword),
            Config::ValueOrder::new(crossword),
            Config::Worklist::new(),
        )
    }

    /// A solver using the given strategy instances, for configurations whose
    /// strategies are chosen at runtime.
    #[must_use]
    pub fn from_parts(
        crossword: &'a Crossword,
        selector: Config::VariableSelector,
        ordering: Config::ValueOrder,
        worklist: Config::Worklist,
    ) -> Self {
        Self {
            crossword,
            domains: Domains::new(crossword),
            selector,
            ordering,
            propagator: ArcConsistency::with_worklist(worklist),
            inference: false,
            counters: SearchCounters::default(),
        }
    }

    /// Enables or disables arc consistency after every trial assignment.
    #[must_use]
    pub const fn with_inference(mut self, inference: bool) -> Self {
        self.inference = inference;
        self
    }

    /// The puzzle being solved.
    #[must_use]
    pub const fn crossword(&self) -> &'a Crossword {
        self.crossword
    }

    /// The current domains, as left by the last consistency pass.
    #[must_use]
    pub const fn domains(&self) -> &Domains {
        &self.domains
    }

    /// Statistics gathered so far.
    #[must_use]
    pub const fn stats(&self) -> SolutionStats {
        let PropagationStats {
            revisions,
            removals,
            ..
        } = self.propagator.stats();

        SolutionStats {
            revisions,
            removals,
            nodes: self.counters.nodes,
            candidates: self.counters.candidates,
            inconsistent: self.counters.inconsistent,
            backtracks: self.counters.backtracks,
            inference_failures: self.counters.inference_failures,
        }
    }

    /// Cuts every domain down to words of the slot's length.
    pub fn enforce_node_consistency(&mut self) {
        consistency::enforce_node_consistency(self.crossword, &mut self.domains);
    }

    /// Runs AC-3 over the solver's domains; `false` means some domain is empty.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> bool {
        self.propagator.ac3(self.crossword, &mut self.domains, arcs)
    }

    /// Enforces node and arc consistency, then searches.
    ///
    /// Returns a complete, consistent assignment, or `None` if the puzzle has no
    /// fill. An empty domain after arc consistency returns `None` without
    /// searching.
    pub fn solve(&mut self) -> Option<Assignment> {
        self.enforce_node_consistency();

        if !self.ac3(None) {
            debug!("Arc consistency failed, skipping search");
            return None;
        }

        let solution = self.backtrack(Assignment::new(self.crossword.num_variables()));
        debug!("Search finished: {:?}", self.stats());
        solution
    }

    /// Backtracking search from `assignment` over the solver's current domains.
    ///
    /// Returns `None` if `assignment` does not range over exactly the puzzle's
    /// variables.
    pub fn backtrack(&mut self, assignment: Assignment) -> Option<Assignment> {
        if assignment.num_variables() != self.crossword.num_variables() {
            debug!(
                "Assignment over {} variables does not fit a puzzle with {}",
                assignment.num_variables(),
                self.crossword.num_variables()
            );
            return None;
        }

        let domains = std::mem::take(&mut self.domains);
        let result = self.search(assignment, &domains);
        self.domains = domains;
        result
    }

    fn search(&mut self, assignment: Assignment, domains: &Domains) -> Option<Assignment> {
        self.counters.nodes += 1;

        if assignment.is_complete() {
            return Some(assignment);
        }

        let var = self.selector.pick(self.crossword, domains, &assignment)?;
        let candidates = self
            .ordering
            .order(self.crossword, domains, &assignment, var);

        for word in candidates {
            self.counters.candidates += 1;
            trace!(
                "Trying {} for {} at depth {}",
                self.crossword.words().word(word),
                self.crossword.variable(var),
                assignment.len()
            );

            let trial = assignment.with(var, word);
            if !trial.is_consistent(self.crossword) {
                self.counters.inconsistent += 1;
                continue;
            }

            let result = if self.inference {
                let Some(branch) = self.infer(domains, var, word) else {
                    self.counters.inference_failures += 1;
                    continue;
                };
                self.search(trial, &branch)
            } else {
                self.search(trial, domains)
            };

            if result.is_some() {
                return result;
            }
        }

        self.counters.backtracks += 1;
        None
    }

    /// A copy of `domains` with `var` fixed to `word` and arc consistency restored,
    /// or `None` if that empties a domain.
    fn infer(&mut self, domains: &Domains, var: VarId, word: WordId) -> Option<Domains> {
        let mut branch = domains.clone();
        branch[var].restrict_to(word);

        let arcs = self
            .crossword
            .neighbors(var)
            .iter()
            .map(|&neighbor| (neighbor, var))
            .collect();

        self.propagator
            .ac3(self.crossword, &mut branch, Some(arcs))
            .then_some(branch)
    }
}
