#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Domain pruning before and during search.
//!
//! Node consistency drops every word whose length does not fit its slot. Arc
//! consistency (AC-3) then repeatedly revises ordered pairs of crossing slots,
//! dropping any word that has no partner in the neighbour's domain with the
//! same letter in the shared cell, until nothing changes or a domain empties.

use crate::crossword::domain::Domains;
use crate::crossword::puzzle::{Arc, Crossword};
use crate::crossword::variable::VarId;
use crate::crossword::worklist::{ArcQueue, Worklist};
use log::{debug, trace};
use rustc_hash::FxHashSet;

/// Counters accumulated by an [`ArcConsistency`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PropagationStats {
    /// Number of `revise` calls.
    pub revisions: usize,
    /// Number of words removed by revisions.
    pub removals: usize,
    /// Number of `ac3` runs that ended with an empty domain.
    pub wipeouts: usize,
}

/// Removes from every domain the words whose length differs from the variable's.
///
/// Idempotent, and never removes a word of the right length.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) {
    let words = crossword.words();
    let mut removed = 0;

    for var in crossword.var_ids() {
        let length = crossword.variable(var).length;
        removed += domains[var].retain(|word| words.word_len(word) == length);
    }

    debug!(
        "Node consistency removed {removed} candidates, {} remain",
        domains.total_size()
    );
}

/// Makes `x` arc consistent with `y`, returning how many words were removed from `x`.
fn revise_count(crossword: &Crossword, domains: &mut Domains, x: VarId, y: VarId) -> usize {
    let Some((i, j)) = crossword.overlap(x, y) else {
        return 0;
    };
    let words = crossword.words();

    let supported: FxHashSet<char> = domains[y]
        .iter()
        .filter_map(|word| words.letter(word, j))
        .collect();

    domains[x].retain(|word| {
        words
            .letter(word, i)
            .is_some_and(|letter| supported.contains(&letter))
    })
}

/// Removes from `domains[x]` every word with no compatible word in `domains[y]`.
///
/// Returns whether anything was removed. Variables that do not cross are left alone.
pub fn revise(crossword: &Crossword, domains: &mut Domains, x: VarId, y: VarId) -> bool {
    revise_count(crossword, domains, x, y) > 0
}

/// Runs AC-3 with a fresh FIFO worklist. See [`ArcConsistency::ac3`].
pub fn ac3(crossword: &Crossword, domains: &mut Domains, arcs: Option<Vec<Arc>>) -> bool {
    ArcConsistency::<ArcQueue>::new().ac3(crossword, domains, arcs)
}

/// An AC-3 engine that keeps its worklist allocation and statistics across runs.
#[derive(Debug, Clone, Default)]
pub struct ArcConsistency<W: Worklist = ArcQueue> {
    worklist: W,
    stats: PropagationStats,
}

impl<W: Worklist> ArcConsistency<W> {
    /// An engine with an empty worklist of type `W`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_worklist(W::new())
    }

    /// An engine that drains `worklist`.
    #[must_use]
    pub fn with_worklist(worklist: W) -> Self {
        Self {
            worklist,
            stats: PropagationStats::default(),
        }
    }

    /// Counters accumulated since construction.
    #[must_use]
    pub const fn stats(&self) -> PropagationStats {
        self.stats
    }

    /// Counted version of [`revise`].
    pub fn revise(&mut self, crossword: &Crossword, domains: &mut Domains, x: VarId, y: VarId) -> bool {
        let removed = revise_count(crossword, domains, x, y);
        self.stats.revisions += 1;
        self.stats.removals += removed;
        removed > 0
    }

    /// Enforces arc consistency over `domains`.
    ///
    /// Starts from `arcs`, or from every ordered pair of neighbours when `None`.
    /// Whenever revising `(x, y)` shrinks `x`, every arc `(n, x)` with `n != y` is
    /// queued again. Returns `false` as soon as any domain is found empty, and
    /// otherwise `true` once the worklist drains with every domain non-empty.
    pub fn ac3(
        &mut self,
        crossword: &Crossword,
        domains: &mut Domains,
        arcs: Option<Vec<Arc>>,
    ) -> bool {
        self.worklist.clear();
        self.worklist
            .extend(arcs.unwrap_or_else(|| crossword.arcs().collect()));

        while let Some((x, y)) = self.worklist.pop() {
            if domains[x].is_empty() || domains[y].is_empty() {
                return self.wipeout(x);
            }

            let removed = revise_count(crossword, domains, x, y);
            self.stats.revisions += 1;
            if removed == 0 {
                continue;
            }

            self.stats.removals += removed;
            trace!("Revised ({x}, {y}): removed {removed}, {} left", domains[x].len());

            if domains[x].is_empty() {
                return self.wipeout(x);
            }

            for &neighbor in crossword.neighbors(x) {
                if neighbor != y {
                    self.worklist.push((neighbor, x));
                }
            }
        }

        if let Some((var, _)) = domains.iter().find(|(_, d)| d.is_empty()) {
            return self.wipeout(var);
        }

        debug!("Arc consistency holds, {} candidates remain", domains.total_size());
        true
    }

    fn wipeout(&mut self, var: VarId) -> bool {
        self.worklist.clear();
        self.stats.wipeouts += 1;
        debug!("Arc consistency emptied the domain of variable {var}");
        false
    }
}
