#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Worklists of arcs awaiting revision by AC-3.

use crate::crossword::puzzle::Arc;
use clap::ValueEnum;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::fmt::{Debug, Display};

/// Pending arcs for AC-3.
///
/// Implementations have set semantics: pushing an arc that is already waiting
/// is a no-op. The order arcs come out in only affects how many revisions AC-3
/// performs, never its result.
pub trait Worklist: Debug + Clone {
    /// An empty worklist.
    fn new() -> Self;

    /// Adds `arc` unless it is already pending.
    fn push(&mut self, arc: Arc);

    /// Removes the next arc according to the discipline.
    fn pop(&mut self) -> Option<Arc>;

    /// Number of pending arcs.
    fn len(&self) -> usize;

    /// Whether no arcs are pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pushes every arc of `arcs` in iteration order.
    fn extend<I: IntoIterator<Item = Arc>>(&mut self, arcs: I) {
        for arc in arcs {
            self.push(arc);
        }
    }

    /// Drops every pending arc.
    fn clear(&mut self) {
        while self.pop().is_some() {}
    }
}

/// First in, first out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcQueue {
    queue: VecDeque<Arc>,
    pending: FxHashSet<Arc>,
}

impl Worklist for ArcQueue {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Last in, first out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArcStack {
    stack: Vec<Arc>,
    pending: FxHashSet<Arc>,
}

impl Worklist for ArcStack {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, arc: Arc) {
        if self.pending.insert(arc) {
            self.stack.push(arc);
        }
    }

    fn pop(&mut self) -> Option<Arc> {
        let arc = self.stack.pop()?;
        self.pending.remove(&arc);
        Some(arc)
    }

    fn len(&self) -> usize {
        self.stack.len()
    }
}

/// Runtime choice between worklist disciplines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorklistImpls {
    /// See [`ArcQueue`].
    Queue(ArcQueue),
    /// See [`ArcStack`].
    Stack(ArcStack),
}

impl Default for WorklistImpls {
    fn default() -> Self {
        Self::Queue(ArcQueue::default())
    }
}

impl Worklist for WorklistImpls {
    fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, arc: Arc) {
        match self {
            Self::Queue(q) => q.push(arc),
            Self::Stack(s) => s.push(arc),
        }
    }

    fn pop(&mut self) -> Option<Arc> {
        match self {
            Self::Queue(q) => q.pop(),
            Self::Stack(s) => s.pop(),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Queue(q) => q.len(),
            Self::Stack(s) => s.len(),
        }
    }
}

/// Command-line name of a worklist discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, ValueEnum)]
pub enum WorklistType {
    /// First in, first out.
    #[default]
    Queue,
    /// Last in, first out.
    Stack,
}

impl Display for WorklistType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queue => write!(f, "queue"),
            Self::Stack => write!(f, "stack"),
        }
    }
}

impl WorklistType {
    /// Builds an empty worklist of this discipline.
    #[must_use]
    pub fn to_impl(self) -> WorklistImpls {
        match self {
            Self::Queue => WorklistImpls::Queue(ArcQueue::new()),
            Self::Stack => WorklistImpls::Stack(ArcStack::new()),
        }
    }
}
