//! Row-scoped memo table.
//!
//! A [`Memo`] caches the value of every node evaluated while computing one
//! truth-table row, so shared sub-circuits are evaluated once per row. It is
//! indexed by node slot (see [`NodeGraph::slot`][crate::graph::NodeGraph::slot])
//! and must be replaced, or [cleared][Memo::clear], before the next row.
//!
//! Besides completed values, a slot can be marked *in progress* while the
//! node's inputs are being evaluated. Reaching an in-progress slot again means
//! the node depends on itself.

use crate::error::{Error, Result};
use crate::graph::NodeGraph;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done(bool),
}

#[derive(Debug, Clone)]
pub struct Memo {
    marks: Vec<Mark>,
    hits: usize,
    misses: usize,
}

impl Memo {
    /// Create an empty memo for `size` node slots.
    pub fn new(size: usize) -> Self {
        Self {
            marks: vec![Mark::Unvisited; size],
            hits: 0,
            misses: 0,
        }
    }

    /// Like [`new`][Memo::new], but reports a failed allocation as
    /// [`Error::Allocation`] instead of aborting.
    pub fn try_new(size: usize) -> Result<Self> {
        let mut marks = Vec::new();
        marks
            .try_reserve_exact(size)
            .map_err(|_| Error::Allocation { what: "memo table" })?;
        marks.resize(size, Mark::Unvisited);
        Ok(Self {
            marks,
            hits: 0,
            misses: 0,
        })
    }

    pub fn for_graph(graph: &NodeGraph) -> Self {
        Self::new(graph.len())
    }

    pub fn try_for_graph(graph: &NodeGraph) -> Result<Self> {
        Self::try_new(graph.len())
    }

    /// Get the number of lookups answered from the memo.
    pub fn hits(&self) -> usize {
        self.hits
    }
    /// Get the number of lookups that found no completed value.
    pub fn misses(&self) -> usize {
        self.misses
    }

    /// Number of slots holding a completed value.
    pub fn len(&self) -> usize {
        self.marks
            .iter()
            .filter(|mark| matches!(mark, Mark::Done(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget every value and mark; statistics are kept.
    pub fn clear(&mut self) {
        self.marks.fill(Mark::Unvisited);
    }

    /// Get the completed value of a slot.
    pub fn get(&mut self, slot: usize) -> Option<bool> {
        match self.marks[slot] {
            Mark::Done(value) => {
                self.hits += 1;
                Some(value)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn is_in_progress(&self, slot: usize) -> bool {
        self.marks[slot] == Mark::InProgress
    }

    /// Mark a slot as being evaluated.
    pub fn begin(&mut self, slot: usize) {
        self.marks[slot] = Mark::InProgress;
    }

    /// Store the completed value of a slot.
    pub fn insert(&mut self, slot: usize, value: bool) {
        self.marks[slot] = Mark::Done(value);
    }
}
