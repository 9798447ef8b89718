// src/formatting/state.rs
//! Numbered-list state scoped by nesting depth.
//!
//! One `ListCounters` lives for exactly one page visit. It is threaded by
//! mutable reference through the page's block recursion, so nested
//! children share it with their parents while each page root starts a
//! fresh one.

use std::collections::HashMap;

/// Maps nesting depth to the number the next numbered item there receives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCounters {
    next: HashMap<usize, usize>,
}

impl ListCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number for a numbered item at `depth` and advances it.
    pub fn take_next(&mut self, depth: usize) -> usize {
        let slot = self.next.entry(depth).or_insert(1);
        let current = *slot;
        *slot += 1;
        current
    }

    /// Restarts numbering at `depth`; deeper levels keep their state.
    pub fn reset(&mut self, depth: usize) {
        self.next.insert(depth, 1);
    }

    /// The number the next item at `depth` would receive.
    pub fn peek(&self, depth: usize) -> usize {
        self.next.get(&depth).copied().unwrap_or(1)
    }
}
