//! Bounded, newest-first list of conversions.

use crate::api::QueryResult;

/// Most results kept on screen.
pub const HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    items: Vec<QueryResult>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `result` first and evicts whatever falls past the limit.
    pub fn push_front(&mut self, result: QueryResult) {
        self.items.insert(0, result);
        self.items.truncate(HISTORY_LIMIT);
    }

    /// Replaces everything with a list fetched from the service (already newest-first).
    pub fn replace(&mut self, mut fetched: Vec<QueryResult>) {
        fetched.truncate(HISTORY_LIMIT);
        self.items = fetched;
    }

    pub fn items(&self) -> &[QueryResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
