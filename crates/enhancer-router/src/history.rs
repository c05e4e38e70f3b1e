//! In-memory navigation history

use crate::route::ResolvedRoute;

const DEFAULT_LIMIT: usize = 50;

/// Back stack of previously visited routes, oldest first.
#[derive(Debug, Clone)]
pub struct NavigationHistory {
    entries: Vec<ResolvedRoute>,
    limit: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a route; the oldest entries are dropped past the limit.
    pub fn push(&mut self, route: ResolvedRoute) {
        self.entries.push(route);
        if self.entries.len() > self.limit {
            let overflow = self.entries.len() - self.limit;
            self.entries.drain(0..overflow);
        }
    }

    /// Most recent entry, without removing it.
    pub fn last(&self) -> Option<&ResolvedRoute> {
        self.entries.last()
    }

    pub fn pop(&mut self) -> Option<ResolvedRoute> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ResolvedRoute] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::new()
    }
}
