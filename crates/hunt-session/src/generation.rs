use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one search request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// Monotonic counter of search requests
///
/// Only results carrying the most recently issued ticket may be applied.
#[derive(Debug, Default)]
pub struct SearchGenerations {
    latest: AtomicU64,
}

impl SearchGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
