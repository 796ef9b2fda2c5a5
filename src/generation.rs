use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued query; only the newest ticket is current
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Hands out request-generation tickets.
///
/// Issuing a ticket supersedes every earlier one, so a caller that changes its
/// filters while a query is in flight can drop the stale response instead of
/// rendering it.
#[derive(Debug, Default)]
pub struct QueryGenerations {
    latest: AtomicU64,
}

impl QueryGenerations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
