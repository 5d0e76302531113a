use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::Period;

/// Per-view stale-response guard. Record fetches are async and a view's
/// `(period, limit)` can change while one is in flight; without a guard the
/// late response flickers the previous period's data onto the screen. Each
/// fetch takes a ticket from `begin`, and its projected output is applied
/// only if that ticket is still the view's most recent one. There is no
/// cancellation of the fetch itself; a superseded response is simply dropped.
#[derive(Debug, Default)]
pub struct ViewSession {
    seq: AtomicU64,
}

/// Issued by [`ViewSession::begin`]; carries the request parameters it was
/// issued for so late completions can be logged meaningfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    pub period: Period,
    pub limit: usize,
}

impl ViewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding any in-flight one for this view.
    pub fn begin(&self, period: Period, limit: usize) -> RequestTicket {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { seq, period, limit }
    }

    /// Returns `Some(output)` only if `ticket` is still the most recent
    /// request for this view; a stale ticket's output is dropped.
    pub fn apply<T>(&self, ticket: &RequestTicket, output: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(output)
        } else {
            None
        }
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.seq == self.seq.load(Ordering::SeqCst)
    }
}
