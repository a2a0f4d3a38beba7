//! Last-request-wins bookkeeping.
//!
//! Every load issues a ticket; a response is applied only while its ticket is
//! still the latest. Issuing a ticket also aborts the previous fetch so the
//! browser stops downloading a result nobody will look at.

use leptos::prelude::*;
use web_sys::{AbortController, AbortSignal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic generation counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestGate {
    generation: u64,
}

impl RequestGate {
    pub fn issue(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        Ticket(self.generation)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Reactive-owner-scoped pairing of a [`RequestGate`] with the abort
/// controller of the request currently in flight.
#[derive(Clone, Copy)]
pub struct LatestRequest {
    gate: StoredValue<RequestGate>,
    controller: StoredValue<Option<AbortController>, LocalStorage>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self {
            gate: StoredValue::new(RequestGate::default()),
            controller: StoredValue::new_local(None),
        }
    }

    /// Abort whatever is in flight and start a new request.
    pub fn start(&self) -> (Ticket, Option<AbortSignal>) {
        self.abort_in_flight();
        let controller = AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        self.controller.set_value(controller);
        let ticket = self
            .gate
            .try_update_value(|g| g.issue())
            .unwrap_or(Ticket(0));
        (ticket, signal)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.gate
            .try_with_value(|g| g.is_current(ticket))
            .unwrap_or(false)
    }

    /// Release the controller once the current request settles.
    pub fn finish(&self, ticket: Ticket) {
        if self.is_current(ticket) {
            self.controller.set_value(None);
        }
    }

    /// Abort and invalidate; used on unmount.
    pub fn cancel(&self) {
        self.abort_in_flight();
        self.gate.try_update_value(RequestGate::invalidate);
    }

    fn abort_in_flight(&self) {
        let previous = self
            .controller
            .try_update_value(|c| c.take())
            .flatten();
        if let Some(previous) = previous {
            previous.abort();
        }
    }
}

impl Default for LatestRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_is_current() {
        let mut gate = RequestGate::default();
        let first = gate.issue();
        let second = gate.issue();
        assert!(!gate.is_current(first));
        assert!(gate.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_everything() {
        let mut gate = RequestGate::default();
        let t = gate.issue();
        gate.invalidate();
        assert!(!gate.is_current(t));
        let next = gate.issue();
        assert!(gate.is_current(next));
    }

    #[test]
    fn test_out_of_order_completion() {
        // Responses for A and B arrive as B, A: only B may be applied.
        let mut gate = RequestGate::default();
        let a = gate.issue();
        let b = gate.issue();
        let mut applied = Vec::new();
        for (name, ticket) in [("B", b), ("A", a)] {
            if gate.is_current(ticket) {
                applied.push(name);
            }
        }
        assert_eq!(applied, vec!["B"]);
    }
}
