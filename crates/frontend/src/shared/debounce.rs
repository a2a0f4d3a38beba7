use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Trailing-edge debouncer. Scheduling replaces the pending call; dropping
/// the pending [`Timeout`] cancels it, so disposal of the owner cancels too.
#[derive(Clone, Copy)]
pub struct Debouncer {
    delay_ms: u32,
    pending: StoredValue<Option<Timeout>, LocalStorage>,
}

impl Debouncer {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: StoredValue::new_local(None),
        }
    }

    pub fn schedule(&self, f: impl FnOnce() + 'static) {
        let timeout = Timeout::new(self.delay_ms, f);
        self.pending.set_value(Some(timeout));
    }

    pub fn cancel(&self) {
        self.pending.try_set_value(None);
    }
}
