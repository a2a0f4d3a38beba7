//! Periodic background refresh.
//!
//! A tick that fires while the previous refresh is still running is skipped,
//! so slow responses never pile up.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::rc::Rc;

/// Reentrancy guard for one poller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusyFlag {
    busy: bool,
}

impl BusyFlag {
    /// True when the caller may start a run.
    pub fn try_acquire(&mut self) -> bool {
        if self.busy {
            false
        } else {
            self.busy = true;
            true
        }
    }

    pub fn release(&mut self) {
        self.busy = false;
    }
}

/// Run `task` now and every `period_ms` while `enabled` is true.
pub fn use_poller<F, Fut>(period_ms: u32, enabled: Signal<bool>, task: F)
where
    F: Fn() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let busy = StoredValue::new(BusyFlag::default());
    let interval = StoredValue::new_local(None::<Interval>);
    let task = Rc::new(task);

    let run = {
        let task = task.clone();
        move || {
            let acquired = busy.try_update_value(|b| b.try_acquire()).unwrap_or(false);
            if !acquired {
                log::debug!("poll tick skipped: previous run still busy");
                return;
            }
            let task = task.clone();
            spawn_local(async move {
                task().await;
                busy.try_update_value(BusyFlag::release);
            });
        }
    };

    Effect::new(move |_| {
        if enabled.get() {
            run();
            let tick = run.clone();
            interval.set_value(Some(Interval::new(period_ms, tick)));
        } else {
            interval.set_value(None);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_flag_blocks_overlap() {
        let mut flag = BusyFlag::default();
        assert!(flag.try_acquire());
        assert!(!flag.try_acquire());
        flag.release();
        assert!(flag.try_acquire());
    }
}
