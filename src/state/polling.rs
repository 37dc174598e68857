//! Polling
//!
//! Fixed-interval refresh driver used by every dashboard. Each poller runs
//! on its own timer: ticks are skipped while the tab is hidden, consecutive
//! failures grow the interval multiplicatively, and a success resets it.
//! Errors are logged to the console and retried on the next tick.

use std::cell::Cell;
use std::rc::Rc;

use futures_util::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;

/// Backoff caps at base * 2^MAX_BACKOFF_SHIFT
pub const MAX_BACKOFF_SHIFT: u32 = 3;

/// Mounted-flag guard handed to the fetch closure. Checked before each
/// dispatch so a stale response arriving after unmount is dropped.
#[derive(Clone)]
pub struct Alive(Rc<Cell<bool>>);

impl Alive {
    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Handle held by the mounting component; `stop` in `on_cleanup`.
pub struct Poller {
    alive: Rc<Cell<bool>>,
}

impl Poller {
    pub fn stop(&self) {
        self.alive.set(false);
    }
}

/// Interval after `failures` consecutive errors
pub fn backoff_interval(base_ms: u32, failures: u32) -> u32 {
    base_ms << failures.min(MAX_BACKOFF_SHIFT)
}

fn document_hidden() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .map(|d| d.visibility_state() == web_sys::VisibilityState::Hidden)
        .unwrap_or(false)
}

/// Start polling. The first tick fires immediately; later ticks follow the
/// base interval, stretched by backoff while the endpoint keeps failing.
pub fn start<F>(base_interval_ms: u32, fetch: F) -> Poller
where
    F: Fn(Alive) -> LocalBoxFuture<'static, Result<(), String>> + 'static,
{
    let alive = Rc::new(Cell::new(true));
    let failures = Rc::new(Cell::new(0u32));

    run_tick(base_interval_ms, Rc::clone(&alive), failures, Rc::new(fetch));

    Poller { alive }
}

fn run_tick<F>(base_ms: u32, alive: Rc<Cell<bool>>, failures: Rc<Cell<u32>>, fetch: Rc<F>)
where
    F: Fn(Alive) -> LocalBoxFuture<'static, Result<(), String>> + 'static,
{
    if !alive.get() {
        return;
    }

    // Pause while the tab is hidden; try again next tick
    if document_hidden() {
        let delay = backoff_interval(base_ms, failures.get());
        schedule(delay, base_ms, alive, failures, fetch);
        return;
    }

    wasm_bindgen_futures::spawn_local(async move {
        let guard = Alive(Rc::clone(&alive));
        let result = fetch.as_ref()(guard).await;

        match result {
            Ok(()) => failures.set(0),
            Err(e) => {
                web_sys::console::error_1(&format!("Poll failed: {}", e).into());
                failures.set(failures.get().saturating_add(1));
            }
        }

        if alive.get() {
            let delay = backoff_interval(base_ms, failures.get());
            schedule(delay, base_ms, alive, failures, fetch);
        }
    });
}

fn schedule<F>(
    delay_ms: u32,
    base_ms: u32,
    alive: Rc<Cell<bool>>,
    failures: Rc<Cell<u32>>,
    fetch: Rc<F>,
) where
    F: Fn(Alive) -> LocalBoxFuture<'static, Result<(), String>> + 'static,
{
    Timeout::new(delay_ms, move || run_tick(base_ms, alive, failures, fetch)).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_failure() {
        assert_eq!(backoff_interval(5_000, 0), 5_000);
        assert_eq!(backoff_interval(5_000, 1), 10_000);
        assert_eq!(backoff_interval(5_000, 2), 20_000);
    }

    #[test]
    fn test_backoff_caps() {
        assert_eq!(backoff_interval(5_000, 3), 40_000);
        assert_eq!(backoff_interval(5_000, 10), 40_000);
    }

    #[test]
    fn test_reset_returns_to_base() {
        // a success resets the failure counter, so the next delay is base
        assert_eq!(backoff_interval(15_000, 0), 15_000);
    }
}
