//! Request De-Duplication Cache
//!
//! In-memory map from endpoint name to the in-flight fetch, with a fixed
//! TTL. Dashboard pollers run on independent timers, so the same read-model
//! endpoint can be asked for several times in one window; callers inside the
//! TTL share a single request instead. A failed fetch is evicted right away
//! so the next poll tick retries.

use std::cell::RefCell;
use std::collections::HashMap;

use futures_util::future::{LocalBoxFuture, Shared};
use futures_util::FutureExt;

/// Default TTL for cached read-model fetches
pub const DEFAULT_TTL_MS: f64 = 10_000.0;

type SharedFetch = Shared<LocalBoxFuture<'static, Result<serde_json::Value, String>>>;

struct Entry {
    fetch: SharedFetch,
    inserted_at: f64,
}

thread_local! {
    static CACHE: RefCell<HashMap<String, Entry>> = RefCell::new(HashMap::new());
}

fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Whether an entry inserted at `inserted_at` is still inside the TTL.
fn is_fresh(inserted_at: f64, now: f64, ttl_ms: f64) -> bool {
    now - inserted_at < ttl_ms
}

/// Run `fetch` for `name`, sharing the result with every caller inside the
/// TTL window. The future is stored while in flight, so concurrent callers
/// await the same request rather than issuing their own.
pub async fn fetch_cached<F>(
    name: &str,
    ttl_ms: f64,
    fetch: F,
) -> Result<serde_json::Value, String>
where
    F: FnOnce() -> LocalBoxFuture<'static, Result<serde_json::Value, String>>,
{
    let now = now_ms();

    let existing = CACHE.with(|cache| {
        cache
            .borrow()
            .get(name)
            .filter(|entry| is_fresh(entry.inserted_at, now, ttl_ms))
            .map(|entry| entry.fetch.clone())
    });

    let shared = match existing {
        Some(fetch) => fetch,
        None => {
            let shared = fetch().shared();
            CACHE.with(|cache| {
                cache.borrow_mut().insert(
                    name.to_string(),
                    Entry {
                        fetch: shared.clone(),
                        inserted_at: now,
                    },
                );
            });

            // Sweep the entry once its TTL passes, unless it was replaced
            let key = name.to_string();
            gloo_timers::callback::Timeout::new(ttl_ms as u32, move || {
                CACHE.with(|cache| {
                    let mut map = cache.borrow_mut();
                    let expired = map
                        .get(&key)
                        .map(|entry| !is_fresh(entry.inserted_at, now_ms(), ttl_ms))
                        .unwrap_or(false);
                    if expired {
                        map.remove(&key);
                    }
                });
            })
            .forget();

            shared
        }
    };

    let result = shared.await;

    // Errors never persist: evict so the next caller retries
    if result.is_err() {
        CACHE.with(|cache| {
            cache.borrow_mut().remove(name);
        });
    }

    result
}

/// Drop every cached entry. Called on logout so the next session does not
/// see the previous user's read models.
pub fn clear() {
    CACHE.with(|cache| cache.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_window() {
        assert!(is_fresh(0.0, 9_999.0, DEFAULT_TTL_MS));
        assert!(!is_fresh(0.0, 10_000.0, DEFAULT_TTL_MS));
        assert!(!is_fresh(0.0, 20_000.0, DEFAULT_TTL_MS));
    }
}
