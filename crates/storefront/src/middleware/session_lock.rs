//! Per-session request serialization.
//!
//! Cart handlers load the shop state from the session, change it, and the
//! session layer writes it back after the response is built. Two requests
//! carrying the same session cookie must not interleave, or one update is
//! lost. This middleware sits outside the session layer and holds a lock keyed
//! by the cookie value for the whole request, store write included.
//!
//! Requests without a session cookie always get a fresh session, so they are
//! not serialized.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::Response,
};

use super::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

type LockMap = HashMap<String, Arc<tokio::sync::Mutex<()>>>;

/// Async locks keyed by session cookie value.
///
/// Entries are dropped once no request holds or waits on them.
#[derive(Default)]
pub struct SessionLocks {
    locks: Mutex<LockMap>,
}

impl SessionLocks {
    /// Create an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `future` while holding the lock for `key`.
    pub async fn run<F: Future>(&self, key: &str, future: F) -> F::Output {
        let lock = {
            let mut table = self.table();
            Arc::clone(table.entry(key.to_owned()).or_default())
        };

        let output = {
            let _guard = lock.lock().await;
            future.await
        };

        {
            let mut table = self.table();
            // One reference in the table, one here: nobody else is waiting.
            if Arc::strong_count(&lock) == 2 {
                table.remove(key);
            }
        }
        output
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.table().is_empty()
    }

    fn table(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Extract the session cookie value from request headers.
#[must_use]
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}

/// Middleware that serializes requests sharing a session cookie.
pub async fn session_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let cookie = session_cookie(request.headers());
    match cookie {
        Some(key) => state.session_locks().run(&key, next.run(request)).await,
        None => next.run(request).await,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_session_cookie_found_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; leaf_session=abc123; lang=en"),
        );
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_session_cookie_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("leaf_session=; theme=dark"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_read_modify_write_is_serialized() {
        let locks = Arc::new(SessionLocks::new());
        let counter = Arc::new(AtomicU32::new(0));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..50 {
            let locks = Arc::clone(&locks);
            let counter = Arc::clone(&counter);
            tasks.spawn(async move {
                locks
                    .run("visitor", async {
                        let seen = counter.load(Ordering::SeqCst);
                        tokio::task::yield_now().await;
                        counter.store(seen + 1, Ordering::SeqCst);
                    })
                    .await;
            });
        }
        while let Some(result) = tasks.join_next().await {
            assert!(result.is_ok());
        }

        assert_eq!(counter.load(Ordering::SeqCst), 50);
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn test_distinct_sessions_do_not_block_each_other() {
        let locks = SessionLocks::new();
        let inner = locks.run("a", locks.run("b", async { 7 })).await;
        assert_eq!(inner, 7);
        assert!(locks.is_empty());
    }
}
