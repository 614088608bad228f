//! Explicit session context and scheduled tasks.
//!
//! The session is a value handed to the components that need it, not an
//! ambient token looked up from arbitrary code. Background work tied to
//! the session (token refresh) runs on a [`ScheduledTask`] the session
//! owner holds, so logout tears it down deterministically instead of
//! leaving an interval running.

use std::time::Duration;

use uuid::Uuid;

/// An authenticated session, injected into environments that call
/// protected endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The account this session belongs to.
    pub account_id: Uuid,
    token: String,
}

impl SessionContext {
    /// Create a session context.
    #[must_use]
    pub const fn new(account_id: Uuid, token: String) -> Self {
        Self { account_id, token }
    }

    /// The bearer token for outgoing requests.
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        &self.token
    }

    /// Replace the token after a refresh.
    pub fn set_token(&mut self, token: String) {
        self.token = token;
    }
}

// The token never appears in logs.
impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("account_id", &self.account_id)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A cancellable recurring task owned by whoever created it.
///
/// The task stops when [`cancel`](ScheduledTask::cancel) is called or
/// the handle is dropped — there is no way to leak the interval past
/// its owner's lifetime.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: tokio::task::JoinHandle<()>,
}

impl ScheduledTask {
    /// Run `job` every `interval`, starting one interval from now.
    pub fn every<F, Fut>(interval: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick of a tokio interval fires immediately;
            // consume it so the job first runs after one interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                job().await;
            }
        });
        Self { handle }
    }

    /// Stop the task.
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Whether the task has stopped running.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn session_debug_redacts_token() {
        let session = SessionContext::new(Uuid::new_v4(), "secret-token".to_string());
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn set_token_replaces_bearer() {
        let mut session = SessionContext::new(Uuid::new_v4(), "old".to_string());
        session.set_token("new".to_string());
        assert_eq!(session.bearer_token(), "new");
    }

    #[tokio::test]
    async fn scheduled_task_ticks_on_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let task = ScheduledTask::every(Duration::from_millis(10), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(count.load(Ordering::SeqCst) >= 2);
        task.cancel();
    }

    #[tokio::test]
    async fn dropping_the_task_stops_it() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        let task = ScheduledTask::every(Duration::from_millis(5), move || {
            let seen = Arc::clone(&seen);
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        drop(task);
        tokio::time::sleep(Duration::from_millis(30)).await;
        let after_drop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
