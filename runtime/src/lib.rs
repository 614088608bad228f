//! # Venuebook Runtime
//!
//! The Store runtime that drives Venuebook feature state machines.
//!
//! A [`Store`] owns one feature's state, serializes reducer execution,
//! and executes the effects the reducer returns. Actions produced by
//! effects are fed back into the reducer and broadcast to observers,
//! closing the loop:
//!
//! ```text
//! send(action) ──► reducer (write lock) ──► effects ──► spawned tasks
//!      ▲                                                    │
//!      └──────────────── feedback actions ◄─────────────────┘
//! ```
//!
//! This mirrors a browser UI event loop: user interactions arrive as
//! actions, only one reducer turn runs at a time, and asynchronous work
//! (a booking submission, a catalog fetch) completes by dispatching a
//! follow-up action.
//!
//! ## Example
//!
//! ```ignore
//! use venuebook_runtime::Store;
//!
//! let store = Store::new(WizardState::new(venue_id), BookingWizard::new(), env);
//!
//! store.send(BookingAction::SetEventDate { date }).await?;
//! let step = store.state(|s| s.step).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{RwLock, broadcast, watch};
use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;

/// Error types for the Store runtime.
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations.
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete.
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timeout waiting for a matching action.
        ///
        /// Returned by [`Store::send_and_wait_for`] and
        /// [`EffectHandle::wait_with_timeout`] when the timeout expires.
        #[error("Timeout waiting for action")]
        Timeout,

        /// Action broadcast channel closed, typically because the store
        /// is shutting down.
        #[error("Action broadcast channel closed")]
        ChannelClosed,
    }
}

pub use error::StoreError;

/// Store configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use venuebook_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_broadcast_capacity(64)
///     .with_shutdown_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Capacity of the action broadcast channel.
    pub broadcast_capacity: usize,
    /// Default timeout for graceful shutdown.
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Set the action broadcast capacity.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }

    /// Set the default shutdown timeout.
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: 16,
            shutdown_timeout: Duration::from_secs(30),
        }
    }
}

/// Handle for tracking effect completion.
///
/// Returned by [`Store::send`]. Waiting on the handle resolves once the
/// action's effects — and any effects produced by their feedback actions
/// — have finished. Useful in tests to assert on quiescent state without
/// sleeping.
#[derive(Clone)]
pub struct EffectHandle {
    pending: Arc<AtomicUsize>,
    done: watch::Receiver<bool>,
}

impl EffectHandle {
    fn new() -> (Self, EffectTracking) {
        let pending = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(false);

        let handle = Self {
            pending: Arc::clone(&pending),
            done: rx,
        };
        let tracking = EffectTracking {
            pending,
            done: Arc::new(tx),
        };
        (handle, tracking)
    }

    /// Wait until all tracked effects have completed.
    ///
    /// Returns immediately if no effects were spawned.
    pub async fn wait(mut self) {
        if self.pending.load(Ordering::Acquire) == 0 {
            return;
        }
        while !*self.done.borrow_and_update() {
            if self.done.changed().await.is_err() {
                return;
            }
        }
    }

    /// Wait for effect completion with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if effects are still running when
    /// the timeout expires.
    pub async fn wait_with_timeout(self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

/// Internal effect bookkeeping shared by every task of one action tree.
#[derive(Clone)]
struct EffectTracking {
    pending: Arc<AtomicUsize>,
    done: Arc<watch::Sender<bool>>,
}

impl EffectTracking {
    fn begin(&self) {
        self.pending.fetch_add(1, Ordering::AcqRel);
    }

    fn finish(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            let _ = self.done.send(true);
        }
    }

    fn settle_if_empty(&self) {
        if self.pending.load(Ordering::Acquire) == 0 {
            let _ = self.done.send(true);
        }
    }
}

/// The Store runtime.
///
/// Owns state behind an async `RwLock`, runs the reducer under the write
/// lock (serializing turns, exactly like a single-threaded UI event
/// loop), and executes effects on spawned tasks.
///
/// Cloning a `Store` clones handles to the same state — effect tasks
/// hold a clone so feedback actions re-enter the same state machine.
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
    pending_effects: Arc<AtomicUsize>,
    /// Actions produced by effects are re-broadcast to observers. This
    /// is what request/response helpers and UI subscriptions consume.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            shutdown: Arc::clone(&self.shutdown),
            pending_effects: Arc::clone(&self.pending_effects),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    /// Create a new store with default configuration.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_config(initial_state, reducer, environment, StoreConfig::default())
    }

    /// Create a new store with custom configuration.
    #[must_use]
    pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
        let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
            pending_effects: Arc::new(AtomicUsize::new(0)),
            action_broadcast,
        }
    }

    /// Send an action through the store.
    ///
    /// Runs the reducer synchronously under the state write lock, then
    /// starts effect execution and returns. Effects may still be running
    /// when this returns; use the handle to wait for them.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is
    /// shutting down.
    #[tracing::instrument(skip(self, action), name = "store_send")]
    pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!("rejected action: store is shutting down");
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.actions.total").increment(1);

        let (handle, tracking) = EffectHandle::new();
        let effects = self.reduce_locked(action).await;

        tracing::trace!(count = effects.len(), "executing effects");
        for effect in effects {
            self.spawn_effect(effect, tracking.clone());
        }
        tracking.settle_if_empty();

        Ok(handle)
    }

    /// Send an action and wait for a matching result action.
    ///
    /// Designed for request/response flows: subscribe to the action
    /// broadcast, send the initial action, return the first
    /// effect-produced action matching the predicate.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Timeout`] if no matching action arrives in time
    /// - [`StoreError::ChannelClosed`] if the broadcast channel closes
    /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
    pub async fn send_and_wait_for<F>(
        &self,
        action: A,
        predicate: F,
        timeout: Duration,
    ) -> Result<A, StoreError>
    where
        F: Fn(&A) -> bool,
    {
        // Subscribe before sending so the result cannot slip past.
        let mut rx = self.action_broadcast.subscribe();

        self.send(action).await?;

        tokio::time::timeout(timeout, async {
            loop {
                match rx.recv().await {
                    Ok(action) if predicate(&action) => return Ok(action),
                    Ok(_) => {},
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "action observer lagged");
                    },
                    Err(broadcast::error::RecvError::Closed) => {
                        return Err(StoreError::ChannelClosed);
                    },
                }
            }
        })
        .await
        .map_err(|_| StoreError::Timeout)?
    }

    /// Read current state via a closure.
    ///
    /// The closure borrows state under the read lock, which is released
    /// as soon as the closure returns:
    ///
    /// ```ignore
    /// let step = store.state(|s| s.step).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to all actions produced by effects.
    ///
    /// Actions sent directly via [`Store::send`] are not broadcast; only
    /// the feedback actions effects produce are.
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }

    /// Number of effects currently in flight.
    #[must_use]
    pub fn pending_effect_count(&self) -> usize {
        self.pending_effects.load(Ordering::Acquire)
    }

    /// Initiate graceful shutdown.
    ///
    /// New actions are rejected immediately; in-flight effects get until
    /// the timeout to drain.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] with the number of
    /// still-running effects if the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        self.shutdown.store(true, Ordering::Release);
        tracing::info!("store shutdown initiated");

        let deadline = tokio::time::Instant::now() + timeout;
        while self.pending_effects.load(Ordering::Acquire) > 0 {
            if tokio::time::Instant::now() >= deadline {
                let remaining = self.pending_effects.load(Ordering::Acquire);
                tracing::warn!(remaining, "store shutdown timed out");
                return Err(StoreError::ShutdownTimeout(remaining));
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        Ok(())
    }

    /// Run one reducer turn under the write lock.
    async fn reduce_locked(
        &self,
        action: A,
    ) -> venuebook_core::SmallVec<[Effect<A>; 4]> {
        let mut state = self.state.write().await;
        let span = tracing::debug_span!("reducer_turn");
        let _enter = span.enter();
        self.reducer.reduce(&mut state, action, &self.environment)
    }

    /// Spawn an effect tree onto the runtime.
    fn spawn_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
        match effect {
            Effect::None => {},
            Effect::Parallel(effects) => {
                for effect in effects {
                    self.spawn_effect(effect, tracking.clone());
                }
            },
            Effect::Sequential(effects) => {
                tracking.begin();
                self.pending_effects.fetch_add(1, Ordering::AcqRel);
                let store = self.clone();
                let seq_tracking = tracking;
                tokio::spawn(async move {
                    for effect in effects {
                        store.run_effect(effect, seq_tracking.clone()).await;
                    }
                    store.pending_effects.fetch_sub(1, Ordering::AcqRel);
                    seq_tracking.finish();
                });
            },
            leaf @ (Effect::Delay { .. } | Effect::Future(_)) => {
                tracking.begin();
                self.pending_effects.fetch_add(1, Ordering::AcqRel);
                metrics::counter!("store.effects.total").increment(1);
                let store = self.clone();
                tokio::spawn(async move {
                    store.run_effect(leaf, tracking.clone()).await;
                    store.pending_effects.fetch_sub(1, Ordering::AcqRel);
                    tracking.finish();
                });
            },
        }
    }

    /// Execute one effect to completion, including feedback.
    fn run_effect(
        &self,
        effect: Effect<A>,
        tracking: EffectTracking,
    ) -> futures::future::BoxFuture<'_, ()> {
        Box::pin(async move {
            match effect {
                Effect::None => {},
                Effect::Parallel(effects) | Effect::Sequential(effects) => {
                    // Inside an already-spawned task, nested groups run
                    // in order; top-level parallelism happens at spawn.
                    for effect in effects {
                        self.run_effect(effect, tracking.clone()).await;
                    }
                },
                Effect::Delay { duration, action } => {
                    tokio::time::sleep(duration).await;
                    self.feedback(*action, tracking).await;
                },
                Effect::Future(future) => {
                    if let Some(action) = future.await {
                        self.feedback(action, tracking).await;
                    }
                },
            }
        })
    }

    /// Feed an effect-produced action back into the reducer.
    ///
    /// The reducer turn completes before observers are notified, so a
    /// `send_and_wait_for` caller always reads post-transition state.
    async fn feedback(&self, action: A, tracking: EffectTracking) {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::debug!("dropping feedback action: store is shutting down");
            let _ = self.action_broadcast.send(action);
            return;
        }

        let effects = self.reduce_locked(action.clone()).await;
        for effect in effects {
            self.spawn_effect(effect, tracking.clone());
        }

        let _ = self.action_broadcast.send(action);
    }
}
