//! # Venuebook Core
//!
//! Core traits and types for the Venuebook architecture.
//!
//! Every feature in Venuebook — the booking wizard, the venue detail
//! modal, the browse page — is a state machine driven through the same
//! unidirectional loop:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! ## Core Concepts
//!
//! - **State**: owned, cloneable domain state for a feature
//! - **Action**: every input a feature can receive (user interactions and
//!   the completion callbacks of asynchronous work)
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a *description* of a side effect, executed by the runtime
//! - **Environment**: injected dependencies behind traits
//!
//! ## Architecture Principles
//!
//! - Functional core, imperative shell: reducers never perform I/O
//! - Side effects confined to transition edges, returned as values
//! - Dependency injection via the environment, so every collaborator has
//!   an in-memory test double
//!
//! ## Example
//!
//! ```
//! use venuebook_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CarouselState {
//!     index: usize,
//!     image_count: usize,
//! }
//!
//! #[derive(Clone, Debug)]
//! enum CarouselAction {
//!     Next,
//!     Previous,
//! }
//!
//! struct CarouselReducer;
//!
//! impl Reducer for CarouselReducer {
//!     type State = CarouselState;
//!     type Action = CarouselAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CarouselState,
//!         action: CarouselAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CarouselAction>; 4]> {
//!         if state.image_count > 0 {
//!             state.index = match action {
//!                 CarouselAction::Next => (state.index + 1) % state.image_count,
//!                 CarouselAction::Previous => {
//!                     (state.index + state.image_count - 1) % state.image_count
//!                 },
//!             };
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types so feature crates depend on one surface.
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer module - the core trait for feature logic.
///
/// Reducers are deterministic: the same state, action, and environment
/// always produce the same state mutation and effect descriptions. All
/// validation lives here; all I/O lives in the effects a reducer returns.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for feature logic.
    ///
    /// # Type Parameters
    ///
    /// - `State`: the domain state this reducer operates on
    /// - `Action`: the action type this reducer processes
    /// - `Environment`: the injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for BookingWizard {
    ///     type State = WizardState;
    ///     type Action = BookingAction;
    ///     type Environment = BookingEnvironment<C, G>;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut WizardState,
    ///         action: BookingAction,
    ///         env: &Self::Environment,
    ///     ) -> SmallVec<[Effect<BookingAction>; 4]> {
    ///         // validate, mutate state, describe effects
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on.
        type State;

        /// The action type this reducer processes.
        type Action;

        /// The environment type with injected dependencies.
        type Environment;

        /// Reduce an action into state changes and effect descriptions.
        ///
        /// This is a pure function that:
        /// 1. Validates the action against the current state
        /// 2. Updates state in place
        /// 3. Returns effects for the runtime to execute
        ///
        /// Invalid actions must leave the state unchanged and return no
        /// effects rather than panic.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - side effect descriptions.
///
/// Effects are values, not execution. A reducer returns them and the
/// `Store` runtime interprets them, feeding any produced actions back
/// into the reducer.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;
    use std::time::Duration;

    /// A boxed future that optionally produces a follow-up action.
    pub type EffectFuture<Action> = Pin<Box<dyn Future<Output = Option<Action>> + Send>>;

    /// Describes a side effect to be executed by the runtime.
    ///
    /// Effects are NOT executed when the reducer returns them. The Store
    /// spawns them after the reducer has released the state lock, so a
    /// slow network call never blocks further user actions.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: the action type an effect can feed back to the reducer
    #[allow(missing_docs)]
    pub enum Effect<Action> {
        /// No-op effect.
        None,

        /// Run effects concurrently.
        Parallel(Vec<Effect<Action>>),

        /// Run effects one after another.
        Sequential(Vec<Effect<Action>>),

        /// Dispatch an action after a delay.
        ///
        /// Used for timed transitions such as the booking confirmation
        /// view auto-dismissing after a fixed duration.
        Delay {
            /// How long to wait.
            duration: Duration,
            /// Action to dispatch after the delay.
            action: Box<Action>,
        },

        /// Arbitrary async computation.
        ///
        /// Returns `Option<Action>` - if `Some`, the action is fed back
        /// into the reducer. This is the only effect variant that
        /// suspends, and it is where every network call lives.
        Future(EffectFuture<Action>),
    }

    // Manual Debug since boxed futures are opaque.
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Parallel(effects) => {
                    f.debug_tuple("Effect::Parallel").field(effects).finish()
                },
                Effect::Sequential(effects) => {
                    f.debug_tuple("Effect::Sequential").field(effects).finish()
                },
                Effect::Delay { duration, action } => f
                    .debug_struct("Effect::Delay")
                    .field("duration", duration)
                    .field("action", action)
                    .finish(),
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Combine effects to run concurrently.
        #[must_use]
        pub const fn merge(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Parallel(effects)
        }

        /// Chain effects to run sequentially.
        #[must_use]
        pub const fn chain(effects: Vec<Effect<Action>>) -> Effect<Action> {
            Effect::Sequential(effects)
        }

        /// Returns `true` if this effect performs no work.
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }

    impl<Action: Send + 'static> Effect<Action> {
        /// Map the actions this effect produces into a parent action type.
        ///
        /// This is how a parent feature embeds a child feature: the
        /// parent reducer delegates to the child, then lifts the child's
        /// effects so their feedback actions route back through the
        /// parent.
        pub fn map<Parent, F>(self, f: F) -> Effect<Parent>
        where
            Parent: Send + 'static,
            F: Fn(Action) -> Parent + Clone + Send + Sync + 'static,
        {
            match self {
                Effect::None => Effect::None,
                Effect::Parallel(effects) => Effect::Parallel(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Sequential(effects) => Effect::Sequential(
                    effects.into_iter().map(|e| e.map(f.clone())).collect(),
                ),
                Effect::Delay { duration, action } => Effect::Delay {
                    duration,
                    action: Box::new(f(*action)),
                },
                Effect::Future(future) => {
                    Effect::Future(Box::pin(async move { future.await.map(f) }))
                },
            }
        }
    }
}

/// Environment module - dependency injection traits.
///
/// External dependencies are abstracted behind traits and injected via
/// each feature's environment type. The traits that are shared across
/// features live here; feature-specific collaborators (booking gateway,
/// catalog source, key-value storage) live with their feature crate.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time for testability.
    ///
    /// Production code injects [`SystemClock`]; tests inject a fixed
    /// clock so time-dependent assertions are deterministic.
    pub trait Clock: Send + Sync {
        /// Get the current time.
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
        fn now(&self) -> DateTime<Utc> {
            (**self).now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;
    use super::environment::{Clock, SystemClock};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Ping,
    }

    #[test]
    fn effect_merge_is_parallel() {
        let effect: Effect<TestAction> = Effect::merge(vec![Effect::None, Effect::None]);
        assert!(matches!(effect, Effect::Parallel(ref inner) if inner.len() == 2));
    }

    #[test]
    fn effect_chain_is_sequential() {
        let effect: Effect<TestAction> = Effect::chain(vec![Effect::None]);
        assert!(matches!(effect, Effect::Sequential(ref inner) if inner.len() == 1));
    }

    #[test]
    fn effect_debug_formats_future_opaquely() {
        let effect: Effect<TestAction> =
            Effect::Future(Box::pin(async { Some(TestAction::Ping) }));
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }

    #[test]
    fn effect_map_lifts_delay_actions() {
        #[derive(Clone, Debug)]
        enum Parent {
            Child(TestAction),
        }

        let effect = Effect::Delay {
            duration: Duration::from_secs(1),
            action: Box::new(TestAction::Ping),
        };
        let mapped = effect.map(Parent::Child);
        assert!(matches!(
            mapped,
            Effect::Delay { ref action, .. } if matches!(**action, Parent::Child(TestAction::Ping))
        ));
    }

    #[test]
    fn delay_effect_carries_duration() {
        let effect = Effect::Delay {
            duration: Duration::from_secs(3),
            action: Box::new(TestAction::Ping),
        };
        assert!(!effect.is_none());
    }

    #[test]
    fn system_clock_advances() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
