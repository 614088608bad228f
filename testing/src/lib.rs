//! # Venuebook Testing
//!
//! Testing utilities for Venuebook feature state machines.
//!
//! This crate provides:
//! - Deterministic clock mocks ([`FixedClock`], [`test_clock`])
//! - The fluent [`ReducerTest`] harness with Given-When-Then syntax
//! - Assertion helpers for effect lists
//!
//! ## Example
//!
//! ```ignore
//! use venuebook_testing::{ReducerTest, assertions};
//!
//! ReducerTest::new(BookingWizard::new())
//!     .with_env(test_environment())
//!     .given_state(WizardState::new(venue_id))
//!     .when_action(BookingAction::NextStep)
//!     .then_state(|state| assert_eq!(state.step, WizardStep::Step1Basics))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use venuebook_core::environment::Clock;

/// Mock implementations of shared environment traits.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests.
    ///
    /// Always returns the same time, making time-dependent assertions
    /// reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use venuebook_testing::mocks::FixedClock;
    /// use venuebook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time.
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create the default fixed clock for tests (2025-01-01 00:00:00 UTC).
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse, which cannot
    /// happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

mod reducer_test;

pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_is_frozen() {
        let clock = test_clock();
        assert_eq!(clock.now(), clock.now());
    }
}
