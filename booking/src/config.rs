//! Wizard timing configuration.

use std::time::Duration;

/// Timing knobs for the booking wizard.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use venuebook_booking::config::WizardConfig;
///
/// let config = WizardConfig::default()
///     .with_submission_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WizardConfig {
    /// How long a booking submission may run before the wizard gives up
    /// and transitions to the failed state.
    pub submission_timeout: Duration,

    /// How long the confirmation view stays up before the wizard
    /// auto-resets and the modal closes.
    pub confirmation_reset_delay: Duration,
}

impl WizardConfig {
    /// Set the submission timeout.
    #[must_use]
    pub const fn with_submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }

    /// Set the confirmation auto-reset delay.
    #[must_use]
    pub const fn with_confirmation_reset_delay(mut self, delay: Duration) -> Self {
        self.confirmation_reset_delay = delay;
        self
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            submission_timeout: Duration::from_secs(10),
            confirmation_reset_delay: Duration::from_secs(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_override_defaults() {
        let config = WizardConfig::default()
            .with_submission_timeout(Duration::from_millis(50))
            .with_confirmation_reset_delay(Duration::from_millis(10));

        assert_eq!(config.submission_timeout, Duration::from_millis(50));
        assert_eq!(config.confirmation_reset_delay, Duration::from_millis(10));
    }
}
