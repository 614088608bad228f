//! Error types for venue discovery and booking.
//!
//! Three concerns, three enums: wizard field validation, booking gateway
//! failures, and catalog loading. None of them is fatal to the page —
//! validation blocks one step transition, gateway failures return the
//! user to the contact step, and catalog failures surface as a
//! page-level error state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::VenueId;

/// Validation failures for wizard step transitions.
///
/// Surfaced inline next to the form; never propagated as a hard error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Step 1: no event date chosen.
    #[error("Please choose an event date")]
    MissingEventDate,

    /// Step 1: no event type chosen.
    #[error("Please choose an event type")]
    MissingEventType,

    /// Step 1: no guest count chosen.
    #[error("Please choose a guest count")]
    MissingGuestBucket,

    /// Step 2: no package selected.
    #[error("Please select a package")]
    MissingPackage,

    /// Step 2: a menu type is chosen but no menu option is selected.
    #[error("Please select a menu option")]
    MissingMenu,

    /// Step 3: contact name is empty.
    #[error("Please enter your name")]
    MissingContactName,

    /// Step 3: email is empty or not an address.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Step 3: phone number is empty.
    #[error("Please enter a phone number")]
    MissingPhone,
}

/// Booking gateway failures.
///
/// Retry is always a manual user action; the wizard never retries on its
/// own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The endpoint processed the request and declined it.
    #[error("Booking was rejected: {message}")]
    Rejected {
        /// Human-readable reason from the endpoint.
        message: String,
    },

    /// The request never completed (connection, DNS, TLS, bad payload).
    #[error("Booking request failed: {0}")]
    Transport(String),

    /// The request exceeded the submission timeout.
    #[error("Booking request timed out")]
    Timeout,
}

impl GatewayError {
    /// Returns `true` when resubmitting the same draft could succeed.
    ///
    /// Transport problems and timeouts are transient; a rejection will
    /// repeat until the draft changes.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout)
    }
}

/// Catalog loading and integrity failures.
///
/// A load failure is a page-level error state; it never takes down
/// components that do not depend on the catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog source could not be read.
    #[error("Failed to load venues: {0}")]
    Load(String),

    /// A venue record violates a catalog invariant.
    #[error("Invalid venue {venue}: {reason}")]
    InvalidVenue {
        /// The offending venue.
        venue: VenueId,
        /// Which invariant was violated.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_render_user_messages() {
        assert_eq!(
            ValidationError::MissingEventDate.to_string(),
            "Please choose an event date"
        );
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address"
        );
    }

    #[test]
    fn rejection_is_not_retryable() {
        let rejected = GatewayError::Rejected {
            message: "date no longer available".to_string(),
        };
        assert!(!rejected.is_retryable());
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::Transport("connection reset".to_string()).is_retryable());
    }
}
