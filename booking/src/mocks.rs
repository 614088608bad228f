//! In-memory collaborator doubles.
//!
//! Production code never touches these; they exist so reducer and store
//! tests run at memory speed with programmable outcomes and full call
//! recording.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::catalog::{CatalogSource, Venue};
use crate::error::{CatalogError, GatewayError};
use crate::gateway::{BookingGateway, BookingReceipt, BookingRequest};

/// What the mock gateway should answer.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Accept with a fresh reference.
    Accept,
    /// Decline with the given message.
    Reject(String),
    /// Fail at the transport layer.
    Transport(String),
}

/// A programmable booking gateway that records every call.
#[derive(Debug, Clone)]
pub struct MockBookingGateway {
    outcome: Arc<Mutex<MockOutcome>>,
    calls: Arc<Mutex<Vec<BookingRequest>>>,
    delay: Option<Duration>,
}

impl MockBookingGateway {
    /// A gateway that accepts every booking.
    #[must_use]
    pub fn accepting() -> Self {
        Self {
            outcome: Arc::new(Mutex::new(MockOutcome::Accept)),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// A gateway that declines every booking with `message`.
    #[must_use]
    pub fn rejecting(message: impl Into<String>) -> Self {
        let gateway = Self::accepting();
        gateway.set_outcome(MockOutcome::Reject(message.into()));
        gateway
    }

    /// Delay every answer, for timeout tests.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change the programmed outcome.
    pub fn set_outcome(&self, outcome: MockOutcome) {
        *self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = outcome;
    }

    /// Every request received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<BookingRequest> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl BookingGateway for MockBookingGateway {
    fn submit(
        &self,
        request: BookingRequest,
    ) -> impl Future<Output = Result<BookingReceipt, GatewayError>> + Send {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let outcome = self
            .outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let delay = self.delay;

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            match outcome {
                MockOutcome::Accept => Ok(BookingReceipt {
                    reference: Uuid::new_v4(),
                    message: None,
                }),
                MockOutcome::Reject(message) => Err(GatewayError::Rejected { message }),
                MockOutcome::Transport(message) => Err(GatewayError::Transport(message)),
            }
        }
    }
}

/// A catalog source with a programmable venue list or failure.
#[derive(Debug, Clone)]
pub struct MockCatalogSource {
    result: Result<Vec<Venue>, CatalogError>,
}

impl MockCatalogSource {
    /// A source that returns the given venues.
    #[must_use]
    pub const fn with_venues(venues: Vec<Venue>) -> Self {
        Self { result: Ok(venues) }
    }

    /// A source that fails to load.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            result: Err(CatalogError::Load(reason.into())),
        }
    }
}

impl CatalogSource for MockCatalogSource {
    fn load_all(&self) -> impl Future<Output = Result<Vec<Venue>, CatalogError>> + Send {
        let result = self.result.clone();
        async move { result }
    }
}
