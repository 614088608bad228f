//! The booking submission endpoint contract.
//!
//! The wizard treats the endpoint as an opaque collaborator: it accepts
//! a serialized draft and answers with a success boolean plus an
//! optional error message. [`HttpBookingGateway`] is the production
//! implementation; tests inject [`crate::mocks::MockBookingGateway`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{MenuId, PackageId, VenueId};
use crate::error::GatewayError;
use crate::session::SessionContext;
use crate::wizard::state::{ContactInfo, GuestBucket};

/// A booking submission, serialized from the wizard draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// The venue being booked.
    pub venue_id: VenueId,
    /// Selected package.
    pub package_id: PackageId,
    /// Selected menu option, if the booking carries a menu.
    pub menu_id: Option<MenuId>,
    /// Event date.
    pub event_date: NaiveDate,
    /// Event type.
    pub event_type: String,
    /// Guest-count bucket.
    pub guest_bucket: GuestBucket,
    /// Contact details.
    pub contact: ContactInfo,
    /// Free-text special requests.
    pub special_requests: String,
    /// When the user submitted, stamped by the wizard's clock.
    pub requested_at: DateTime<Utc>,
}

/// A confirmed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingReceipt {
    /// Booking reference issued by the endpoint.
    pub reference: Uuid,
    /// Optional message to show alongside the confirmation.
    pub message: Option<String>,
}

/// Submits bookings to the external endpoint.
pub trait BookingGateway: Send + Sync {
    /// Submit a booking.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Rejected`] when the endpoint declines the
    ///   booking
    /// - [`GatewayError::Transport`] when the request never completes
    /// - [`GatewayError::Timeout`] when the endpoint takes too long
    fn submit(
        &self,
        request: BookingRequest,
    ) -> impl Future<Output = Result<BookingReceipt, GatewayError>> + Send;
}

/// Wire shape of the endpoint's reply.
#[derive(Debug, Deserialize)]
struct BookingResponse {
    success: bool,
    reference: Option<Uuid>,
    error: Option<String>,
}

/// Production gateway over HTTP.
///
/// Sends the request as JSON with the session's bearer token and a
/// per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpBookingGateway {
    client: reqwest::Client,
    endpoint: String,
    session: SessionContext,
    timeout: std::time::Duration,
}

impl HttpBookingGateway {
    /// Create a gateway posting to `endpoint` as `session`.
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        session: SessionContext,
        timeout: std::time::Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            session,
            timeout,
        }
    }
}

impl BookingGateway for HttpBookingGateway {
    fn submit(
        &self,
        request: BookingRequest,
    ) -> impl Future<Output = Result<BookingReceipt, GatewayError>> + Send {
        let call = self
            .client
            .post(self.endpoint.as_str())
            .bearer_auth(self.session.bearer_token())
            .timeout(self.timeout)
            .json(&request)
            .send();

        async move {
            let response = call.await.map_err(|error| {
                if error.is_timeout() {
                    GatewayError::Timeout
                } else {
                    GatewayError::Transport(error.to_string())
                }
            })?;

            let body: BookingResponse = response
                .json()
                .await
                .map_err(|error| GatewayError::Transport(error.to_string()))?;

            match (body.success, body.reference) {
                (true, Some(reference)) => Ok(BookingReceipt {
                    reference,
                    message: body.error,
                }),
                (true, None) => Err(GatewayError::Transport(
                    "endpoint reported success without a reference".to_string(),
                )),
                (false, _) => Err(GatewayError::Rejected {
                    message: body
                        .error
                        .unwrap_or_else(|| "booking was declined".to_string()),
                }),
            }
        }
    }
}
