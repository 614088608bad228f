//! Booking wizard state types.
//!
//! A [`WizardState`] belongs to exactly one open venue modal. It is
//! created empty when the modal opens, mutated field-by-field as the
//! form is filled, and discarded on close or after a confirmed booking
//! — never persisted, never shared between venues.

use serde::{Deserialize, Serialize};

use crate::catalog::{MenuId, PackageId, VenueId};
use crate::error::ValidationError;
use crate::gateway::BookingReceipt;

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Step 1: date, event type, guest count.
    Step1Basics,
    /// Step 2: package and menu selection.
    Step2Package,
    /// Step 3: contact details and submission.
    Step3Contact,
    /// A submission is in flight; the form is disabled.
    Submitting,
    /// The booking was accepted; the confirmation view is showing.
    Confirmed,
    /// The last submission failed; the contact form shows the error and
    /// the user may resubmit.
    Failed,
}

/// Guest-count buckets offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuestBucket {
    /// Up to 50 guests.
    UpTo50,
    /// 51–100 guests.
    UpTo100,
    /// 101–250 guests.
    UpTo250,
    /// 251–500 guests.
    UpTo500,
    /// More than 500 guests.
    Above500,
}

impl GuestBucket {
    /// Display label matching the form's options.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo50 => "Up to 50",
            Self::UpTo100 => "51-100",
            Self::UpTo250 => "101-250",
            Self::UpTo500 => "251-500",
            Self::Above500 => "500+",
        }
    }
}

/// Which menu variant the guest wants, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuPreference {
    /// No menu with this booking; step 2 is valid without a menu
    /// selection.
    #[default]
    None,
    /// Vegetarian menu.
    Veg,
    /// Non-vegetarian menu.
    NonVeg,
}

/// Contact details collected at step 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

/// The form data the wizard accumulates before submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    /// Chosen event date.
    pub event_date: Option<chrono::NaiveDate>,
    /// Chosen event type.
    pub event_type: String,
    /// Chosen guest-count bucket.
    pub guest_bucket: Option<GuestBucket>,
    /// Selected package.
    pub package_id: Option<PackageId>,
    /// Menu preference; `None` means this booking carries no menu.
    pub menu_preference: MenuPreference,
    /// Selected menu option, required unless the preference is `None`.
    pub menu_id: Option<MenuId>,
    /// Contact details.
    pub contact: ContactInfo,
    /// Free-text special requests.
    pub special_requests: String,
}

impl BookingDraft {
    /// True when nothing has been entered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Full wizard state for one open venue modal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    /// The venue this wizard books.
    pub venue_id: VenueId,
    /// Current step.
    pub step: WizardStep,
    /// Accumulated form data.
    pub draft: BookingDraft,
    /// Validation error blocking the last attempted transition.
    pub validation_error: Option<ValidationError>,
    /// Error message from the last failed submission.
    pub submission_error: Option<String>,
    /// Receipt for a confirmed booking.
    pub receipt: Option<BookingReceipt>,
}

impl WizardState {
    /// Fresh wizard at step 1 with an empty draft.
    #[must_use]
    pub fn new(venue_id: VenueId) -> Self {
        Self {
            venue_id,
            step: WizardStep::Step1Basics,
            draft: BookingDraft::default(),
            validation_error: None,
            submission_error: None,
            receipt: None,
        }
    }

    /// Whether the form accepts field edits right now.
    ///
    /// Everything is editable except while a submission is in flight or
    /// the confirmation view is showing.
    #[must_use]
    pub const fn accepts_edits(&self) -> bool {
        !matches!(self.step, WizardStep::Submitting | WizardStep::Confirmed)
    }
}
