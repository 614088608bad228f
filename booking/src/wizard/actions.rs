//! Booking wizard actions.
//!
//! User interactions plus the completion callbacks of the submission
//! effect. The reducer is the only consumer.

use chrono::NaiveDate;

use crate::catalog::{MenuId, PackageId};
use crate::gateway::BookingReceipt;
use crate::wizard::state::{GuestBucket, MenuPreference};

/// Everything the booking wizard can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    // ========== Step 1 field edits ==========
    /// Choose the event date.
    SetEventDate(NaiveDate),
    /// Choose the event type.
    SetEventType(String),
    /// Choose the guest-count bucket.
    SetGuestBucket(GuestBucket),

    // ========== Step 2 selections ==========
    /// Select a package.
    SelectPackage(PackageId),
    /// Choose the menu variant (or none).
    SetMenuPreference(MenuPreference),
    /// Select a menu option.
    SelectMenu(MenuId),

    // ========== Step 3 field edits ==========
    /// Set the contact name.
    SetContactName(String),
    /// Set the contact email.
    SetContactEmail(String),
    /// Set the contact phone.
    SetContactPhone(String),
    /// Set free-text special requests.
    SetSpecialRequests(String),

    // ========== Navigation ==========
    /// Advance to the next step, validating the current one.
    NextStep,
    /// Go back one step, retaining everything entered.
    PreviousStep,
    /// Submit the booking from the contact step.
    Submit,
    /// Close the modal, discarding the draft.
    Close,

    // ========== Effect feedback ==========
    /// The gateway accepted the booking.
    SubmissionSucceeded {
        /// Receipt issued by the endpoint.
        receipt: BookingReceipt,
    },
    /// The gateway declined, failed, or timed out.
    SubmissionFailed {
        /// Message to show on the contact step.
        reason: String,
    },
    /// The confirmation view has been up long enough; reset and close.
    ConfirmationElapsed,
}
