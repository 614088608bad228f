//! The booking wizard state machine.
//!
//! Step 1 collects the date, event type, and guest count; step 2 the
//! package and menu; step 3 the contact details. Submission is the only
//! suspending edge. See [`reducer::BookingWizard`] for the transition
//! table.

pub mod actions;
pub mod reducer;
pub mod state;

pub use actions::BookingAction;
pub use reducer::BookingWizard;
pub use state::{
    BookingDraft, ContactInfo, GuestBucket, MenuPreference, WizardState, WizardStep,
};

#[cfg(test)]
mod tests;
