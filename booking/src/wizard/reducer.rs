//! The booking wizard reducer.
//!
//! A three-step form with one suspending edge: submitting the contact
//! step issues exactly one call to the booking gateway, bounded by the
//! configured timeout. Everything else is synchronous state mutation.
//! Invalid transitions leave the state untouched.

use venuebook_core::effect::Effect;
use venuebook_core::environment::Clock;
use venuebook_core::reducer::Reducer;
use venuebook_core::{SmallVec, smallvec};

use crate::catalog::CatalogSource;
use crate::environment::BookingEnvironment;
use crate::error::{GatewayError, ValidationError};
use crate::gateway::{BookingGateway, BookingRequest};
use crate::wizard::actions::BookingAction;
use crate::wizard::state::{BookingDraft, MenuPreference, WizardState, WizardStep};

/// Reducer for the booking wizard.
#[derive(Debug, Clone)]
pub struct BookingWizard<C, G, V> {
    _phantom: std::marker::PhantomData<(C, G, V)>,
}

impl<C, G, V> BookingWizard<C, G, V> {
    /// Create a wizard reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C, G, V> Default for BookingWizard<C, G, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Step 1 requires a date, an event type, and a guest count.
fn validate_basics(draft: &BookingDraft) -> Result<(), ValidationError> {
    if draft.event_date.is_none() {
        return Err(ValidationError::MissingEventDate);
    }
    if draft.event_type.trim().is_empty() {
        return Err(ValidationError::MissingEventType);
    }
    if draft.guest_bucket.is_none() {
        return Err(ValidationError::MissingGuestBucket);
    }
    Ok(())
}

/// Step 2 requires a package, and a menu option unless the menu
/// preference is `None`.
fn validate_package(draft: &BookingDraft) -> Result<(), ValidationError> {
    if draft.package_id.is_none() {
        return Err(ValidationError::MissingPackage);
    }
    if draft.menu_preference != MenuPreference::None && draft.menu_id.is_none() {
        return Err(ValidationError::MissingMenu);
    }
    Ok(())
}

/// Step 3 requires a name, an address-shaped email, and a phone number.
fn validate_contact(draft: &BookingDraft) -> Result<(), ValidationError> {
    if draft.contact.name.trim().is_empty() {
        return Err(ValidationError::MissingContactName);
    }
    if draft.contact.email.trim().is_empty() || !draft.contact.email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }
    if draft.contact.phone.trim().is_empty() {
        return Err(ValidationError::MissingPhone);
    }
    Ok(())
}

impl<C, G, V> BookingWizard<C, G, V>
where
    C: Clock,
    G: BookingGateway + Clone + 'static,
    V: CatalogSource,
{
    fn apply_field_edit(state: &mut WizardState, action: &BookingAction) {
        let draft = &mut state.draft;
        match action {
            BookingAction::SetEventDate(date) => draft.event_date = Some(*date),
            BookingAction::SetEventType(event_type) => {
                draft.event_type.clone_from(event_type);
            },
            BookingAction::SetGuestBucket(bucket) => draft.guest_bucket = Some(*bucket),
            BookingAction::SelectPackage(package) => draft.package_id = Some(*package),
            BookingAction::SetMenuPreference(preference) => {
                draft.menu_preference = *preference;
                if *preference == MenuPreference::None {
                    draft.menu_id = None;
                }
            },
            BookingAction::SelectMenu(menu) => draft.menu_id = Some(*menu),
            BookingAction::SetContactName(name) => draft.contact.name.clone_from(name),
            BookingAction::SetContactEmail(email) => draft.contact.email.clone_from(email),
            BookingAction::SetContactPhone(phone) => draft.contact.phone.clone_from(phone),
            BookingAction::SetSpecialRequests(text) => {
                draft.special_requests.clone_from(text);
            },
            _ => {},
        }
        // Editing clears the last validation complaint.
        state.validation_error = None;
    }

    fn advance(state: &mut WizardState) {
        let validated = match state.step {
            WizardStep::Step1Basics => {
                validate_basics(&state.draft).map(|()| WizardStep::Step2Package)
            },
            WizardStep::Step2Package => {
                validate_package(&state.draft).map(|()| WizardStep::Step3Contact)
            },
            // NextStep means nothing elsewhere.
            _ => return,
        };

        match validated {
            Ok(next) => {
                state.step = next;
                state.validation_error = None;
            },
            Err(error) => {
                state.validation_error = Some(error);
            },
        }
    }

    fn retreat(state: &mut WizardState) {
        // Backward navigation never loses selections.
        state.step = match state.step {
            WizardStep::Step2Package => WizardStep::Step1Basics,
            WizardStep::Step3Contact | WizardStep::Failed => WizardStep::Step2Package,
            other => other,
        };
        state.validation_error = None;
    }

    fn submit(
        state: &mut WizardState,
        env: &BookingEnvironment<C, G, V>,
    ) -> SmallVec<[Effect<BookingAction>; 4]> {
        if let Err(error) = validate_contact(&state.draft) {
            state.validation_error = Some(error);
            return SmallVec::new();
        }

        // The draft cannot reach the contact step without these fields;
        // the fallback only guards against a hand-built state.
        let (Some(event_date), Some(guest_bucket), Some(package_id)) = (
            state.draft.event_date,
            state.draft.guest_bucket,
            state.draft.package_id,
        ) else {
            state.validation_error = Some(ValidationError::MissingEventDate);
            return SmallVec::new();
        };

        let request = BookingRequest {
            venue_id: state.venue_id,
            package_id,
            menu_id: state.draft.menu_id,
            event_date,
            event_type: state.draft.event_type.clone(),
            guest_bucket,
            contact: state.draft.contact.clone(),
            special_requests: state.draft.special_requests.clone(),
            requested_at: env.clock.now(),
        };

        state.step = WizardStep::Submitting;
        state.validation_error = None;
        state.submission_error = None;

        let gateway = env.gateway.clone();
        let timeout = env.config.submission_timeout;
        tracing::info!(venue = %state.venue_id, "submitting booking");

        smallvec![Effect::Future(Box::pin(async move {
            let outcome = tokio::time::timeout(timeout, gateway.submit(request)).await;
            let action = match outcome {
                Ok(Ok(receipt)) => BookingAction::SubmissionSucceeded { receipt },
                Ok(Err(error)) => {
                    tracing::warn!(%error, "booking submission failed");
                    BookingAction::SubmissionFailed {
                        reason: error.to_string(),
                    }
                },
                Err(_) => {
                    tracing::warn!("booking submission timed out");
                    BookingAction::SubmissionFailed {
                        reason: GatewayError::Timeout.to_string(),
                    }
                },
            };
            Some(action)
        }))]
    }
}

impl<C, G, V> Reducer for BookingWizard<C, G, V>
where
    C: Clock,
    G: BookingGateway + Clone + 'static,
    V: CatalogSource,
{
    type State = WizardState;
    type Action = BookingAction;
    type Environment = BookingEnvironment<C, G, V>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Field edits ==========
            edit @ (BookingAction::SetEventDate(_)
            | BookingAction::SetEventType(_)
            | BookingAction::SetGuestBucket(_)
            | BookingAction::SelectPackage(_)
            | BookingAction::SetMenuPreference(_)
            | BookingAction::SelectMenu(_)
            | BookingAction::SetContactName(_)
            | BookingAction::SetContactEmail(_)
            | BookingAction::SetContactPhone(_)
            | BookingAction::SetSpecialRequests(_)) => {
                if state.accepts_edits() {
                    Self::apply_field_edit(state, &edit);
                }
                SmallVec::new()
            },

            // ========== Navigation ==========
            BookingAction::NextStep => {
                Self::advance(state);
                SmallVec::new()
            },

            BookingAction::PreviousStep => {
                Self::retreat(state);
                SmallVec::new()
            },

            BookingAction::Submit => match state.step {
                // Failed behaves as the contact step with an error
                // banner; resubmission is the manual retry.
                WizardStep::Step3Contact | WizardStep::Failed => Self::submit(state, env),
                // At most one submission in flight.
                _ => SmallVec::new(),
            },

            BookingAction::Close => {
                // Close is ignored mid-submission; anywhere else it
                // discards the draft with no confirmation prompt.
                if state.step != WizardStep::Submitting {
                    *state = WizardState::new(state.venue_id);
                }
                SmallVec::new()
            },

            // ========== Effect feedback ==========
            BookingAction::SubmissionSucceeded { receipt } => {
                if state.step == WizardStep::Submitting {
                    state.step = WizardStep::Confirmed;
                    state.receipt = Some(receipt);
                    return smallvec![Effect::Delay {
                        duration: env.config.confirmation_reset_delay,
                        action: Box::new(BookingAction::ConfirmationElapsed),
                    }];
                }
                SmallVec::new()
            },

            BookingAction::SubmissionFailed { reason } => {
                if state.step == WizardStep::Submitting {
                    state.step = WizardStep::Failed;
                    state.submission_error = Some(reason);
                }
                SmallVec::new()
            },

            BookingAction::ConfirmationElapsed => {
                if state.step == WizardStep::Confirmed {
                    *state = WizardState::new(state.venue_id);
                }
                SmallVec::new()
            },
        }
    }
}
