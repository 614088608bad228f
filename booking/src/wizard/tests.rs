//! Wizard reducer unit tests.
//!
//! Every transition in the step machine, driven through the
//! Given-When-Then harness with mock collaborators.

use chrono::NaiveDate;
use venuebook_testing::{FixedClock, ReducerTest, assertions, test_clock};

use crate::catalog::{MenuId, PackageId, StaticCatalog, VenueId};
use crate::config::WizardConfig;
use crate::environment::BookingEnvironment;
use crate::error::ValidationError;
use crate::gateway::BookingReceipt;
use crate::mocks::MockBookingGateway;
use crate::wizard::actions::BookingAction;
use crate::wizard::reducer::BookingWizard;
use crate::wizard::state::{
    ContactInfo, GuestBucket, MenuPreference, WizardState, WizardStep,
};

type TestEnv = BookingEnvironment<FixedClock, MockBookingGateway, StaticCatalog>;
type TestWizard = BookingWizard<FixedClock, MockBookingGateway, StaticCatalog>;

fn test_env() -> TestEnv {
    BookingEnvironment::new(
        test_clock(),
        MockBookingGateway::accepting(),
        StaticCatalog::seeded(),
        WizardConfig::default(),
    )
}

fn day(year: i32, month: u32, dom: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, dom).unwrap()
}

/// A draft that has validly passed steps 1 and 2.
fn state_at_contact_step() -> WizardState {
    let mut state = WizardState::new(VenueId(7));
    state.draft.event_date = Some(day(2023, 12, 1));
    state.draft.event_type = "wedding".to_string();
    state.draft.guest_bucket = Some(GuestBucket::UpTo500);
    state.draft.package_id = Some(PackageId(71));
    state.draft.menu_preference = MenuPreference::Veg;
    state.draft.menu_id = Some(MenuId(701));
    state.draft.contact = ContactInfo {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9000000001".to_string(),
    };
    state.step = WizardStep::Step3Contact;
    state
}

#[test]
fn next_without_date_stays_on_step_one() {
    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(WizardState::new(VenueId(7)))
        .when_action(BookingAction::SetEventType("wedding".to_string()))
        .when_action(BookingAction::SetGuestBucket(GuestBucket::UpTo100))
        .when_action(BookingAction::NextStep)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step1Basics);
            assert_eq!(
                state.validation_error,
                Some(ValidationError::MissingEventDate)
            );
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn valid_basics_advance_to_package_step() {
    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(WizardState::new(VenueId(7)))
        .when_action(BookingAction::SetEventDate(day(2023, 12, 1)))
        .when_action(BookingAction::SetEventType("wedding".to_string()))
        .when_action(BookingAction::SetGuestBucket(GuestBucket::UpTo500))
        .when_action(BookingAction::NextStep)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step2Package);
            assert!(state.validation_error.is_none());
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn package_step_requires_a_package() {
    let mut state = WizardState::new(VenueId(7));
    state.step = WizardStep::Step2Package;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::NextStep)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step2Package);
            assert_eq!(state.validation_error, Some(ValidationError::MissingPackage));
        })
        .run();
}

#[test]
fn menu_preference_other_than_none_requires_a_menu() {
    let mut state = WizardState::new(VenueId(7));
    state.step = WizardStep::Step2Package;
    state.draft.package_id = Some(PackageId(71));
    state.draft.menu_preference = MenuPreference::Veg;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::NextStep)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step2Package);
            assert_eq!(state.validation_error, Some(ValidationError::MissingMenu));
        })
        .run();
}

#[test]
fn no_menu_preference_skips_menu_requirement() {
    let mut state = WizardState::new(VenueId(7));
    state.step = WizardStep::Step2Package;
    state.draft.package_id = Some(PackageId(71));

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::NextStep)
        .then_state(|state| assert_eq!(state.step, WizardStep::Step3Contact))
        .run();
}

#[test]
fn going_back_keeps_package_selections() {
    let mut state = WizardState::new(VenueId(7));
    state.step = WizardStep::Step2Package;
    state.draft.package_id = Some(PackageId(71));
    state.draft.menu_preference = MenuPreference::Veg;
    state.draft.menu_id = Some(MenuId(701));

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::PreviousStep)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step1Basics);
            assert_eq!(state.draft.package_id, Some(PackageId(71)));
            assert_eq!(state.draft.menu_id, Some(MenuId(701)));
        })
        .run();
}

#[test]
fn email_without_at_sign_blocks_submission() {
    let mut state = state_at_contact_step();
    state.draft.contact.email = "not-an-email".to_string();

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::Submit)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step3Contact);
            assert_eq!(state.validation_error, Some(ValidationError::InvalidEmail));
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn valid_submit_transitions_to_submitting_with_one_call() {
    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state_at_contact_step())
        .when_action(BookingAction::Submit)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Submitting);
            assert!(state.submission_error.is_none());
        })
        .then_effects(|effects| {
            assertions::assert_effects_count(effects, 1);
            assertions::assert_has_future_effect(effects);
        })
        .run();
}

#[test]
fn submit_while_submitting_is_ignored() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Submitting;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::Submit)
        .then_state(|state| assert_eq!(state.step, WizardStep::Submitting))
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn success_feedback_confirms_and_schedules_reset() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Submitting;
    let receipt = BookingReceipt {
        reference: uuid::Uuid::new_v4(),
        message: None,
    };
    let expected = receipt.clone();

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::SubmissionSucceeded { receipt })
        .then_state(move |state| {
            assert_eq!(state.step, WizardStep::Confirmed);
            assert_eq!(state.receipt.as_ref(), Some(&expected));
        })
        .then_effects(assertions::assert_has_delay_effect)
        .run();
}

#[test]
fn failure_feedback_preserves_contact_fields() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Submitting;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::SubmissionFailed {
            reason: "gateway unavailable".to_string(),
        })
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Failed);
            assert_eq!(
                state.submission_error.as_deref(),
                Some("gateway unavailable")
            );
            // Nothing the user typed is lost.
            assert_eq!(state.draft.contact.name, "Asha Rao");
            assert_eq!(state.draft.contact.email, "asha@example.com");
            assert_eq!(state.draft.contact.phone, "9000000001");
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn resubmit_after_failure_goes_back_in_flight() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Failed;
    state.submission_error = Some("gateway unavailable".to_string());

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::Submit)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Submitting);
            assert!(state.submission_error.is_none());
        })
        .then_effects(assertions::assert_has_future_effect)
        .run();
}

#[test]
fn close_discards_the_draft() {
    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state_at_contact_step())
        .when_action(BookingAction::Close)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step1Basics);
            assert!(state.draft.is_empty());
        })
        .then_effects(assertions::assert_no_effects)
        .run();
}

#[test]
fn close_is_ignored_mid_submission() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Submitting;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::Close)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Submitting);
            assert!(!state.draft.is_empty());
        })
        .run();
}

#[test]
fn confirmation_elapsed_resets_the_wizard() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Confirmed;
    state.receipt = Some(BookingReceipt {
        reference: uuid::Uuid::new_v4(),
        message: None,
    });

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::ConfirmationElapsed)
        .then_state(|state| {
            assert_eq!(state.step, WizardStep::Step1Basics);
            assert!(state.draft.is_empty());
            assert!(state.receipt.is_none());
        })
        .run();
}

#[test]
fn edits_are_dropped_while_submitting() {
    let mut state = state_at_contact_step();
    state.step = WizardStep::Submitting;

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::SetContactName("Someone Else".to_string()))
        .then_state(|state| assert_eq!(state.draft.contact.name, "Asha Rao"))
        .run();
}

#[test]
fn choosing_no_menu_clears_a_previous_selection() {
    let mut state = WizardState::new(VenueId(7));
    state.step = WizardStep::Step2Package;
    state.draft.package_id = Some(PackageId(71));
    state.draft.menu_preference = MenuPreference::Veg;
    state.draft.menu_id = Some(MenuId(701));

    ReducerTest::new(TestWizard::new())
        .with_env(test_env())
        .given_state(state)
        .when_action(BookingAction::SetMenuPreference(MenuPreference::None))
        .then_state(|state| {
            assert_eq!(state.draft.menu_preference, MenuPreference::None);
            assert_eq!(state.draft.menu_id, None);
        })
        .run();
}
