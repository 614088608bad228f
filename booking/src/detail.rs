//! The venue detail modal.
//!
//! One modal per venue: tab strip (overview, amenities, packages,
//! policies), an image carousel, and the booking wizard mounted at step
//! one. The modal owns its wizard state exclusively; two open modals
//! can never observe each other's drafts.

use venuebook_core::effect::Effect;
use venuebook_core::environment::Clock;
use venuebook_core::reducer::Reducer;
use venuebook_core::SmallVec;

use crate::catalog::{CatalogSource, Venue};
use crate::environment::BookingEnvironment;
use crate::gateway::BookingGateway;
use crate::wizard::{BookingAction, BookingWizard, WizardState};

/// Tabs of the detail modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DetailTab {
    /// Description, pricing, spaces.
    #[default]
    Overview,
    /// Amenity list.
    Amenities,
    /// Packages and menus.
    Packages,
    /// Policies and FAQs.
    Policies,
}

/// State of one open venue modal.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    /// The venue on display.
    pub venue: Venue,
    /// Selected tab.
    pub tab: DetailTab,
    /// Carousel position into `venue.images`.
    pub carousel_index: usize,
    /// The embedded booking wizard.
    pub wizard: WizardState,
}

impl DetailState {
    /// Open a modal for a venue: overview tab, first image, wizard at
    /// step one with an empty draft.
    #[must_use]
    pub fn open(venue: Venue) -> Self {
        let wizard = WizardState::new(venue.id);
        Self {
            venue,
            tab: DetailTab::default(),
            carousel_index: 0,
            wizard,
        }
    }
}

/// Everything the detail modal can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction {
    /// Switch tabs.
    SelectTab(DetailTab),
    /// Advance the carousel, wrapping at the end.
    NextImage,
    /// Step the carousel back, wrapping at the front.
    PreviousImage,
    /// An action for the embedded wizard.
    Wizard(BookingAction),
}

/// Reducer for the detail modal.
///
/// Tab and carousel changes are pure; wizard actions are delegated and
/// the wizard's effects are lifted back into [`DetailAction::Wizard`]
/// so their feedback routes through this modal.
#[derive(Debug, Clone)]
pub struct DetailReducer<C, G, V> {
    wizard: BookingWizard<C, G, V>,
}

impl<C, G, V> DetailReducer<C, G, V> {
    /// Create a detail reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            wizard: BookingWizard::new(),
        }
    }
}

impl<C, G, V> Default for DetailReducer<C, G, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, G, V> Reducer for DetailReducer<C, G, V>
where
    C: Clock,
    G: BookingGateway + Clone + 'static,
    V: CatalogSource,
{
    type State = DetailState;
    type Action = DetailAction;
    type Environment = BookingEnvironment<C, G, V>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DetailAction::SelectTab(tab) => {
                state.tab = tab;
                SmallVec::new()
            },

            DetailAction::NextImage => {
                let count = state.venue.images.len();
                if count > 0 {
                    state.carousel_index = (state.carousel_index + 1) % count;
                }
                SmallVec::new()
            },

            DetailAction::PreviousImage => {
                let count = state.venue.images.len();
                if count > 0 {
                    state.carousel_index = (state.carousel_index + count - 1) % count;
                }
                SmallVec::new()
            },

            DetailAction::Wizard(wizard_action) => self
                .wizard
                .reduce(&mut state.wizard, wizard_action, env)
                .into_iter()
                .map(|effect| effect.map(DetailAction::Wizard))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StaticCatalog, VenueId, seed_catalog};
    use crate::config::WizardConfig;
    use crate::mocks::MockBookingGateway;
    use crate::wizard::WizardStep;
    use venuebook_testing::{FixedClock, ReducerTest, test_clock};

    type TestReducer = DetailReducer<FixedClock, MockBookingGateway, StaticCatalog>;

    fn test_env() -> BookingEnvironment<FixedClock, MockBookingGateway, StaticCatalog> {
        BookingEnvironment::new(
            test_clock(),
            MockBookingGateway::accepting(),
            StaticCatalog::seeded(),
            WizardConfig::default(),
        )
    }

    fn venue(id: u32) -> Venue {
        seed_catalog()
            .into_iter()
            .find(|v| v.id == VenueId(id))
            .unwrap()
    }

    #[test]
    fn opening_starts_on_overview_with_a_fresh_wizard() {
        let state = DetailState::open(venue(7));
        assert_eq!(state.tab, DetailTab::Overview);
        assert_eq!(state.carousel_index, 0);
        assert_eq!(state.wizard.step, WizardStep::Step1Basics);
        assert!(state.wizard.draft.is_empty());
    }

    #[test]
    fn tab_selection_is_pure() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(DetailState::open(venue(7)))
            .when_action(DetailAction::SelectTab(DetailTab::Packages))
            .then_state(|state| assert_eq!(state.tab, DetailTab::Packages))
            .then_effects(venuebook_testing::assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn carousel_wraps_in_both_directions() {
        // Venue 7 has two images.
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(DetailState::open(venue(7)))
            .when_action(DetailAction::PreviousImage)
            .then_state(|state| assert_eq!(state.carousel_index, 1))
            .run();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(DetailState::open(venue(7)))
            .when_action(DetailAction::NextImage)
            .when_action(DetailAction::NextImage)
            .then_state(|state| assert_eq!(state.carousel_index, 0))
            .run();
    }

    #[test]
    fn carousel_ignores_venues_without_images() {
        let mut imageless = venue(7);
        imageless.images.clear();

        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(DetailState::open(imageless))
            .when_action(DetailAction::NextImage)
            .then_state(|state| assert_eq!(state.carousel_index, 0))
            .run();
    }

    #[test]
    fn wizard_actions_pass_through() {
        ReducerTest::new(TestReducer::new())
            .with_env(test_env())
            .given_state(DetailState::open(venue(7)))
            .when_action(DetailAction::Wizard(BookingAction::SetEventType(
                "wedding".to_string(),
            )))
            .then_state(|state| assert_eq!(state.wizard.draft.event_type, "wedding"))
            .run();
    }
}
