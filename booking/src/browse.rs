//! The venue browse page.
//!
//! Page-level orchestration: the catalog load, the filter criteria and
//! sort order, the favorites store, and at most one open detail modal.
//! Control flow follows the page: criteria edits recompute the visible
//! list, opening a venue records a view and mounts the modal, the modal
//! hosts the wizard.

use venuebook_core::SmallVec;
use venuebook_core::effect::Effect;
use venuebook_core::environment::Clock;
use venuebook_core::reducer::Reducer;
use venuebook_core::smallvec;

use crate::catalog::{CatalogSource, Venue, VenueId};
use crate::detail::{DetailAction, DetailReducer, DetailState};
use crate::environment::BookingEnvironment;
use crate::error::CatalogError;
use crate::favorites::FavoritesStore;
use crate::filter::{FilterCriteria, SortBy, filter, sort_venues};
use crate::gateway::BookingGateway;
use crate::storage::KeyValueStorage;
use crate::wizard::{BookingAction, WizardStep};

/// State of the browse page.
#[derive(Debug, Clone)]
pub struct BrowseState<S: KeyValueStorage> {
    /// Loaded venue records; read-only once loaded.
    pub catalog: Vec<Venue>,
    /// Page-level catalog failure, distinct from per-venue errors.
    pub catalog_error: Option<CatalogError>,
    /// Current filter criteria.
    pub criteria: FilterCriteria,
    /// Current sort order, if the user picked one.
    pub sort: Option<SortBy>,
    /// Venues passing the criteria, in sort order.
    pub results: Vec<Venue>,
    /// Favorites and recently-viewed venues.
    pub favorites: FavoritesStore<S>,
    /// The open detail modal, if any.
    pub modal: Option<DetailState>,
}

impl<S: KeyValueStorage> BrowseState<S> {
    /// Fresh page with an empty catalog and the given favorites store.
    #[must_use]
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        Self {
            catalog: Vec::new(),
            catalog_error: None,
            criteria: FilterCriteria::default(),
            sort: None,
            results: Vec::new(),
            favorites,
            modal: None,
        }
    }

    fn recompute_results(&mut self) {
        self.results = filter(&self.catalog, &self.criteria);
        if let Some(sort) = self.sort {
            sort_venues(&mut self.results, sort);
        }
    }
}

/// Everything the browse page can receive.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseAction {
    /// Fetch the catalog from the configured source.
    LoadCatalog,
    /// The catalog arrived.
    CatalogLoaded(Vec<Venue>),
    /// The catalog could not be loaded.
    CatalogLoadFailed(CatalogError),
    /// Replace the filter criteria and recompute results.
    SetCriteria(FilterCriteria),
    /// Pick a sort order and re-sort the current results.
    SetSort(SortBy),
    /// Pick a sort order from a free-text query value; unrecognized
    /// values leave the order untouched.
    SetSortQuery(String),
    /// Flip a venue's favorite membership.
    ToggleFavorite(VenueId),
    /// Open a venue's detail modal.
    OpenVenue(VenueId),
    /// Close the modal, discarding any draft.
    CloseModal,
    /// An action for the open modal.
    Detail(DetailAction),
}

/// Reducer for the browse page.
///
/// Generic over the storage substrate `S` backing the favorites store
/// in its state.
#[derive(Debug, Clone)]
pub struct BrowseReducer<C, G, V, S> {
    detail: DetailReducer<C, G, V>,
    _storage: std::marker::PhantomData<S>,
}

impl<C, G, V, S> BrowseReducer<C, G, V, S> {
    /// Create a browse reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            detail: DetailReducer::new(),
            _storage: std::marker::PhantomData,
        }
    }
}

impl<C, G, V, S> Default for BrowseReducer<C, G, V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, G, V, S> Reducer for BrowseReducer<C, G, V, S>
where
    C: Clock,
    G: BookingGateway + Clone + 'static,
    V: CatalogSource + Clone + 'static,
    S: KeyValueStorage,
{
    type State = BrowseState<S>;
    type Action = BrowseAction;
    type Environment = BookingEnvironment<C, G, V>;

    #[allow(clippy::too_many_lines)] // One arm per page interaction
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BrowseAction::LoadCatalog => {
                let venues = env.venues.clone();
                smallvec![Effect::Future(Box::pin(async move {
                    let action = match venues.load_all().await {
                        Ok(venues) => BrowseAction::CatalogLoaded(venues),
                        Err(error) => BrowseAction::CatalogLoadFailed(error),
                    };
                    Some(action)
                }))]
            },

            BrowseAction::CatalogLoaded(venues) => {
                // Records violating catalog invariants are dropped, not
                // allowed to poison the page.
                state.catalog = venues
                    .into_iter()
                    .filter(|venue| match venue.validate() {
                        Ok(()) => true,
                        Err(error) => {
                            tracing::warn!(%error, "dropping invalid venue");
                            false
                        },
                    })
                    .collect();
                state.catalog_error = None;
                state.recompute_results();
                tracing::info!(count = state.catalog.len(), "catalog loaded");
                SmallVec::new()
            },

            BrowseAction::CatalogLoadFailed(error) => {
                tracing::warn!(%error, "catalog load failed");
                state.catalog_error = Some(error);
                SmallVec::new()
            },

            BrowseAction::SetCriteria(criteria) => {
                state.criteria = criteria;
                state.recompute_results();
                SmallVec::new()
            },

            BrowseAction::SetSort(sort) => {
                state.sort = Some(sort);
                sort_venues(&mut state.results, sort);
                SmallVec::new()
            },

            BrowseAction::SetSortQuery(query) => {
                // Unrecognized values are a no-op so the page stays
                // responsive to partial input.
                if let Some(sort) = SortBy::from_query(&query) {
                    state.sort = Some(sort);
                    sort_venues(&mut state.results, sort);
                }
                SmallVec::new()
            },

            BrowseAction::ToggleFavorite(id) => {
                state.favorites.toggle_favorite(id);
                SmallVec::new()
            },

            BrowseAction::OpenVenue(id) => {
                let Some(venue) = state.catalog.iter().find(|v| v.id == id).cloned()
                else {
                    tracing::warn!(venue = %id, "open requested for unknown venue");
                    return SmallVec::new();
                };
                state.favorites.record_view(id);
                state.modal = Some(DetailState::open(venue));
                SmallVec::new()
            },

            BrowseAction::CloseModal => {
                match &state.modal {
                    // Close is ignored while a submission is in flight.
                    Some(modal) if modal.wizard.step == WizardStep::Submitting => {},
                    _ => state.modal = None,
                }
                SmallVec::new()
            },

            BrowseAction::Detail(detail_action) => {
                let Some(modal) = state.modal.as_mut() else {
                    return SmallVec::new();
                };

                let was_confirmed = modal.wizard.step == WizardStep::Confirmed;
                let effects = self.detail.reduce(modal, detail_action.clone(), env);

                // The confirmation view timing out closes the modal.
                if was_confirmed
                    && detail_action
                        == DetailAction::Wizard(BookingAction::ConfirmationElapsed)
                {
                    state.modal = None;
                }

                effects
                    .into_iter()
                    .map(|effect| effect.map(BrowseAction::Detail))
                    .collect()
            },
        }
    }
}
