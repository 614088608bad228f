//! # Venuebook Booking
//!
//! Client-side venue discovery and the booking wizard, built on the
//! Venuebook reducer architecture.
//!
//! ## Features
//!
//! - **Catalog**: hall / hotel / restaurant records as a tagged variant
//!   over one shared base, with validation and a static seed
//! - **Filter engine**: pure conjunction of optional predicates, with
//!   sorting as a separate re-applicable step
//! - **Favorites**: a persisted favorites set and a bounded
//!   recently-viewed list over key-value storage
//! - **Booking wizard**: a three-step form state machine whose only
//!   suspending edge is the submission call
//! - **Detail modal and browse page**: composition of the above into
//!   the page the user actually drives
//!
//! ## Architecture
//!
//! Every feature is a reducer:
//!
//! ```text
//! Action → Reducer → (State, Effects) → Effect Execution → More Actions
//! ```
//!
//! External collaborators (booking endpoint, catalog source, key-value
//! storage) sit behind traits in the environment, so every test runs at
//! memory speed against mocks.
//!
//! ## Example: filtering and opening a venue
//!
//! ```
//! use venuebook_booking::catalog::seed_catalog;
//! use venuebook_booking::filter::{FilterCriteria, filter};
//!
//! let catalog = seed_catalog();
//! let criteria = FilterCriteria::default()
//!     .with_min_capacity(400)
//!     .with_max_budget(60_000);
//!
//! let results = filter(&catalog, &criteria);
//! assert!(results.iter().all(|v| v.max_guests >= 400));
//! ```

pub mod browse;
pub mod catalog;
pub mod config;
pub mod detail;
pub mod environment;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod gateway;
pub mod mocks;
pub mod session;
pub mod storage;
pub mod wizard;

// Re-export main types for convenience
pub use browse::{BrowseAction, BrowseReducer, BrowseState};
pub use catalog::{Venue, VenueId, VenueKind, seed_catalog};
pub use detail::{DetailAction, DetailState, DetailTab};
pub use environment::BookingEnvironment;
pub use error::{CatalogError, GatewayError, ValidationError};
pub use favorites::FavoritesStore;
pub use filter::{FilterCriteria, SortBy, filter, sort_venues};
pub use gateway::{BookingGateway, BookingReceipt, BookingRequest};
pub use wizard::{BookingAction, BookingDraft, BookingWizard, WizardState, WizardStep};
