//! The filter engine.
//!
//! Pure functions from a venue list and a criteria object to a filtered
//! subset. Every present criterion is a predicate and a venue must pass
//! all of them (logical AND); an absent criterion matches everything.
//! Sorting is a separate, explicit step so it can be re-applied without
//! re-filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Venue, VenueKind};

/// Indoor/outdoor preference.
///
/// Free-text query values that are not recognized parse to [`Any`],
/// which always passes — the page must stay responsive while the user
/// is still typing.
///
/// [`Any`]: SpacePreference::Any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpacePreference {
    /// No preference; every venue passes.
    #[default]
    Any,
    /// At least one indoor space required.
    Indoor,
    /// At least one open-air space required.
    Outdoor,
}

impl SpacePreference {
    /// Parse a query value, treating anything unrecognized as [`Any`].
    ///
    /// [`Any`]: SpacePreference::Any
    #[must_use]
    pub fn from_query(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "indoor" => Self::Indoor,
            "outdoor" => Self::Outdoor,
            _ => Self::Any,
        }
    }
}

/// Sort orders for a filtered venue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortBy {
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Best rated first.
    RatingDesc,
    /// Largest first.
    CapacityDesc,
}

impl SortBy {
    /// Parse a query value; unrecognized values yield `None` and the
    /// caller leaves the current order untouched.
    #[must_use]
    pub fn from_query(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price-asc" => Some(Self::PriceAsc),
            "price-desc" => Some(Self::PriceDesc),
            "rating-desc" => Some(Self::RatingDesc),
            "capacity-desc" => Some(Self::CapacityDesc),
            _ => None,
        }
    }
}

/// User-specified constraints over the catalog.
///
/// Every field is optional; [`FilterCriteria::default`] matches the
/// whole catalog. An empty amenity list means no amenity constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// City, matched case-insensitively.
    pub city: Option<String>,
    /// Locality, matched case-insensitively.
    pub locality: Option<String>,
    /// Event or cuisine type the venue must host.
    pub event_type: Option<String>,
    /// Minimum guest count the venue must hold.
    pub min_capacity: Option<u32>,
    /// Maximum base price the user will pay.
    pub max_budget: Option<u32>,
    /// Date the venue must be bookable on.
    pub date: Option<NaiveDate>,
    /// Amenities that must all be included.
    pub amenities: Vec<String>,
    /// Indoor/outdoor preference.
    pub space_preference: SpacePreference,
}

impl FilterCriteria {
    /// Constrain to a city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Constrain to a minimum capacity.
    #[must_use]
    pub const fn with_min_capacity(mut self, guests: u32) -> Self {
        self.min_capacity = Some(guests);
        self
    }

    /// Constrain to a maximum budget.
    #[must_use]
    pub const fn with_max_budget(mut self, budget: u32) -> Self {
        self.max_budget = Some(budget);
        self
    }

    /// Constrain to a date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// True when no field constrains anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Apply every present predicate to the catalog and return the venues
/// that pass all of them.
#[must_use]
pub fn filter(catalog: &[Venue], criteria: &FilterCriteria) -> Vec<Venue> {
    catalog
        .iter()
        .filter(|venue| matches_criteria(venue, criteria))
        .cloned()
        .collect()
}

/// Whether one venue passes every present predicate.
///
/// The predicates commute; this is a plain conjunction with no ordering
/// significance.
#[must_use]
pub fn matches_criteria(venue: &Venue, criteria: &FilterCriteria) -> bool {
    let city_ok = criteria
        .city
        .as_deref()
        .is_none_or(|city| venue.city.eq_ignore_ascii_case(city));

    let locality_ok = criteria
        .locality
        .as_deref()
        .is_none_or(|locality| venue.locality.eq_ignore_ascii_case(locality));

    let event_ok = criteria
        .event_type
        .as_deref()
        .is_none_or(|event_type| hosts_event_type(venue, event_type));

    let capacity_ok = criteria
        .min_capacity
        .is_none_or(|min| venue.max_guests >= min);

    let budget_ok = criteria
        .max_budget
        .is_none_or(|max| venue.base_price <= max);

    let date_ok = criteria.date.is_none_or(|date| venue.available_on(date));

    let amenities_ok = criteria
        .amenities
        .iter()
        .all(|name| venue.has_included_amenity(name));

    let space_ok = match criteria.space_preference {
        SpacePreference::Any => true,
        SpacePreference::Indoor => venue.has_indoor_space(),
        SpacePreference::Outdoor => venue.has_outdoor_space(),
    };

    city_ok && locality_ok && event_ok && capacity_ok && budget_ok && date_ok && amenities_ok && space_ok
}

fn hosts_event_type(venue: &Venue, event_type: &str) -> bool {
    let listed = venue
        .event_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(event_type));
    if listed {
        return true;
    }
    // Restaurants also match on cuisine.
    match &venue.kind {
        VenueKind::Restaurant(details) => details
            .cuisines
            .iter()
            .any(|c| c.eq_ignore_ascii_case(event_type)),
        VenueKind::Hall(_) | VenueKind::Hotel(_) => false,
    }
}

/// Sort a filtered list in place.
pub fn sort_venues(venues: &mut [Venue], sort: SortBy) {
    match sort {
        SortBy::PriceAsc => venues.sort_by_key(|v| v.base_price),
        SortBy::PriceDesc => venues.sort_by_key(|v| std::cmp::Reverse(v.base_price)),
        SortBy::RatingDesc => {
            venues.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        },
        SortBy::CapacityDesc => venues.sort_by_key(|v| std::cmp::Reverse(v.max_guests)),
    }
}
