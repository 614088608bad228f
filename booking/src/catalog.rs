//! Venue catalog types and seed data.
//!
//! The catalog is read-only: it is loaded once (statically seeded here,
//! or fetched through a [`CatalogSource`]) and shared across every open
//! modal without synchronization. Hall, hotel, and restaurant venues
//! share one base record; what differs per kind lives in the
//! [`VenueKind`] payload so consumers get exhaustive matching instead of
//! probing optional fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

// ═══════════════════════════════════════════════════════════════════════
// ID Types
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for a venue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VenueId(pub u32);

impl std::fmt::Display for VenueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a package within a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageId(pub u32);

/// Identifier for a menu option within a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MenuId(pub u32);

// ═══════════════════════════════════════════════════════════════════════
// Sub-records
// ═══════════════════════════════════════════════════════════════════════

/// A bookable space within a venue (lawn, banquet floor, rooftop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Display name.
    pub name: String,
    /// Seated capacity of this space.
    pub capacity: u32,
    /// Floor area in square feet.
    pub size_sqft: u32,
    /// `true` for indoor spaces, `false` for open-air ones.
    pub indoor: bool,
}

/// An amenity a venue offers (or explicitly does not include).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    /// Display name, matched case-insensitively by the filter engine.
    pub name: String,
    /// Icon identifier for the UI.
    pub icon: String,
    /// Whether the amenity is included in the base price.
    pub included: bool,
}

/// A bookable package (price plus what it does and does not cover).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package identifier, unique within the venue.
    pub id: PackageId,
    /// Display name.
    pub name: String,
    /// Package price in whole currency units.
    pub price: u32,
    /// What the package covers.
    pub includes: Vec<String>,
    /// What the package explicitly excludes.
    pub excludes: Vec<String>,
}

/// A menu variant (per-plate price and item count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuOption {
    /// Menu identifier, unique within the venue.
    pub id: MenuId,
    /// Display name.
    pub name: String,
    /// Per-plate price in whole currency units.
    pub price: u32,
    /// Number of items on the menu.
    pub item_count: u32,
}

/// A frequently asked question with its answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
}

// ═══════════════════════════════════════════════════════════════════════
// Venue
// ═══════════════════════════════════════════════════════════════════════

/// What a hall offers beyond the shared record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallDetails {
    /// Seated guest capacity.
    pub seating_capacity: u32,
    /// Standing (floating) guest capacity.
    pub floating_capacity: u32,
}

/// What a hotel offers beyond the shared record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelDetails {
    /// Star rating, 1–5.
    pub star_rating: u8,
    /// Number of guest rooms.
    pub room_count: u32,
    /// Check-in time, e.g. "14:00".
    pub check_in: String,
    /// Check-out time, e.g. "11:00".
    pub check_out: String,
}

/// What a restaurant offers beyond the shared record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantDetails {
    /// Cuisines served, matched by the event/cuisine filter.
    pub cuisines: Vec<String>,
    /// Seated capacity.
    pub seating_capacity: u32,
    /// Whether outdoor seating is available.
    pub outdoor_seating: bool,
}

/// Per-kind venue payload.
///
/// The source data modelled hall/hotel/restaurant differences as
/// optional fields on one object; here each kind carries exactly its own
/// fields and matching is exhaustive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VenueKind {
    /// A banquet or wedding hall.
    Hall(HallDetails),
    /// A hotel with event capacity.
    Hotel(HotelDetails),
    /// A restaurant.
    Restaurant(RestaurantDetails),
}

impl VenueKind {
    /// Stable lowercase label for logs and the UI.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Hall(_) => "hall",
            Self::Hotel(_) => "hotel",
            Self::Restaurant(_) => "restaurant",
        }
    }
}

/// A bookable venue record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    /// Unique identifier.
    pub id: VenueId,
    /// Display name.
    pub name: String,
    /// City.
    pub city: String,
    /// Locality within the city.
    pub locality: String,
    /// Free-text street address.
    pub address: String,
    /// Free-text description.
    pub description: String,
    /// Base price in whole currency units.
    pub base_price: u32,
    /// Minimum per-guest (per-plate) price, when the venue charges one.
    pub per_guest_price: Option<u32>,
    /// Discount percentage currently advertised, 0–100.
    pub discount_percent: u8,
    /// Minimum guest count the venue accepts.
    pub min_guests: u32,
    /// Maximum guest count the venue can hold.
    pub max_guests: u32,
    /// Average rating, 0.0–5.0.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub review_count: u32,
    /// Image URLs for the carousel.
    pub images: Vec<String>,
    /// Event types the venue hosts ("wedding", "corporate", ...).
    pub event_types: Vec<String>,
    /// Bookable spaces.
    pub spaces: Vec<Space>,
    /// Amenities on offer.
    pub amenities: Vec<Amenity>,
    /// Bookable packages.
    pub packages: Vec<Package>,
    /// Vegetarian menu variants.
    pub veg_menu: Vec<MenuOption>,
    /// Non-vegetarian menu variants.
    pub nonveg_menu: Vec<MenuOption>,
    /// Dates on which the venue is bookable.
    pub available_dates: Vec<NaiveDate>,
    /// Free-text policies.
    pub policies: Vec<String>,
    /// Frequently asked questions.
    pub faqs: Vec<Faq>,
    /// Per-kind payload.
    pub kind: VenueKind,
}

impl Venue {
    /// Check the catalog invariants for this record.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidVenue`] if guest bounds are
    /// inverted, the discount exceeds 100, or the rating is outside
    /// 0.0–5.0.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.min_guests > self.max_guests {
            return Err(CatalogError::InvalidVenue {
                venue: self.id,
                reason: format!(
                    "min_guests {} exceeds max_guests {}",
                    self.min_guests, self.max_guests
                ),
            });
        }
        if self.discount_percent > 100 {
            return Err(CatalogError::InvalidVenue {
                venue: self.id,
                reason: format!("discount_percent {} exceeds 100", self.discount_percent),
            });
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(CatalogError::InvalidVenue {
                venue: self.id,
                reason: format!("rating {} outside 0.0-5.0", self.rating),
            });
        }
        Ok(())
    }

    /// Base price after the advertised discount.
    #[must_use]
    pub fn discounted_price(&self) -> u32 {
        let discount = u64::from(self.base_price) * u64::from(self.discount_percent) / 100;
        self.base_price - u32::try_from(discount).unwrap_or(self.base_price)
    }

    /// Look up a package by id.
    #[must_use]
    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Look up a menu option by id across both menu variants.
    #[must_use]
    pub fn menu_option(&self, id: MenuId) -> Option<&MenuOption> {
        self.veg_menu
            .iter()
            .chain(self.nonveg_menu.iter())
            .find(|m| m.id == id)
    }

    /// Whether the venue lists an amenity (case-insensitive) as included.
    #[must_use]
    pub fn has_included_amenity(&self, name: &str) -> bool {
        self.amenities
            .iter()
            .any(|a| a.included && a.name.eq_ignore_ascii_case(name))
    }

    /// Whether any space is indoor.
    #[must_use]
    pub fn has_indoor_space(&self) -> bool {
        self.spaces.iter().any(|s| s.indoor)
    }

    /// Whether any space is open-air.
    #[must_use]
    pub fn has_outdoor_space(&self) -> bool {
        self.spaces.iter().any(|s| !s.indoor)
    }

    /// Whether the venue is bookable on the given date.
    #[must_use]
    pub fn available_on(&self, date: NaiveDate) -> bool {
        self.available_dates.contains(&date)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Catalog source
// ═══════════════════════════════════════════════════════════════════════

/// Where venue records come from.
///
/// The page only requires an array of [`Venue`] records; whether they
/// are seeded statically or fetched from a backend is the
/// implementation's business.
pub trait CatalogSource: Send + Sync {
    /// Load every venue.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Load`] when the source cannot be read;
    /// the page surfaces this as a page-level error state.
    fn load_all(&self) -> impl Future<Output = Result<Vec<Venue>, CatalogError>> + Send;
}

/// Catalog source backed by an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    venues: Vec<Venue>,
}

impl StaticCatalog {
    /// Create a source over the given venues.
    #[must_use]
    pub const fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// Create a source over the built-in seed catalog.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_catalog())
    }
}

impl CatalogSource for StaticCatalog {
    fn load_all(&self) -> impl Future<Output = Result<Vec<Venue>, CatalogError>> + Send {
        let venues = self.venues.clone();
        async move { Ok(venues) }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Seed data
// ═══════════════════════════════════════════════════════════════════════

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn standard_amenities(valet: bool) -> Vec<Amenity> {
    vec![
        Amenity {
            name: "Air Conditioning".to_string(),
            icon: "ac".to_string(),
            included: true,
        },
        Amenity {
            name: "Parking".to_string(),
            icon: "parking".to_string(),
            included: true,
        },
        Amenity {
            name: "Wifi".to_string(),
            icon: "wifi".to_string(),
            included: true,
        },
        Amenity {
            name: "Valet".to_string(),
            icon: "valet".to_string(),
            included: valet,
        },
        Amenity {
            name: "DJ".to_string(),
            icon: "dj".to_string(),
            included: false,
        },
    ]
}

#[allow(clippy::too_many_lines)] // Seed data is long by nature
fn seed_halls() -> Vec<Venue> {
    vec![
        Venue {
            id: VenueId(1),
            name: "Royal Orchid Banquet".to_string(),
            city: "Mumbai".to_string(),
            locality: "Andheri".to_string(),
            address: "14 Link Road, Andheri West".to_string(),
            description: "Pillarless banquet hall with a dedicated bridal suite."
                .to_string(),
            base_price: 150_000,
            per_guest_price: Some(900),
            discount_percent: 10,
            min_guests: 100,
            max_guests: 600,
            rating: 4.6,
            review_count: 182,
            images: strings(&[
                "https://img.venuebook.test/halls/1/front.jpg",
                "https://img.venuebook.test/halls/1/stage.jpg",
                "https://img.venuebook.test/halls/1/dining.jpg",
            ]),
            event_types: strings(&["wedding", "reception", "corporate"]),
            spaces: vec![
                Space {
                    name: "Grand Hall".to_string(),
                    capacity: 600,
                    size_sqft: 9_000,
                    indoor: true,
                },
                Space {
                    name: "Lawn".to_string(),
                    capacity: 400,
                    size_sqft: 12_000,
                    indoor: false,
                },
            ],
            amenities: standard_amenities(true),
            packages: vec![
                Package {
                    id: PackageId(11),
                    name: "Silver".to_string(),
                    price: 150_000,
                    includes: strings(&["Hall rental", "Basic decor", "Sound system"]),
                    excludes: strings(&["Catering", "Photography"]),
                },
                Package {
                    id: PackageId(12),
                    name: "Gold".to_string(),
                    price: 240_000,
                    includes: strings(&[
                        "Hall rental",
                        "Premium decor",
                        "Sound system",
                        "Photography",
                    ]),
                    excludes: strings(&["Catering"]),
                },
            ],
            veg_menu: vec![MenuOption {
                id: MenuId(101),
                name: "Veg Standard".to_string(),
                price: 750,
                item_count: 18,
            }],
            nonveg_menu: vec![MenuOption {
                id: MenuId(102),
                name: "Non-Veg Standard".to_string(),
                price: 950,
                item_count: 22,
            }],
            available_dates: vec![
                date(2024, 11, 22),
                date(2024, 11, 29),
                date(2024, 12, 6),
            ],
            policies: strings(&[
                "50% advance to confirm the booking",
                "Music until 10 PM as per local regulation",
            ]),
            faqs: vec![Faq {
                question: "Is outside catering allowed?".to_string(),
                answer: "Yes, with an empanelled caterer.".to_string(),
            }],
            kind: VenueKind::Hall(HallDetails {
                seating_capacity: 450,
                floating_capacity: 600,
            }),
        },
        Venue {
            id: VenueId(7),
            name: "Lakeside Pavilion".to_string(),
            city: "Pune".to_string(),
            locality: "Kharadi".to_string(),
            address: "2 Lakefront Drive, Kharadi".to_string(),
            description: "Open lawn and pavilion overlooking the lake.".to_string(),
            base_price: 50_000,
            per_guest_price: Some(600),
            discount_percent: 0,
            min_guests: 50,
            max_guests: 500,
            rating: 4.3,
            review_count: 96,
            images: strings(&[
                "https://img.venuebook.test/halls/7/lake.jpg",
                "https://img.venuebook.test/halls/7/pavilion.jpg",
            ]),
            event_types: strings(&["wedding", "birthday", "reception"]),
            spaces: vec![
                Space {
                    name: "Pavilion".to_string(),
                    capacity: 200,
                    size_sqft: 4_000,
                    indoor: true,
                },
                Space {
                    name: "Lakeside Lawn".to_string(),
                    capacity: 500,
                    size_sqft: 15_000,
                    indoor: false,
                },
            ],
            amenities: standard_amenities(false),
            packages: vec![Package {
                id: PackageId(71),
                name: "Classic".to_string(),
                price: 50_000,
                includes: strings(&["Lawn rental", "Seating", "Basic lighting"]),
                excludes: strings(&["Catering", "Decor"]),
            }],
            veg_menu: vec![MenuOption {
                id: MenuId(701),
                name: "Veg Buffet".to_string(),
                price: 550,
                item_count: 14,
            }],
            nonveg_menu: vec![],
            available_dates: vec![date(2023, 12, 1), date(2024, 1, 12)],
            policies: strings(&["No confetti on the lawn"]),
            faqs: vec![],
            kind: VenueKind::Hall(HallDetails {
                seating_capacity: 350,
                floating_capacity: 500,
            }),
        },
    ]
}

fn seed_hotels() -> Vec<Venue> {
    vec![Venue {
        id: VenueId(3),
        name: "The Meridian Grand".to_string(),
        city: "Mumbai".to_string(),
        locality: "Bandra".to_string(),
        address: "7 Hill Road, Bandra West".to_string(),
        description: "Five-star property with two ballrooms and sea-view rooms."
            .to_string(),
        base_price: 300_000,
        per_guest_price: Some(1_800),
        discount_percent: 5,
        min_guests: 50,
        max_guests: 350,
        rating: 4.8,
        review_count: 421,
        images: strings(&[
            "https://img.venuebook.test/hotels/3/facade.jpg",
            "https://img.venuebook.test/hotels/3/ballroom.jpg",
        ]),
        event_types: strings(&["wedding", "corporate", "conference"]),
        spaces: vec![Space {
            name: "Crystal Ballroom".to_string(),
            capacity: 350,
            size_sqft: 6_500,
            indoor: true,
        }],
        amenities: standard_amenities(true),
        packages: vec![Package {
            id: PackageId(31),
            name: "Residential Wedding".to_string(),
            price: 500_000,
            includes: strings(&["Ballroom", "20 rooms", "Decor", "Breakfast"]),
            excludes: strings(&["Lunch and dinner catering"]),
        }],
        veg_menu: vec![MenuOption {
            id: MenuId(301),
            name: "Veg Premium".to_string(),
            price: 1_600,
            item_count: 24,
        }],
        nonveg_menu: vec![MenuOption {
            id: MenuId(302),
            name: "Non-Veg Premium".to_string(),
            price: 2_100,
            item_count: 28,
        }],
        available_dates: vec![date(2024, 11, 23), date(2024, 12, 14)],
        policies: strings(&["Outside alcohol with corkage fee"]),
        faqs: vec![Faq {
            question: "Is early check-in available?".to_string(),
            answer: "Subject to availability on the day.".to_string(),
        }],
        kind: VenueKind::Hotel(HotelDetails {
            star_rating: 5,
            room_count: 180,
            check_in: "14:00".to_string(),
            check_out: "11:00".to_string(),
        }),
    }]
}

fn seed_restaurants() -> Vec<Venue> {
    vec![Venue {
        id: VenueId(5),
        name: "Spice Route Terrace".to_string(),
        city: "Pune".to_string(),
        locality: "Koregaon Park".to_string(),
        address: "31 North Main Road".to_string(),
        description: "Rooftop restaurant with a private dining section.".to_string(),
        base_price: 40_000,
        per_guest_price: Some(1_100),
        discount_percent: 15,
        min_guests: 20,
        max_guests: 120,
        rating: 4.4,
        review_count: 264,
        images: strings(&["https://img.venuebook.test/restaurants/5/terrace.jpg"]),
        event_types: strings(&["birthday", "anniversary", "corporate"]),
        spaces: vec![
            Space {
                name: "Terrace".to_string(),
                capacity: 80,
                size_sqft: 2_200,
                indoor: false,
            },
            Space {
                name: "Private Dining".to_string(),
                capacity: 40,
                size_sqft: 900,
                indoor: true,
            },
        ],
        amenities: standard_amenities(false),
        packages: vec![Package {
            id: PackageId(51),
            name: "Terrace Evening".to_string(),
            price: 40_000,
            includes: strings(&["Terrace reservation", "Music system"]),
            excludes: strings(&["Food and beverages"]),
        }],
        veg_menu: vec![MenuOption {
            id: MenuId(501),
            name: "Veg Tasting".to_string(),
            price: 1_000,
            item_count: 12,
        }],
        nonveg_menu: vec![MenuOption {
            id: MenuId(502),
            name: "Coastal Non-Veg".to_string(),
            price: 1_350,
            item_count: 15,
        }],
        available_dates: vec![date(2024, 11, 20), date(2024, 11, 27)],
        policies: strings(&["Last entry 9:30 PM"]),
        faqs: vec![],
        kind: VenueKind::Restaurant(RestaurantDetails {
            cuisines: strings(&["North Indian", "Coastal", "Continental"]),
            seating_capacity: 120,
            outdoor_seating: true,
        }),
    }]
}

/// The statically-seeded catalog: every venue kind represented.
#[must_use]
pub fn seed_catalog() -> Vec<Venue> {
    let mut venues = seed_halls();
    venues.extend(seed_hotels());
    venues.extend(seed_restaurants());
    venues
}
