//! CLI demo of the browse page and booking wizard.
//!
//! Drives the whole flow against in-memory collaborators: load the
//! catalog, filter it, open a venue, walk the wizard, and submit.

use std::time::Duration;

use chrono::NaiveDate;
use venuebook_booking::catalog::{PackageId, StaticCatalog, VenueId};
use venuebook_booking::config::WizardConfig;
use venuebook_booking::detail::DetailAction;
use venuebook_booking::favorites::FavoritesStore;
use venuebook_booking::mocks::MockBookingGateway;
use venuebook_booking::session::{ScheduledTask, SessionContext};
use venuebook_booking::storage::InMemoryStorage;
use venuebook_booking::wizard::{BookingAction, GuestBucket, WizardStep};
use venuebook_booking::{
    BookingEnvironment, BrowseAction, BrowseReducer, BrowseState, FilterCriteria, SortBy,
};
use venuebook_core::environment::SystemClock;
use venuebook_runtime::Store;

type DemoReducer =
    BrowseReducer<SystemClock, MockBookingGateway, StaticCatalog, InMemoryStorage>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    println!("=== Venuebook Demo ===\n");

    // The session owns its refresh timer; dropping the task at the end
    // of main tears it down.
    let session = SessionContext::new(uuid::Uuid::new_v4(), "demo-token".to_string());
    let _refresh = ScheduledTask::every(Duration::from_secs(300), || async {
        tracing::debug!("refreshing session token");
    });
    tracing::info!(account = %session.account_id, "session established");

    let gateway = MockBookingGateway::accepting();
    let env = BookingEnvironment::new(
        SystemClock,
        gateway.clone(),
        StaticCatalog::seeded(),
        WizardConfig::default().with_confirmation_reset_delay(Duration::from_millis(200)),
    );
    let favorites = FavoritesStore::load(InMemoryStorage::new());
    let store = Store::new(
        BrowseState::new(favorites),
        DemoReducer::new(),
        env,
    );

    // Load the catalog and wait for it to land.
    store
        .send_and_wait_for(
            BrowseAction::LoadCatalog,
            |a| matches!(a, BrowseAction::CatalogLoaded(_) | BrowseAction::CatalogLoadFailed(_)),
            Duration::from_secs(5),
        )
        .await?;

    let total = store.state(|s| s.catalog.len()).await;
    println!("Catalog loaded: {total} venues");

    // Filter: at least 400 guests, at most 60k, sorted by price.
    store
        .send(BrowseAction::SetCriteria(
            FilterCriteria::default()
                .with_min_capacity(400)
                .with_max_budget(60_000),
        ))
        .await?;
    store.send(BrowseAction::SetSort(SortBy::PriceAsc)).await?;

    let results = store
        .state(|s| {
            s.results
                .iter()
                .map(|v| format!("  {} ({}, {})", v.name, v.city, v.base_price))
                .collect::<Vec<_>>()
        })
        .await;
    println!("\nMatching venues:");
    for line in &results {
        println!("{line}");
    }

    // Open the cheapest match and walk the wizard.
    let venue_id = store
        .state(|s| s.results.first().map(|v| v.id))
        .await
        .unwrap_or(VenueId(7));
    store.send(BrowseAction::OpenVenue(venue_id)).await?;
    println!("\nOpened venue {venue_id}; filling in the booking form...");

    let steps = [
        BookingAction::SetEventDate(
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap_or_default(),
        ),
        BookingAction::SetEventType("wedding".to_string()),
        BookingAction::SetGuestBucket(GuestBucket::UpTo500),
        BookingAction::NextStep,
        BookingAction::SelectPackage(PackageId(71)),
        BookingAction::NextStep,
        BookingAction::SetContactName("Asha Rao".to_string()),
        BookingAction::SetContactEmail("asha@example.com".to_string()),
        BookingAction::SetContactPhone("9000000001".to_string()),
        BookingAction::SetSpecialRequests("Vegetarian-only kitchen".to_string()),
    ];
    for action in steps {
        store
            .send(BrowseAction::Detail(DetailAction::Wizard(action)))
            .await?;
    }

    // Submit and wait for the wizard to settle.
    let result = store
        .send_and_wait_for(
            BrowseAction::Detail(DetailAction::Wizard(BookingAction::Submit)),
            |a| {
                matches!(
                    a,
                    BrowseAction::Detail(DetailAction::Wizard(
                        BookingAction::SubmissionSucceeded { .. }
                            | BookingAction::SubmissionFailed { .. }
                    ))
                )
            },
            Duration::from_secs(5),
        )
        .await?;

    match result {
        BrowseAction::Detail(DetailAction::Wizard(BookingAction::SubmissionSucceeded {
            receipt,
        })) => {
            println!("\nBooking confirmed! Reference: {}", receipt.reference);
        },
        BrowseAction::Detail(DetailAction::Wizard(BookingAction::SubmissionFailed {
            reason,
        })) => {
            println!("\nBooking failed: {reason}");
        },
        _ => {},
    }

    let confirmed = store
        .state(|s| {
            s.modal
                .as_ref()
                .map(|m| m.wizard.step == WizardStep::Confirmed)
        })
        .await;
    println!("Wizard confirmed: {confirmed:?}");
    println!("Gateway calls: {}", gateway.call_count());

    let recent = store
        .state(|s| s.favorites.recently_viewed().to_vec())
        .await;
    println!("Recently viewed: {recent:?}");

    println!("\n=== Demo Complete ===");
    Ok(())
}
