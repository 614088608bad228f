//! The booking environment.
//!
//! All external dependencies the browse page and its wizard need,
//! injected as one value. Production wires the HTTP gateway and a real
//! catalog source; tests wire mocks and a fixed clock.

use venuebook_core::environment::Clock;

use crate::catalog::CatalogSource;
use crate::config::WizardConfig;
use crate::gateway::BookingGateway;

/// Injected dependencies for the booking reducers.
///
/// # Type Parameters
///
/// - `C`: clock
/// - `G`: booking gateway
/// - `V`: venue catalog source
#[derive(Debug, Clone)]
pub struct BookingEnvironment<C, G, V>
where
    C: Clock,
    G: BookingGateway,
    V: CatalogSource,
{
    /// Clock for stamping submissions.
    pub clock: C,
    /// The booking submission endpoint.
    pub gateway: G,
    /// Where venue records come from.
    pub venues: V,
    /// Wizard timing configuration.
    pub config: WizardConfig,
}

impl<C, G, V> BookingEnvironment<C, G, V>
where
    C: Clock,
    G: BookingGateway,
    V: CatalogSource,
{
    /// Create an environment.
    #[must_use]
    pub const fn new(clock: C, gateway: G, venues: V, config: WizardConfig) -> Self {
        Self {
            clock,
            gateway,
            venues,
            config,
        }
    }
}
