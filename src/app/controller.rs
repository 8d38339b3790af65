use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::Sender;
use tracing::{debug, info};

use super::{
    aggregator::{AggregationError, WeatherAggregator},
    events::{Generation, RefreshEvent, schedule_retry},
    settings::Settings,
};
use crate::{
    data::{
        geocode::GeocodeClient,
        geoip::{GeolocationProvider, locate_with_timeout},
    },
    domain::weather::{Coordinate, Location, LocationCandidate, Snapshot, UnitSystem},
    resilience::{
        backoff::Backoff,
        freshness::{FreshnessState, evaluate_freshness},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshStatus {
    pub loading: bool,
    pub error_message: Option<String>,
    pub freshness: FreshnessState,
    pub last_success: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
}

/// What [`RefreshController::handle_event`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A fresh snapshot replaced the displayed one.
    Committed,
    /// The latest refresh failed; the previous snapshot is still shown.
    Failed,
    /// The event belonged to a superseded request and was dropped.
    Discarded,
    Handled,
}

/// Sole owner of the displayed [`Snapshot`] and its status flags.
///
/// Every trigger (startup, location change, unit change, manual refresh,
/// timer, retry) issues a new generation and spawns one aggregation. Results
/// come back as [`RefreshEvent::FetchCompleted`] on the channel given to
/// [`RefreshController::new`]; only the latest generation may touch state.
#[derive(Debug)]
pub struct RefreshController {
    aggregator: Arc<WeatherAggregator>,
    geocoder: GeocodeClient,
    tx: Sender<RefreshEvent>,
    location: Location,
    units: UnitSystem,
    snapshot: Option<Snapshot>,
    loading: bool,
    error_message: Option<String>,
    last_success: Option<DateTime<Utc>>,
    consecutive_failures: u32,
    latest_generation: Generation,
    location_chosen: bool,
    backoff: Backoff,
    auto_retry: bool,
    geolocation_timeout: Duration,
}

impl RefreshController {
    #[must_use]
    pub fn new(settings: &Settings, tx: Sender<RefreshEvent>) -> Self {
        Self {
            aggregator: Arc::new(WeatherAggregator::from_settings(settings)),
            geocoder: GeocodeClient::with_timeout(
                &settings.endpoints.geocode_search,
                &settings.endpoints.geocode_reverse,
                settings.request_timeout,
            ),
            tx,
            location: settings.default_location.clone(),
            units: settings.units,
            snapshot: None,
            loading: false,
            error_message: None,
            last_success: None,
            consecutive_failures: 0,
            latest_generation: 0,
            location_chosen: false,
            backoff: Backoff::default(),
            auto_retry: settings.auto_retry,
            geolocation_timeout: settings.geolocation_timeout,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> RefreshStatus {
        RefreshStatus {
            loading: self.loading,
            error_message: self.error_message.clone(),
            freshness: evaluate_freshness(
                Utc::now(),
                self.last_success,
                self.consecutive_failures,
            ),
            last_success: self.last_success,
            consecutive_failures: self.consecutive_failures,
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn units(&self) -> UnitSystem {
        self.units
    }

    #[must_use]
    pub fn latest_generation(&self) -> Generation {
        self.latest_generation
    }

    /// Startup. With a provider, geolocate first and refresh once it settles;
    /// without one, refresh the current location straight away.
    pub fn bootstrap(&mut self, provider: Option<Arc<dyn GeolocationProvider>>) {
        let Some(provider) = provider else {
            self.refresh();
            return;
        };

        self.loading = true;
        let geocoder = self.geocoder.clone();
        let timeout = self.geolocation_timeout;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let located = match locate_with_timeout(provider.as_ref(), timeout).await {
                Ok(coordinate) => {
                    let name = geocoder.resolve_name(coordinate).await;
                    Some(Location::new(coordinate, name))
                }
                Err(err) => {
                    info!(error = %err, "geolocation unavailable, using default location");
                    None
                }
            };
            let _ = tx.send(RefreshEvent::GeolocationSettled(located)).await;
        });
    }

    pub fn set_location(&mut self, coordinate: Coordinate, name: impl Into<String>) -> Generation {
        self.change_location(Location::new(coordinate, name))
    }

    pub fn select_search_result(&mut self, candidate: &LocationCandidate) -> Generation {
        self.change_location(Location::from(candidate))
    }

    /// Refreshes only when the unit system actually changes.
    pub fn set_unit_system(&mut self, units: UnitSystem) -> Option<Generation> {
        if self.units == units {
            return None;
        }
        self.units = units;
        Some(self.refresh())
    }

    /// Issue a new generation for the current location and units.
    pub fn refresh(&mut self) -> Generation {
        self.latest_generation += 1;
        let generation = self.latest_generation;
        self.loading = true;

        let aggregator = Arc::clone(&self.aggregator);
        let location = self.location.clone();
        let units = self.units;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = aggregator.fetch_all(&location, units).await;
            let _ = tx
                .send(RefreshEvent::FetchCompleted { generation, result })
                .await;
        });
        generation
    }

    pub async fn search_locations(&self, query: &str) -> Vec<LocationCandidate> {
        self.geocoder.search(query).await
    }

    pub fn handle_event(&mut self, event: RefreshEvent) -> RefreshOutcome {
        match event {
            RefreshEvent::GeolocationSettled(located) => self.handle_geolocation(located),
            RefreshEvent::FetchCompleted { generation, result } => {
                self.handle_fetch_completed(generation, result)
            }
            RefreshEvent::TickRefresh => {
                if !self.loading {
                    self.refresh();
                }
                RefreshOutcome::Handled
            }
            RefreshEvent::RetryDue => {
                if !self.loading && self.error_message.is_some() {
                    self.refresh();
                }
                RefreshOutcome::Handled
            }
        }
    }

    fn change_location(&mut self, location: Location) -> Generation {
        self.location_chosen = true;
        self.location = location;
        self.refresh()
    }

    fn handle_geolocation(&mut self, located: Option<Location>) -> RefreshOutcome {
        if self.location_chosen {
            debug!("ignoring geolocation, a location was already chosen");
            return RefreshOutcome::Discarded;
        }
        if let Some(location) = located {
            self.location = location;
        }
        self.refresh();
        RefreshOutcome::Handled
    }

    fn handle_fetch_completed(
        &mut self,
        generation: Generation,
        result: Result<Snapshot, AggregationError>,
    ) -> RefreshOutcome {
        if generation != self.latest_generation {
            debug!(
                generation,
                latest = self.latest_generation,
                "discarding superseded refresh result"
            );
            return RefreshOutcome::Discarded;
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.last_success = Some(snapshot.last_update);
                self.snapshot = Some(snapshot);
                self.error_message = None;
                self.consecutive_failures = 0;
                self.backoff.reset();
                RefreshOutcome::Committed
            }
            Err(err) => {
                self.error_message = Some(err.user_message().to_string());
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                if self.auto_retry {
                    schedule_retry(self.tx.clone(), self.backoff.next_delay());
                }
                RefreshOutcome::Failed
            }
        }
    }
}
