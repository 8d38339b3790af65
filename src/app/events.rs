use std::time::Duration;

use rand::Rng;
use tokio::{sync::mpsc::Sender, time::sleep};

use super::aggregator::AggregationError;
use crate::domain::weather::{Location, Snapshot};

/// Generation stamped on every refresh; only the latest may commit.
pub type Generation = u64;

#[derive(Debug)]
pub enum RefreshEvent {
    /// Startup geolocation finished; `None` when declined, failed or timed out.
    GeolocationSettled(Option<Location>),
    FetchCompleted {
        generation: Generation,
        result: Result<Snapshot, AggregationError>,
    },
    TickRefresh,
    RetryDue,
}

/// Sends [`RefreshEvent::TickRefresh`] roughly every `every`, jittered by ±10%.
pub fn start_refresh_task(tx: Sender<RefreshEvent>, every: Duration) {
    tokio::spawn(async move {
        let base = every.as_secs_f32().max(1.0);
        loop {
            let wait_secs = {
                let mut rng = rand::rng();
                let jitter = rng.random_range(-0.1f32..0.1f32);
                (base * (1.0 + jitter)).max(1.0)
            };
            sleep(Duration::from_secs_f32(wait_secs)).await;
            if tx.send(RefreshEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    });
}

pub fn schedule_retry(tx: Sender<RefreshEvent>, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay).await;
        let _ = tx.send(RefreshEvent::RetryDue).await;
    });
}
