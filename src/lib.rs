pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod report;
pub mod resilience;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::{Result, bail};
use app::{
    controller::{RefreshController, RefreshOutcome},
    events::{RefreshEvent, start_refresh_task},
    settings::Settings,
};
use cli::Cli;
use data::geoip::{FixedGeolocation, GeolocationProvider, IpGeolocation};
use domain::weather::{Coordinate, Snapshot};
use tokio::sync::mpsc;
use tracing::info;

pub async fn run(cli: Cli) -> Result<()> {
    cli.validate()?;
    let settings = Settings::from_cli(&cli);
    let (tx, mut rx) = mpsc::channel::<RefreshEvent>(64);
    let mut controller = RefreshController::new(&settings, tx.clone());

    if let Some(query) = cli.search.as_deref() {
        return print_candidates(&controller, query).await;
    }

    start(&mut controller, &cli, &settings).await?;
    if let Some(every) = settings.refresh_interval {
        info!(interval_secs = every.as_secs(), "periodic refresh enabled");
        start_refresh_task(tx, every);
    }

    while let Some(event) = rx.recv().await {
        match controller.handle_event(event) {
            RefreshOutcome::Committed => {
                if let Some(snapshot) = controller.snapshot() {
                    print_snapshot(snapshot, cli.json)?;
                }
                if !cli.watch {
                    break;
                }
            }
            RefreshOutcome::Failed => {
                let message = controller.status().error_message.unwrap_or_default();
                if !cli.watch {
                    bail!(message);
                }
                eprintln!("{message}");
            }
            RefreshOutcome::Discarded | RefreshOutcome::Handled => {}
        }
    }

    Ok(())
}

async fn start(controller: &mut RefreshController, cli: &Cli, settings: &Settings) -> Result<()> {
    if let Some(city) = cli.city.as_deref() {
        let candidates = controller.search_locations(city).await;
        let Some(best) = candidates.first() else {
            bail!("No geocoding result for {city}");
        };
        controller.select_search_result(best);
        return Ok(());
    }

    let provider: Option<Arc<dyn GeolocationProvider>> = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(Arc::new(FixedGeolocation(Coordinate::new(lat, lon)))),
        _ if cli.no_geolocate => None,
        _ => Some(Arc::new(IpGeolocation::with_url(&settings.endpoints.ip_geolocation))),
    };
    controller.bootstrap(provider);
    Ok(())
}

async fn print_candidates(controller: &RefreshController, query: &str) -> Result<()> {
    let candidates = controller.search_locations(query).await;
    if candidates.is_empty() {
        println!("No locations found for \"{query}\"");
    }
    for candidate in &candidates {
        println!(
            "{}  ({:.4}, {:.4})",
            candidate.display_name(),
            candidate.coordinate.latitude,
            candidate.coordinate.longitude
        );
    }
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", report::render_json(snapshot)?);
    } else {
        println!("{}\n", report::render_text(snapshot));
    }
    Ok(())
}
