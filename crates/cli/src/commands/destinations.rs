use serde::Serialize;
use tracing::info;

use crate::commands::{catalog_failure, fetch_catalog, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct DestinationsReport {
    count: usize,
    destinations: Vec<String>,
}

pub fn run() -> CommandResult {
    let config = match load_config("destinations") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(error) => return catalog_failure("destinations", error),
    };

    let destinations: Vec<String> = catalog.destinations().into_iter().collect();
    info!(
        event_name = "cli.destinations_listed",
        count = destinations.len(),
        "listed catalog destinations"
    );

    CommandResult::success_with(
        "destinations",
        format!("{} destinations available", destinations.len()),
        DestinationsReport { count: destinations.len(), destinations },
    )
}
