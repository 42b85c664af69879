use serde::Serialize;
use wayfare_core::catalog::ClassPrice;

use crate::commands::{catalog_failure, fetch_catalog, load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ClassesReport {
    destination: String,
    classes: Vec<ClassPrice>,
}

pub fn run(destination: &str) -> CommandResult {
    let config = match load_config("classes") {
        Ok(config) => config,
        Err(result) => return result,
    };

    let catalog = match fetch_catalog(&config) {
        Ok(catalog) => catalog,
        Err(error) => return catalog_failure("classes", error),
    };

    let classes = catalog.classes_with_prices(destination);
    let message = if classes.is_empty() {
        format!("no flight classes offered for `{destination}`")
    } else {
        format!("{} flight classes offered for `{destination}`", classes.len())
    };

    CommandResult::success_with(
        "classes",
        message,
        ClassesReport { destination: destination.to_string(), classes },
    )
}
