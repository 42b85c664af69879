pub mod source;

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use source::{parse_feed, CatalogError, CatalogSource, JsonFileCatalogSource, StaticCatalogSource};

/// One row of the flight price feed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub destination: String,
    pub class: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPrice {
    pub class: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
}

/// Unique destinations in lexical order.
pub fn distinct_destinations(records: &[FlightRecord]) -> BTreeSet<String> {
    records.iter().map(|record| record.destination.clone()).collect()
}

pub fn classes_for_destination(records: &[FlightRecord], destination: &str) -> BTreeSet<String> {
    records
        .iter()
        .filter(|record| record.destination == destination)
        .map(|record| record.class.clone())
        .collect()
}

/// Flat filter over the feed: duplicate class rows for one destination are all returned.
pub fn classes_with_prices_for_destination(
    records: &[FlightRecord],
    destination: &str,
) -> Vec<ClassPrice> {
    if destination.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| record.destination == destination)
        .map(|record| ClassPrice { class: record.class.clone(), price_usd: record.price_usd })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CatalogStatus {
    Ready { records: usize },
    Failed { message: String },
}

/// Session-scoped snapshot of the flight feed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlightCatalog {
    records: Vec<FlightRecord>,
}

impl FlightCatalog {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }

    /// Fetches once from `source`, surfacing the failure to the caller.
    pub async fn fetch<S>(source: &S) -> Result<Self, CatalogError>
    where
        S: CatalogSource + ?Sized,
    {
        let records = source.fetch().await?;
        info!(
            event_name = "catalog.loaded",
            source = %source.describe(),
            records = records.len(),
            "flight catalog loaded"
        );
        Ok(Self::new(records))
    }

    /// Fetches once from `source`. A failed fetch yields an empty catalog and a
    /// `Failed` status instead of an error so the wizard keeps running.
    pub async fn load<S>(source: &S) -> (Self, CatalogStatus)
    where
        S: CatalogSource + ?Sized,
    {
        match Self::fetch(source).await {
            Ok(catalog) => {
                let status = CatalogStatus::Ready { records: catalog.records.len() };
                (catalog, status)
            }
            Err(error) => Self::degraded(&source.describe(), &error),
        }
    }

    /// Empty catalog standing in for a feed that could not be loaded.
    pub fn degraded(source: &str, error: &CatalogError) -> (Self, CatalogStatus) {
        warn!(
            event_name = "catalog.load_failed",
            source = %source,
            error = %error,
            "flight catalog unavailable, continuing with empty catalog"
        );
        (Self::default(), CatalogStatus::Failed { message: error.to_string() })
    }

    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn destinations(&self) -> BTreeSet<String> {
        distinct_destinations(&self.records)
    }

    pub fn classes_for(&self, destination: &str) -> BTreeSet<String> {
        classes_for_destination(&self.records, destination)
    }

    pub fn classes_with_prices(&self, destination: &str) -> Vec<ClassPrice> {
        classes_with_prices_for_destination(&self.records, destination)
    }

    /// First listed price for the pair, if the feed has one.
    pub fn price_for(&self, destination: &str, class: &str) -> Option<Decimal> {
        self.records
            .iter()
            .find(|record| record.destination == destination && record.class == class)
            .map(|record| record.price_usd)
    }
}
