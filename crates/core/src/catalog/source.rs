use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;

use crate::catalog::FlightRecord;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("could not read flight feed `{path}`: {message}")]
    Read { path: PathBuf, message: String },
    #[error("could not parse flight feed: {0}")]
    Parse(String),
    #[error("flight feed request failed: {0}")]
    Transport(String),
    #[error("flight feed returned HTTP {status}")]
    Status { status: u16 },
}

/// Where a session's flight feed comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn describe(&self) -> String;
    async fn fetch(&self) -> Result<Vec<FlightRecord>, CatalogError>;
}

pub fn parse_feed(raw: &str) -> Result<Vec<FlightRecord>, CatalogError> {
    serde_json::from_str::<Vec<FlightRecord>>(raw)
        .map_err(|error| CatalogError::Parse(error.to_string()))
}

#[derive(Clone, Debug, Default)]
pub struct StaticCatalogSource {
    records: Vec<FlightRecord>,
}

impl StaticCatalogSource {
    pub fn new(records: Vec<FlightRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }

    async fn fetch(&self) -> Result<Vec<FlightRecord>, CatalogError> {
        Ok(self.records.clone())
    }
}

#[derive(Clone, Debug)]
pub struct JsonFileCatalogSource {
    path: PathBuf,
}

impl JsonFileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalogSource {
    fn describe(&self) -> String {
        format!("file ({})", self.path.display())
    }

    async fn fetch(&self) -> Result<Vec<FlightRecord>, CatalogError> {
        let raw = fs::read_to_string(&self.path).await.map_err(|error| CatalogError::Read {
            path: self.path.clone(),
            message: error.to_string(),
        })?;
        parse_feed(&raw)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{parse_feed, CatalogError, CatalogSource, JsonFileCatalogSource};

    #[test]
    fn parses_feed_rows() {
        let records = parse_feed(
            r#"[
                {"destination": "Paris", "class": "Economy", "priceUSD": 500},
                {"destination": "Paris", "class": "Business", "priceUSD": 1400}
            ]"#,
        )
        .expect("feed json");

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].price_usd, Decimal::new(1_400, 0));
    }

    #[test]
    fn malformed_feed_is_a_parse_error() {
        let error = parse_feed(r#"{"destination": "Paris"}"#).expect_err("object is not a feed");
        assert!(matches!(error, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn file_source_reads_feed_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("flights.json");
        fs::write(&path, r#"[{"destination": "Lima", "class": "Economy", "priceUSD": 650}]"#)
            .expect("write feed");

        let source = JsonFileCatalogSource::new(&path);
        let records = source.fetch().await.expect("file feed");

        assert_eq!(records.len(), 1);
        assert!(source.describe().contains("flights.json"));
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = TempDir::new().expect("tempdir");
        let source = JsonFileCatalogSource::new(dir.path().join("absent.json"));

        let error = source.fetch().await.expect_err("absent file");
        assert!(matches!(error, CatalogError::Read { .. }));
    }
}
