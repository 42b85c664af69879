use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;
use wayfare_core::catalog::{parse_feed, CatalogError, CatalogSource, FlightRecord};

/// Flight feed served over HTTP(S) as a JSON array of records.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
    token: Option<SecretString>,
}

impl HttpCatalogSource {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        token: Option<SecretString>,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| CatalogError::Transport(error.to_string()))?;
        Ok(Self { client, url: url.into(), token })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    fn describe(&self) -> String {
        format!("http ({})", self.url)
    }

    async fn fetch(&self) -> Result<Vec<FlightRecord>, CatalogError> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        let response =
            request.send().await.map_err(|error| CatalogError::Transport(error.to_string()))?;

        if !response.status().is_success() {
            warn!(
                event_name = "catalog.http_status",
                url = %self.url,
                status = %response.status(),
                "flight feed returned non-success status"
            );
            return Err(CatalogError::Status { status: response.status().as_u16() });
        }

        let body =
            response.text().await.map_err(|error| CatalogError::Transport(error.to_string()))?;
        parse_feed(&body)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wayfare_core::catalog::{CatalogError, CatalogSource};

    use super::HttpCatalogSource;

    #[tokio::test]
    async fn unreachable_feed_reports_transport_error() {
        let source =
            HttpCatalogSource::new("http://127.0.0.1:9/flights.json", Duration::from_secs(1), None)
                .expect("client builds");

        let error = source.fetch().await.expect_err("nothing listens on the discard port");
        assert!(matches!(error, CatalogError::Transport(_)));
        assert_eq!(source.describe(), "http (http://127.0.0.1:9/flights.json)");
    }
}
