//! Raw CSV fetching from the published sheet endpoints

use std::future::Future;

use reqwest::Client;
use tracing::{debug, error, info, instrument};

use super::endpoints::SheetEndpoints;
use super::http_client::create_http_client_with_timeout;
use crate::error::AppError;
use crate::sheets::models::Dataset;

/// Source of raw CSV text per dataset.
///
/// Implementations do not retry; the refresh scheduler re-invokes them on
/// its own cadence.
pub trait SheetSource: Send + Sync + 'static {
    fn fetch_csv(&self, dataset: Dataset) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Fetches sheets over HTTP from their configured export URLs.
#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    endpoints: SheetEndpoints,
}

impl HttpSheetSource {
    pub fn new(client: Client, endpoints: SheetEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Builds a source with its own client using the given request timeout.
    pub fn with_timeout(endpoints: SheetEndpoints, timeout_seconds: u64) -> Result<Self, AppError> {
        let client = create_http_client_with_timeout(timeout_seconds)?;
        Ok(Self::new(client, endpoints))
    }

    pub fn endpoints(&self) -> &SheetEndpoints {
        &self.endpoints
    }
}

impl SheetSource for HttpSheetSource {
    async fn fetch_csv(&self, dataset: Dataset) -> Result<String, AppError> {
        fetch_text(&self.client, self.endpoints.url(dataset)).await
    }
}

/// GETs `url` and returns the body text.
///
/// Transport failures map to the network variants of [`AppError`]; any
/// non-2xx response maps to [`AppError::HttpStatus`].
#[instrument(skip(client))]
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, AppError> {
    debug!("Fetching CSV from URL: {url}");

    let response = match client.get(url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!("Request failed for URL {}: {}", url, e);
            return if e.is_timeout() {
                Err(AppError::network_timeout(url))
            } else if e.is_connect() {
                Err(AppError::network_connection(url, e.to_string()))
            } else {
                Err(AppError::Fetch(e))
            };
        }
    };

    let status = response.status();
    debug!("Response status: {status}");

    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown error");
        error!("HTTP {} - {} (URL: {})", status.as_u16(), reason, url);
        return Err(AppError::http_status(status.as_u16(), reason, url));
    }

    let text = response.text().await.map_err(|e| {
        error!("Failed to read response text from URL {}: {}", url, e);
        if e.is_timeout() {
            AppError::network_timeout(url)
        } else {
            AppError::Fetch(e)
        }
    })?;

    info!("Fetched {} bytes from {}", text.len(), url);
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::api::http_client::create_test_http_client;
    use crate::sheets::models::Category;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    async fn source_for(server: &MockServer) -> HttpSheetSource {
        HttpSheetSource::new(
            create_test_http_client(),
            SheetEndpoints::with_base(&server.uri()),
        )
    }

    #[tokio::test]
    async fn test_fetch_csv_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/kids.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("banner\nS/No.,Name,Total\n"))
            .mount(&mock_server)
            .await;

        let source = source_for(&mock_server).await;
        let text = source
            .fetch_csv(Dataset::Category(Category::Kids))
            .await
            .unwrap();
        assert_eq!(text, "banner\nS/No.,Name,Total\n");
    }

    #[tokio::test]
    async fn test_fetch_csv_not_found_carries_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/scoreboard.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let source = source_for(&mock_server).await;
        let error = source.fetch_csv(Dataset::Scoreboard).await.unwrap_err();
        assert!(error.is_http_error());
        assert_eq!(error.status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_csv_server_error_is_not_retried() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/general.csv"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let source = source_for(&mock_server).await;
        let error = source.fetch_csv(Dataset::General).await.unwrap_err();
        assert_eq!(error.status(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_csv_connection_refused_is_network_error() {
        let source = HttpSheetSource::new(
            create_test_http_client(),
            SheetEndpoints::with_base("http://127.0.0.1:9"),
        );
        let error = source.fetch_csv(Dataset::General).await.unwrap_err();
        assert!(error.is_network_error());
        assert!(!error.is_http_error());
    }
}
