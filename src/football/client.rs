use async_trait::async_trait;
use chrono::NaiveDate;
use metrics::counter;
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{ApiEnvelope, Fixture, Prediction};

pub const API_FOOTBALL_BASE: &str = "https://v3.football.api-sports.io";
const API_KEY_HEADER: &str = "x-apisports-key";

#[derive(Debug, Error)]
pub enum FootballClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream reported errors: {0}")]
    Upstream(String),
}

/// Read side of API-Football as the command layer sees it.
///
/// Implementations never fail: a lookup that cannot be served yields an
/// empty list and is logged.
#[async_trait]
pub trait FootballApi: Send + Sync {
    async fn fixtures_on(&self, date: NaiveDate) -> Vec<Fixture>;

    async fn predictions_for(&self, fixture_id: i64) -> Vec<Prediction>;
}

#[derive(Debug, Clone)]
pub struct FootballClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FootballClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Fetch all fixtures scheduled on `date`.
    pub async fn get_fixtures_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<Fixture>, FootballClientError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.get_envelope("fixtures", &[("date", date.as_str())]).await
    }

    /// Fetch the prediction(s) for a single fixture.
    pub async fn get_predictions(
        &self,
        fixture_id: i64,
    ) -> Result<Vec<Prediction>, FootballClientError> {
        let id = fixture_id.to_string();
        self.get_envelope("predictions", &[("fixture", id.as_str())]).await
    }

    async fn get_envelope<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, FootballClientError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let resp = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<T> = resp.json().await?;
        if let Some(errors) = envelope.upstream_error() {
            return Err(FootballClientError::Upstream(errors));
        }
        Ok(envelope.response)
    }
}

#[async_trait]
impl FootballApi for FootballClient {
    async fn fixtures_on(&self, date: NaiveDate) -> Vec<Fixture> {
        match self.get_fixtures_by_date(date).await {
            Ok(fixtures) => {
                tracing::debug!(%date, count = fixtures.len(), "Fetched fixtures");
                counter!("fixtures_fetched_total").increment(fixtures.len() as u64);
                fixtures
            }
            Err(e) => {
                tracing::warn!(error = %e, %date, "Failed to fetch fixtures");
                counter!("upstream_failures_total", "endpoint" => "fixtures").increment(1);
                Vec::new()
            }
        }
    }

    async fn predictions_for(&self, fixture_id: i64) -> Vec<Prediction> {
        match self.get_predictions(fixture_id).await {
            Ok(predictions) => predictions,
            Err(e) => {
                tracing::warn!(error = %e, fixture_id, "Failed to fetch predictions");
                counter!("upstream_failures_total", "endpoint" => "predictions").increment(1);
                Vec::new()
            }
        }
    }
}
