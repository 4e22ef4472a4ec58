//! API Client
//!
//! Thin typed wrapper over the medal backend's REST endpoints. Every call is a
//! single GET; failures are classified into `Http`, `DataShape` or `Request`
//! errors and never retried.

use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::domain::config::ServerConfig;
use crate::domain::flow::FlowGraph;
use crate::domain::host::HostPerformance;
use crate::domain::matrix::MatrixResponse;
use crate::domain::medal::{CountryRef, GameRef, HostCity, MedalRecord};
use crate::domain::sport::SportMedalRow;
use crate::error::{Error, Result};
use crate::services::query::{Endpoint, FlowParams, MatrixParams, QueryParams};

/// Shape checks applied after JSON decoding
pub trait Validate {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

impl<T> Validate for Vec<T> {}

impl Validate for MatrixResponse {
    fn validate(&self) -> Result<()> {
        if self.countries.is_empty() {
            return Err(Error::data_shape("matrix has no countries"));
        }
        if self.sports.is_empty() {
            return Err(Error::data_shape("matrix has no sports"));
        }
        Ok(())
    }
}

impl Validate for FlowGraph {
    fn validate(&self) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::data_shape("flow graph has no nodes"));
        }
        if self.links.is_empty() {
            return Err(Error::data_shape("flow graph has no links"));
        }
        Ok(())
    }
}

/// Classify a raw response: non-2xx is an HTTP error, an empty or malformed
/// body is a data-shape error
pub fn decode_body<T>(status: u16, body: &[u8]) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    if !(200..300).contains(&status) {
        return Err(Error::Http { status });
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::data_shape("empty response body"));
    }
    let value: T = serde_json::from_slice(body)
        .map_err(|e| Error::data_shape(format!("malformed JSON: {e}")))?;
    value.validate()?;
    Ok(value)
}

/// HTTP client for the medal backend
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client from server configuration
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| Error::Invalid {
            message: format!("Invalid base URL {base:?}: {e}"),
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, base_url })
    }

    /// Build the request URL with percent-encoded query parameters
    pub fn endpoint_url(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| Error::Invalid {
                message: format!("Invalid endpoint path {}: {e}", endpoint.path()),
            })?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET an endpoint and decode its JSON body
    pub async fn fetch<T>(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let url = self.endpoint_url(endpoint, params)?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        let result = decode_body(status, &body);
        if let Err(e) = &result {
            tracing::warn!("GET {} failed: {}", url, e);
        }
        result
    }

    pub async fn sport_country_matrix(&self, params: &MatrixParams) -> Result<MatrixResponse> {
        self.fetch(Endpoint::SportCountryMatrix, &params.to_query())
            .await
    }

    pub async fn medal_flow(&self, params: &FlowParams) -> Result<FlowGraph> {
        self.fetch(Endpoint::MedalFlow, &params.to_query()).await
    }

    pub async fn host_performance(&self) -> Result<Vec<HostPerformance>> {
        self.fetch(Endpoint::HostPerformance, &[]).await
    }

    pub async fn countries(&self) -> Result<Vec<CountryRef>> {
        self.fetch(Endpoint::Countries, &[]).await
    }

    pub async fn games(&self) -> Result<Vec<GameRef>> {
        self.fetch(Endpoint::Games, &[]).await
    }

    pub async fn medal_tally(&self) -> Result<Vec<MedalRecord>> {
        self.fetch(Endpoint::MedalTally, &[]).await
    }

    pub async fn sports(&self) -> Result<Vec<String>> {
        self.fetch(Endpoint::Sports, &[]).await
    }

    pub async fn sport_medals(&self, sport: &str) -> Result<Vec<SportMedalRow>> {
        let params: QueryParams = vec![("sport", sport.to_string())];
        self.fetch(Endpoint::SportMedals, &params).await
    }

    pub async fn host_cities(&self) -> Result<Vec<HostCity>> {
        self.fetch(Endpoint::HostCities, &[]).await
    }
}
