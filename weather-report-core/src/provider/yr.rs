//! Client for the met.no (yr) compact locationforecast API.
//!
//! See https://api.met.no/weatherapi/locationforecast/2.0/documentation

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::Deserialize;
use std::f64::consts::PI;

use crate::{
    config::{Config, DEFAULT_BASE_URL},
    error::WeatherServiceFailure,
    location::LocationCatalog,
    model::{Location, LocationSettings, WeatherReading},
};

use super::WeatherService;

const COMPACT_FORECAST_PATH: &str = "/weatherapi/locationforecast/2.0/compact";

#[derive(Debug, Clone)]
pub struct YrWeatherService {
    http: Client,
    catalog: LocationCatalog,
    base_url: String,
}

impl YrWeatherService {
    pub fn new(catalog: LocationCatalog, http: Client) -> Self {
        Self { http, catalog, base_url: DEFAULT_BASE_URL.to_string() }
    }

    /// Build the HTTP client from `[http]` options and take locations from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(config.http.user_agent())
            .timeout(config.http.timeout())
            .build()
            .context("Failed to build HTTP client for met.no")?;

        Ok(Self::new(config.catalog(), http).with_base_url(config.http.base_url()))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn forecast_url(&self) -> String {
        format!("{}{}", self.base_url, COMPACT_FORECAST_PATH)
    }

    /// `Ok(None)` when the body is not JSON at all.
    async fn fetch_compact(
        &self,
        settings: &LocationSettings,
    ) -> Result<Option<CompactResponse>, WeatherServiceFailure> {
        let url = self.forecast_url();
        tracing::debug!(%url, lat = settings.lat, lon = settings.long, "requesting compact forecast");

        let res = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[("lat", settings.lat), ("lon", settings.long)])
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(transport_failure)?;

        let body = res.text().await.map_err(transport_failure)?;

        match serde_json::from_str(&body) {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => {
                tracing::warn!(error = %err, "met.no returned a body that is not a compact forecast");
                Ok(None)
            }
        }
    }
}

fn transport_failure(err: reqwest::Error) -> WeatherServiceFailure {
    let failure = WeatherServiceFailure::from_transport(err);
    tracing::warn!(
        reason = %failure.reason(),
        status = ?failure.status(),
        error = %failure,
        "met.no request failed"
    );
    failure
}

#[async_trait]
impl WeatherService for YrWeatherService {
    async fn get_weather(&self, location: &Location) -> Result<WeatherReading, WeatherServiceFailure> {
        let Some(settings) = self.catalog.resolve(location) else {
            tracing::debug!(%location, "location not configured, returning empty reading");
            return Ok(WeatherReading::empty());
        };

        let details = self.fetch_compact(settings).await?.and_then(CompactResponse::into_details);

        Ok(details.map(WeatherReading::from).unwrap_or_default())
    }
}

// Wire shape of the compact endpoint. Every link is optional: the upstream
// contract allows sparse payloads and a gap means "no data", not an error.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct CompactResponse {
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct Properties {
    timeseries: Option<Vec<Timeseries>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct Timeseries {
    data: Option<TimeseriesData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct TimeseriesData {
    instant: Option<Instant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct Instant {
    details: Option<Details>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
struct Details {
    air_temperature: Option<f64>,
    /// Degrees, 0 = north, clockwise.
    wind_from_direction: Option<f64>,
    wind_speed: Option<f64>,
}

impl CompactResponse {
    /// Instant details of the first timeseries entry. Later entries are ignored.
    fn into_details(self) -> Option<Details> {
        self.properties?.timeseries?.into_iter().next()?.data?.instant?.details
    }
}

impl From<Details> for WeatherReading {
    fn from(details: Details) -> Self {
        WeatherReading {
            temperature: details.air_temperature,
            wind_direction: details.wind_from_direction.map(|deg| PI * deg / 180.0),
            wind_speed: details.wind_speed,
        }
    }
}
