use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::core::errors::{MovieError, Result};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Metadata returned by a successful title lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMovie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    pub poster: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbPayload {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// Best-effort OMDb lookup client. One call per add operation; any failure
/// degrades to manual entry at the CLI and never crashes the process.
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// The base URL is overridable so tests can point at a local server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| MovieError::EnrichmentUnavailable(err.to_string()))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Looks up a title and returns its year, rating, and poster.
    pub fn fetch(&self, title: &str) -> Result<EnrichedMovie> {
        tracing::debug!(title, "querying OMDb");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("t", title)])
            .send()
            .map_err(|err| MovieError::EnrichmentUnavailable(err.to_string()))?;
        if !response.status().is_success() {
            return Err(MovieError::EnrichmentUnavailable(format!(
                "lookup failed with status {}",
                response.status()
            )));
        }
        let payload: OmdbPayload = response
            .json()
            .map_err(|err| MovieError::EnrichmentUnavailable(err.to_string()))?;
        payload_into_movie(payload)
    }
}

fn payload_into_movie(payload: OmdbPayload) -> Result<EnrichedMovie> {
    if !payload.response.eq_ignore_ascii_case("true") {
        return Err(MovieError::EnrichmentUnavailable(
            payload.error.unwrap_or_else(|| "title not found".into()),
        ));
    }
    let title = payload
        .title
        .ok_or_else(|| MovieError::EnrichmentUnavailable("response carried no title".into()))?;
    let year = parse_year(payload.year.as_deref().unwrap_or(""))?;
    let rating = parse_rating(payload.imdb_rating.as_deref().unwrap_or(""))?;
    let poster = payload
        .poster
        .filter(|value| !value.is_empty() && value != "N/A");
    Ok(EnrichedMovie {
        title,
        year,
        rating,
        poster,
    })
}

/// OMDb year strings may carry ranges ("2010–2015" for series); the leading
/// four digits identify the release year.
fn parse_year(raw: &str) -> Result<i32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return Err(MovieError::EnrichmentUnavailable(format!(
            "unusable year `{raw}`"
        )));
    }
    digits
        .parse()
        .map_err(|_| MovieError::EnrichmentUnavailable(format!("unusable year `{raw}`")))
}

fn parse_rating(raw: &str) -> Result<f64> {
    raw.parse()
        .map_err(|_| MovieError::EnrichmentUnavailable(format!("unusable rating `{raw}`")))
}
