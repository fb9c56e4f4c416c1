// src/geo/nominatim.rs
use crate::errors::ServerError;
use crate::geo::{Place, PlacesLookup};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = "inmobiliaria/0.1 (+https://github.com/inmobiliaria)";

/// Row shape shared by `/search` and `/reverse`. Coordinates come back as text.
#[derive(Debug, Deserialize)]
struct NominatimRow {
    display_name: String,
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReverseResponse {
    Found(NominatimRow),
    NotFound { error: String },
}

impl NominatimRow {
    fn into_place(self) -> Option<Place> {
        let lat = self.lat.trim().parse().ok()?;
        let lng = self.lon.trim().parse().ok()?;
        Some(Place {
            display_name: self.display_name,
            lat,
            lng,
        })
    }
}

pub struct NominatimClient {
    client: Client,
    base_url: Url,
    country_codes: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Result<Self, ServerError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ServerError::Upstream(format!("invalid geocoder url: {e}")))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            country_codes: "mx".to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServerError> {
        self.base_url
            .join(path)
            .map_err(|e| ServerError::Upstream(format!("invalid geocoder path: {e}")))
    }

    fn get_text(&self, url: Url) -> Result<String, ServerError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ServerError::Upstream(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ServerError::Upstream(format!(
                "geocoder returned {}",
                resp.status()
            )));
        }

        resp.text().map_err(|e| ServerError::Upstream(e.to_string()))
    }
}

impl PlacesLookup for NominatimClient {
    fn search(&self, query: &str) -> Result<Vec<Place>, ServerError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut url = self.endpoint("search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "5")
            .append_pair("countrycodes", &self.country_codes);

        parse_search(&self.get_text(url)?)
    }

    fn reverse(&self, lat: f64, lng: f64) -> Result<Option<Place>, ServerError> {
        let mut url = self.endpoint("reverse")?;
        url.query_pairs_mut()
            .append_pair("lat", &lat.to_string())
            .append_pair("lon", &lng.to_string())
            .append_pair("format", "jsonv2");

        parse_reverse(&self.get_text(url)?)
    }
}

fn parse_search(body: &str) -> Result<Vec<Place>, ServerError> {
    let rows: Vec<NominatimRow> = serde_json::from_str(body)
        .map_err(|e| ServerError::Upstream(format!("unexpected geocoder payload: {e}")))?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let name = row.display_name.clone();
            let place = row.into_place();
            if place.is_none() {
                warn!(%name, "skipping place with unparseable coordinates");
            }
            place
        })
        .collect())
}

fn parse_reverse(body: &str) -> Result<Option<Place>, ServerError> {
    let resp: ReverseResponse = serde_json::from_str(body)
        .map_err(|e| ServerError::Upstream(format!("unexpected geocoder payload: {e}")))?;

    Ok(match resp {
        ReverseResponse::Found(row) => row.into_place(),
        ReverseResponse::NotFound { error } => {
            debug!(%error, "reverse geocode found nothing");
            None
        }
    })
}
