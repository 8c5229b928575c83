//! Overpass API place lookup.
//!
//! One request per query. Nodes, ways and relations tagged with the
//! requested amenity are fetched; ways and relations are reduced to their
//! centroid by the server (`out center`).

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use super::http::AsyncHttpClient;
use super::types::{PlaceCategory, PlaceOfInterest, PlaceQuery, PlaceQueryError};
use crate::coord::Position;

/// Public Overpass interpreter endpoint.
pub const DEFAULT_OVERPASS_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

/// Time the server may spend evaluating a query.
pub const SERVER_TIMEOUT_SECS: u32 = 25;

/// Build the Overpass QL query for places of `category` within
/// `radius_meters` of `center`.
pub fn build_query(category: PlaceCategory, center: Position, radius_meters: u32) -> String {
    let filter = format!(
        "[\"amenity\"=\"{}\"](around:{},{},{})",
        category.amenity(),
        radius_meters,
        center.latitude,
        center.longitude
    );

    format!(
        "[out:json][timeout:{timeout}];\n(\n  node{filter};\n  way{filter};\n  relation{filter};\n);\nout center;",
        timeout = SERVER_TIMEOUT_SECS,
        filter = filter
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

impl OverpassElement {
    /// Direct coordinates, falling back to the centroid.
    fn position(&self) -> Option<Position> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Position::new(lat, lon)),
            (_, _, Some(center)) => Some(Position::new(center.lat, center.lon)),
            _ => None,
        }
    }

    fn label(&self, category: PlaceCategory) -> String {
        self.tags
            .get("name")
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .unwrap_or(category.default_label())
            .to_string()
    }
}

/// Parse an Overpass JSON response into places.
///
/// Elements with neither coordinates nor a centroid are dropped.
pub fn parse_response(
    body: &[u8],
    category: PlaceCategory,
) -> Result<Vec<PlaceOfInterest>, PlaceQueryError> {
    let response: OverpassResponse =
        serde_json::from_slice(body).map_err(|e| PlaceQueryError::Parse(e.to_string()))?;

    let total = response.elements.len();
    let places: Vec<PlaceOfInterest> = response
        .elements
        .iter()
        .filter_map(|element| {
            element
                .position()
                .map(|position| PlaceOfInterest::new(position, element.label(category), category))
        })
        .collect();

    if places.len() < total {
        debug!(
            dropped = total - places.len(),
            "Dropped Overpass elements without coordinates"
        );
    }

    Ok(places)
}

/// [`PlaceQuery`] backed by an Overpass interpreter.
pub struct OverpassClient<C: AsyncHttpClient> {
    http_client: C,
    endpoint: String,
}

impl<C: AsyncHttpClient> OverpassClient<C> {
    /// Creates a client for the public endpoint.
    pub fn new(http_client: C) -> Self {
        Self {
            http_client,
            endpoint: DEFAULT_OVERPASS_ENDPOINT.to_string(),
        }
    }

    /// Use another interpreter endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Interpreter URL queries are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the request URL carrying the URL-encoded query.
    fn build_url(&self, query: &str) -> Result<String, PlaceQueryError> {
        reqwest::Url::parse_with_params(&self.endpoint, &[("data", query)])
            .map(|url| url.to_string())
            .map_err(|e| {
                PlaceQueryError::Network(format!("Invalid endpoint '{}': {}", self.endpoint, e))
            })
    }
}

impl<C: AsyncHttpClient> PlaceQuery for OverpassClient<C>
where
    C: 'static,
{
    async fn query(
        &self,
        category: PlaceCategory,
        center: Position,
        radius_meters: u32,
    ) -> Result<Vec<PlaceOfInterest>, PlaceQueryError> {
        let query = build_query(category, center, radius_meters);
        let url = self.build_url(&query)?;

        debug!(%category, %center, radius_meters, "Querying Overpass");
        let body = self.http_client.get(&url).await?;
        parse_response(&body, category)
    }
}
