//! Nearby places
//!
//! Looks up police stations and hospitals around a position through the
//! Overpass API (OpenStreetMap).
//!
//! ```ignore
//! use solotrav::places::{AsyncReqwestClient, OverpassClient, PlaceCategory, PlaceQuery};
//!
//! let client = OverpassClient::new(AsyncReqwestClient::new()?);
//! let hospitals = client
//!     .query(PlaceCategory::Hospital, here, DEFAULT_SEARCH_RADIUS_METERS)
//!     .await?;
//! ```

mod http;
mod overpass;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use overpass::{
    build_query, parse_response, OverpassClient, DEFAULT_OVERPASS_ENDPOINT, SERVER_TIMEOUT_SECS,
};
pub use types::{
    PlaceCategory, PlaceOfInterest, PlaceQuery, PlaceQueryError, DEFAULT_SEARCH_RADIUS_METERS,
};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
