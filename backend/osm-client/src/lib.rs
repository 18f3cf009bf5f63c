//! Client for the OpenStreetMap API 0.6.
//!
//! Fetches map data, elements, element history, changesets and users,
//! classifies HTTP failures into [`error::OsmError`] and normalizes the
//! responses into [`models`] types.

pub mod config;
pub mod error;
pub mod normalize;
pub mod osm_client;
pub mod xml;

#[cfg(test)]
mod tests;

pub use config::ClientConfig;
pub use error::{ClientError, OsmError, OsmErrorKind};
pub use osm_client::{ElementFormat, FetchedElement, OsmClient};

const CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const OSM_API_BASE_URL: &str = "https://api.openstreetmap.org";
pub const OSM_API_VERSION: &str = "0.6";
pub const OSM_API_PATH: &str = const_format::concatcp!("api/", OSM_API_VERSION, "/");
pub const DEFAULT_USER_AGENT: &str = const_format::concatcp!("osm-fetch/", CRATE_VERSION);
