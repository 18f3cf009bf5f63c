//! Shared building blocks for the OSM fetch workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): Error location tracking, HTTP status helpers, secrets
//! - **models**: Pure OSM data structures
//! - **osm-client**: HTTP client, parsing and normalization over the models
//! - **osm-fetch**: Command-line application wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;
