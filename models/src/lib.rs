//! Domain models for OpenStreetMap data.
//!
//! This crate contains pure data structures representing the records the
//! OSM API returns. Models have no I/O - they're just data that can be
//! passed between the client and the application.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **osm-client**: Fetching, parsing and normalization producing these models
//! - **osm-fetch**: Application wiring everything together

pub mod bounding_box;
pub mod changeset;
pub mod document;
pub mod element;
pub mod error;
pub mod user;

#[cfg(test)]
mod tests;

pub use bounding_box::BoundingBox;
pub use changeset::{Changeset, ChangesetRef, HistoryEntry};
pub use document::{ElementMeta, Member, OsmDocument, OsmNode, OsmRelation, OsmWay};
pub use element::builder::NormalizedElementBuilder;
pub use element::normalized::NormalizedElement;
pub use element::{Coordinate, ElementKind, ElementRef};
pub use error::model_error::ModelError;
pub use user::OsmUser;

pub use common::ErrorLocation;

/// Key/value tags attached to elements and changesets.
pub type Tags = std::collections::BTreeMap<String, String>;
