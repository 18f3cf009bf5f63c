use crate::document::Member;
use crate::element::{Coordinate, ElementKind};
use crate::error::model_error::ModelError;
use crate::{ErrorLocation, NormalizedElement, Tags};

use std::panic::Location;

/// Builder for creating validated NormalizedElement instances.
///
/// Used by the JSON normalizer so that every element shape goes through
/// the same checks regardless of which endpoint produced it.
#[derive(Debug, Default)]
pub struct NormalizedElementBuilder {
    kind: Option<ElementKind>,
    id: Option<u64>,
    lat: Option<f64>,
    lon: Option<f64>,
    version: Option<u64>,
    changeset: Option<u64>,
    user: Option<String>,
    timestamp: Option<String>,
    tags: Tags,
    node_ids: Vec<u64>,
    members: Vec<Member>,
}

impl NormalizedElementBuilder {
    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_lat(mut self, lat: Option<f64>) -> Self {
        self.lat = lat;
        self
    }

    pub fn with_lon(mut self, lon: Option<f64>) -> Self {
        self.lon = lon;
        self
    }

    pub fn with_version(mut self, version: Option<u64>) -> Self {
        self.version = version;
        self
    }

    pub fn with_changeset(mut self, changeset: Option<u64>) -> Self {
        self.changeset = changeset;
        self
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }

    pub fn with_timestamp(mut self, timestamp: Option<String>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_node_ids(mut self, node_ids: Vec<u64>) -> Self {
        self.node_ids = node_ids;
        self
    }

    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Build the NormalizedElement with validation.
    #[track_caller]
    pub fn build(self) -> Result<NormalizedElement, ModelError> {
        let kind = self.kind.ok_or_else(|| ModelError::Validation {
            message: String::from("Element type is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let id = self.id.ok_or_else(|| ModelError::Validation {
            message: String::from("Element id is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                Coordinate::new(lat, lon)?;
            }
            (None, None) => {}
            _ => {
                return Err(ModelError::Validation {
                    message: format!("{kind}/{id} has only one of lat/lon"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }

        if kind != ElementKind::Way && !self.node_ids.is_empty() {
            return Err(ModelError::Validation {
                message: format!("Only ways carry node references, got {kind}/{id}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if kind != ElementKind::Relation && !self.members.is_empty() {
            return Err(ModelError::Validation {
                message: format!("Only relations carry members, got {kind}/{id}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(NormalizedElement {
            kind,
            id,
            lat: self.lat,
            lon: self.lon,
            version: self.version,
            changeset: self.changeset,
            user: self.user,
            timestamp: self.timestamp,
            tags: self.tags,
            node_ids: self.node_ids,
            members: self.members,
        })
    }
}
