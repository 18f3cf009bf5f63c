use crate::document::Member;
use crate::element::{Coordinate, ElementKind, ElementRef};
use crate::Tags;

use serde::{Deserialize, Serialize};

/// Uniform representation of a node, way or relation.
///
/// Nodes carry `lat`/`lon`; ways and relations leave them empty and carry
/// `node_ids` or `members` instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: u64,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub version: Option<u64>,
    pub changeset: Option<u64>,
    pub user: Option<String>,
    pub timestamp: Option<String>,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub node_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

impl NormalizedElement {
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::new(self.kind, self.id)
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate { lat, lon }),
            _ => None,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}
