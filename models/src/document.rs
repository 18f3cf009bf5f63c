//! In-memory form of an `<osm>` XML document.

use crate::changeset::Changeset;
use crate::element::{Coordinate, ElementKind, ElementRef};
use crate::{BoundingBox, NormalizedElement, Tags};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Attributes shared by every element version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMeta {
    pub version: Option<u64>,
    pub changeset: Option<u64>,
    pub user: Option<String>,
    pub uid: Option<u64>,
    pub timestamp: Option<String>,
    pub visible: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmNode {
    pub id: u64,
    pub coordinate: Option<Coordinate>,
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsmWay {
    pub id: u64,
    pub node_ids: Vec<u64>,
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(rename = "ref")]
    pub ref_id: u64,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsmRelation {
    pub id: u64,
    pub members: Vec<Member>,
    #[serde(flatten)]
    pub meta: ElementMeta,
    #[serde(default)]
    pub tags: Tags,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsmDocument {
    pub version: Option<String>,
    pub generator: Option<String>,
    pub bounds: Option<BoundingBox>,
    pub nodes: Vec<OsmNode>,
    pub ways: Vec<OsmWay>,
    pub relations: Vec<OsmRelation>,
    pub changesets: Vec<Changeset>,
}

impl OsmDocument {
    pub fn node(&self, id: u64) -> Option<&OsmNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn way(&self, id: u64) -> Option<&OsmWay> {
        self.ways.iter().find(|w| w.id == id)
    }

    pub fn relation(&self, id: u64) -> Option<&OsmRelation> {
        self.relations.iter().find(|r| r.id == id)
    }

    /// Number of nodes, ways and relations (changesets excluded).
    pub fn element_count(&self) -> usize {
        self.nodes.len() + self.ways.len() + self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.element_count() == 0 && self.changesets.is_empty()
    }

    pub fn contains(&self, element: ElementRef) -> bool {
        match element.kind {
            ElementKind::Node => self.node(element.id).is_some(),
            ElementKind::Way => self.way(element.id).is_some(),
            ElementKind::Relation => self.relation(element.id).is_some(),
        }
    }

    /// Coordinates of a way's nodes, in way order, skipping nodes the
    /// document does not include. `None` when the way itself is absent.
    pub fn way_geometry(&self, way_id: u64) -> Option<Vec<Coordinate>> {
        let way = self.way(way_id)?;
        let positions: HashMap<u64, Coordinate> = self
            .nodes
            .iter()
            .filter_map(|n| n.coordinate.map(|c| (n.id, c)))
            .collect();

        Some(
            way.node_ids
                .iter()
                .filter_map(|id| positions.get(id).copied())
                .collect(),
        )
    }

    /// Convert one element of this document into the uniform representation.
    pub fn normalized(&self, element: ElementRef) -> Option<NormalizedElement> {
        let (meta, tags, lat, lon, node_ids, members) = match element.kind {
            ElementKind::Node => {
                let node = self.node(element.id)?;
                (
                    &node.meta,
                    &node.tags,
                    node.coordinate.map(|c| c.lat),
                    node.coordinate.map(|c| c.lon),
                    Vec::new(),
                    Vec::new(),
                )
            }
            ElementKind::Way => {
                let way = self.way(element.id)?;
                (&way.meta, &way.tags, None, None, way.node_ids.clone(), Vec::new())
            }
            ElementKind::Relation => {
                let relation = self.relation(element.id)?;
                (
                    &relation.meta,
                    &relation.tags,
                    None,
                    None,
                    Vec::new(),
                    relation.members.clone(),
                )
            }
        };

        Some(NormalizedElement {
            kind: element.kind,
            id: element.id,
            lat,
            lon,
            version: meta.version,
            changeset: meta.changeset,
            user: meta.user.clone(),
            timestamp: meta.timestamp.clone(),
            tags: tags.clone(),
            node_ids,
            members,
        })
    }
}
