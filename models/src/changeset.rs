//! Changesets and the element history entries that reference them.

use crate::element::{ElementKind, ElementRef};
use crate::Tags;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A changeset as returned by `/api/0.6/changesets`.
///
/// `attributes` holds every XML attribute other than `id` verbatim
/// (`created_at`, `closed_at`, `open`, `user`, `uid`, bounds, counts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub id: u64,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl Changeset {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            tags: Tags::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn user(&self) -> Option<&str> {
        self.attribute("user")
    }

    pub fn created_at(&self) -> Option<&str> {
        self.attribute("created_at")
    }

    pub fn comment(&self) -> Option<&str> {
        self.tags.get("comment").map(String::as_str)
    }
}

/// The changeset a history entry points at: either the bare id as the
/// history response gave it, or the matched changeset details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangesetRef {
    Id(String),
    Resolved(Changeset),
}

impl ChangesetRef {
    /// Numeric id, when the reference is resolved or its id string is an integer.
    pub fn id(&self) -> Option<u64> {
        match self {
            ChangesetRef::Id(raw) => raw.parse().ok(),
            ChangesetRef::Resolved(changeset) => Some(changeset.id),
        }
    }

    pub fn details(&self) -> Option<&Changeset> {
        match self {
            ChangesetRef::Resolved(changeset) => Some(changeset),
            ChangesetRef::Id(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ChangesetRef::Resolved(_))
    }
}

/// One version of an element from `/{type}/{id}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub id: u64,
    pub version: Option<u64>,
    pub timestamp: Option<String>,
    pub user: Option<String>,
    pub uid: Option<u64>,
    pub visible: Option<bool>,
    pub changeset: ChangesetRef,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: Tags,
}

impl HistoryEntry {
    pub fn element_ref(&self) -> ElementRef {
        ElementRef::new(self.kind, self.id)
    }
}
