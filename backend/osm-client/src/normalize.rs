//! Normalization of OSM API JSON bodies into model types.
//!
//! The API's JSON envelope is `{"version", "generator", "elements": [...]}`
//! for element and history lookups and `{"user": {...}}` for user lookups.
//! Every element shape funnels through [`NormalizedElementBuilder`] so nodes,
//! ways and relations come out with the same fields.

use crate::error::parse::ParseError;

use common::ErrorLocation;
use models::{
    Changeset, ChangesetRef, ElementKind, HistoryEntry, Member, NormalizedElement,
    NormalizedElementBuilder, OsmUser, Tags,
};

use std::collections::{HashMap, HashSet};
use std::panic::Location;

use serde::Deserialize;
use serde_json::Value;

/// One element as it appears in the `elements` array.
#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    version: Option<u64>,
    changeset: Option<u64>,
    user: Option<String>,
    uid: Option<u64>,
    timestamp: Option<String>,
    visible: Option<bool>,
    #[serde(default)]
    tags: Tags,
    #[serde(default)]
    nodes: Vec<u64>,
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct ElementsEnvelope {
    #[serde(default)]
    elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: RawUser,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id: u64,
    display_name: String,
    account_created: Option<String>,
    description: Option<String>,
    changesets: Option<RawCount>,
}

#[derive(Debug, Deserialize)]
struct RawCount {
    count: u64,
}

impl RawElement {
    fn into_normalized(self) -> Result<NormalizedElement, ParseError> {
        let element = NormalizedElementBuilder::default()
            .with_kind(self.kind)
            .with_id(self.id)
            .with_lat(self.lat)
            .with_lon(self.lon)
            .with_version(self.version)
            .with_changeset(self.changeset)
            .with_user(self.user)
            .with_timestamp(self.timestamp)
            .with_tags(self.tags)
            .with_node_ids(self.nodes)
            .with_members(self.members)
            .build()?;

        Ok(element)
    }

    #[track_caller]
    fn into_history_entry(self) -> Result<HistoryEntry, ParseError> {
        let changeset = self.changeset.ok_or_else(|| ParseError::Json {
            message: format!("history entry {}/{} has no changeset", self.kind, self.id),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(HistoryEntry {
            kind: self.kind,
            id: self.id,
            version: self.version,
            timestamp: self.timestamp,
            user: self.user,
            uid: self.uid,
            visible: self.visible,
            changeset: ChangesetRef::Id(changeset.to_string()),
            lat: self.lat,
            lon: self.lon,
            tags: self.tags,
        })
    }
}

/// Convert a single JSON element object into the uniform representation.
pub fn element_from_json(value: &Value) -> Result<NormalizedElement, ParseError> {
    RawElement::deserialize(value)?.into_normalized()
}

/// Pick `elements[0]` out of an API envelope.
#[track_caller]
pub fn first_element(value: &Value) -> Result<&Value, ParseError> {
    value
        .get("elements")
        .and_then(Value::as_array)
        .and_then(|elements| elements.first())
        .ok_or_else(|| ParseError::Json {
            message: String::from("response contains no elements"),
            location: ErrorLocation::from(Location::caller()),
        })
}

/// Convert a `history.json` envelope into entries, preserving response order.
pub fn history_from_json(value: &Value) -> Result<Vec<HistoryEntry>, ParseError> {
    ElementsEnvelope::deserialize(value)?
        .elements
        .into_iter()
        .map(RawElement::into_history_entry)
        .collect()
}

pub fn user_from_json(value: &Value) -> Result<OsmUser, ParseError> {
    let envelope = UserEnvelope::deserialize(value)?;
    let user = envelope.user;

    Ok(OsmUser {
        id: user.id,
        display_name: user.display_name,
        account_created: user.account_created,
        description: user.description.filter(|d| !d.is_empty()),
        changesets_count: user.changesets.map(|c| c.count),
    })
}

/// Distinct changeset ids referenced by `entries`, in first-seen order.
pub fn changeset_ids(entries: &[HistoryEntry]) -> Vec<String> {
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter_map(|entry| match &entry.changeset {
            ChangesetRef::Id(raw) => Some(raw.clone()),
            ChangesetRef::Resolved(changeset) => Some(changeset.id.to_string()),
        })
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Replace each entry's changeset id with the matching changeset's details.
///
/// Ids with no match in `changesets` are left exactly as they were.
pub fn resolve_changesets(
    entries: Vec<HistoryEntry>,
    changesets: &[Changeset],
) -> Vec<HistoryEntry> {
    let by_id: HashMap<u64, &Changeset> = changesets.iter().map(|c| (c.id, c)).collect();

    entries
        .into_iter()
        .map(|mut entry| {
            let matched = match &entry.changeset {
                ChangesetRef::Id(raw) => raw
                    .parse::<u64>()
                    .ok()
                    .and_then(|id| by_id.get(&id).copied()),
                ChangesetRef::Resolved(_) => None,
            };

            if let Some(changeset) = matched {
                entry.changeset = ChangesetRef::Resolved(changeset.clone());
            }

            entry
        })
        .collect()
}
