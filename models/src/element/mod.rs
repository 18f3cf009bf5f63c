//! Element identity: kind, `type/id` references and coordinates.

pub mod builder;
pub mod normalized;

use crate::error::model_error::ModelError;
use crate::ErrorLocation;

use std::fmt::{Display, Formatter, Result as FormatResult};
use std::panic::Location;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepts `node/123` as well as the abbreviated `n123` form.
const ELEMENT_REF_PATTERN: &str = r"^(?:(node|way|relation)/|([nwr]))(\d+)$";

static ELEMENT_REF_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn get_element_ref_regex() -> &'static Regex {
    ELEMENT_REF_REGEX.get_or_init(|| Regex::new(ELEMENT_REF_PATTERN).expect("valid regex pattern"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl ElementKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Node => "node",
            ElementKind::Way => "way",
            ElementKind::Relation => "relation",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "node" | "n" => Some(ElementKind::Node),
            "way" | "w" => Some(ElementKind::Way),
            "relation" | "r" => Some(ElementKind::Relation),
            _ => None,
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ElementKind::from_prefix(value).ok_or_else(|| ModelError::Parse {
            input: value.to_string(),
            message: String::from("expected one of node, way, relation"),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// A `(kind, id)` pair identifying one OSM element, written `type/id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    pub kind: ElementKind,
    pub id: u64,
}

impl ElementRef {
    pub const fn new(kind: ElementKind, id: u64) -> Self {
        Self { kind, id }
    }

    /// API path segment, e.g. `way/42`.
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind, self.id)
    }
}

impl Display for ElementRef {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        write!(formatter, "{}/{}", self.kind, self.id)
    }
}

impl FromStr for ElementRef {
    type Err = ModelError;

    #[track_caller]
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse_error = |message: &str| ModelError::Parse {
            input: value.to_string(),
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        };

        let captures = get_element_ref_regex()
            .captures(value.trim())
            .ok_or_else(|| parse_error("expected type/id, e.g. node/123"))?;

        let prefix = captures
            .get(1)
            .or_else(|| captures.get(2))
            .map(|m| m.as_str())
            .unwrap_or_default();

        let kind = ElementKind::from_prefix(prefix)
            .ok_or_else(|| parse_error("unknown element type"))?;

        let id = captures
            .get(3)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .parse::<u64>()
            .map_err(|_| parse_error("element id out of range"))?;

        Ok(ElementRef { kind, id })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside the WGS84 range.
    #[track_caller]
    pub fn new(lat: f64, lon: f64) -> Result<Self, ModelError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(ModelError::Validation {
                message: format!("Latitude out of range: {lat}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(ModelError::Validation {
                message: format!("Longitude out of range: {lon}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self { lat, lon })
    }
}
