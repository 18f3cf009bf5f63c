//! Classified OSM API failures.
//!
//! Every classified variant maps to a stable [`AppMessage`] (`id` plus a
//! default message) that the application layer can display or translate.

use crate::error::parse::ParseError;

use common::{ErrorLocation, HttpStatusCode};
use models::ModelError;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error as ThisError;

/// Stable identifier and fallback text for a classified error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppMessage {
    pub id: &'static str,
    pub default_message: &'static str,
}

pub const REQUEST_TOO_LARGE: AppMessage = AppMessage {
    id: "osm.requestTooLarge",
    default_message: "OSM data request is too large",
};

pub const BANDWIDTH_EXCEEDED: AppMessage = AppMessage {
    id: "osm.bandwidthExceeded",
    default_message: "OSM bandwidth limit exceeded",
};

pub const ELEMENT_MISSING: AppMessage = AppMessage {
    id: "osm.elementMissing",
    default_message: "OSM element is missing",
};

pub const FETCH_FAILURE: AppMessage = AppMessage {
    id: "osm.fetchFailure",
    default_message: "Failed to fetch data from OSM",
};

/// Which status codes an endpoint distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// Bounding-box downloads: 400 and 509 only.
    Map,
    /// Element, history and changeset lookups: 400, 404 and 509.
    Element,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsmErrorKind {
    RequestTooLarge,
    BandwidthExceeded,
    ElementMissing,
    FetchFailure,
    Http,
    InvalidRequest,
}

impl OsmErrorKind {
    pub const fn app_message(&self) -> Option<AppMessage> {
        match self {
            OsmErrorKind::RequestTooLarge => Some(REQUEST_TOO_LARGE),
            OsmErrorKind::BandwidthExceeded => Some(BANDWIDTH_EXCEEDED),
            OsmErrorKind::ElementMissing => Some(ELEMENT_MISSING),
            OsmErrorKind::FetchFailure => Some(FETCH_FAILURE),
            OsmErrorKind::Http | OsmErrorKind::InvalidRequest => None,
        }
    }
}

#[derive(Debug, ThisError)]
pub enum OsmError {
    #[error("Request Too Large Error: {message} {location}")]
    RequestTooLarge {
        message: String,
        location: ErrorLocation,
    },

    #[error("Bandwidth Exceeded Error: {message} {location}")]
    BandwidthExceeded {
        message: String,
        location: ErrorLocation,
    },

    #[error("Element Missing Error: {message} {location}")]
    ElementMissing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Fetch Failure Error: {message} {location}")]
    FetchFailure {
        message: String,
        location: ErrorLocation,
    },

    /// Unclassified transport error, only surfaced by user lookups.
    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid Request Error: {message} {location}")]
    InvalidRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl OsmError {
    /// Classify a non-success HTTP status according to the endpoint's policy.
    #[track_caller]
    pub fn from_status(status: HttpStatusCode, policy: StatusPolicy, context: &str) -> Self {
        let message = format!("HTTP {status} from {context}");
        let location = ErrorLocation::from(Location::caller());

        match (status, policy) {
            (HttpStatusCode::BAD_REQUEST, _) => OsmError::RequestTooLarge { message, location },
            (HttpStatusCode::BANDWIDTH_LIMIT_EXCEEDED, _) => {
                OsmError::BandwidthExceeded { message, location }
            }
            (HttpStatusCode::NOT_FOUND, StatusPolicy::Element) => {
                OsmError::ElementMissing { message, location }
            }
            _ => OsmError::FetchFailure { message, location },
        }
    }

    #[track_caller]
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        OsmError::FetchFailure {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        OsmError::InvalidRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Keep a transport error as-is instead of collapsing it into a fetch failure.
    #[track_caller]
    pub fn raw_http(source: reqwest::Error) -> Self {
        OsmError::Http {
            message: source.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    pub fn kind(&self) -> OsmErrorKind {
        match self {
            OsmError::RequestTooLarge { .. } => OsmErrorKind::RequestTooLarge,
            OsmError::BandwidthExceeded { .. } => OsmErrorKind::BandwidthExceeded,
            OsmError::ElementMissing { .. } => OsmErrorKind::ElementMissing,
            OsmError::FetchFailure { .. } => OsmErrorKind::FetchFailure,
            OsmError::Http { .. } => OsmErrorKind::Http,
            OsmError::InvalidRequest { .. } => OsmErrorKind::InvalidRequest,
        }
    }

    /// `Some` for errors already classified into the OSM taxonomy.
    pub fn app_message(&self) -> Option<AppMessage> {
        self.kind().app_message()
    }

    pub fn location(&self) -> ErrorLocation {
        match self {
            OsmError::RequestTooLarge { location, .. }
            | OsmError::BandwidthExceeded { location, .. }
            | OsmError::ElementMissing { location, .. }
            | OsmError::FetchFailure { location, .. }
            | OsmError::Http { location, .. }
            | OsmError::InvalidRequest { location, .. } => *location,
        }
    }
}

impl From<reqwest::Error> for OsmError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        OsmError::FetchFailure {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<url::ParseError> for OsmError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        OsmError::InvalidRequest {
            message: format!("URL Parse Error: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ModelError> for OsmError {
    #[track_caller]
    fn from(error: ModelError) -> Self {
        OsmError::InvalidRequest {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ParseError> for OsmError {
    #[track_caller]
    fn from(error: ParseError) -> Self {
        OsmError::FetchFailure {
            message: format!("Unreadable response body: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
