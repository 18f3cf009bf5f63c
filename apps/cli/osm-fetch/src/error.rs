use common::ErrorLocation;
use osm_client::{ClientError, OsmError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors reported by the `osm-fetch` command line.
///
/// Printed to stderr as JSON on failure so scripts can branch on
/// `data.messageId` instead of parsing text.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OsmFetchError {
    /// Error from this App
    #[error("Osm Fetch Error: {message} {location}")]
    OsmFetch {
        message: String,
        location: ErrorLocation,
    },

    /// Failure reported by the OSM client
    #[error("Api Error: {message} {location}")]
    Api {
        /// Stable id such as `osm.elementMissing`, absent for unclassified failures
        #[serde(rename = "messageId")]
        message_id: Option<&'static str>,
        message: String,
        location: ErrorLocation,
    },

    /// Config file or environment override could not be used
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}

impl OsmFetchError {
    /// Process exit code: 2 for config problems, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            OsmFetchError::Config { .. } => 2,
            OsmFetchError::OsmFetch { .. } | OsmFetchError::Api { .. } => 1,
        }
    }
}

impl From<OsmError> for OsmFetchError {
    #[track_caller]
    fn from(error: OsmError) -> Self {
        OsmFetchError::Api {
            message_id: error.app_message().map(|message| message.id),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ClientError> for OsmFetchError {
    #[track_caller]
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Osm(error) => OsmFetchError::from(error),
            ClientError::Config(error) => OsmFetchError::Config {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}
