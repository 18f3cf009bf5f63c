use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ParseError {
    #[error("XML Error: {message} {location}")]
    Xml {
        message: String,
        location: ErrorLocation,
    },

    #[error("Attribute Error: <{element} {attribute}>: {message} {location}")]
    Attribute {
        element: String,
        attribute: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl From<serde_json::Error> for ParseError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ParseError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<quick_xml::Error> for ParseError {
    #[track_caller]
    fn from(error: quick_xml::Error) -> Self {
        ParseError::Xml {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
