//! Dispatch of parsed subcommands onto [`OsmClient`] calls.

use crate::cli::Command;
use crate::error::OsmFetchError;

use common::ErrorLocation;
use osm_client::{ElementFormat, OsmClient};

use std::panic::Location;

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;

/// Run one subcommand and return its result as JSON.
///
/// `history` with an empty id and `user` for an unknown account yield `null`.
pub async fn run(client: &OsmClient, command: &Command) -> Result<Value, OsmFetchError> {
    debug!("Running {command:?}");

    match command {
        Command::Map { bbox } => {
            let document = client.fetch_map(bbox).await?;
            info!("Fetched {} elements for {bbox}", document.element_count());
            to_json(&document)
        }
        Command::Element { id, xml } => {
            let element = client
                .fetch_element(id, ElementFormat::from_xml_flag(*xml))
                .await?;
            to_json(&element)
        }
        Command::History { id, changesets } => {
            let history = client.fetch_element_history(id, *changesets).await?;
            if let Some(entries) = &history {
                info!("Fetched {} versions of {id}", entries.len());
            }
            to_json(&history)
        }
        Command::Changesets { ids } => {
            let changesets = client.fetch_changesets(ids.as_slice()).await?;
            info!("Fetched {} of {} changesets", changesets.len(), ids.len());
            to_json(&changesets)
        }
        Command::User { id } => {
            let user = client.fetch_user(id).await?;
            if user.is_none() {
                info!("User {id} not found");
            }
            to_json(&user)
        }
    }
}

#[track_caller]
fn to_json<T: Serialize>(value: &T) -> Result<Value, OsmFetchError> {
    serde_json::to_value(value).map_err(|e| OsmFetchError::OsmFetch {
        message: format!("Failed to serialize result: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

/// Render a result for stdout.
#[track_caller]
pub fn render(value: &Value, pretty: bool) -> Result<String, OsmFetchError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };

    rendered.map_err(|e| OsmFetchError::OsmFetch {
        message: format!("Failed to render output: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })
}
