// Unit tests for error module
// Tests JSON shape and conversion from client errors

use crate::error::OsmFetchError;

use common::{ErrorLocation, HttpStatusCode};
use osm_client::error::{ConfigError, StatusPolicy};
use osm_client::{ClientError, OsmError};

use std::panic::Location;

use serde_json::Value;

/// **VALUE**: Verifies a classified API error keeps its stable message id.
///
/// **WHY THIS MATTERS**: Scripts branch on `messageId` (`osm.elementMissing` etc.) to decide
/// whether to retry, shrink the area or give up. Losing it forces text matching.
///
/// **BUG THIS CATCHES**: Would catch the `From<OsmError>` impl dropping `app_message()`.
#[test]
fn given_classified_osm_error_when_converted_then_keeps_message_id() {
    // GIVEN: A 404 from an element lookup
    let osm_error = OsmError::from_status(
        HttpStatusCode::NOT_FOUND,
        StatusPolicy::Element,
        "/api/0.6/node/1.json",
    );

    // WHEN: Converting and serializing
    let err = OsmFetchError::from(osm_error);
    let json: Value = serde_json::to_value(&err).expect("Error should serialize");

    // THEN: Tagged as Api with the element-missing id
    assert_eq!(json["type"], "Api");
    assert_eq!(json["data"]["messageId"], "osm.elementMissing");
    assert!(
        json["data"]["message"]
            .as_str()
            .is_some_and(|m| m.contains("node/1.json"))
    );
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn given_invalid_request_when_converted_then_message_id_is_null() {
    // GIVEN: A locally rejected request
    let err = OsmFetchError::from(OsmError::invalid_request("Invalid user id: \"bob\""));

    // WHEN: Serializing
    let json: Value = serde_json::to_value(&err).expect("Error should serialize");

    // THEN: No stable id applies
    assert!(json["data"]["messageId"].is_null());
}

/// **VALUE**: Verifies config failures map to the Config variant and exit code 2.
///
/// **BUG THIS CATCHES**: Would catch config errors being reported as API failures, which
/// would send users looking at the network instead of their config file.
#[test]
fn given_client_config_error_when_converted_then_config_variant() {
    // GIVEN: A config validation failure wrapped in ClientError
    let client_error = ClientError::Config(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("timeout_secs must be greater than zero"),
    });

    // WHEN: Converting
    let err = OsmFetchError::from(client_error);

    // THEN: Config variant with its own exit code
    assert!(matches!(err, OsmFetchError::Config { .. }));
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("timeout_secs"));
}

#[test]
fn given_app_error_when_formatted_then_includes_location() {
    // GIVEN: An app error created here
    let err = OsmFetchError::OsmFetch {
        message: String::from("Failed to render output"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting
    let text = err.to_string();

    // THEN: Message and source file are present
    assert!(text.contains("Osm Fetch Error: Failed to render output"));
    assert!(text.contains("error.rs"));
}
