// Unit tests for the OSM error taxonomy and status classification

use crate::error::osm::{BANDWIDTH_EXCEEDED, ELEMENT_MISSING, FETCH_FAILURE, REQUEST_TOO_LARGE};
use crate::error::{OsmError, OsmErrorKind, ParseError, StatusPolicy};

use common::{ErrorLocation, HttpStatusCode};
use models::ElementRef;

/// **VALUE**: Verifies the full status table for element, history and changeset lookups.
///
/// **WHY THIS MATTERS**: The application shows a different message for each classified
/// failure ("too large", "missing", "bandwidth"). A wrong mapping shows the user the
/// wrong explanation and hides what actually went wrong.
///
/// **BUG THIS CATCHES**: Would catch swapped arms or a policy that ignores 404.
#[test]
fn given_element_policy_when_classifying_statuses_then_maps_each_code() {
    let cases = [
        (400, OsmErrorKind::RequestTooLarge),
        (404, OsmErrorKind::ElementMissing),
        (509, OsmErrorKind::BandwidthExceeded),
        (410, OsmErrorKind::FetchFailure),
        (500, OsmErrorKind::FetchFailure),
        (503, OsmErrorKind::FetchFailure),
    ];

    for (code, expected) in cases {
        let error = OsmError::from_status(HttpStatusCode(code), StatusPolicy::Element, "/api/0.6/node/1");
        assert_eq!(error.kind(), expected, "status {code}");
    }
}

/// **VALUE**: Verifies bounding-box downloads do not treat 404 as a missing element.
///
/// **BUG THIS CATCHES**: The map endpoint has no element to be missing; reporting
/// `ElementMissing` there would be misleading.
#[test]
fn given_map_policy_when_classifying_statuses_then_404_is_fetch_failure() {
    let classify =
        |code| OsmError::from_status(HttpStatusCode(code), StatusPolicy::Map, "/api/0.6/map").kind();

    assert_eq!(classify(400), OsmErrorKind::RequestTooLarge);
    assert_eq!(classify(509), OsmErrorKind::BandwidthExceeded);
    assert_eq!(classify(404), OsmErrorKind::FetchFailure);
    assert_eq!(classify(500), OsmErrorKind::FetchFailure);
}

#[test]
fn given_classified_errors_when_reading_app_message_then_returns_constants() {
    let error = |code| OsmError::from_status(HttpStatusCode(code), StatusPolicy::Element, "x");

    assert_eq!(error(400).app_message(), Some(REQUEST_TOO_LARGE));
    assert_eq!(error(404).app_message(), Some(ELEMENT_MISSING));
    assert_eq!(error(509).app_message(), Some(BANDWIDTH_EXCEEDED));
    assert_eq!(error(500).app_message(), Some(FETCH_FAILURE));
    assert_eq!(REQUEST_TOO_LARGE.id, "osm.requestTooLarge");
    assert_eq!(FETCH_FAILURE.id, "osm.fetchFailure");
}

#[test]
fn given_app_message_when_serialized_then_uses_id_and_default_message_keys() {
    let json = serde_json::to_value(ELEMENT_MISSING).unwrap();

    assert_eq!(json["id"], "osm.elementMissing");
    assert_eq!(json["defaultMessage"], "OSM element is missing");
}

#[test]
fn given_invalid_request_when_reading_app_message_then_returns_none() {
    let error = OsmError::invalid_request("bad id");

    assert_eq!(error.kind(), OsmErrorKind::InvalidRequest);
    assert!(error.app_message().is_none());
}

/// **VALUE**: Verifies that input validation failures surface as `InvalidRequest`
/// rather than being collapsed into a generic fetch failure.
#[test]
fn given_model_error_when_converted_then_becomes_invalid_request() {
    let model_error = "node/abc".parse::<ElementRef>().unwrap_err();

    let error = OsmError::from(model_error);

    assert_eq!(error.kind(), OsmErrorKind::InvalidRequest);
    assert!(error.to_string().contains("node/abc"));
}

#[test]
fn given_parse_error_when_converted_then_becomes_fetch_failure() {
    let parse_error = ParseError::Xml {
        message: String::from("unexpected EOF"),
        location: ErrorLocation::caller(),
    };

    let error = OsmError::from(parse_error);

    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
    assert!(error.to_string().contains("unexpected EOF"));
}

#[test]
fn given_status_error_when_formatted_then_includes_status_context_and_location() {
    let error = OsmError::from_status(HttpStatusCode(509), StatusPolicy::Map, "/api/0.6/map");

    let formatted = error.to_string();

    assert!(formatted.starts_with("Bandwidth Exceeded Error"));
    assert!(formatted.contains("HTTP 509 from /api/0.6/map"));
    assert!(formatted.contains("error.rs"));
    assert!(error.location().file.contains("error.rs"));
}
