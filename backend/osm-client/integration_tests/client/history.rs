use crate::helpers::{CHANGESETS_PATH, CHANGESETS_XML, client_for, history_json, unreachable_client};

use osm_client::OsmErrorKind;

use models::ChangesetRef;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HISTORY_PATH: &str = "/api/0.6/way/10/history.json";

/// **VALUE**: Verifies an empty id resolves to `None` without touching the network.
///
/// **WHY THIS MATTERS**: Callers pass the currently selected element, which is empty
/// when nothing is selected. That must be a cheap no-op, not an error or a request.
#[tokio::test]
async fn given_empty_id_when_fetching_history_then_returns_none_without_request() {
    // GIVEN: A server that records requests
    let server = MockServer::start().await;

    // WHEN: Fetching history for an empty id
    let history = client_for(&server)
        .fetch_element_history("", true)
        .await
        .expect("Empty id should not fail");

    // THEN: Nothing is returned and nothing was requested
    assert!(history.is_none());
    let requests = server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(requests.is_empty());
}

/// **VALUE**: Verifies history without changeset resolution leaves ids untouched.
///
/// **BUG THIS CATCHES**: Would catch the changesets endpoint being called even though
/// the caller did not ask for details.
#[tokio::test]
async fn given_resolution_disabled_when_fetching_history_then_keeps_ids_and_skips_changesets() {
    // GIVEN: A history endpoint and a changesets endpoint that must stay unused
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHANGESETS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGESETS_XML))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Fetching history without changesets
    let history = client_for(&server)
        .fetch_element_history("way/10", false)
        .await
        .expect("History fetch should succeed")
        .expect("Non-empty id yields entries");

    // THEN: Entries are in response order with raw ids
    let versions: Vec<_> = history.iter().map(|entry| entry.version).collect();
    assert_eq!(versions, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(history[0].changeset, ChangesetRef::Id(String::from("100")));
    assert!(history.iter().all(|entry| !entry.changeset.is_resolved()));
}

/// **VALUE**: Verifies changeset resolution requests each id once and substitutes details.
///
/// **WHY THIS MATTERS**: History views show who changed what and why. The comment and
/// author live on the changeset, so resolution is what makes the history readable.
///
/// **BUG THIS CATCHES**: Would catch duplicate ids in the query, ids resolved against the
/// wrong changeset, or unmatched ids being dropped instead of kept.
#[tokio::test]
async fn given_resolution_enabled_when_fetching_history_then_substitutes_changesets() {
    // GIVEN: History referencing 100, 200, 100 and a changesets endpoint knowing only 100
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_json()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHANGESETS_PATH))
        .and(query_param("changesets", "100,200"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGESETS_XML))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching history with changesets
    let history = client_for(&server)
        .fetch_element_history("way/10", true)
        .await
        .expect("History fetch should succeed")
        .expect("Non-empty id yields entries");

    // THEN: Both entries in changeset 100 are resolved, 200 keeps its id
    let first = history[0].changeset.details().expect("changeset 100 resolved");
    assert_eq!(first.comment(), Some("Add footpath nodes"));
    assert_eq!(first.user(), Some("alice"));
    assert!(history[2].changeset.is_resolved());
    assert_eq!(history[1].changeset, ChangesetRef::Id(String::from("200")));
}

/// **VALUE**: Verifies the history request itself follows the element status table.
///
/// **BUG THIS CATCHES**: Would catch history lookups reporting a deleted or oversized
/// element as a generic failure.
#[tokio::test]
async fn given_error_statuses_when_fetching_history_then_each_is_classified() {
    let cases = [
        (400, OsmErrorKind::RequestTooLarge),
        (404, OsmErrorKind::ElementMissing),
        (509, OsmErrorKind::BandwidthExceeded),
        (500, OsmErrorKind::FetchFailure),
    ];

    for (status, expected) in cases {
        // GIVEN: A history endpoint answering with `status`
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(HISTORY_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        // WHEN: Fetching the history
        let error = client_for(&server)
            .fetch_element_history("way/10", false)
            .await
            .expect_err("Non-success status should fail");

        // THEN: Classified per the status table
        assert_eq!(error.kind(), expected, "status {status}");
    }
}

/// **VALUE**: Verifies a failing changesets request fails the whole history call.
#[tokio::test]
async fn given_changesets_bandwidth_limit_when_resolving_history_then_propagates_error() {
    // GIVEN: History succeeds but changesets hit the bandwidth limit
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(HISTORY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(history_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHANGESETS_PATH))
        .respond_with(ResponseTemplate::new(509))
        .mount(&server)
        .await;

    // WHEN: Fetching history with changesets
    let error = client_for(&server)
        .fetch_element_history("way/10", true)
        .await
        .expect_err("Changeset failure should propagate");

    // THEN: The changesets classification is kept
    assert_eq!(error.kind(), OsmErrorKind::BandwidthExceeded);
}

#[tokio::test]
async fn given_unreachable_server_when_fetching_history_then_fetch_failure() {
    // GIVEN: A client pointing at a closed port
    let client = unreachable_client();

    // WHEN: Fetching history
    let error = client
        .fetch_element_history("way/10", false)
        .await
        .expect_err("Connection should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}
