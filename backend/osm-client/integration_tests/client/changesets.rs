use crate::helpers::{CHANGESETS_PATH, CHANGESETS_XML, client_for, unreachable_client};

use osm_client::OsmErrorKind;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_ids_when_fetching_changesets_then_joins_ids_in_one_request() {
    // GIVEN: A server expecting a single comma-joined query
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHANGESETS_PATH))
        .and(query_param("changesets", "100,200"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGESETS_XML))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching two changesets
    let changesets = client_for(&server)
        .fetch_changesets(&["100", "200"])
        .await
        .expect("Changeset fetch should succeed");

    // THEN: Whatever the server returned is parsed
    assert_eq!(changesets.len(), 1);
    assert_eq!(changesets[0].id, 100);
    assert_eq!(changesets[0].created_at(), Some("2020-01-01T00:00:00Z"));
}

/// **VALUE**: Verifies an empty id list short-circuits.
///
/// **BUG THIS CATCHES**: Would catch `?changesets=` being sent, which the API rejects
/// with 400 and would be misreported as "request too large".
#[tokio::test]
async fn given_no_ids_when_fetching_changesets_then_returns_empty_without_request() {
    // GIVEN: A server that must not be called
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Fetching no changesets
    let ids: [&str; 0] = [];
    let changesets = client_for(&server)
        .fetch_changesets(&ids)
        .await
        .expect("Empty list should succeed");

    // THEN: Nothing is returned
    assert!(changesets.is_empty());
}

#[tokio::test]
async fn given_non_numeric_id_when_fetching_changesets_then_invalid_request() {
    // GIVEN: A server that must not be called
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(CHANGESETS_XML))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Fetching with a bad id
    let error = client_for(&server)
        .fetch_changesets(&["100", "abc"])
        .await
        .expect_err("Bad id should fail");

    // THEN: Rejected locally
    assert_eq!(error.kind(), OsmErrorKind::InvalidRequest);
}

/// **VALUE**: Verifies the changesets endpoint follows the element status table.
///
/// **BUG THIS CATCHES**: Would catch the changesets call being issued under the map
/// policy, which reports a missing changeset as a generic failure.
#[tokio::test]
async fn given_error_statuses_when_fetching_changesets_then_each_is_classified() {
    let cases = [
        (400, OsmErrorKind::RequestTooLarge),
        (404, OsmErrorKind::ElementMissing),
        (509, OsmErrorKind::BandwidthExceeded),
        (500, OsmErrorKind::FetchFailure),
    ];

    for (status, expected) in cases {
        // GIVEN: A server answering with `status`
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CHANGESETS_PATH))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        // WHEN: Fetching
        let error = client_for(&server)
            .fetch_changesets(&["999"])
            .await
            .expect_err("Non-success status should fail");

        // THEN: Classified per the status table
        assert_eq!(error.kind(), expected, "status {status}");
    }
}

#[tokio::test]
async fn given_unreachable_server_when_fetching_changesets_then_fetch_failure() {
    // GIVEN: A client pointing at a closed port
    let client = unreachable_client();

    // WHEN: Fetching changesets
    let error = client
        .fetch_changesets(&["100"])
        .await
        .expect_err("Connection should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}
