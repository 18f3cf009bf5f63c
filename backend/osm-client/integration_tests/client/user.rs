use crate::helpers::{client_for, unreachable_client, user_json};

use osm_client::{OsmError, OsmErrorKind};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_PATH: &str = "/api/0.6/user/12.json";

#[tokio::test]
async fn given_existing_user_when_fetching_user_then_returns_profile() {
    // GIVEN: A server answering the user endpoint
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the user
    let user = client_for(&server)
        .fetch_user("12")
        .await
        .expect("User fetch should succeed")
        .expect("User exists");

    // THEN: The profile fields are mapped
    assert_eq!(user.id, 12);
    assert_eq!(user.display_name, "bob");
    assert_eq!(user.changesets_count, Some(42));
}

/// **VALUE**: Verifies an unknown user is an empty result, not an error.
///
/// **WHY THIS MATTERS**: Deleted and anonymous accounts are common in history views.
/// Treating them as errors would abort rendering a whole history.
#[tokio::test]
async fn given_unknown_user_when_fetching_user_then_returns_none() {
    // GIVEN: A server without that user
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // WHEN: Fetching the user
    let user = client_for(&server)
        .fetch_user("12")
        .await
        .expect("404 should not be an error");

    // THEN: Empty result
    assert!(user.is_none());
}

#[tokio::test]
async fn given_server_error_when_fetching_user_then_fetch_failure() {
    // GIVEN: A failing server
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(USER_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // WHEN: Fetching the user
    let error = client_for(&server).fetch_user("12").await.expect_err("500 should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}

/// **VALUE**: Verifies transport errors on the user path are passed through unclassified.
///
/// **WHY THIS MATTERS**: User lookups are best-effort decorations; callers decide how to
/// handle connectivity problems themselves and need the underlying transport error.
///
/// **BUG THIS CATCHES**: Would catch the user path being routed through the shared
/// classifier, which would hide the source error behind `FetchFailure`.
#[tokio::test]
async fn given_unreachable_server_when_fetching_user_then_returns_raw_http_error() {
    // GIVEN: A client pointing at a closed port
    let client = unreachable_client();

    // WHEN: Fetching a user
    let error = client.fetch_user("12").await.expect_err("Connection should fail");

    // THEN: The transport error is kept as the source
    assert_eq!(error.kind(), OsmErrorKind::Http);
    assert!(error.app_message().is_none());
    match error {
        OsmError::Http { source, .. } => assert!(source.is_connect() || source.is_request()),
        other => panic!("Expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn given_non_numeric_user_id_when_fetching_user_then_invalid_request() {
    // GIVEN: Any client
    let server = MockServer::start().await;

    // WHEN: Fetching with a display name instead of an id
    let error = client_for(&server).fetch_user("bob").await.expect_err("Bad id should fail");

    // THEN: Rejected locally
    assert_eq!(error.kind(), OsmErrorKind::InvalidRequest);
}
