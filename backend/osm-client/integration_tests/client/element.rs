use crate::helpers::{MAP_XML, authenticated_client_for, client_for, node_json, unreachable_client, way_json};

use osm_client::config::CONFIG_FILE_NAME;
use osm_client::{ElementFormat, OsmClient, OsmErrorKind};

use models::ElementKind;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the JSON element path returns the normalized node.
///
/// **WHY THIS MATTERS**: Consumers read `lat`, `lon` and `tags` off the normalized shape
/// without knowing the API envelope. Returning the envelope instead breaks every caller.
#[tokio::test]
async fn given_node_json_when_fetching_element_then_returns_normalized_node() {
    // GIVEN: A server answering `node/1.json`
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/node/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_json()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the element as JSON
    let fetched = client_for(&server)
        .fetch_element("node/1", ElementFormat::Json)
        .await
        .expect("Element fetch should succeed");

    // THEN: The normalized node carries coordinates and tags
    let node = fetched.normalized().expect("JSON format yields a normalized element");
    assert_eq!(node.kind, ElementKind::Node);
    assert_eq!(node.id, 1);
    assert_eq!(node.lat, Some(51.501));
    assert_eq!(node.tag("amenity"), Some("bench"));
}

#[tokio::test]
async fn given_abbreviated_way_ref_when_fetching_element_then_requests_way_path() {
    // GIVEN: A server answering `way/10.json`
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/way/10.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(way_json()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching with the short `w10` form
    let fetched = client_for(&server)
        .fetch_element("w10", ElementFormat::Json)
        .await
        .expect("Element fetch should succeed");

    // THEN: The way keeps its node list
    let way = fetched.normalized().expect("normalized way");
    assert_eq!(way.node_ids, vec![1, 2]);
}

/// **VALUE**: Verifies the XML path requests the extension-less URL and returns a document.
#[tokio::test]
async fn given_xml_format_when_fetching_element_then_returns_document() {
    // GIVEN: A server answering `way/10` with XML
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/way/10"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MAP_XML))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching as XML
    let fetched = client_for(&server)
        .fetch_element("way/10", ElementFormat::Xml)
        .await
        .expect("Element fetch should succeed");

    // THEN: The parsed document contains the way
    let document = fetched.document().expect("XML format yields a document");
    assert_eq!(document.way(10).map(|w| w.node_ids.len()), Some(2));
}

/// **VALUE**: Verifies the element status table (400, 404, 509, other).
///
/// **WHY THIS MATTERS**: Each classified failure drives a different user-facing message.
///
/// **BUG THIS CATCHES**: Would catch the element endpoint using the map policy and
/// reporting a deleted element as a generic failure.
#[tokio::test]
async fn given_error_statuses_when_fetching_element_then_each_is_classified() {
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
            .and(path("/api/0.6/node/1.json"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        // WHEN: Fetching the element
        let error = client_for(&server)
            .fetch_element("node/1", ElementFormat::Json)
            .await
            .expect_err("Non-success status should fail");

        // THEN: Classified per the status table
        assert_eq!(error.kind(), expected, "status {status}");
    }
}

#[tokio::test]
async fn given_unreachable_server_when_fetching_element_then_fetch_failure() {
    // GIVEN: A client pointing at a closed port
    let client = unreachable_client();

    // WHEN: Fetching an element
    let error = client
        .fetch_element("node/1", ElementFormat::Json)
        .await
        .expect_err("Connection should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}

/// **VALUE**: Verifies an envelope with an empty `elements` array is a fetch failure.
#[tokio::test]
async fn given_empty_elements_when_fetching_element_then_fetch_failure() {
    // GIVEN: A server returning no elements
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/node/1.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"elements": []})),
        )
        .mount(&server)
        .await;

    // WHEN: Fetching the element
    let error = client_for(&server)
        .fetch_element("node/1", ElementFormat::Json)
        .await
        .expect_err("Empty envelope should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}

/// **VALUE**: Verifies a configured access token is sent as a bearer header.
///
/// **BUG THIS CATCHES**: Would catch requests built without `prepare_request`, which
/// would silently drop authentication for that endpoint.
#[tokio::test]
async fn given_access_token_when_fetching_element_then_sends_bearer_header() {
    // GIVEN: A server that only answers authenticated requests
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/node/1.json"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_json()))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching with a token-bearing client
    let result = authenticated_client_for(&server, "test-token")
        .fetch_element("node/1", ElementFormat::Json)
        .await;

    // THEN: The authenticated mock matched
    assert!(result.is_ok(), "Expected success, got {result:?}");
}

/// **VALUE**: Verifies a blank `access_token` in the config file sends no auth header.
///
/// **BUG THIS CATCHES**: Would catch `Authorization: Bearer ` going out for a
/// placeholder token, which the API answers with 401 on every call.
#[tokio::test]
async fn given_blank_token_in_config_file_when_fetching_element_then_sends_no_auth_header() {
    // GIVEN: A config file with an empty token and a server rejecting any auth header
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/node/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(node_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config_dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        config_dir.path().join(CONFIG_FILE_NAME),
        format!("api_url = \"{}\"\naccess_token = \"\"\n", server.uri()),
    )
    .expect("Failed to write config");

    // WHEN: Building the client from that directory and fetching
    let result = OsmClient::from_config_dir(config_dir.path())
        .expect("Config should load")
        .fetch_element("node/1", ElementFormat::Json)
        .await;

    // THEN: The unauthenticated mock answered
    assert!(result.is_ok(), "Expected success, got {result:?}");
}
