use crate::helpers::{MAP_PATH, MAP_XML, client_for, unreachable_client};

use osm_client::OsmErrorKind;

use models::ElementRef;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BBOX: &str = "-0.1,51.5,-0.09,51.51";

/// **VALUE**: Verifies a bounding-box download hits `/api/0.6/map?bbox=...` and parses the XML.
///
/// **WHY THIS MATTERS**: This is the primary data path. The query must carry the bbox
/// exactly as `minLon,minLat,maxLon,maxLat` or the server returns the wrong area.
///
/// **BUG THIS CATCHES**: Would catch a swapped coordinate order in the query or an XML
/// parser that drops ways while collecting nodes.
#[tokio::test]
async fn given_valid_bbox_when_fetching_map_then_returns_parsed_document() {
    // GIVEN: A server answering the map endpoint for this bbox
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MAP_PATH))
        .and(query_param("bbox", BBOX))
        .respond_with(ResponseTemplate::new(200).set_body_string(MAP_XML))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Fetching the map
    let document = client_for(&server)
        .fetch_map(BBOX)
        .await
        .expect("Map fetch should succeed");

    // THEN: Nodes and ways are present and the way geometry resolves
    assert_eq!(document.nodes.len(), 2);
    assert_eq!(document.ways.len(), 1);
    assert!(document.contains("way/10".parse::<ElementRef>().expect("valid ref")));
    assert_eq!(document.bounds.as_ref().map(|b| b.min_lat), Some(51.5));
}

/// **VALUE**: Verifies HTTP 400 on a map download surfaces as `RequestTooLarge`.
///
/// **WHY THIS MATTERS**: The API answers 400 when the area or node count exceeds its
/// limits. The user needs to be told to zoom in, not that the fetch "failed".
#[tokio::test]
async fn given_server_returns_400_when_fetching_map_then_request_too_large() {
    // GIVEN: A server rejecting the area
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MAP_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("You requested too many nodes (limit is 50000)."),
        )
        .mount(&server)
        .await;

    // WHEN: Fetching the map
    let error = client_for(&server)
        .fetch_map(BBOX)
        .await
        .expect_err("400 should be an error");

    // THEN: Classified as too large
    assert_eq!(error.kind(), OsmErrorKind::RequestTooLarge);
}

#[tokio::test]
async fn given_server_returns_509_when_fetching_map_then_bandwidth_exceeded() {
    // GIVEN: A server reporting the bandwidth limit
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MAP_PATH))
        .respond_with(ResponseTemplate::new(509))
        .mount(&server)
        .await;

    // WHEN: Fetching the map
    let error = client_for(&server).fetch_map(BBOX).await.expect_err("509 should fail");

    // THEN: Classified as bandwidth exceeded
    assert_eq!(error.kind(), OsmErrorKind::BandwidthExceeded);
}

/// **VALUE**: Verifies that 404 on the map endpoint is a generic fetch failure.
///
/// **BUG THIS CATCHES**: Would catch the element status policy leaking into map
/// downloads, which would report "element missing" for a whole area.
#[tokio::test]
async fn given_server_returns_404_when_fetching_map_then_fetch_failure() {
    // GIVEN: A server without a map endpoint
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MAP_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // WHEN: Fetching the map
    let error = client_for(&server).fetch_map(BBOX).await.expect_err("404 should fail");

    // THEN: Not reported as a missing element
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}

/// **VALUE**: Verifies connection failures are classified as `FetchFailure`.
///
/// **WHY THIS MATTERS**: Offline users must get the same "failed to fetch" message as any
/// other unexpected failure instead of a raw transport error.
#[tokio::test]
async fn given_unreachable_server_when_fetching_map_then_fetch_failure() {
    // GIVEN: A client pointing at a closed port
    let client = unreachable_client();

    // WHEN: Fetching the map
    let error = client.fetch_map(BBOX).await.expect_err("Connection should fail");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}

/// **VALUE**: Verifies a malformed bbox is rejected before any request is sent.
///
/// **BUG THIS CATCHES**: Would catch the client forwarding garbage to the API and
/// burning rate limit on a request that can only fail.
#[tokio::test]
async fn given_malformed_bbox_when_fetching_map_then_invalid_request_without_calling_server() {
    // GIVEN: A server that must not be called
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MAP_XML))
        .expect(0)
        .mount(&server)
        .await;

    // WHEN: Fetching with only three coordinates
    let error = client_for(&server)
        .fetch_map("-0.1,51.5,-0.09")
        .await
        .expect_err("Malformed bbox should fail");

    // THEN: Rejected locally
    assert_eq!(error.kind(), OsmErrorKind::InvalidRequest);
}

/// **VALUE**: Verifies a 200 response whose body is not OSM XML becomes `FetchFailure`.
#[tokio::test]
async fn given_non_xml_body_when_fetching_map_then_fetch_failure() {
    // GIVEN: A proxy error page served with 200
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(MAP_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>Gateway</body></html>"))
        .mount(&server)
        .await;

    // WHEN: Fetching the map
    let error = client_for(&server).fetch_map(BBOX).await.expect_err("Body should not parse");

    // THEN: Classified as fetch failure
    assert_eq!(error.kind(), OsmErrorKind::FetchFailure);
}
