use osm_fetch::cli::Command;
use osm_fetch::commands::{render, run};
use osm_fetch::error::OsmFetchError;

use osm_client::{ClientConfig, OsmClient};

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> OsmClient {
    let config = ClientConfig {
        api_url: server.uri(),
        timeout_secs: 5,
        ..ClientConfig::default()
    };
    OsmClient::new(&config).expect("Failed to build client")
}

/// **VALUE**: Verifies the element command emits the normalized element as JSON.
///
/// **WHY THIS MATTERS**: The CLI's stdout is consumed by scripts. The normalized shape
/// (`type`, `id`, `lat`, `lon`, `tags`) is the contract they rely on.
#[tokio::test]
async fn given_element_command_when_run_then_outputs_normalized_json() {
    // GIVEN: A server answering `node/1.json`
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/node/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "elements": [{"type": "node", "id": 1, "lat": 51.5, "lon": -0.1,
                          "version": 3, "tags": {"name": "Bench"}}]
        })))
        .mount(&server)
        .await;

    // WHEN: Running the element command
    let command = Command::Element {
        id: String::from("node/1"),
        xml: false,
    };
    let value = run(&client_for(&server), &command)
        .await
        .expect("Command should succeed");

    // THEN: The output is the normalized node
    assert_eq!(value["type"], "node");
    assert_eq!(value["id"], 1);
    assert_eq!(value["tags"]["name"], "Bench");
}

#[tokio::test]
async fn given_unknown_user_when_run_then_outputs_null() {
    // GIVEN: A server without that user
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/user/7.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    // WHEN: Running the user command
    let command = Command::User {
        id: String::from("7"),
    };
    let value = run(&client_for(&server), &command)
        .await
        .expect("Unknown user is not an error");

    // THEN: null is printed
    assert_eq!(value, Value::Null);
    assert_eq!(render(&value, false).expect("null renders"), "null");
}

#[tokio::test]
async fn given_empty_history_id_when_run_then_outputs_null() {
    let server = MockServer::start().await;

    let command = Command::History {
        id: String::new(),
        changesets: true,
    };
    let value = run(&client_for(&server), &command)
        .await
        .expect("Empty id is not an error");

    assert_eq!(value, Value::Null);
}

/// **VALUE**: Verifies API failures surface as `OsmFetchError::Api` with the stable id.
///
/// **BUG THIS CATCHES**: Would catch the command layer flattening client errors into
/// the generic app variant and losing the classification.
#[tokio::test]
async fn given_oversized_bbox_when_run_then_api_error_with_message_id() {
    // GIVEN: A server rejecting the area
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/0.6/map"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    // WHEN: Running the map command
    let command = Command::Map {
        bbox: String::from("-1,50,1,52"),
    };
    let err = run(&client_for(&server), &command)
        .await
        .expect_err("400 should fail");

    // THEN: Classified as too large
    match err {
        OsmFetchError::Api { message_id, .. } => {
            assert_eq!(message_id, Some("osm.requestTooLarge"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}
