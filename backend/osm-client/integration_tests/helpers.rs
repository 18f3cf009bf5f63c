//! Test helpers for OSM client integration tests.
//!
//! - Building clients against a wiremock server
//! - Building a client whose target refuses connections
//! - Canned OSM API response bodies

use osm_client::{ClientConfig, OsmClient};

use std::net::TcpListener;

use common::RedactedToken;
use serde_json::{Value, json};
use wiremock::MockServer;

pub const MAP_PATH: &str = "/api/0.6/map";
pub const CHANGESETS_PATH: &str = "/api/0.6/changesets";

pub const MAP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="CGImap 0.8.10">
 <bounds minlat="51.5" minlon="-0.1" maxlat="51.51" maxlon="-0.09"/>
 <node id="1" version="1" changeset="100" lat="51.501" lon="-0.099"/>
 <node id="2" version="1" changeset="100" lat="51.502" lon="-0.098"/>
 <way id="10" version="2" changeset="200">
  <nd ref="1"/>
  <nd ref="2"/>
  <tag k="highway" v="footway"/>
 </way>
</osm>"#;

pub const CHANGESETS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="OpenStreetMap server">
 <changeset id="100" created_at="2020-01-01T00:00:00Z" open="false" user="alice" uid="11" comments_count="0" changes_count="2">
  <tag k="comment" v="Add footpath nodes"/>
 </changeset>
</osm>"#;

pub fn config_for(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_url: base_url.to_string(),
        timeout_secs: 5,
        ..ClientConfig::default()
    }
}

/// Test helper: Client targeting the mock server.
pub fn client_for(server: &MockServer) -> OsmClient {
    OsmClient::new(&config_for(&server.uri())).expect("Failed to build client")
}

/// Test helper: Client sending a bearer token.
pub fn authenticated_client_for(server: &MockServer, token: &str) -> OsmClient {
    let config = ClientConfig {
        access_token: Some(RedactedToken::new(token)),
        ..config_for(&server.uri())
    };
    OsmClient::new(&config).expect("Failed to build client")
}

/// Test helper: Client whose target port has no listener, so every request
/// fails at the connection stage.
pub fn unreachable_client() -> OsmClient {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);

    OsmClient::new(&config_for(&format!("http://127.0.0.1:{port}")))
        .expect("Failed to build client")
}

pub fn node_json() -> Value {
    json!({
        "version": "0.6",
        "generator": "CGImap 0.8.10",
        "elements": [{
            "type": "node", "id": 1, "lat": 51.501, "lon": -0.099,
            "timestamp": "2020-01-01T00:00:00Z", "version": 1, "changeset": 100,
            "user": "alice", "uid": 11, "tags": {"amenity": "bench"}
        }]
    })
}

pub fn way_json() -> Value {
    json!({
        "version": "0.6",
        "elements": [{
            "type": "way", "id": 10, "version": 2, "changeset": 200,
            "nodes": [1, 2], "tags": {"highway": "footway"}
        }]
    })
}

/// History with versions in changesets 100, 200 and 100 again.
pub fn history_json() -> Value {
    json!({
        "version": "0.6",
        "elements": [
            {"type": "way", "id": 10, "version": 1, "changeset": 100,
             "timestamp": "2020-01-01T00:00:00Z", "user": "alice", "uid": 11,
             "visible": true, "nodes": [1, 2]},
            {"type": "way", "id": 10, "version": 2, "changeset": 200,
             "timestamp": "2021-01-01T00:00:00Z", "user": "bob", "uid": 12,
             "visible": true, "nodes": [1, 2]},
            {"type": "way", "id": 10, "version": 3, "changeset": 100,
             "timestamp": "2022-01-01T00:00:00Z", "user": "alice", "uid": 11,
             "visible": true, "nodes": [2, 1]}
        ]
    })
}

pub fn user_json() -> Value {
    json!({
        "version": "0.6",
        "user": {
            "id": 12, "display_name": "bob", "account_created": "2019-01-01T00:00:00Z",
            "description": "Mapping footpaths", "changesets": {"count": 42}
        }
    })
}
