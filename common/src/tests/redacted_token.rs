use crate::RedactedToken;

/// **VALUE**: Verifies the access token never leaks through Debug or Display.
///
/// **WHY THIS MATTERS**: `ClientConfig` is logged at startup. A leaked OAuth2 token in
/// a log file grants write access to the user's OSM account.
#[test]
fn given_token_when_formatted_then_value_is_redacted() {
    // GIVEN: A token with a recognizable value
    let token = RedactedToken::new("super-secret-value");

    // WHEN: Formatting with Debug and Display
    let debug = format!("{token:?}");
    let display = format!("{token}");

    // THEN: Neither output contains the secret
    assert!(!debug.contains("super-secret-value"));
    assert!(!display.contains("super-secret-value"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_token_when_building_bearer_header_then_prefixes_scheme() {
    let token = RedactedToken::new("abc123");

    assert_eq!(token.bearer_header(), "Bearer abc123");
    assert_eq!(token.expose(), "abc123");
    assert_eq!(token.len(), 6);
}

#[test]
fn given_whitespace_token_when_checked_then_is_empty() {
    assert!(RedactedToken::new("   ").is_empty());
    assert!(!RedactedToken::new("x").is_empty());
}

/// **BUG THIS CATCHES**: Would catch if someone derives `Serialize` on the token,
/// which would let `serde_json::to_string(&config)` write the secret to disk.
#[test]
fn given_token_when_serialized_then_returns_error() {
    let token = RedactedToken::new("abc123");

    let result = serde_json::to_string(&token);

    assert!(result.is_err());
}

#[test]
fn given_json_string_when_deserialized_then_builds_token() {
    let token: RedactedToken = serde_json::from_str("\"from-config\"").unwrap();

    assert_eq!(token.expose(), "from-config");
}
