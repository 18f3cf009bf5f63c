use crate::OsmUser;

use serde_json::json;

/// **VALUE**: Verifies user profiles serialize with camelCase keys.
///
/// **WHY THIS MATTERS**: The CLI prints users next to errors that already use
/// `messageId`; mixing `display_name` into the same output breaks consumers that
/// read one key convention.
///
/// **BUG THIS CATCHES**: Would catch the `rename_all` attribute being dropped, which
/// silently renames every field in the printed JSON.
#[test]
fn given_user_when_serialized_then_uses_camel_case_keys() {
    // GIVEN: A fully populated user
    let user = OsmUser {
        id: 12,
        display_name: String::from("bob"),
        account_created: Some(String::from("2019-01-01T00:00:00Z")),
        description: None,
        changesets_count: Some(42),
    };

    // WHEN: Serializing
    let value = serde_json::to_value(&user).expect("User should serialize");

    // THEN: camelCase keys, empty optionals omitted
    assert_eq!(
        value,
        json!({
            "id": 12,
            "displayName": "bob",
            "accountCreated": "2019-01-01T00:00:00Z",
            "changesetsCount": 42
        })
    );
}
