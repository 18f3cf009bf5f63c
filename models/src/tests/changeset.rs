use crate::{Changeset, ChangesetRef};

#[test]
fn given_changeset_with_attributes_when_queried_then_exposes_helpers() {
    let mut changeset = Changeset::new(42);
    changeset
        .attributes
        .insert("user".to_string(), "mapper".to_string());
    changeset
        .attributes
        .insert("created_at".to_string(), "2024-01-01T00:00:00Z".to_string());
    changeset
        .tags
        .insert("comment".to_string(), "fix road".to_string());

    assert_eq!(changeset.user(), Some("mapper"));
    assert_eq!(changeset.created_at(), Some("2024-01-01T00:00:00Z"));
    assert_eq!(changeset.comment(), Some("fix road"));
    assert_eq!(changeset.attribute("closed_at"), None);
}

#[test]
fn given_unresolved_ref_when_queried_then_parses_id_without_details() {
    let reference = ChangesetRef::Id("123".to_string());

    assert_eq!(reference.id(), Some(123));
    assert!(reference.details().is_none());
    assert!(!reference.is_resolved());
}

/// **VALUE**: Verifies the untagged serialization keeps the bare id for unmatched
/// changesets and emits the detail object for matched ones.
///
/// **WHY THIS MATTERS**: Consumers inspect the `changeset` field of each history
/// entry and expect either the id as given or the details, never a wrapper object.
#[test]
fn given_changeset_refs_when_serialized_then_untagged_shapes() {
    let bare = serde_json::to_value(ChangesetRef::Id("7".to_string())).unwrap();
    let resolved = serde_json::to_value(ChangesetRef::Resolved(Changeset::new(7))).unwrap();

    assert_eq!(bare, serde_json::json!("7"));
    assert_eq!(resolved["id"], 7);
}
