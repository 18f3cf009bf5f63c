use crate::{
    Coordinate, ElementKind, ElementMeta, ElementRef, Member, OsmDocument, OsmNode, OsmRelation,
    OsmWay, Tags,
};

fn node(id: u64, lat: f64, lon: f64) -> OsmNode {
    OsmNode {
        id,
        coordinate: Some(Coordinate { lat, lon }),
        meta: ElementMeta::default(),
        tags: Tags::new(),
    }
}

fn sample_document() -> OsmDocument {
    let mut way_tags = Tags::new();
    way_tags.insert("highway".to_string(), "residential".to_string());

    OsmDocument {
        nodes: vec![node(1, 51.5, -0.1), node(2, 51.6, -0.2)],
        ways: vec![OsmWay {
            id: 10,
            node_ids: vec![1, 3, 2],
            meta: ElementMeta {
                version: Some(4),
                changeset: Some(900),
                ..ElementMeta::default()
            },
            tags: way_tags,
        }],
        relations: vec![OsmRelation {
            id: 20,
            members: vec![Member {
                kind: ElementKind::Way,
                ref_id: 10,
                role: "outer".to_string(),
            }],
            meta: ElementMeta::default(),
            tags: Tags::new(),
        }],
        ..OsmDocument::default()
    }
}

#[test]
fn given_document_when_counting_elements_then_excludes_changesets() {
    let document = sample_document();

    assert_eq!(document.element_count(), 4);
    assert!(!document.is_empty());
    assert!(OsmDocument::default().is_empty());
}

#[test]
fn given_document_when_looking_up_refs_then_finds_by_kind() {
    let document = sample_document();

    assert!(document.contains(ElementRef::new(ElementKind::Node, 2)));
    assert!(document.contains(ElementRef::new(ElementKind::Way, 10)));
    assert!(!document.contains(ElementRef::new(ElementKind::Node, 10)));
    assert!(!document.contains(ElementRef::new(ElementKind::Relation, 10)));
}

/// **VALUE**: Verifies way geometry is resolved in way order and skips nodes that
/// fall outside the downloaded area.
///
/// **BUG THIS CATCHES**: A bbox download may include a way whose nodes lie partly
/// outside the box. Panicking or inventing positions for those would misplace the way.
#[test]
fn given_way_with_missing_node_when_resolving_geometry_then_skips_missing() {
    let document = sample_document();

    let geometry = document.way_geometry(10).unwrap();

    assert_eq!(
        geometry,
        vec![
            Coordinate {
                lat: 51.5,
                lon: -0.1
            },
            Coordinate {
                lat: 51.6,
                lon: -0.2
            },
        ]
    );
    assert!(document.way_geometry(11).is_none());
}

#[test]
fn given_xml_way_when_normalized_then_has_no_position_and_keeps_node_ids() {
    let document = sample_document();

    let normalized = document
        .normalized(ElementRef::new(ElementKind::Way, 10))
        .unwrap();

    assert_eq!(normalized.kind, ElementKind::Way);
    assert!(normalized.coordinate().is_none());
    assert_eq!(normalized.node_ids, vec![1, 3, 2]);
    assert_eq!(normalized.version, Some(4));
    assert_eq!(normalized.changeset, Some(900));
    assert_eq!(normalized.tag("highway"), Some("residential"));
}

#[test]
fn given_xml_node_when_normalized_then_carries_lat_lon() {
    let document = sample_document();

    let normalized = document
        .normalized(ElementRef::new(ElementKind::Node, 1))
        .unwrap();

    assert_eq!(normalized.lat, Some(51.5));
    assert_eq!(normalized.lon, Some(-0.1));
    assert!(
        document
            .normalized(ElementRef::new(ElementKind::Node, 99))
            .is_none()
    );
}

#[test]
fn given_relation_member_when_serialized_then_uses_osm_field_names() {
    let member = Member {
        kind: ElementKind::Way,
        ref_id: 10,
        role: "outer".to_string(),
    };

    let json = serde_json::to_value(&member).unwrap();

    assert_eq!(json["type"], "way");
    assert_eq!(json["ref"], 10);
    assert_eq!(json["role"], "outer");
}
