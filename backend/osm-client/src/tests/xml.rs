// Unit tests for the OSM XML parser

use crate::error::ParseError;
use crate::xml::{parse_changesets, parse_document};

use models::{Coordinate, ElementKind};

const MAP_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="CGImap 0.8.10" copyright="OpenStreetMap and contributors">
 <bounds minlat="51.5000000" minlon="-0.1000000" maxlat="51.5100000" maxlon="-0.0900000"/>
 <node id="1" visible="true" version="2" changeset="100" timestamp="2020-01-01T00:00:00Z" user="alice" uid="11" lat="51.5010000" lon="-0.0990000"/>
 <node id="2" visible="true" version="1" changeset="101" timestamp="2020-01-02T00:00:00Z" user="bob" uid="12" lat="51.5020000" lon="-0.0980000">
  <tag k="amenity" v="cafe"/>
  <tag k="name" v="Tom &amp; Jerry's"/>
 </node>
 <way id="10" visible="true" version="3" changeset="102" timestamp="2020-01-03T00:00:00Z" user="carol" uid="13">
  <nd ref="1"/>
  <nd ref="2"/>
  <tag k="highway" v="footway"/>
 </way>
 <relation id="20" visible="true" version="1" changeset="103" timestamp="2020-01-04T00:00:00Z" user="dave" uid="14">
  <member type="way" ref="10" role="outer"/>
  <member type="node" ref="2" role=""/>
  <tag k="type" v="multipolygon"/>
 </relation>
</osm>"#;

const CHANGESETS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<osm version="0.6" generator="OpenStreetMap server">
 <changeset id="100" created_at="2020-01-01T00:00:00Z" closed_at="2020-01-01T01:00:00Z" open="false" user="alice" uid="11" comments_count="0" changes_count="4">
  <tag k="comment" v="Add cafe"/>
  <tag k="created_by" v="iD 2.17"/>
  <discussion>
   <comment date="2020-01-02T00:00:00Z" uid="12" user="bob">
    <text>Nice</text>
   </comment>
  </discussion>
 </changeset>
 <changeset id="101" created_at="2020-01-02T00:00:00Z" open="true" user="bob" uid="12" comments_count="0" changes_count="1"/>
</osm>"#;

/// **VALUE**: Verifies a full `map` response is read into every element collection.
///
/// **WHY THIS MATTERS**: This is the main payload of a bounding-box download. Losing
/// children (`nd`, `member`, `tag`) would hand the editor incomplete geometry.
#[test]
fn given_map_xml_when_parsed_then_reads_all_element_kinds() {
    // GIVEN/WHEN: Parsing a representative map response
    let document = parse_document(MAP_XML).unwrap();

    // THEN: Root attributes and bounds are captured
    assert_eq!(document.version.as_deref(), Some("0.6"));
    assert_eq!(document.generator.as_deref(), Some("CGImap 0.8.10"));
    let bounds = document.bounds.unwrap();
    assert_eq!(bounds.min_lon, -0.1);
    assert_eq!(bounds.max_lat, 51.51);

    // AND: Nodes carry coordinates, metadata and unescaped tags
    assert_eq!(document.nodes.len(), 2);
    let cafe = document.node(2).unwrap();
    assert_eq!(
        cafe.coordinate,
        Some(Coordinate {
            lat: 51.502,
            lon: -0.098
        })
    );
    assert_eq!(cafe.meta.user.as_deref(), Some("bob"));
    assert_eq!(cafe.meta.uid, Some(12));
    assert_eq!(cafe.meta.visible, Some(true));
    assert_eq!(cafe.tags.get("name").map(String::as_str), Some("Tom & Jerry's"));

    // AND: Ways keep node order, relations keep members
    assert_eq!(document.way(10).unwrap().node_ids, vec![1, 2]);
    let relation = document.relation(20).unwrap();
    assert_eq!(relation.members.len(), 2);
    assert_eq!(relation.members[0].kind, ElementKind::Way);
    assert_eq!(relation.members[0].role, "outer");
    assert_eq!(relation.members[1].role, "");
    assert_eq!(document.way_geometry(10).unwrap().len(), 2);
}

#[test]
fn given_changesets_xml_when_parsed_then_ids_are_integers_and_attributes_kept() {
    let changesets = parse_changesets(CHANGESETS_XML).unwrap();

    assert_eq!(changesets.len(), 2);

    let first = &changesets[0];
    assert_eq!(first.id, 100);
    assert_eq!(first.user(), Some("alice"));
    assert_eq!(first.attribute("changes_count"), Some("4"));
    assert_eq!(first.attribute("closed_at"), Some("2020-01-01T01:00:00Z"));
    assert!(first.attribute("id").is_none());
    assert_eq!(first.comment(), Some("Add cafe"));
    assert_eq!(first.tags.len(), 2);

    let second = &changesets[1];
    assert_eq!(second.id, 101);
    assert_eq!(second.attribute("open"), Some("true"));
    assert!(second.tags.is_empty());
}

#[test]
fn given_deleted_node_version_when_parsed_then_has_no_coordinate() {
    let xml = r#"<osm version="0.6"><node id="5" visible="false" version="3" changeset="9"/></osm>"#;

    let document = parse_document(xml).unwrap();

    let node = document.node(5).unwrap();
    assert!(node.coordinate.is_none());
    assert_eq!(node.meta.visible, Some(false));
}

#[test]
fn given_empty_osm_root_when_parsed_then_returns_empty_document() {
    let document = parse_document(r#"<osm version="0.6"/>"#).unwrap();

    assert!(document.is_empty());
}

/// **BUG THIS CATCHES**: An HTML error page served with 200 must not parse as an
/// empty document; the caller would otherwise report "no data" instead of a failure.
#[test]
fn given_body_without_osm_root_when_parsed_then_returns_xml_error() {
    let result = parse_document("<html><body>Service unavailable</body></html>");

    assert!(matches!(result, Err(ParseError::Xml { .. })));
}

#[test]
fn given_mismatched_tags_when_parsed_then_returns_xml_error() {
    let result = parse_document(r#"<osm><node id="1"></way></osm>"#);

    assert!(matches!(result, Err(ParseError::Xml { .. })));
}

#[test]
fn given_non_numeric_id_when_parsed_then_returns_attribute_error() {
    let result = parse_document(r#"<osm><node id="abc" lat="1" lon="1"/></osm>"#);

    match result {
        Err(ParseError::Attribute {
            element, attribute, ..
        }) => {
            assert_eq!(element, "node");
            assert_eq!(attribute, "id");
        }
        other => panic!("Expected attribute error, got {other:?}"),
    }
}

#[test]
fn given_member_with_unknown_type_when_parsed_then_returns_attribute_error() {
    let xml = r#"<osm><relation id="1"><member type="area" ref="2" role=""/></relation></osm>"#;

    let result = parse_document(xml);

    assert!(matches!(result, Err(ParseError::Attribute { .. })));
}
