//! Streaming parser for OSM API XML bodies.
//!
//! Handles the `<osm>` envelope returned by the `map`, element and
//! `changesets` endpoints. Elements the parser does not model (notes,
//! changeset discussions, ...) are skipped.

use crate::error::parse::ParseError;

use common::ErrorLocation;
use models::{
    BoundingBox, Changeset, Coordinate, ElementMeta, Member, OsmDocument, OsmNode,
    OsmRelation, OsmWay, Tags,
};

use std::collections::BTreeMap;
use std::panic::Location;
use std::str::FromStr;

use log::trace;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

const ROOT_TAG: &[u8] = b"osm";

type Attributes = BTreeMap<String, String>;

/// Top-level element currently being filled with `<tag>`, `<nd>` or `<member>` children.
enum Pending {
    Node(OsmNode),
    Way(OsmWay),
    Relation(OsmRelation),
    Changeset(Changeset),
}

impl Pending {
    fn tag_name(&self) -> &'static [u8] {
        match self {
            Pending::Node(_) => b"node",
            Pending::Way(_) => b"way",
            Pending::Relation(_) => b"relation",
            Pending::Changeset(_) => b"changeset",
        }
    }

    fn tags_mut(&mut self) -> &mut Tags {
        match self {
            Pending::Node(node) => &mut node.tags,
            Pending::Way(way) => &mut way.tags,
            Pending::Relation(relation) => &mut relation.tags,
            Pending::Changeset(changeset) => &mut changeset.tags,
        }
    }
}

#[derive(Default)]
struct DocumentBuilder {
    document: OsmDocument,
    pending: Option<Pending>,
    saw_root: bool,
}

impl DocumentBuilder {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), ParseError> {
        let name = start.name();
        let name = name.as_ref();

        match name {
            ROOT_TAG => {
                let attributes = read_attributes(start)?;
                self.saw_root = true;
                self.document.version = attributes.get("version").cloned();
                self.document.generator = attributes.get("generator").cloned();
            }
            b"bounds" => {
                let attributes = read_attributes(start)?;
                self.document.bounds = Some(BoundingBox::new(
                    required(&attributes, "bounds", "minlon")?,
                    required(&attributes, "bounds", "minlat")?,
                    required(&attributes, "bounds", "maxlon")?,
                    required(&attributes, "bounds", "maxlat")?,
                )?);
            }
            b"node" => {
                let attributes = read_attributes(start)?;
                self.pending = Some(Pending::Node(node_from(&attributes)?));
            }
            b"way" => {
                let attributes = read_attributes(start)?;
                self.pending = Some(Pending::Way(OsmWay {
                    id: required(&attributes, "way", "id")?,
                    node_ids: Vec::new(),
                    meta: meta_from(&attributes, "way")?,
                    tags: Tags::new(),
                }));
            }
            b"relation" => {
                let attributes = read_attributes(start)?;
                self.pending = Some(Pending::Relation(OsmRelation {
                    id: required(&attributes, "relation", "id")?,
                    members: Vec::new(),
                    meta: meta_from(&attributes, "relation")?,
                    tags: Tags::new(),
                }));
            }
            b"changeset" => {
                let mut attributes = read_attributes(start)?;
                let id = required(&attributes, "changeset", "id")?;
                attributes.remove("id");
                self.pending = Some(Pending::Changeset(Changeset {
                    id,
                    tags: Tags::new(),
                    attributes,
                }));
            }
            b"tag" => {
                if let Some(pending) = self.pending.as_mut() {
                    let attributes = read_attributes(start)?;
                    let key: String = required(&attributes, "tag", "k")?;
                    let value = attributes.get("v").cloned().unwrap_or_default();
                    pending.tags_mut().insert(key, value);
                }
            }
            b"nd" => {
                if let Some(Pending::Way(way)) = self.pending.as_mut() {
                    let attributes = read_attributes(start)?;
                    way.node_ids.push(required(&attributes, "nd", "ref")?);
                }
            }
            b"member" => {
                if let Some(Pending::Relation(relation)) = self.pending.as_mut() {
                    let attributes = read_attributes(start)?;
                    relation.members.push(Member {
                        kind: required(&attributes, "member", "type")?,
                        ref_id: required(&attributes, "member", "ref")?,
                        role: attributes.get("role").cloned().unwrap_or_default(),
                    });
                }
            }
            other => trace!("Skipping <{}>", String::from_utf8_lossy(other)),
        }

        Ok(())
    }

    fn close(&mut self, name: &[u8]) {
        let closes_pending = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.tag_name() == name);

        if !closes_pending {
            return;
        }

        match self.pending.take() {
            Some(Pending::Node(node)) => self.document.nodes.push(node),
            Some(Pending::Way(way)) => self.document.ways.push(way),
            Some(Pending::Relation(relation)) => self.document.relations.push(relation),
            Some(Pending::Changeset(changeset)) => self.document.changesets.push(changeset),
            None => {}
        }
    }
}

/// Parse an `<osm>` XML body into an [`OsmDocument`].
///
/// # Errors
///
/// Returns [`ParseError`] for malformed XML, a missing `<osm>` root, or
/// required attributes (`id`, `ref`, `k`, ...) that are absent or not numeric.
pub fn parse_document(xml: &str) -> Result<OsmDocument, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut builder = DocumentBuilder::default();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => builder.open(&start)?,
            Ok(Event::Empty(start)) => {
                builder.open(&start)?;
                builder.close(start.name().as_ref());
            }
            Ok(Event::End(end)) => builder.close(end.name().as_ref()),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ParseError::Xml {
                    message: format!("at byte {}: {e}", reader.error_position()),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
    }

    if !builder.saw_root {
        return Err(ParseError::Xml {
            message: String::from("missing <osm> root element"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let document = builder.document;
    trace!(
        "Parsed OSM document: {} nodes, {} ways, {} relations, {} changesets",
        document.nodes.len(),
        document.ways.len(),
        document.relations.len(),
        document.changesets.len()
    );

    Ok(document)
}

/// Parse the body of `/api/0.6/changesets` into changeset records.
pub fn parse_changesets(xml: &str) -> Result<Vec<Changeset>, ParseError> {
    parse_document(xml).map(|document| document.changesets)
}

fn read_attributes(start: &BytesStart<'_>) -> Result<Attributes, ParseError> {
    let mut attributes = Attributes::new();

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::Xml {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }

    Ok(attributes)
}

#[track_caller]
fn required<T: FromStr>(
    attributes: &Attributes,
    element: &str,
    attribute: &str,
) -> Result<T, ParseError> {
    let raw = attributes
        .get(attribute)
        .ok_or_else(|| ParseError::Attribute {
            element: element.to_string(),
            attribute: attribute.to_string(),
            message: String::from("missing"),
            location: ErrorLocation::from(Location::caller()),
        })?;

    parse_value(raw, element, attribute)
}

#[track_caller]
fn optional<T: FromStr>(
    attributes: &Attributes,
    element: &str,
    attribute: &str,
) -> Result<Option<T>, ParseError> {
    attributes
        .get(attribute)
        .map(|raw| parse_value(raw, element, attribute))
        .transpose()
}

#[track_caller]
fn parse_value<T: FromStr>(raw: &str, element: &str, attribute: &str) -> Result<T, ParseError> {
    raw.parse::<T>().map_err(|_| ParseError::Attribute {
        element: element.to_string(),
        attribute: attribute.to_string(),
        message: format!("unexpected value {raw:?}"),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn meta_from(attributes: &Attributes, element: &str) -> Result<ElementMeta, ParseError> {
    Ok(ElementMeta {
        version: optional(attributes, element, "version")?,
        changeset: optional(attributes, element, "changeset")?,
        user: attributes.get("user").cloned(),
        uid: optional(attributes, element, "uid")?,
        timestamp: attributes.get("timestamp").cloned(),
        visible: optional(attributes, element, "visible")?,
    })
}

fn node_from(attributes: &Attributes) -> Result<OsmNode, ParseError> {
    let lat: Option<f64> = optional(attributes, "node", "lat")?;
    let lon: Option<f64> = optional(attributes, "node", "lon")?;

    // Deleted node versions carry neither coordinate
    let coordinate = match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
        _ => None,
    };

    Ok(OsmNode {
        id: required(attributes, "node", "id")?,
        coordinate,
        meta: meta_from(attributes, "node")?,
        tags: Tags::new(),
    })
}
