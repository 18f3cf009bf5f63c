use models::{NormalizedElement, OsmDocument};

use serde::Serialize;

/// Response format requested from the element endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementFormat {
    /// `/{type}/{id}.json`, normalized into a [`NormalizedElement`].
    #[default]
    Json,
    /// `/{type}/{id}`, parsed into an [`OsmDocument`].
    Xml,
}

impl ElementFormat {
    pub fn from_xml_flag(as_xml: bool) -> Self {
        if as_xml {
            ElementFormat::Xml
        } else {
            ElementFormat::Json
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FetchedElement {
    Normalized(NormalizedElement),
    Document(OsmDocument),
}

impl FetchedElement {
    pub fn normalized(&self) -> Option<&NormalizedElement> {
        match self {
            FetchedElement::Normalized(element) => Some(element),
            FetchedElement::Document(_) => None,
        }
    }

    pub fn document(&self) -> Option<&OsmDocument> {
        match self {
            FetchedElement::Document(document) => Some(document),
            FetchedElement::Normalized(_) => None,
        }
    }
}
