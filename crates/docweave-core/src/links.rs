use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::slug::{SlugRegistry, slugify};

/// A classified link target. Classification is structural, from the URL shape
/// alone; the source format carries no category flag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LinkTarget {
    External { url: String },
    Document { document_id: String, url: String },
    Heading { bookmark_id: String },
    Bookmark { bookmark_id: String },
}

const DOCUMENT_URL_PREFIXES: [&str; 2] = [
    "https://docs.google.com/document/d/",
    "http://docs.google.com/document/d/",
];

pub fn classify(url: &str) -> LinkTarget {
    if let Some(id) = url.strip_prefix("#heading=") {
        return LinkTarget::Heading {
            bookmark_id: id.to_string(),
        };
    }
    if let Some(id) = url.strip_prefix("#bookmark=") {
        return LinkTarget::Bookmark {
            bookmark_id: id.to_string(),
        };
    }
    if let Some(document_id) = document_id_from_url(url) {
        return LinkTarget::Document {
            document_id,
            url: url.to_string(),
        };
    }
    LinkTarget::External {
        url: url.to_string(),
    }
}

fn document_id_from_url(url: &str) -> Option<String> {
    let rest = DOCUMENT_URL_PREFIXES
        .iter()
        .find_map(|prefix| url.strip_prefix(prefix))?;
    let id = rest.split(['/', '?', '#']).next().unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnownDocument {
    pub name: String,
    pub route: String,
}

/// Static caller-supplied configuration mapping document ids to their display
/// name and canonical route. Read-only during conversion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnownDocumentRegistry {
    docs: HashMap<String, KnownDocument>,
}

impl KnownDocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, document_id: impl Into<String>, doc: KnownDocument) {
        self.docs.insert(document_id.into(), doc);
    }

    pub fn get(&self, document_id: &str) -> Option<&KnownDocument> {
        self.docs.get(document_id)
    }
}

/// The rewritten form of one link: the href plus its attributes in emission
/// order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResolvedLink {
    pub href: String,
    pub attrs: Vec<(&'static str, String)>,
}

/// Rewrites a classified target per its category, falling back rather than
/// failing: unknown documents become literal external links, unresolved
/// anchors keep their raw source id.
pub fn resolve_link(
    target: &LinkTarget,
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
    link_text: Option<&str>,
) -> ResolvedLink {
    match target {
        LinkTarget::External { url } => external(url),
        LinkTarget::Document { document_id, url } => match known.get(document_id) {
            Some(doc) => ResolvedLink {
                href: doc.route.clone(),
                attrs: vec![("data-modal", "true".to_string())],
            },
            None => external(url),
        },
        LinkTarget::Heading { bookmark_id } => {
            let href = match slugs.anchor_slug(bookmark_id) {
                Some(slug) => format!("#{slug}"),
                None => format!("#{bookmark_id}"),
            };
            ResolvedLink {
                href,
                attrs: Vec::new(),
            }
        }
        LinkTarget::Bookmark { bookmark_id } => {
            if let Some(slug) = slugs.anchor_slug(bookmark_id) {
                return ResolvedLink {
                    href: format!("#{slug}"),
                    attrs: Vec::new(),
                };
            }
            match link_text.map(str::trim).filter(|text| !text.is_empty()) {
                Some(text) => {
                    // The bookmark takes its id from the link's own text, so
                    // anchor and reference agree.
                    let slug = slugify(text);
                    slugs.record_anchor(bookmark_id.clone(), slug.clone());
                    ResolvedLink {
                        href: format!("#{slug}"),
                        attrs: Vec::new(),
                    }
                }
                None => ResolvedLink {
                    href: format!("#{bookmark_id}"),
                    attrs: vec![("data-original-id", bookmark_id.clone())],
                },
            }
        }
    }
}

fn external(url: &str) -> ResolvedLink {
    ResolvedLink {
        href: url.to_string(),
        attrs: vec![
            ("target", "_blank".to_string()),
            ("rel", "noopener noreferrer".to_string()),
        ],
    }
}
