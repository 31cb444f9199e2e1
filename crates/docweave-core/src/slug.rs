use std::collections::{HashMap, HashSet};

use crate::entities;

/// Derives the base slug for a heading: entities decoded, embedded markup
/// stripped, lowercased, with every run of characters outside `[a-z0-9.]`
/// folded into a single hyphen. A heading with no usable characters falls
/// back to the literal `section`.
pub fn slugify(text: &str) -> String {
    let decoded = entities::decode(text);
    let stripped = strip_markup(&decoded);
    let mut out = String::with_capacity(stripped.len());
    let mut pending_hyphen = false;
    for ch in stripped.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    if out.is_empty() {
        "section".to_string()
    } else {
        out
    }
}

// A `<` only counts as markup when a `>` follows; an unmatched bracket is
// ordinary text and falls through to the hyphen folding.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                out.push('<');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Slugs assigned during one conversion run: the used-slug set for collision
/// disambiguation plus the original-anchor-id map consulted by the link
/// resolver. Created fresh per call, discarded on return.
#[derive(Debug, Default)]
pub struct SlugRegistry {
    used: HashSet<String>,
    anchors: HashMap<String, String>,
}

impl SlugRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns a unique slug for one heading. Identical heading texts receive
    /// `base`, `base-1`, `base-2`, ... in first-seen order.
    pub fn assign(&mut self, heading_text: &str) -> String {
        let base = slugify(heading_text);
        let slug = if self.used.contains(&base) {
            let mut n = 1usize;
            loop {
                let candidate = format!("{base}-{n}");
                if !self.used.contains(&candidate) {
                    break candidate;
                }
                n += 1;
            }
        } else {
            base
        };
        self.used.insert(slug.clone());
        slug
    }

    pub fn record_anchor(&mut self, original_id: impl Into<String>, slug: impl Into<String>) {
        self.anchors.insert(original_id.into(), slug.into());
    }

    pub fn anchor_slug(&self, original_id: &str) -> Option<&str> {
        self.anchors.get(original_id).map(String::as_str)
    }
}
