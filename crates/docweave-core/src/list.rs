use std::collections::HashSet;

use crate::ast::{Document, GlyphKind, ListMembership};
use crate::emit::HtmlWriter;

struct Frame {
    list_id: String,
    level: u8,
    ordered: bool,
    /// Last item at this level, held back until we know whether a nested
    /// list belongs inside its `<li>`.
    pending: Option<String>,
    li_open: bool,
}

/// Open list nesting across sibling blocks. Numbering is carried by the
/// `<ol start>` attribute alone; the browser counts the items.
#[derive(Default)]
pub(crate) struct ListState {
    frames: Vec<Frame>,
    /// Levels opened earlier in this run. A reopen after an interruption is
    /// an implicit restart: it begins at 1 with no `start` attribute, even
    /// when the definition carries an explicit start.
    seen: HashSet<(String, u8)>,
}

impl ListState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Closes and opens frames until the open top matches the membership.
    /// A different list id, or a shallower level, closes down to the match;
    /// a deeper level opens nested lists, one per missing level.
    pub(crate) fn align(
        &mut self,
        membership: &ListMembership,
        document: &Document,
        writer: &mut HtmlWriter,
    ) {
        while let Some(top) = self.frames.last() {
            if top.list_id == membership.list_id && top.level <= membership.nesting_level {
                break;
            }
            self.close_top(writer);
        }
        while self
            .frames
            .last()
            .is_none_or(|top| top.level < membership.nesting_level)
        {
            let next_level = self.frames.last().map_or(0, |top| top.level + 1);
            self.open(&membership.list_id, next_level, document, writer);
        }
    }

    /// Buffers one list item at the currently open level. The previous item
    /// at this level, if any, is flushed as a closed `<li>`.
    pub(crate) fn item(&mut self, content: String, writer: &mut HtmlWriter) {
        writer.indent = self.frames.len().saturating_sub(1) * 2 + 1;
        let Some(top) = self.frames.last_mut() else {
            return;
        };
        if let Some(prev) = top.pending.take() {
            writer.line(&format!("<li>{prev}</li>"));
        } else if top.li_open {
            writer.line("</li>");
            top.li_open = false;
        }
        top.pending = Some(content);
    }

    pub(crate) fn close_all(&mut self, writer: &mut HtmlWriter) {
        while !self.frames.is_empty() {
            self.close_top(writer);
        }
        writer.indent = 0;
    }

    fn open(&mut self, list_id: &str, level: u8, document: &Document, writer: &mut HtmlWriter) {
        let depth = self.frames.len();
        if let Some(parent) = self.frames.last_mut() {
            // The nested list goes inside the parent's still-open item. A
            // level jumped past has no item of its own, so it gets an empty
            // one rather than a list as a direct list child.
            if let Some(prev) = parent.pending.take() {
                writer.indent = (depth - 1) * 2 + 1;
                writer.line(&format!("<li>{prev}"));
                parent.li_open = true;
            } else if !parent.li_open {
                writer.indent = (depth - 1) * 2 + 1;
                writer.line("<li>");
                parent.li_open = true;
            }
        }
        let definition = document.list_level(list_id, level);
        let ordered = matches!(definition.map(|def| def.glyph), Some(GlyphKind::Ordered));
        let key = (list_id.to_string(), level);
        let start = if self.seen.contains(&key) {
            1
        } else {
            definition.and_then(|def| def.start).map_or(1, u64::from)
        };
        writer.indent = depth * 2;
        if ordered {
            if start != 1 {
                writer.line(&format!("<ol start='{start}'>"));
            } else {
                writer.line("<ol>");
            }
        } else {
            writer.line("<ul>");
        }
        self.seen.insert(key);
        self.frames.push(Frame {
            list_id: list_id.to_string(),
            level,
            ordered,
            pending: None,
            li_open: false,
        });
    }

    fn close_top(&mut self, writer: &mut HtmlWriter) {
        let Some(top) = self.frames.pop() else {
            return;
        };
        let depth = self.frames.len();
        writer.indent = depth * 2 + 1;
        if let Some(prev) = top.pending {
            writer.line(&format!("<li>{prev}</li>"));
        } else if top.li_open {
            writer.line("</li>");
        }
        writer.indent = depth * 2;
        writer.line(if top.ordered { "</ol>" } else { "</ul>" });
    }
}
