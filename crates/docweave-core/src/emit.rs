use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use crate::ast::{Block, Document, Paragraph, TextRun};
use crate::links::{KnownDocumentRegistry, classify, resolve_link};
use crate::list::ListState;
use crate::slug::SlugRegistry;
use crate::{entities, table};

/// Converts a document into HTML. A single forward pass over the blocks; the
/// slug registry and list state are scoped to this call, so concurrent
/// conversions share nothing but the read-only registry.
pub fn convert(document: &Document, known: &KnownDocumentRegistry) -> String {
    let mut writer = HtmlWriter::new();
    let mut slugs = SlugRegistry::new();
    let mut lists = ListState::new();

    let blocks = &document.blocks;
    let mut idx = 0;
    while idx < blocks.len() {
        match &blocks[idx] {
            Block::Paragraph(para) if is_tab_table_start(para) => {
                // Tab-delimited list content renders as an indented table,
                // interrupting any open list. Consecutive tab-bearing list
                // paragraphs merge into one table.
                lists.close_all(&mut writer);
                let level = para.list.as_ref().map_or(0, |m| m.nesting_level);
                let mut rows = Vec::new();
                while idx < blocks.len() {
                    let Block::Paragraph(next) = &blocks[idx] else {
                        break;
                    };
                    if !is_tab_table_start(next) {
                        break;
                    }
                    rows.push(table::split_tab_cells(&next.runs));
                    idx += 1;
                }
                table::render_indented_table(&mut writer, &rows, level, &mut slugs, known);
                continue;
            }
            Block::Paragraph(para) => {
                emit_paragraph(&mut writer, para, document, &mut lists, &mut slugs, known);
            }
            Block::Table(tbl) => {
                lists.close_all(&mut writer);
                table::render_table(&mut writer, tbl, &mut slugs, known);
            }
        }
        idx += 1;
    }
    lists.close_all(&mut writer);
    writer.finish()
}

/// `convert` followed by an allow-list clean of everything this engine can
/// emit; anything else the source smuggled through run text is stripped.
pub fn convert_sanitized(document: &Document, known: &KnownDocumentRegistry) -> String {
    let raw_html = convert(document, known);

    let tags: HashSet<&'static str> = [
        "a", "br", "em", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ol", "p", "s", "strong",
        "table", "td", "tr", "u", "ul",
    ]
    .iter()
    .copied()
    .collect();

    let mut generic_attributes: HashSet<&'static str> = HashSet::new();
    generic_attributes.insert("id");

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "target", "rel"].iter().copied().collect());
    tag_attributes.insert("ol", ["start"].iter().copied().collect());
    tag_attributes.insert("table", ["style", "border"].iter().copied().collect());

    let mut generic_attribute_prefixes = HashSet::new();
    generic_attribute_prefixes.insert("data-");

    Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .generic_attribute_prefixes(generic_attribute_prefixes)
        // The engine emits its own rel on external links; letting the
        // cleaner add one would collide with the allow-listed attribute.
        .link_rel(None)
        .clean(&raw_html)
        .to_string()
}

fn is_tab_table_start(para: &Paragraph) -> bool {
    para.heading.is_none()
        && para.list.is_some()
        && para.runs.iter().any(|run| run.text.contains('\t'))
}

fn emit_paragraph(
    writer: &mut HtmlWriter,
    para: &Paragraph,
    document: &Document,
    lists: &mut ListState,
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
) {
    if let Some(level) = para.heading {
        // A heading interrupts any open list, membership or not.
        lists.close_all(writer);
        let level = level.clamp(1, 6);
        let slug = slugs.assign(&para.plain_text());
        if let Some(id) = &para.heading_id {
            slugs.record_anchor(id.clone(), slug.clone());
        }
        let content = render_runs(&para.runs, slugs, known);
        writer.line(&format!("<h{level} id='{slug}'>{content}</h{level}>"));
        return;
    }
    match &para.list {
        Some(membership) => {
            lists.align(membership, document, writer);
            let content = render_runs(&para.runs, slugs, known);
            lists.item(content, writer);
        }
        None => {
            lists.close_all(writer);
            let content = render_runs(&para.runs, slugs, known);
            writer.line(&format!("<p>{content}</p>"));
        }
    }
}

pub(crate) fn render_runs(
    runs: &[TextRun],
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&render_run(run, slugs, known));
    }
    out
}

/// Renders one styled run. Wrappers nest innermost to outermost so the anchor
/// wraps all inline formatting; adjacent identically-styled runs are never
/// merged.
fn render_run(run: &TextRun, slugs: &mut SlugRegistry, known: &KnownDocumentRegistry) -> String {
    let mut html = entities::normalize(&run.text);
    if run.style.strikethrough {
        html = format!("<s>{html}</s>");
    }
    if run.style.bold {
        html = format!("<strong>{html}</strong>");
    }
    if run.style.italic {
        html = format!("<em>{html}</em>");
    }
    if run.style.underline {
        html = format!("<u>{html}</u>");
    }
    if let Some(url) = &run.style.link {
        let target = classify(url);
        let resolved = resolve_link(&target, slugs, known, Some(&run.text));
        let mut attrs = format!(" href='{}'", escape_attr(&resolved.href));
        for (name, value) in &resolved.attrs {
            attrs.push_str(&format!(" {name}='{}'", escape_attr(value)));
        }
        html = format!("<a{attrs}>{html}</a>");
    }
    html
}

fn escape_attr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) struct HtmlWriter {
    pub(crate) out: String,
    pub(crate) indent: usize,
}

impl HtmlWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            indent: 0,
        }
    }

    pub(crate) fn line(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        self.out.push_str(line);
        self.out.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
