use crate::ast::{Block, RunSeq, Table, TextRun};
use crate::emit::{HtmlWriter, render_runs};
use crate::links::KnownDocumentRegistry;
use crate::slug::SlugRegistry;

const INDENT_STEP_PX: u32 = 36;

/// Renders a true table with collapsed borders. Rows sit one indent step in,
/// cells two.
pub(crate) fn render_table(
    writer: &mut HtmlWriter,
    table: &Table,
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
) {
    writer.line("<table style='border-collapse: collapse;' border='1'>");
    writer.indent += 1;
    for row in &table.rows {
        writer.line("<tr>");
        writer.indent += 1;
        for cell in &row.cells {
            let content = render_cell_blocks(&cell.blocks, slugs, known);
            writer.line(&format!("<td>{content}</td>"));
        }
        writer.indent -= 1;
        writer.line("</tr>");
    }
    writer.indent -= 1;
    writer.line("</table>");
}

fn render_cell_blocks(
    blocks: &[Block],
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
) -> String {
    let mut parts = Vec::new();
    for block in blocks {
        match block {
            Block::Paragraph(para) => parts.push(render_runs(&para.runs, slugs, known)),
            Block::Table(nested) => {
                // The input contract nests tables one level only; a stray
                // deeper table is rendered inline rather than dropped.
                let mut inner = HtmlWriter::new();
                render_table(&mut inner, nested, slugs, known);
                parts.push(inner.finish().trim_end().to_string());
            }
        }
    }
    parts.join("<br />")
}

/// Renders tab-split list content as a left-indented, unbordered table.
pub(crate) fn render_indented_table(
    writer: &mut HtmlWriter,
    rows: &[Vec<RunSeq>],
    nesting_level: u8,
    slugs: &mut SlugRegistry,
    known: &KnownDocumentRegistry,
) {
    if rows.is_empty() {
        return;
    }
    let margin = (u32::from(nesting_level) + 1) * INDENT_STEP_PX;
    writer.line(&format!("<table style='margin-left: {margin}px;'>"));
    writer.indent += 1;
    for row in rows {
        writer.line("<tr>");
        writer.indent += 1;
        for cell in row {
            let content = render_runs(cell, slugs, known);
            writer.line(&format!("<td>{content}</td>"));
        }
        writer.indent -= 1;
        writer.line("</tr>");
    }
    writer.indent -= 1;
    writer.line("</table>");
}

/// Splits a paragraph's runs on tab characters into cells. Each segment keeps
/// the style of the run it was cut from.
pub(crate) fn split_tab_cells(runs: &[TextRun]) -> Vec<RunSeq> {
    let mut cells: Vec<RunSeq> = vec![Vec::new()];
    for run in runs {
        let mut first = true;
        for segment in run.text.split('\t') {
            if !first {
                cells.push(Vec::new());
            }
            first = false;
            if segment.is_empty() {
                continue;
            }
            if let Some(cell) = cells.last_mut() {
                cell.push(TextRun {
                    text: segment.to_string(),
                    style: run.style.clone(),
                });
            }
        }
    }
    cells
}
