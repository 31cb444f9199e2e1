mod ast;
mod emit;
mod entities;
mod links;
mod list;
mod slug;
mod table;

pub use ast::{
    Block, Document, GlyphKind, ListLevel, ListMembership, ListStyle, Paragraph, RunSeq, Table,
    TableCell, TableRow, TextRun, TextStyle,
};
pub use emit::{convert, convert_sanitized};
pub use entities::normalize;
pub use links::{
    KnownDocument, KnownDocumentRegistry, LinkTarget, ResolvedLink, classify, resolve_link,
};
pub use slug::{SlugRegistry, slugify};
