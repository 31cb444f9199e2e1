use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub type RunSeq = Vec<TextRun>;

/// A retrieved document: a flat ordered block sequence plus the list
/// definitions its paragraphs reference by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub lists: HashMap<String, ListStyle>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            lists: HashMap::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn with_list(mut self, list_id: impl Into<String>, style: ListStyle) -> Self {
        self.lists.insert(list_id.into(), style);
        self
    }

    pub fn list_level(&self, list_id: &str, nesting_level: u8) -> Option<&ListLevel> {
        self.lists.get(list_id)?.levels.get(usize::from(nesting_level))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    /// Heading level 1-6; absent for body text.
    pub heading: Option<u8>,
    /// Source-assigned heading anchor id, if the heading carried one.
    pub heading_id: Option<String>,
    pub list: Option<ListMembership>,
}

impl Paragraph {
    pub fn body(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    pub fn heading(level: u8, runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            heading: Some(level),
            ..Self::default()
        }
    }

    pub fn with_heading_id(mut self, id: impl Into<String>) -> Self {
        self.heading_id = Some(id.into());
        self
    }

    pub fn with_list(mut self, list_id: impl Into<String>, nesting_level: u8) -> Self {
        self.list = Some(ListMembership {
            list_id: list_id.into(),
            nesting_level,
        });
        self
    }

    /// Concatenated run text with no styling, as fed to the slug generator.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembership {
    pub list_id: String,
    #[serde(default)]
    pub nesting_level: u8,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                link: Some(url.into()),
                ..TextStyle::default()
            },
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    /// Raw link URL; classification into a target category is structural.
    pub link: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Table {
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableCell {
    pub blocks: Vec<Block>,
}

impl TableCell {
    pub fn paragraph(runs: Vec<TextRun>) -> Self {
        Self {
            blocks: vec![Block::Paragraph(Paragraph::body(runs))],
        }
    }
}

/// Per-level glyph and numbering for one list id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListStyle {
    pub levels: Vec<ListLevel>,
}

impl ListStyle {
    pub fn bullet(depth: usize) -> Self {
        Self {
            levels: vec![ListLevel::default(); depth],
        }
    }

    pub fn ordered(depth: usize) -> Self {
        Self {
            levels: vec![
                ListLevel {
                    glyph: GlyphKind::Ordered,
                    start: None,
                };
                depth
            ],
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListLevel {
    pub glyph: GlyphKind,
    pub start: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GlyphKind {
    #[default]
    Bullet,
    Ordered,
}
