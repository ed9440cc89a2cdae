//! Block list of new-style documents (`docx/v1`).
//!
//! Docx blocks are returned as a flat, paginated list. Each block carries an
//! integer `block_type` and a payload field whose name depends on it.

use super::doc::take_payload;
use crate::types::ImageToken;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One block of a docx document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocxBlock {
    /// The document root; its text is the document title
    Page(TextElements),
    Text(TextElements),
    /// Heading of level 1 to 3
    Heading { level: u8, content: TextElements },
    Bullet(TextElements),
    Ordered(TextElements),
    Code(TextElements),
    Image(DocxImage),
    /// A block type this exporter does not render
    Unsupported { block_type: i64 },
}

impl DocxBlock {
    pub const PAGE: i64 = 1;
    pub const TEXT: i64 = 2;
    pub const HEADING1: i64 = 3;
    pub const HEADING2: i64 = 4;
    pub const HEADING3: i64 = 5;
    pub const BULLET: i64 = 12;
    pub const ORDERED: i64 = 13;
    pub const CODE: i64 = 14;
    pub const IMAGE: i64 = 27;

    /// The integer code of this block on the wire.
    pub fn block_type(&self) -> i64 {
        match self {
            DocxBlock::Page(_) => Self::PAGE,
            DocxBlock::Text(_) => Self::TEXT,
            DocxBlock::Heading { level, .. } => Self::HEADING1 + i64::from(*level) - 1,
            DocxBlock::Bullet(_) => Self::BULLET,
            DocxBlock::Ordered(_) => Self::ORDERED,
            DocxBlock::Code(_) => Self::CODE,
            DocxBlock::Image(_) => Self::IMAGE,
            DocxBlock::Unsupported { block_type } => *block_type,
        }
    }
}

impl<'de> Deserialize<'de> for DocxBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        let block_type = value
            .get("block_type")
            .and_then(Value::as_i64)
            .ok_or_else(|| D::Error::missing_field("block_type"))?;

        let block = match block_type {
            Self::PAGE => take_payload(&mut value, "page").map(DocxBlock::Page),
            Self::TEXT => take_payload(&mut value, "text").map(DocxBlock::Text),
            Self::HEADING1 => take_payload(&mut value, "heading1").map(|content| {
                DocxBlock::Heading { level: 1, content }
            }),
            Self::HEADING2 => take_payload(&mut value, "heading2").map(|content| {
                DocxBlock::Heading { level: 2, content }
            }),
            Self::HEADING3 => take_payload(&mut value, "heading3").map(|content| {
                DocxBlock::Heading { level: 3, content }
            }),
            Self::BULLET => take_payload(&mut value, "bullet").map(DocxBlock::Bullet),
            Self::ORDERED => take_payload(&mut value, "ordered").map(DocxBlock::Ordered),
            Self::CODE => take_payload(&mut value, "code").map(DocxBlock::Code),
            Self::IMAGE => take_payload(&mut value, "image").map(DocxBlock::Image),
            other => Ok(DocxBlock::Unsupported { block_type: other }),
        };
        block.map_err(D::Error::custom)
    }
}

/// Text-bearing payload shared by most docx block types.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextElements {
    #[serde(default)]
    pub elements: Vec<TextElement>,
}

impl TextElements {
    /// Builds a payload holding a single text run.
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            elements: vec![TextElement {
                text_run: Some(DocxTextRun {
                    content: content.into(),
                }),
            }],
        }
    }
}

/// One inline element; only text runs carry renderable text.
///
/// Mentions, equations and reminders are other element kinds and are
/// dropped from the output.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextElement {
    #[serde(default)]
    pub text_run: Option<DocxTextRun>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocxTextRun {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocxImage {
    pub token: ImageToken,
}
