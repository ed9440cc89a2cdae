//! Block tree of legacy documents (`doc/v2`).
//!
//! Legacy documents arrive as a JSON string holding a `title` and a `body`.
//! Every node carries a string `type` and a payload field named after it.

use crate::types::{ImageToken, SheetRef};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parsed legacy document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyDocument {
    #[serde(default)]
    pub title: DocTitle,
    #[serde(default)]
    pub body: DocBody,
}

impl LegacyDocument {
    /// Parses the `content` string returned by the document content endpoint.
    pub fn from_content(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocTitle {
    #[serde(default)]
    pub elements: Vec<DocBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocBody {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub blocks: Vec<DocBlock>,
}

/// One node of a legacy document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocBlock {
    Paragraph(Paragraph),
    TextRun(TextRun),
    Gallery(Gallery),
    Table(DocTable),
    Sheet(SheetBlock),
    /// A node kind this exporter does not render
    Unsupported(UnsupportedDocBlock),
}

impl DocBlock {
    /// The wire name of this block's kind.
    pub fn kind(&self) -> &str {
        match self {
            DocBlock::Paragraph(_) => "paragraph",
            DocBlock::TextRun(_) => "textRun",
            DocBlock::Gallery(_) => "gallery",
            DocBlock::Table(_) => "table",
            DocBlock::Sheet(_) => "sheet",
            DocBlock::Unsupported(block) => &block.kind,
        }
    }

    /// Convenience constructor for a plain text run.
    pub fn text(text: impl Into<String>) -> Self {
        DocBlock::TextRun(TextRun { text: text.into() })
    }

    /// Nested blocks, in document order.
    pub fn children(&self) -> Box<dyn Iterator<Item = &DocBlock> + '_> {
        match self {
            DocBlock::Paragraph(p) => Box::new(p.elements.iter()),
            DocBlock::Table(t) => Box::new(
                t.rows
                    .iter()
                    .flat_map(|row| row.cells.iter())
                    .flat_map(|cell| cell.body.blocks.iter()),
            ),
            _ => Box::new(std::iter::empty()),
        }
    }
}

impl<'de> Deserialize<'de> for DocBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut value = Value::deserialize(deserializer)?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let block = match kind.as_str() {
            "paragraph" => take_payload(&mut value, "paragraph").map(DocBlock::Paragraph),
            "textRun" => take_payload(&mut value, "textRun").map(DocBlock::TextRun),
            "gallery" => take_payload(&mut value, "gallery").map(DocBlock::Gallery),
            "table" => take_payload(&mut value, "table").map(DocBlock::Table),
            "sheet" => take_payload(&mut value, "sheet").map(DocBlock::Sheet),
            _ => Ok(DocBlock::Unsupported(UnsupportedDocBlock { kind, raw: value })),
        };
        block.map_err(D::Error::custom)
    }
}

/// Moves the payload field out of a tagged node and deserializes it.
pub(crate) fn take_payload<T>(
    value: &mut Value,
    field: &'static str,
) -> Result<T, serde_json::Error>
where
    T: DeserializeOwned,
{
    let payload = value
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| serde_json::Error::missing_field(field))?;
    serde_json::from_value(payload)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Paragraph: a run sequence plus an optional style.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<DocBlock>,
    #[serde(default)]
    pub style: Option<ParagraphStyle>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// Declared heading level; rendered as `level + 1` markers.
    #[serde(default)]
    pub heading_level: Option<u8>,
    #[serde(default)]
    pub list: Option<ListStyle>,
}

/// List marker of a paragraph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListStyle {
    CheckBox,
    CheckedBox,
    Number {
        #[serde(default)]
        number: u32,
    },
    Bullet,
    /// Any list type without a Markdown counterpart; text is left undecorated
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    #[serde(default)]
    pub image_list: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub file_token: ImageToken,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocTable {
    #[serde(default, rename = "tableRows")]
    pub rows: Vec<DocTableRow>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocTableRow {
    #[serde(default, rename = "tableCells")]
    pub cells: Vec<DocTableCell>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DocTableCell {
    #[serde(default)]
    pub body: DocBody,
}

/// Embedded spreadsheet reference.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetBlock {
    pub sheet: SheetRef,
}

impl<'de> Deserialize<'de> for SheetBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            token: String,
        }

        let wire = Wire::deserialize(deserializer)?;
        let sheet = SheetRef::parse(&wire.token).map_err(D::Error::custom)?;
        Ok(SheetBlock { sheet })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnsupportedDocBlock {
    pub kind: String,
    pub raw: Value,
}
