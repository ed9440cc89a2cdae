//! Drive folder hierarchy.

use crate::types::{DocumentToken, FolderToken, SpreadsheetToken, Token};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;

/// Kind of a node in the drive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum DriveItemKind {
    Folder,
    /// Legacy document (`doc/v2`)
    Doc,
    /// New-style document (`docx/v1`)
    Docx,
    Sheet,
    /// Mind notes, bitables, uploaded files and anything newer
    Other(String),
}

impl From<String> for DriveItemKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "folder" => Self::Folder,
            "doc" => Self::Doc,
            "docx" => Self::Docx,
            "sheet" => Self::Sheet,
            _ => Self::Other(kind),
        }
    }
}

impl fmt::Display for DriveItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::Doc => write!(f, "doc"),
            Self::Docx => write!(f, "docx"),
            Self::Sheet => write!(f, "sheet"),
            Self::Other(kind) => write!(f, "{}", kind),
        }
    }
}

/// Marker for a drive item token of not-yet-known kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriveItemMarker;

pub type DriveItemToken = Token<DriveItemMarker>;

/// A node of the folder hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriveItem {
    pub token: DriveItemToken,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DriveItemKind,
}

impl DriveItem {
    pub fn folder_token(&self) -> FolderToken {
        self.token.cast()
    }

    pub fn document_token(&self) -> DocumentToken {
        self.token.cast()
    }

    pub fn spreadsheet_token(&self) -> SpreadsheetToken {
        self.token.cast()
    }
}

/// Children of one folder, keyed by token in server order.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FolderChildren {
    #[serde(default)]
    pub children: IndexMap<String, DriveItem>,
}

/// Metadata of the user's root folder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RootFolderMeta {
    pub token: FolderToken,
    #[serde(default)]
    pub id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn children_keep_server_order() {
        // Parsed from text: `json!` would sort the keys.
        let children: FolderChildren = serde_json::from_str(
            r#"{"children": {
                "zzz": {"token": "zzz", "name": "Zed", "type": "docx"},
                "aaa": {"token": "aaa", "name": "Ay", "type": "folder"},
                "mmm": {"token": "mmm", "name": "Em", "type": "bitable"}
            }}"#,
        )
        .unwrap();

        let names: Vec<_> = children.children.values().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Zed", "Ay", "Em"]);
        assert_eq!(children.children["aaa"].kind, DriveItemKind::Folder);
        assert_eq!(
            children.children["mmm"].kind,
            DriveItemKind::Other("bitable".to_string())
        );
    }

    #[test]
    fn missing_children_is_empty() {
        let children: FolderChildren = serde_json::from_value(json!({})).unwrap();
        assert!(children.children.is_empty());
    }
}
