//! Knowledge-base spaces and nodes (`wiki/v2`).

use crate::types::{DocumentToken, SpaceId};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WikiSpace {
    pub space_id: SpaceId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WikiNode {
    #[serde(default)]
    pub node_token: String,
    /// Token of the underlying document, sheet, etc.
    pub obj_token: String,
    /// `doc`, `docx`, `sheet`, `mindnote`, `bitable`, `file`, ...
    pub obj_type: String,
    #[serde(default)]
    pub title: String,
}

impl WikiNode {
    pub fn document_token(&self) -> DocumentToken {
        DocumentToken::from_raw(self.obj_token.clone())
    }
}
