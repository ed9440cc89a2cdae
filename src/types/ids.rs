use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Strong typing for opaque server-issued tokens with phantom types
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token<T> {
    value: String,
    _phantom: PhantomData<T>,
}

/// Marker types for different token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpreadsheetMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpaceMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarMarker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventMarker;

/// Type aliases for specific token types
pub type FolderToken = Token<FolderMarker>;
pub type DocumentToken = Token<DocumentMarker>;
pub type SpreadsheetToken = Token<SpreadsheetMarker>;
pub type SheetId = Token<SheetMarker>;
pub type ImageToken = Token<MediaMarker>;
pub type SpaceId = Token<SpaceMarker>;
pub type CalendarId = Token<CalendarMarker>;
pub type EventId = Token<EventMarker>;

impl<T> Token<T> {
    /// Validates a raw token string.
    ///
    /// Tokens end up in URL paths and file names, so anything that could
    /// escape a path segment is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField("token"));
        }
        if trimmed
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '?' || c == '#' || c.is_whitespace())
        {
            return Err(ValidationError::InvalidToken(trimmed.to_string()));
        }
        Ok(Self::from_raw(trimmed.to_string()))
    }

    /// Wraps a token as received from the API (internal use)
    pub(crate) fn from_raw(value: String) -> Self {
        Self {
            value,
            _phantom: PhantomData,
        }
    }

    /// Get the token as a string reference
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Reinterprets the token as another kind.
    ///
    /// Wiki nodes and drive items hand out object tokens whose kind is only
    /// known from a sibling field.
    pub fn cast<U>(&self) -> Token<U> {
        Token::from_raw(self.value.clone())
    }
}

impl<T> Clone for Token<T> {
    fn clone(&self) -> Self {
        Self::from_raw(self.value.clone())
    }
}

impl<T> fmt::Display for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> Serialize for Token<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Token<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(serde::de::Error::custom)
    }
}

/// Reference to one sheet of a spreadsheet, as embedded in legacy documents.
///
/// The wire form is `<spreadsheet token>_<sheet id>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetRef {
    pub spreadsheet: SpreadsheetToken,
    pub sheet: SheetId,
}

impl SheetRef {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let (spreadsheet, sheet) = input
            .split_once('_')
            .ok_or_else(|| ValidationError::InvalidToken(input.to_string()))?;
        Ok(Self {
            spreadsheet: SpreadsheetToken::parse(spreadsheet)?,
            sheet: SheetId::parse(sheet)?,
        })
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.spreadsheet, self.sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_parsing() {
        let token = DocumentToken::parse("  doccnAbc123 ").unwrap();
        assert_eq!(token.as_str(), "doccnAbc123");
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(FolderToken::parse("").is_err());
        assert!(FolderToken::parse("../etc").is_err());
        assert!(FolderToken::parse("a b").is_err());
    }

    #[test]
    fn test_sheet_ref() {
        let sheet = SheetRef::parse("shtcnXyz_a1b2c3").unwrap();
        assert_eq!(sheet.spreadsheet.as_str(), "shtcnXyz");
        assert_eq!(sheet.sheet.as_str(), "a1b2c3");
        assert_eq!(sheet.to_string(), "shtcnXyz_a1b2c3");

        assert!(SheetRef::parse("no-separator").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let token: ImageToken = serde_json::from_str(r#""boxcnImg""#).unwrap();
        assert_eq!(token.as_str(), "boxcnImg");

        assert!(serde_json::from_str::<ImageToken>(r#""../escaped""#).is_err());
        assert!(serde_json::from_str::<ImageToken>(r#""""#).is_err());
    }
}
