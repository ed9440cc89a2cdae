// src/api/responses.rs
//! Response envelope and listing shapes shared by all endpoints.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{ApiErrorCode, AppError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Every JSON response is wrapped as `{ code, msg, data }`.
///
/// The auth endpoints put their fields next to `code` instead of under
/// `data`, so the whole object is kept in `raw`.
#[derive(Debug, Clone)]
pub struct Envelope {
    pub code: i64,
    pub msg: String,
    pub raw: Value,
}

impl Envelope {
    /// Parses a response body and rejects non-zero codes.
    pub fn parse(url: &str, body: &str) -> Result<Self, AppError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| {
            AppError::MalformedResponse(format!(
                "{} returned non-JSON body ({}): {}",
                url,
                e,
                preview(body)
            ))
        })?;
        let code = raw.get("code").and_then(Value::as_i64).ok_or_else(|| {
            AppError::MalformedResponse(format!("{} returned no code: {}", url, preview(body)))
        })?;
        let msg = raw
            .get("msg")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        if code != 0 {
            return Err(AppError::Api {
                url: url.to_string(),
                code,
                kind: ApiErrorCode::from_code(code),
                msg,
                envelope: body.to_string(),
            });
        }

        Ok(Self { code, msg, raw })
    }

    /// Deserializes the `data` member.
    pub fn into_data<T: DeserializeOwned>(mut self, url: &str) -> Result<T, AppError> {
        let data = self
            .raw
            .get_mut("data")
            .map(Value::take)
            .unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|e| {
            AppError::MalformedResponse(format!("unexpected data from {}: {}", url, e))
        })
    }

    /// Deserializes the whole object, for endpoints without a `data` member.
    pub fn into_body<T: DeserializeOwned>(self, url: &str) -> Result<T, AppError> {
        serde_json::from_value(self.raw).map_err(|e| {
            AppError::MalformedResponse(format!("unexpected body from {}: {}", url, e))
        })
    }
}

/// One page of a `has_more`/`page_token` listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub page_token: Option<String>,
}

impl<T> Page<T> {
    /// The token of the next page, if there is one.
    ///
    /// An empty token ends the listing even if `has_more` claims otherwise.
    pub fn next_token(&self) -> Option<&str> {
        match self.page_token.as_deref() {
            Some(token) if self.has_more && !token.is_empty() => Some(token),
            _ => None,
        }
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Truncates a body for inclusion in an error message.
pub(crate) fn preview(body: &str) -> String {
    if body.chars().count() <= ERROR_BODY_PREVIEW_LENGTH {
        return body.to_string();
    }
    let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nonzero_code_is_an_api_error() {
        let body = r#"{"code":99991663,"msg":"token invalid"}"#;
        let err = Envelope::parse("http://x/y", body).unwrap_err();
        match err {
            AppError::Api {
                code,
                kind,
                envelope,
                ..
            } => {
                assert_eq!(code, 99991663);
                assert_eq!(kind, ApiErrorCode::InvalidAccessToken);
                assert_eq!(envelope, body);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn extracts_data() {
        let envelope =
            Envelope::parse("u", r#"{"code":0,"msg":"ok","data":{"token":"fld1"}}"#).unwrap();
        let data: Value = envelope.into_data("u").unwrap();
        assert_eq!(data, json!({"token": "fld1"}));
    }

    #[test]
    fn non_json_is_malformed() {
        let err = Envelope::parse("u", "<html>").unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[test]
    fn page_stops_on_empty_token() {
        let page: Page<u32> =
            serde_json::from_value(json!({"items": null, "has_more": true, "page_token": ""}))
                .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.next_token(), None);
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        assert!(preview(&body).ends_with("..."));
    }
}
