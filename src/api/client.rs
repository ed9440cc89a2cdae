// src/api/client.rs
//! HTTP client for the open platform.
//!
//! `FeishuHttpClient` is the transport: base URL, timeout, bearer header,
//! envelope validation and transient retry. `AuthorizedClient` pairs it with
//! a logged-in [`Session`] and implements [`OfficeSource`] on top of it.

use super::pagination::fetch_all_pages;
use super::responses::{Envelope, Page};
use super::OfficeSource;
use crate::constants::{API_PAGE_SIZE, WIKI_PAGE_SIZE};
use crate::error::AppError;
use crate::error_recovery::{retry_with_backoff, RetryPolicy};
use crate::model::{
    Calendar, CalendarList, CellValue, DocxBlock, EventRecord, FolderChildren, LegacyDocument,
    RootFolderMeta, SheetValues, SpreadsheetMeta, WikiNode, WikiSpace,
};
use crate::types::{
    CalendarId, DocumentToken, FolderToken, ImageToken, Session, SheetId, SpaceId,
    SpreadsheetToken,
};
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Transport to the open platform API.
#[derive(Clone)]
pub struct FeishuHttpClient {
    client: Client,
    base_url: Arc<str>,
    retry: RetryPolicy,
}

impl FeishuHttpClient {
    /// Creates a client rooted at `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json; charset=utf-8"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an endpoint path onto the base URL.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// GET an endpoint and validate its envelope.
    pub async fn get_envelope(&self, endpoint: &str, bearer: &str) -> Result<Envelope, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        self.send_for_envelope(|| self.client.get(&url).bearer_auth(bearer))
            .await
    }

    /// GET an endpoint and deserialize its `data` member.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        bearer: &str,
    ) -> Result<T, AppError> {
        let url = self.url(endpoint);
        self.get_envelope(endpoint, bearer).await?.into_data(&url)
    }

    /// POST a JSON body and validate the envelope of the answer.
    pub async fn post_envelope<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        bearer: Option<&str>,
        body: &B,
    ) -> Result<Envelope, AppError> {
        let url = self.url(endpoint);
        log::debug!("POST {}", url);
        self.send_for_envelope(|| {
            let request = self.client.post(&url).json(body);
            match bearer {
                Some(token) => request.bearer_auth(token),
                None => request,
            }
        })
        .await
    }

    /// GET raw bytes, e.g. an image.
    ///
    /// Failures still come back as JSON envelopes, so a non-success status is
    /// parsed as one before falling back to a plain status error.
    pub async fn get_bytes(&self, endpoint: &str, bearer: &str) -> Result<Vec<u8>, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {} (binary)", url);
        retry_with_backoff(
            || async {
                let response = self.client.get(&url).bearer_auth(bearer).send().await?;
                let status = response.status();
                if status.is_success() {
                    return Ok(response.bytes().await?.to_vec());
                }
                let final_url = response.url().to_string();
                let body = response.text().await?;
                Envelope::parse(&final_url, &body)?;
                Err(AppError::HttpStatus {
                    url: final_url,
                    status,
                })
            },
            self.retry,
        )
        .await
    }

    async fn send_for_envelope<F>(&self, build: F) -> Result<Envelope, AppError>
    where
        F: Fn() -> RequestBuilder,
    {
        retry_with_backoff(
            || async {
                let response = build().send().await?;
                read_envelope(response).await
            },
            self.retry,
        )
        .await
    }
}

/// Reads a response body and validates it as an envelope.
///
/// A non-zero `code` wins over the HTTP status; a failing status with a
/// body that is not an envelope becomes [`AppError::HttpStatus`].
async fn read_envelope(response: Response) -> Result<Envelope, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    match Envelope::parse(&url, &text) {
        Ok(envelope) if status.is_success() => Ok(envelope),
        Ok(_) | Err(AppError::MalformedResponse(_)) if !status.is_success() => {
            Err(AppError::HttpStatus { url, status })
        }
        Ok(envelope) => Ok(envelope),
        Err(e) => Err(e),
    }
}

/// Builds `path?k=v&...` with each value form-encoded.
pub(crate) fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("{}?{}", path, query)
}

/// Authenticated access on behalf of the logged-in user.
#[derive(Clone)]
pub struct AuthorizedClient {
    http: FeishuHttpClient,
    session: Arc<Session>,
}

impl AuthorizedClient {
    pub fn new(http: FeishuHttpClient, session: Arc<Session>) -> Self {
        Self { http, session }
    }

    fn bearer(&self) -> &str {
        self.session.user.as_str()
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, AppError> {
        self.http.get_data(endpoint, self.bearer()).await
    }

    /// Lists every item of a paginated endpoint.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        page_size: u32,
    ) -> Result<Vec<T>, AppError> {
        let page_size = page_size.to_string();
        fetch_all_pages(
            |page_token| {
                let mut params = vec![("page_size", page_size.as_str())];
                if let Some(token) = page_token.as_deref() {
                    params.push(("page_token", token));
                }
                let endpoint = with_query(path, &params);
                async move { self.get::<Page<T>>(&endpoint).await }
            },
            None,
        )
        .await
    }
}

#[derive(Deserialize)]
struct DocContent {
    content: String,
}

#[async_trait::async_trait]
impl OfficeSource for AuthorizedClient {
    async fn root_folder(&self) -> Result<FolderToken, AppError> {
        let meta: RootFolderMeta = self.get("drive/explorer/v2/root_folder/meta").await?;
        Ok(meta.token)
    }

    async fn folder_children(&self, folder: &FolderToken) -> Result<FolderChildren, AppError> {
        let endpoint = format!("drive/explorer/v2/folder/{}/children", folder);
        self.get(&endpoint).await
    }

    async fn legacy_document(&self, document: &DocumentToken) -> Result<LegacyDocument, AppError> {
        let endpoint = format!("doc/v2/{}/content", document);
        let wrapper: DocContent = self.get(&endpoint).await?;
        LegacyDocument::from_content(&wrapper.content).map_err(|e| {
            AppError::MalformedResponse(format!("document {} has invalid content: {}", document, e))
        })
    }

    async fn docx_blocks(&self, document: &DocumentToken) -> Result<Vec<DocxBlock>, AppError> {
        let path = format!("docx/v1/documents/{}/blocks", document);
        self.list_all(&path, API_PAGE_SIZE).await
    }

    async fn spreadsheet_meta(
        &self,
        spreadsheet: &SpreadsheetToken,
    ) -> Result<SpreadsheetMeta, AppError> {
        let endpoint = format!("sheets/v2/spreadsheets/{}/metainfo", spreadsheet);
        self.get(&endpoint).await
    }

    async fn sheet_values(
        &self,
        spreadsheet: &SpreadsheetToken,
        sheet: &SheetId,
    ) -> Result<Vec<Vec<CellValue>>, AppError> {
        let path = format!("sheets/v2/spreadsheets/{}/values/{}", spreadsheet, sheet);
        let endpoint = with_query(&path, &[("dateTimeRenderOption", "FormattedString")]);
        let values: SheetValues = self.get(&endpoint).await?;
        Ok(values.into_grid())
    }

    async fn wiki_spaces(&self) -> Result<Vec<WikiSpace>, AppError> {
        self.list_all("wiki/v2/spaces", WIKI_PAGE_SIZE).await
    }

    async fn wiki_nodes(&self, space: &SpaceId) -> Result<Vec<WikiNode>, AppError> {
        let path = format!("wiki/v2/spaces/{}/nodes", space);
        self.list_all(&path, WIKI_PAGE_SIZE).await
    }

    async fn download_media(&self, image: &ImageToken) -> Result<Vec<u8>, AppError> {
        let endpoint = format!("drive/v1/medias/{}/download", image);
        self.http.get_bytes(&endpoint, self.bearer()).await
    }

    async fn calendars(&self) -> Result<Vec<Calendar>, AppError> {
        let page_size = API_PAGE_SIZE.to_string();
        let endpoint = with_query("calendar/v4/calendars", &[("page_size", page_size.as_str())]);
        let list: CalendarList = self.get(&endpoint).await?;
        Ok(list.calendar_list)
    }

    async fn events_page(
        &self,
        calendar: &CalendarId,
        page_token: Option<&str>,
    ) -> Result<Page<EventRecord>, AppError> {
        let path = format!("calendar/v4/calendars/{}/events", calendar);
        let mut params = vec![("anchor_time", "0")];
        if let Some(token) = page_token {
            params.push(("page_token", token));
        }
        self.get(&with_query(&path, &params)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_query_values() {
        assert_eq!(
            with_query("a/b", &[("page_token", "x y&z"), ("page_size", "5")]),
            "a/b?page_token=x+y%26z&page_size=5"
        );
        assert_eq!(with_query("a/b", &[]), "a/b");
    }

    #[test]
    fn joins_base_and_endpoint() {
        let client =
            FeishuHttpClient::new("http://localhost:1/open-apis/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url("/drive/explorer/v2/root_folder/meta"),
            "http://localhost:1/open-apis/drive/explorer/v2/root_folder/meta"
        );
    }
}
