// src/pipeline.rs
//! The backup run, stage by stage: app tokens → user login → crawl.
//!
//! App tokens are fetched once at start-up; the callback listener hands the
//! authorization code to [`BackupPipeline::run_with_code`], which finishes
//! the login and drives the crawler.

use crate::analytics::ExportSummary;
use crate::api::{Authenticator, AuthorizedClient, FeishuHttpClient, OfficeSource};
use crate::config::BackupConfig;
use crate::crawl::{BackupMode, Crawler, TokenFilter};
use crate::error::AppError;
use crate::output::BackupWriter;
use crate::types::{AppTokens, Session};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything needed to turn an authorization code into a finished backup.
pub struct BackupPipeline {
    http: FeishuHttpClient,
    authenticator: Authenticator,
    app_tokens: AppTokens,
    mode: BackupMode,
    filter: TokenFilter,
    output_dir: PathBuf,
}

impl BackupPipeline {
    /// Builds the transport and obtains the app tokens.
    pub async fn prepare(config: &BackupConfig) -> Result<Self, AppError> {
        let http = FeishuHttpClient::new(&config.base_url, config.timeout)?;
        let authenticator = Authenticator::new(http.clone(), config.credentials.clone());

        let app_tokens = authenticator.app_tokens().await?;
        log::info!("Obtained app token {}", app_tokens.app);

        Ok(Self {
            http,
            authenticator,
            app_tokens,
            mode: config.mode,
            filter: config.filter.clone(),
            output_dir: config.output_dir.clone(),
        })
    }

    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String, AppError> {
        self.authenticator.authorization_url(redirect_uri)
    }

    /// Completes the login with `code`, then runs the crawl.
    pub async fn run_with_code(&self, code: &str) -> Result<ExportSummary, AppError> {
        let session = self
            .authenticator
            .exchange_code(&self.app_tokens, code)
            .await?;
        self.run_session(session).await
    }

    /// Runs the crawl as the user of `session`.
    pub async fn run_session(&self, session: Session) -> Result<ExportSummary, AppError> {
        let source = AuthorizedClient::new(self.http.clone(), Arc::new(session));
        self.run_with_source(Arc::new(source)).await
    }

    /// Runs the crawl against any source; the partial summary is logged on failure.
    pub async fn run_with_source(
        &self,
        source: Arc<dyn OfficeSource>,
    ) -> Result<ExportSummary, AppError> {
        let writer = BackupWriter::new(&self.output_dir);
        let mut crawler = Crawler::new(source, writer, self.filter.clone());

        match crawler.run(self.mode).await {
            Ok(()) => Ok(crawler.into_summary()),
            Err(e) => {
                log::error!("Backup aborted. Written so far:\n{}", crawler.summary());
                Err(e)
            }
        }
    }
}

/// Logs a fatal error, with the full envelope for platform errors.
pub fn log_failure(error: &AppError) {
    match error {
        AppError::Api { url, envelope, .. } => {
            log::error!("{}", error);
            log::error!("Request: {}", url);
            log::error!("Response: {}", envelope);
        }
        other => log::error!("{}", other),
    }
}
