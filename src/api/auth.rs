// src/api/auth.rs
//! App token bootstrap and the authorization-code exchange.

use super::client::FeishuHttpClient;
use crate::constants::OAUTH_STATE;
use crate::error::AppError;
use crate::error_recovery::RetryPolicy;
use crate::types::{
    AppAccessToken, AppCredentials, AppTokens, Session, TenantAccessToken, UserAccessToken,
    ValidationError,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct AppTokenRequest<'a> {
    app_id: &'a str,
    app_secret: &'a str,
}

#[derive(Deserialize)]
struct AppTokenResponse {
    app_access_token: String,
    tenant_access_token: String,
}

#[derive(Serialize)]
struct CodeExchangeRequest<'a> {
    grant_type: &'static str,
    code: &'a str,
}

#[derive(Deserialize)]
struct UserTokenData {
    access_token: String,
}

/// Obtains the tokens a backup run needs.
#[derive(Clone)]
pub struct Authenticator {
    http: FeishuHttpClient,
    credentials: AppCredentials,
}

impl Authenticator {
    pub fn new(http: FeishuHttpClient, credentials: AppCredentials) -> Self {
        Self { http, credentials }
    }

    /// Trades the app credentials for an app and a tenant token.
    pub async fn app_tokens(&self) -> Result<AppTokens, AppError> {
        let endpoint = "auth/v3/app_access_token/internal";
        let request = AppTokenRequest {
            app_id: &self.credentials.app_id,
            app_secret: self.credentials.app_secret(),
        };
        let response: AppTokenResponse = self
            .http
            .post_envelope(endpoint, None, &request)
            .await?
            .into_body(&self.http.url(endpoint))?;

        Ok(AppTokens {
            app: AppAccessToken::new(response.app_access_token)?,
            tenant: TenantAccessToken::new(response.tenant_access_token)?,
        })
    }

    /// Trades an authorization code for the user token and builds the session.
    pub async fn exchange_code(&self, app: &AppTokens, code: &str) -> Result<Session, AppError> {
        if code.trim().is_empty() {
            return Err(ValidationError::EmptyField("code").into());
        }

        let endpoint = "authen/v1/access_token";
        let request = CodeExchangeRequest {
            grant_type: "authorization_code",
            code,
        };
        // Codes are single-use, so the exchange is sent exactly once.
        let data: UserTokenData = self
            .http
            .clone()
            .with_retry(RetryPolicy::none())
            .post_envelope(endpoint, Some(app.app.as_str()), &request)
            .await?
            .into_data(&self.http.url(endpoint))?;

        let user = UserAccessToken::new(data.access_token)?;
        log::info!("Logged in, user token {}", user);
        Ok(Session::new(app.clone(), user))
    }

    /// URL the user opens to grant access; the platform then redirects to
    /// `redirect_uri` with a `code` parameter.
    pub fn authorization_url(&self, redirect_uri: &str) -> Result<String, AppError> {
        let base = self.http.url("authen/v1/index");
        let url = url::Url::parse_with_params(
            &base,
            &[
                ("redirect_uri", redirect_uri),
                ("app_id", self.credentials.app_id.as_str()),
                ("state", OAUTH_STATE),
            ],
        )
        .map_err(|e| ValidationError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn authenticator() -> Authenticator {
        let http =
            FeishuHttpClient::new("https://open.feishu.cn/open-apis", Duration::from_secs(5))
                .unwrap();
        Authenticator::new(http, AppCredentials::new("cli_123", "s3cret").unwrap())
    }

    #[test]
    fn authorization_url_encodes_redirect() {
        let url = authenticator()
            .authorization_url("http://127.0.0.1:8888/backup")
            .unwrap();
        insta::assert_snapshot!(url, @"https://open.feishu.cn/open-apis/authen/v1/index?redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fbackup&app_id=cli_123&state=backup");
    }

    #[tokio::test]
    async fn empty_code_is_rejected_before_any_request() {
        let auth = authenticator();
        let tokens = AppTokens {
            app: AppAccessToken::new("a-1").unwrap(),
            tenant: TenantAccessToken::new("t-1").unwrap(),
        };
        let err = auth.exchange_code(&tokens, "  ").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
