// src/types/domain_types.rs
//! Domain-specific newtypes for credentials and the authenticated session.

use super::ValidationError;
use std::fmt;

/// Declares a bearer-token newtype whose `Debug`/`Display` never leak the secret.
macro_rules! bearer_token {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl $name {
            pub fn new(token: impl Into<String>) -> Result<Self, ValidationError> {
                let token = token.into();
                if token.trim().is_empty() {
                    return Err(ValidationError::EmptyField($label));
                }
                Ok(Self(token))
            }

            /// Get the raw bearer string for an `Authorization` header
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), redact(&self.0))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", redact(&self.0))
            }
        }
    };
}

bearer_token!(
    /// Application-scoped token obtained from the app credentials
    AppAccessToken,
    "app_access_token"
);
bearer_token!(
    /// Tenant-scoped token obtained together with the app token
    TenantAccessToken,
    "tenant_access_token"
);
bearer_token!(
    /// User-scoped token obtained from the OAuth authorization code
    UserAccessToken,
    "user_access_token"
);

fn redact(secret: &str) -> String {
    let visible: String = secret.chars().take(6).collect();
    format!("{}...", visible)
}

/// App credentials read from the environment
#[derive(Clone, PartialEq, Eq)]
pub struct AppCredentials {
    pub app_id: String,
    app_secret: String,
}

impl AppCredentials {
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let app_id = app_id.into();
        let app_secret = app_secret.into();
        if app_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("app_id"));
        }
        if app_secret.trim().is_empty() {
            return Err(ValidationError::EmptyField("app_secret"));
        }
        Ok(Self { app_id, app_secret })
    }

    pub fn app_secret(&self) -> &str {
        &self.app_secret
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Tokens obtained from the app credentials before any user logs in.
#[derive(Debug, Clone)]
pub struct AppTokens {
    pub app: AppAccessToken,
    pub tenant: TenantAccessToken,
}

/// The three access tokens of one backup run.
///
/// Built once after the authorization code exchange and read-only afterwards.
/// Every authenticated request borrows the user token from here.
#[derive(Debug, Clone)]
pub struct Session {
    pub app: AppAccessToken,
    pub tenant: TenantAccessToken,
    pub user: UserAccessToken,
}

impl Session {
    pub fn new(app_tokens: AppTokens, user: UserAccessToken) -> Self {
        Self {
            app: app_tokens.app,
            tenant: app_tokens.tenant,
            user,
        }
    }
}
