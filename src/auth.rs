//! OAuth2 flows against the intra.
//!
//! [`ClientCredentials`] is the token source behind the managed transport:
//! application-level calls get a client-credentials token that is cached and
//! refreshed transparently. The authorization-code helpers produce user
//! tokens for `me`-style endpoints.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::http;
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

/// Client with auth and token endpoints set (oauth2 v5 typestates).
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Tokens this close to expiry are refreshed before use.
const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

const CLIENT_CREDENTIALS_SCOPE: &str = "public";

fn oauth_client(cfg: &Config) -> Result<ConfiguredClient> {
    let creds = cfg
        .credentials
        .as_ref()
        .ok_or_else(|| Error::Config("client id and secret are required".into()))?;
    let mut client = BasicClient::new(ClientId::new(creds.client_id.clone()))
        .set_client_secret(ClientSecret::new(creds.client_secret.clone()))
        .set_auth_uri(AuthUrl::new(cfg.auth_url())?)
        .set_token_uri(TokenUrl::new(cfg.token_url())?);
    if let Some(redirect) = &cfg.redirect_url {
        client = client.set_redirect_uri(RedirectUrl::new(redirect.clone())?);
    }
    Ok(client)
}

/// The token endpoint must not be followed through redirects.
fn oauth_http_client(cfg: &Config) -> Result<reqwest::Client> {
    http::client_builder(cfg)?
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| Error::Config(format!("failed to build oauth http client: {e}")))
}

#[derive(Debug, Clone)]
struct CachedToken {
    secret: String,
    expires_at: Option<Instant>,
}

impl CachedToken {
    fn from_response(resp: &BasicTokenResponse) -> Self {
        Self {
            secret: resp.access_token().secret().clone(),
            expires_at: resp.expires_in().map(|d| Instant::now() + d),
        }
    }

    fn is_fresh(&self) -> bool {
        match self.expires_at {
            Some(at) => Instant::now() + EXPIRY_MARGIN < at,
            None => true,
        }
    }
}

/// Client-credentials token source shared by every clone of a [`crate::Client`].
pub struct ClientCredentials {
    oauth: ConfiguredClient,
    http: reqwest::Client,
    cached: RwLock<Option<CachedToken>>,
}

impl ClientCredentials {
    pub fn new(cfg: &Config) -> Result<Self> {
        Ok(Self {
            oauth: oauth_client(cfg)?,
            http: oauth_http_client(cfg)?,
            cached: RwLock::new(None),
        })
    }

    /// Current access token, fetching a new one when missing or about to expire.
    pub async fn token(&self) -> Result<String> {
        if let Some(t) = self.cached.read().await.as_ref().filter(|t| t.is_fresh()) {
            return Ok(t.secret.clone());
        }

        let mut cached = self.cached.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(t) = cached.as_ref().filter(|t| t.is_fresh()) {
            return Ok(t.secret.clone());
        }
        let resp = self
            .oauth
            .exchange_client_credentials()
            .add_scope(Scope::new(CLIENT_CREDENTIALS_SCOPE.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| Error::Auth(e.to_string()))?;
        let token = CachedToken::from_response(&resp);
        debug!(
            "fetched client-credentials token (expires in {:?})",
            resp.expires_in()
        );
        let secret = token.secret.clone();
        *cached = Some(token);
        Ok(secret)
    }
}

/// Token obtained through the authorization-code flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub scopes: Vec<String>,
}

impl UserToken {
    fn from_response(resp: &BasicTokenResponse) -> Self {
        let expires_at = resp
            .expires_in()
            .and_then(|d| TimeDelta::from_std(d).ok())
            .and_then(|d| Utc::now().checked_add_signed(d));
        Self {
            access_token: resp.access_token().secret().clone(),
            refresh_token: resp.refresh_token().map(|t| t.secret().clone()),
            expires_at,
            scopes: resp
                .scopes()
                .map(|s| s.iter().map(|x| x.as_str().to_string()).collect())
                .unwrap_or_default(),
        }
    }
}

/// Link the user must follow to authorize the application.
pub fn authorize_url(cfg: &Config, state: &str) -> Result<Url> {
    if cfg.redirect_url.is_none() {
        return Err(Error::Config("redirect url is required to build an authorize link".into()));
    }
    let client = oauth_client(cfg)?;
    let (url, _) = client
        .authorize_url(|| CsrfToken::new(state.to_string()))
        .add_scopes(cfg.scopes.iter().cloned().map(Scope::new))
        .url();
    Ok(url)
}

/// Exchange the code received on the redirect for a user token.
pub async fn exchange_code(cfg: &Config, code: &str) -> Result<UserToken> {
    if cfg.redirect_url.is_none() {
        return Err(Error::Config("redirect url is required to exchange a code".into()));
    }
    let client = oauth_client(cfg)?;
    let http = oauth_http_client(cfg)?;
    let resp = client
        .exchange_code(AuthorizationCode::new(code.to_string()))
        .request_async(&http)
        .await
        .map_err(|e| Error::Auth(e.to_string()))?;
    Ok(UserToken::from_response(&resp))
}

/// Random state for the authorize link; store it and compare on redirect.
pub fn generate_state() -> String {
    CsrfToken::new_random().secret().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> Config {
        Config::new("uid", "secret")
            .with_base_url("https://intra.example")
            .with_redirect_url("https://app.example/callback")
            .with_scopes(["public", "projects"])
    }

    #[test]
    fn authorize_url_carries_flow_parameters() {
        let url = authorize_url(&cfg(), "xyz").unwrap();
        assert_eq!(url.path(), "/oauth/authorize");
        let q: std::collections::HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(q["client_id"], "uid");
        assert_eq!(q["response_type"], "code");
        assert_eq!(q["state"], "xyz");
        assert_eq!(q["redirect_uri"], "https://app.example/callback");
        assert_eq!(q["scope"], "public projects");
    }

    #[test]
    fn authorize_url_needs_redirect_and_credentials() {
        let mut no_redirect = cfg();
        no_redirect.redirect_url = None;
        assert!(matches!(
            authorize_url(&no_redirect, "s"),
            Err(Error::Config(_))
        ));

        let no_creds = Config::default().with_redirect_url("https://app.example/cb");
        assert!(matches!(authorize_url(&no_creds, "s"), Err(Error::Config(_))));
    }

    #[test]
    fn generated_states_differ() {
        let a = generate_state();
        let b = generate_state();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn cached_token_freshness() {
        let fresh = CachedToken {
            secret: "a".into(),
            expires_at: Some(Instant::now() + Duration::from_secs(3600)),
        };
        assert!(fresh.is_fresh());
        let stale = CachedToken {
            secret: "a".into(),
            expires_at: Some(Instant::now() + Duration::from_secs(5)),
        };
        assert!(!stale.is_fresh());
        let forever = CachedToken {
            secret: "a".into(),
            expires_at: None,
        };
        assert!(forever.is_fresh());
    }
}
