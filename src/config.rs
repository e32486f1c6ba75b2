use crate::error::{Error, Result};
use std::env;

pub const DEFAULT_API_URL: &str = "https://api.intra.42.fr";
pub const DEFAULT_API_VERSION: &str = "v2";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// OAuth2 application credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Runtime configuration for the intra API client.
///
/// Built once and handed to [`crate::Client`]; it is never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub api_version: String,
    /// Value sent in the `Intra42-Version` header (may be empty).
    pub version_header: String,
    pub max_retries: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub auth_url: Option<String>,
    pub token_url: Option<String>,
    pub credentials: Option<Credentials>,
    pub redirect_url: Option<String>,
    pub scopes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            version_header: String::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            timeout_secs: 30,
            user_agent: format!("intra42/{}", env!("CARGO_PKG_VERSION")),
            auth_url: None,
            token_url: None,
            credentials: None,
            redirect_url: None,
            scopes: vec!["public".to_string()],
        }
    }
}

impl Config {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::default().with_credentials(client_id, client_secret)
    }

    /// Load configuration from environment.
    ///
    /// Env vars:
    /// - FT_API_CLIENT_ID / FT_API_CLIENT_SECRET (optional, both or neither)
    /// - FT_API_REDIRECT_URL (optional)
    /// - FT_API_SCOPES (default: public, comma separated)
    /// - FT_API_URL (default: https://api.intra.42.fr)
    /// - FT_API_VERSION_HEADER (default: empty): value of the `Intra42-Version`
    ///   header. The path version (`v2`) is only set with [`Config::with_api_version`].
    /// - FT_API_MAX_RETRIES (default: 3)
    /// - FT_HTTP_TIMEOUT_SECS (default: 30)
    /// - FT_USER_AGENT (default: intra42/<version>)
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::default();

        match (env::var("FT_API_CLIENT_ID"), env::var("FT_API_CLIENT_SECRET")) {
            (Ok(id), Ok(secret)) => cfg = cfg.with_credentials(id, secret),
            (Err(_), Err(_)) => {}
            _ => {
                return Err(Error::Config(
                    "FT_API_CLIENT_ID and FT_API_CLIENT_SECRET must be set together".into(),
                ))
            }
        }
        if let Ok(url) = env::var("FT_API_REDIRECT_URL") {
            cfg.redirect_url = Some(url);
        }
        if let Ok(scopes) = env::var("FT_API_SCOPES") {
            cfg.scopes = parse_scopes(&scopes);
        }
        if let Ok(url) = env::var("FT_API_URL") {
            cfg.base_url = url;
        }
        if let Ok(v) = env::var("FT_API_VERSION_HEADER") {
            cfg.version_header = v;
        }
        if let Ok(v) = env::var("FT_API_MAX_RETRIES") {
            cfg.max_retries = v
                .parse()
                .map_err(|_| Error::Config(format!("FT_API_MAX_RETRIES is not a number: {v}")))?;
        }
        if let Ok(v) = env::var("FT_HTTP_TIMEOUT_SECS") {
            cfg.timeout_secs = v
                .parse()
                .map_err(|_| Error::Config(format!("FT_HTTP_TIMEOUT_SECS is not a number: {v}")))?;
        }
        if let Ok(ua) = env::var("FT_USER_AGENT") {
            cfg.user_agent = ua;
        }
        Ok(cfg)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Overrides the `Intra42-Version` header value.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version_header = version.into();
        self
    }

    /// Overrides the number of attempts allowed on 429 responses.
    pub fn with_retry(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        });
        self
    }

    pub fn with_redirect_url(mut self, url: impl Into<String>) -> Self {
        self.redirect_url = Some(url.into());
        self
    }

    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = Some(url.into());
        self
    }

    pub fn token_url(&self) -> String {
        self.token_url
            .clone()
            .unwrap_or_else(|| format!("{}/oauth/token", self.base_url.trim_end_matches('/')))
    }

    pub fn auth_url(&self) -> String {
        self.auth_url
            .clone()
            .unwrap_or_else(|| format!("{}/oauth/authorize", self.base_url.trim_end_matches('/')))
    }
}

fn parse_scopes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, "https://api.intra.42.fr");
        assert_eq!(cfg.api_version, "v2");
        assert_eq!(cfg.max_retries, 3);
        assert!(cfg.version_header.is_empty());
        assert!(cfg.credentials.is_none());
        assert_eq!(cfg.scopes, vec!["public".to_string()]);
    }

    #[test]
    fn oauth_endpoints_follow_base_url() {
        let cfg = Config::default().with_base_url("http://localhost:8080/");
        assert_eq!(cfg.token_url(), "http://localhost:8080/oauth/token");
        assert_eq!(cfg.auth_url(), "http://localhost:8080/oauth/authorize");

        let cfg = cfg.with_token_url("http://auth.local/token");
        assert_eq!(cfg.token_url(), "http://auth.local/token");
    }

    #[test]
    fn scopes_are_split_and_trimmed() {
        assert_eq!(
            parse_scopes("public, projects ,,profile"),
            vec!["public", "projects", "profile"]
        );
        assert!(parse_scopes("").is_empty());
    }
}
