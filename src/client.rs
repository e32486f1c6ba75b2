use crate::auth::{self, ClientCredentials, UserToken};
use crate::config::Config;
use crate::error::Result;
use crate::http::{self, ApiRequest, ApiResponse, Authorization};
use crate::models::{Achievement, Campus, Cursus, CursusUser, Project, Skill, Title, User};
use crate::pagination::Pagination;
use crate::resource::{Page, Resource};
use log::info;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use url::Url;

struct Inner {
    config: Config,
    base_url: Url,
    http: reqwest::Client,
    credentials: Option<ClientCredentials>,
}

/// Handle to the intra API.
///
/// Cloning is cheap and every clone shares the same read-only configuration,
/// transport and token source. Each handle carries the cancellation token its
/// calls race against (see [`Client::with_cancellation`]).
#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
    cancel: CancellationToken,
}

impl Client {
    /// Build a client without any network I/O. The client-credentials token,
    /// if configured, is fetched on the first call.
    pub fn new(config: Config) -> Result<Self> {
        let http = http::build_client(&config)?;
        Self::with_http_client(config, http)
    }

    /// Same as [`Client::new`] with a caller-provided transport.
    pub fn with_http_client(config: Config, http: reqwest::Client) -> Result<Self> {
        let base_url = http::parse_base_url(&config.base_url)?;
        let credentials = if config.credentials.is_some() {
            Some(ClientCredentials::new(&config)?)
        } else {
            None
        };
        Ok(Self {
            inner: Arc::new(Inner {
                config,
                base_url,
                http,
                credentials,
            }),
            cancel: CancellationToken::new(),
        })
    }

    /// Build the client and fetch the first application token, so bad
    /// credentials fail here rather than on the first call.
    pub async fn connect(config: Config) -> Result<Self> {
        let client = Self::new(config)?;
        if let Some(creds) = &client.inner.credentials {
            creds.token().await?;
            info!("intra client initialized");
        }
        Ok(client)
    }

    /// A handle whose calls abort with [`crate::Error::Cancelled`] once `cancel` fires.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            cancel,
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Build, send (absorbing 429s) and read one request.
    pub async fn request(&self, req: ApiRequest) -> Result<ApiResponse> {
        let inner = &*self.inner;
        let built = req.build(&inner.http, &inner.base_url, &inner.config)?;
        let auth = match req.token() {
            Some(_) => Authorization::Bearer,
            None => Authorization::Managed(inner.credentials.as_ref()),
        };
        let res = http::send_with_retry(
            &inner.http,
            built,
            auth,
            inner.config.max_retries,
            &self.cancel,
        )
        .await?;
        http::decode_response(res, &self.cancel).await
    }

    pub async fn fetch<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T> {
        self.request(req).await?.json()
    }

    pub async fn fetch_page<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<Page<T>> {
        let res = self.request(req).await?;
        Ok(Page {
            items: res.json()?,
            pagination: res.pagination(),
        })
    }

    /// GET any endpoint without a typed accessor.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        pagination: Option<&Pagination>,
    ) -> Result<Page<T>> {
        self.fetch_page(ApiRequest::get(path).paginate(pagination))
            .await
    }

    pub fn authorize_url(&self, state: &str) -> Result<Url> {
        auth::authorize_url(&self.inner.config, state)
    }

    pub async fn exchange_code(&self, code: &str) -> Result<UserToken> {
        auth::exchange_code(&self.inner.config, code).await
    }

    pub fn users(&self) -> Resource<'_, User> {
        Resource::new(self, "users")
    }

    pub fn achievements(&self) -> Resource<'_, Achievement> {
        Resource::new(self, "achievements")
    }

    pub fn cursus(&self) -> Resource<'_, Cursus> {
        Resource::new(self, "cursus")
    }

    pub fn cursus_users(&self) -> Resource<'_, CursusUser> {
        Resource::new(self, "cursus_users")
    }

    pub fn projects(&self) -> Resource<'_, Project> {
        Resource::new(self, "projects")
    }

    pub fn titles(&self) -> Resource<'_, Title> {
        Resource::new(self, "titles")
    }

    pub fn skills(&self) -> Resource<'_, Skill> {
        Resource::new(self, "skills")
    }

    pub fn campus(&self) -> Resource<'_, Campus> {
        Resource::new(self, "campus")
    }
}
