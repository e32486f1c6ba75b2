use crate::config::Config;
use crate::error::{ApiError, Error, Result};
use crate::pagination::{pagination_query, Pagination, PaginationResponse};
use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

mod retry;

pub use retry::{retry_after_secs, send_with_retry, Authorization};

pub const VERSION_HEADER: &str = "intra42-version";

/// Builder carrying the configured user agent and timeout. Shared by the API
/// transport and the OAuth token client.
pub fn client_builder(cfg: &Config) -> Result<reqwest::ClientBuilder> {
    let mut default_headers = HeaderMap::new();
    let ua = HeaderValue::from_str(&cfg.user_agent)
        .map_err(|e| Error::Config(format!("invalid user agent: {e}")))?;
    default_headers.insert(USER_AGENT, ua);
    Ok(Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .use_rustls_tls())
}

pub fn build_client(cfg: &Config) -> Result<Client> {
    client_builder(cfg)?
        .build()
        .map_err(|e| Error::Config(format!("failed to build http client: {e}")))
}

pub fn auth_header(token: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| Error::Request(format!("invalid bearer token: {e}")))
}

/// Percent-encode a single path segment (logins, slugs).
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Encode a caller-supplied segment, refusing values that url resolution
/// would collapse (`.`, `..`, empty).
pub fn path_segment(segment: &str) -> Result<String> {
    if matches!(segment, "" | "." | "..") {
        return Err(Error::Request(format!("invalid path segment: {:?}", segment)));
    }
    Ok(encode_path_segment(segment))
}

/// Parse the base url and make sure it ends with a slash so that relative
/// joins append to its path instead of replacing the last segment.
pub fn parse_base_url(base: &str) -> Result<Url> {
    let mut url = Url::parse(base)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve `path` against `base/version/`. Absolute urls are refused so the
/// bearer token never leaves the configured host.
pub fn resolve_url(base: &Url, version: &str, path: &str) -> Result<Url> {
    if Url::parse(path).is_ok() {
        return Err(Error::Request(format!("expected a relative api path, got {:?}", path)));
    }
    let version = version.trim_matches('/');
    let path = path.trim_start_matches('/');
    let relative = if version.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", version, path)
    };
    Ok(base.join(&relative)?)
}

/// One call into the API: method, relative path, optional bearer token,
/// query parameters and an optional pre-serialized JSON body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    token: Option<String>,
    query: BTreeMap<String, String>,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            token: None,
            query: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Send with an explicit user token instead of the managed credentials.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn queries(mut self, params: BTreeMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn paginate(self, pagination: Option<&Pagination>) -> Self {
        self.queries(pagination_query(pagination))
    }

    /// Attach a JSON body. Serialization happens here so that a bad body is
    /// reported before anything is sent.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body).map_err(Error::Serialize)?);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Build the outbound request. No I/O happens here.
    pub fn build(&self, client: &Client, base: &Url, cfg: &Config) -> Result<reqwest::Request> {
        let mut url = resolve_url(base, &cfg.api_version, &self.path)?;
        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in &self.query {
                pairs.append_pair(k, v);
            }
        }

        let version = HeaderValue::from_str(&cfg.version_header)
            .map_err(|e| Error::Config(format!("invalid version header: {e}")))?;
        let mut builder = client
            .request(self.method.clone(), url)
            .header(AUTHORIZATION, auth_header(self.token().unwrap_or(""))?)
            .header(HeaderName::from_static(VERSION_HEADER), version);
        if let Some(body) = &self.body {
            builder = builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body.clone());
        }
        builder.build().map_err(|e| Error::Request(e.to_string()))
    }
}

/// Successful (200) response with its body fully read.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::Decode)
    }

    pub fn pagination(&self) -> Option<PaginationResponse> {
        PaginationResponse::from_headers(&self.headers)
    }
}

/// Read the body of the response the retry loop settled on. Anything but
/// `200 OK` is decoded as an [`ApiError`] carrying the observed status.
pub async fn decode_response(
    res: reqwest::Response,
    cancel: &CancellationToken,
) -> Result<ApiResponse> {
    let status = res.status();
    let headers = res.headers().clone();
    let body = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        b = res.bytes() => b?,
    };
    if status != StatusCode::OK {
        debug!("api error status={} bytes={}", status, body.len());
        return Err(decode_api_error(status, &body)?.into());
    }
    Ok(ApiResponse {
        status,
        headers,
        body: body.to_vec(),
    })
}

/// Wire shape of an error body. Null fields are tolerated and any `status`
/// in the body is ignored.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

pub fn decode_api_error(status: StatusCode, body: &[u8]) -> Result<ApiError> {
    let body: ErrorBody = serde_json::from_slice(body).map_err(Error::Decode)?;
    Ok(ApiError {
        message: body.message.unwrap_or_default(),
        code: body.code.unwrap_or_default(),
        status: status.as_u16(),
    })
}
