//! Client for the 42 intra REST API.
//!
//! Every accessor funnels through [`Client::request`], which builds the
//! request, absorbs `429 Too Many Requests` responses according to
//! `Retry-After`, and decodes API errors. List endpoints return a [`Page`]
//! with the pagination info read from the `X-Total`/`X-Page`/`X-Per-Page`
//! headers.

pub mod api;
pub mod auth;
mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod pagination;
mod resource;

pub use auth::UserToken;
pub use client::Client;
pub use config::Config;
pub use error::{ApiError, Error, RateLimitedError, Result};
pub use http::{ApiRequest, ApiResponse};
pub use pagination::{Pagination, PaginationResponse};
pub use resource::{Page, Resource};
pub use tokio_util::sync::CancellationToken;
