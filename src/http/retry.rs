use super::auth_header;
use crate::auth::ClientCredentials;
use crate::error::{Error, RateLimitedError, Result};
use log::{debug, warn};
use reqwest::header::{HeaderMap, AUTHORIZATION, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Where the bearer token of an attempt comes from.
#[derive(Clone, Copy)]
pub enum Authorization<'a> {
    /// The caller supplied a user token; it is already on the request.
    Bearer,
    /// Application token from the client-credentials source. Without a source
    /// the request goes out with the empty bearer it was built with.
    Managed(Option<&'a ClientCredentials>),
}

/// Read `Retry-After` as whole seconds.
pub fn retry_after_secs(headers: &HeaderMap) -> std::result::Result<u64, RateLimitedError> {
    let value = headers.get(RETRY_AFTER).ok_or_else(|| RateLimitedError {
        message: "Retry-After header missing from 429 response".to_string(),
    })?;
    value
        .to_str()
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .ok_or_else(|| RateLimitedError {
            message: format!("invalid Retry-After header on 429 response: {:?}", value),
        })
}

/// Send `template`, absorbing up to `max_retries - 1` rate-limited responses.
///
/// Returns the first response whose status is not 429. Network errors are not
/// retried. Every send and every wait races `cancel`.
pub async fn send_with_retry(
    client: &Client,
    template: reqwest::Request,
    auth: Authorization<'_>,
    max_retries: u32,
    cancel: &CancellationToken,
) -> Result<reqwest::Response> {
    let mut failed_attempts: u32 = 0;
    loop {
        let mut req = template
            .try_clone()
            .ok_or_else(|| Error::Request("request body cannot be replayed".into()))?;

        if let Authorization::Managed(Some(creds)) = auth {
            let token = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                t = creds.token() => t?,
            };
            req.headers_mut().insert(AUTHORIZATION, auth_header(&token)?);
        }

        debug!(
            "{} {} attempt {}",
            req.method(),
            req.url(),
            failed_attempts + 1
        );
        let res = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            r = client.execute(req) => r?,
        };

        if res.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(res);
        }

        failed_attempts += 1;
        if failed_attempts >= max_retries {
            warn!(
                "{} still rate limited after {} attempts",
                res.url(),
                failed_attempts
            );
            return Err(RateLimitedError {
                message: format!(
                    "Retry request with 429 response failed after {} retries",
                    failed_attempts
                ),
            }
            .into());
        }

        let wait = Duration::from_secs(retry_after_secs(res.headers())?);
        warn!(
            "{} rate limited (attempt {}), retrying in {:?}",
            res.url(),
            failed_attempts,
            wait
        );
        // Dropping the response releases its connection before we sleep.
        drop(res);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = tokio::time::sleep(wait) => {}
        }
    }
}
