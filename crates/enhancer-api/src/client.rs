//! Shared HTTP client with a process-wide Authorization header

use parking_lot::RwLock;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::error::ApiError;
use crate::models::ApiResponse;
use crate::reports::ReportApi;
use crate::users::UserApi;
use crate::Result;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client bound to one backend base URL.
///
/// The bearer token lives behind a shared lock: every clone observes
/// `set_bearer_token` / `clear_bearer_token` made through any other clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    bearer_token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        tracing::debug!(base_url = %base_url, "Created API client");

        Ok(Self {
            http,
            base_url,
            bearer_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn reports(&self) -> ReportApi {
        ReportApi::new(self.clone())
    }

    pub fn users(&self) -> UserApi {
        UserApi::new(self.clone())
    }

    /// Attach `Authorization: Bearer <token>` to every subsequent request.
    pub fn set_bearer_token(&self, token: &str) {
        *self.bearer_token.write() = Some(token.to_string());
    }

    pub fn clear_bearer_token(&self) {
        *self.bearer_token.write() = None;
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.bearer_token.read().clone()
    }

    /// Value of the Authorization header currently sent, if any.
    pub fn authorization_header(&self) -> Option<String> {
        self.bearer_token
            .read()
            .as_ref()
            .map(|token| format!("Bearer {}", token))
    }

    /// Build an absolute URL from path segments, keeping any path prefix of
    /// the base URL. Segments are percent-encoded individually.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!(method = %method, url = %url, "Sending request");

        let builder = self.http.request(method, url);
        match self.authorization_header() {
            Some(value) => builder.header(reqwest::header::AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Send a request and decode the `{ code, message, data }` envelope.
    pub(crate) async fn send<T>(&self, builder: RequestBuilder) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let response = ensure_success(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        decode_envelope(&bytes)
    }

    /// Send a request whose body is not an envelope (file downloads).
    pub(crate) async fn send_raw(&self, builder: RequestBuilder) -> Result<Response> {
        ensure_success(builder.send().await?).await
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    let trimmed = base_url.trim();
    let url = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", trimmed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            trimmed,
            url.scheme()
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidUrl(trimmed.to_string()));
    }

    Ok(url)
}

fn decode_envelope<T>(body: &[u8]) -> Result<ApiResponse<T>>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_slice(body)?)
}

/// Turn a non-2xx response into `ApiError::Status`, preferring the envelope's
/// message over the raw body.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(status = status.as_u16(), error = %err, "Failed to read error body");
            Default::default()
        }
    };
    let message = serde_json::from_slice::<ApiResponse<serde_json::Value>>(&body)
        .ok()
        .map(|envelope| envelope.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(&body).trim().to_string();
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });

    tracing::warn!(status = status.as_u16(), message = %message, "Request rejected");

    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
