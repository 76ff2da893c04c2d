// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP gateway to the JunkStop REST API.
//!
//! Every API call goes through here. Handles:
//! - Base URL joining
//! - Bearer token injection (read from the credential store on every call)
//! - JSON and multipart bodies
//! - 401 handling: credentials are purged for any endpoint, no retry
//! - Error messages from `detail`/`message` response fields, tagged with the status

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::storage::{keys, CredentialStore};

/// How caller-supplied headers interact with the injected bearer header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderPolicy {
    /// The gateway's `Authorization` header replaces any caller value.
    #[default]
    AuthorizationWins,
    /// A caller `Authorization` header replaces the gateway's.
    CallerWins,
}

impl FromStr for HeaderPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "authorization-wins" | "authorization_wins" => Ok(HeaderPolicy::AuthorizationWins),
            "caller-wins" | "caller_wins" => Ok(HeaderPolicy::CallerWins),
            other => Err(format!("unknown header policy: {}", other)),
        }
    }
}

/// Method, body and extra headers for a JSON request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    body: Option<serde_json::Value>,
    headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("Failed to encode request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add a caller header. Later values for the same name replace earlier ones.
    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// HTTP gateway shared by the session manager and API client.
#[derive(Clone)]
pub struct Gateway {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
    header_policy: HeaderPolicy,
    /// Bumped every time a 401 purges the stored credentials.
    invalidations: Arc<watch::Sender<u64>>,
}

impl Gateway {
    /// Create a gateway from client configuration.
    pub fn new(config: &Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.http_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(format!("Failed to build HTTP client: {}", e)))?;

        let (invalidations, _) = watch::channel(0);

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            store,
            header_policy: config.header_policy,
            invalidations: Arc::new(invalidations),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn header_policy(&self) -> HeaderPolicy {
        self.header_policy
    }

    /// Credential store this gateway reads the token from.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Watch the 401 invalidation counter.
    pub fn subscribe_invalidations(&self) -> watch::Receiver<u64> {
        self.invalidations.subscribe()
    }

    /// Number of 401-triggered purges so far.
    pub fn invalidation_count(&self) -> u64 {
        *self.invalidations.borrow()
    }

    /// Send a JSON request and decode the JSON response.
    pub async fn request<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T> {
        let RequestOptions {
            method,
            body,
            headers: caller_headers,
        } = options;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.merge_headers(&mut headers, caller_headers).await;

        tracing::debug!(method = %method, path, "API request");

        let mut builder = self.http.request(method, self.url(path)).headers(headers);
        if let Some(body) = body {
            let bytes = serde_json::to_vec(&body)
                .map_err(|e| ClientError::Decode(format!("Failed to encode request body: {}", e)))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await?;
        self.check_response_json(path, response).await
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(path, RequestOptions::get()).await
    }

    /// POST a JSON body and decode the JSON response.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(path, RequestOptions::post().json(body)?).await
    }

    /// POST a multipart form. No JSON content type is set; reqwest adds
    /// the multipart boundary header.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        self.upload_with_headers(path, form, HeaderMap::new()).await
    }

    /// Multipart upload with extra caller headers (same header policy as `request`).
    pub async fn upload_with_headers<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        caller_headers: HeaderMap,
    ) -> Result<T> {
        let mut headers = HeaderMap::new();
        self.merge_headers(&mut headers, caller_headers).await;

        tracing::debug!(path, "API upload");

        let response = self
            .http
            .post(self.url(path))
            .headers(headers)
            .multipart(form)
            .send()
            .await?;

        self.check_response_json(path, response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current bearer header, read fresh from the store.
    async fn bearer_header(&self) -> Option<HeaderValue> {
        let token = self.store.get(keys::AUTH_TOKEN).await?;
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                tracing::warn!("Stored token is not a valid header value, sending request without it");
                None
            }
        }
    }

    async fn merge_headers(&self, headers: &mut HeaderMap, caller_headers: HeaderMap) {
        let bearer = self.bearer_header().await;

        match self.header_policy {
            HeaderPolicy::AuthorizationWins => {
                extend_replacing(headers, caller_headers);
                if let Some(bearer) = bearer {
                    headers.insert(AUTHORIZATION, bearer);
                }
            }
            HeaderPolicy::CallerWins => {
                if let Some(bearer) = bearer {
                    headers.insert(AUTHORIZATION, bearer);
                }
                extend_replacing(headers, caller_headers);
            }
        }
    }

    /// Purge stored credentials after a 401.
    async fn invalidate_session(&self, path: &str) {
        if let Err(e) = self.store.clear_credentials().await {
            tracing::error!(error = %e, "Failed to clear credentials after 401");
        }
        self.invalidations.send_modify(|count| *count += 1);
        tracing::warn!(path, "Received 401, stored credentials cleared");
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            if bytes.is_empty() {
                return serde_json::from_value(serde_json::Value::Null)
                    .map_err(|e| ClientError::Decode(format!("Empty response body: {}", e)));
            }
            return serde_json::from_slice(&bytes)
                .map_err(|e| ClientError::Decode(format!("JSON parse error: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body).unwrap_or_default();

        if status.as_u16() == 401 {
            self.invalidate_session(path).await;
            return Err(ClientError::Unauthorized { message });
        }

        tracing::debug!(path, status = status.as_u16(), "API request failed");

        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

/// Copy headers, replacing (not appending) existing values of the same name.
fn extend_replacing(headers: &mut HeaderMap, extra: HeaderMap) {
    let mut last_name = None;
    for (name, value) in extra {
        // `None` means another value for the previous name
        let name = match name {
            Some(name) => {
                headers.remove(&name);
                last_name = Some(name.clone());
                name
            }
            None => match &last_name {
                Some(name) => name.clone(),
                None => continue,
            },
        };
        headers.append(name, value);
    }
}

/// Pull a human-readable message out of an error body.
///
/// Prefers a string `detail` (FastAPI style), then `message`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .filter_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
