//! Network client seam
//!
//! One request at a time: the runner awaits each call to completion, so a
//! client never has two requests in flight. Implementations must resolve
//! with either the decoded payload or an error value; callers treat both
//! as request completion.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::Result;

/// HTTP method selected for a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Per-request options handed to a [`NetworkClient`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// Encoded request body, present only for POST
    pub body: Option<String>,
}

impl RequestOptions {
    /// Options for a bare GET request.
    pub fn get() -> Self {
        Self::default()
    }

    /// Options for a POST request carrying an already-encoded body.
    pub fn post(body: String) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body),
        }
    }

    /// Derive the options for a test case payload: POST with the body
    /// serialized to JSON when one is present, GET otherwise.
    pub fn for_body(body: Option<&Value>) -> Result<Self> {
        match body {
            Some(value) => Ok(Self::post(serde_json::to_string(value)?)),
            None => Ok(Self::get()),
        }
    }
}

/// External collaborator performing one HTTP request.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    /// Perform one request and decode the response payload.
    ///
    /// Must resolve rather than hang silently. A transport or decode
    /// failure resolves to the error value; the runner logs it and still
    /// records the attempt's duration.
    async fn request(&self, url: &str, options: &RequestOptions) -> Result<Value>;
}

/// Shipped [`NetworkClient`] backed by [`reqwest`].
///
/// Decodes every response body as JSON, matching the harness contract of
/// "parsed response or error value".
#[derive(Debug, Clone)]
pub struct HttpNetworkClient {
    client: reqwest::Client,
}

impl HttpNetworkClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Wrap a preconfigured [`reqwest::Client`] (custom timeouts, proxies).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpNetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkClient for HttpNetworkClient {
    async fn request(&self, url: &str, options: &RequestOptions) -> Result<Value> {
        let request = match options.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => {
                let mut request = self
                    .client
                    .post(url)
                    .header(CONTENT_TYPE, "application/json");
                if let Some(body) = &options.body {
                    request = request.body(body.clone());
                }
                request
            }
        };

        let response = request.send().await?;
        let payload = response.json::<Value>().await?;

        Ok(payload)
    }
}
