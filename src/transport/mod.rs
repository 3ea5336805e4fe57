//! HTTP seam shared by every controller that talks to the backend.
//!
//! Controllers never build a client themselves: they receive a
//! [`Transport`] and hand it plain [`HttpRequest`] values, which keeps them
//! testable with a mocked transport and lets the binary plug in reqwest.

use std::fmt;

use futures_util::future::BoxFuture;
use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

#[cfg(feature = "cli")]
mod reqwest_transport;

#[cfg(feature = "cli")]
pub use reqwest_transport::ReqwestTransport;

/// HTTP verbs used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request as the controllers see it, before any client touches it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Ordered query parameters, appended to `url` by the transport.
    pub query: Vec<(String, String)>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    /// JSON body.
    pub body: Option<Value>,
    /// Send `Content-Type: application/json`, with or without a body.
    pub json: bool,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
            json: false,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self.json = true;
        self
    }

    /// Marks the request as JSON even when it carries no body.
    pub fn as_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// First query value stored under `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures below the HTTP layer: nothing came back from the server.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Failed to connect to {url}: {message}")]
    #[diagnostic(
        code(activity_hub::transport::connection_failed),
        help("Is the backend running? Set AHUB_API_URL or pass --api-url to point at it.")
    )]
    Connection { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    #[diagnostic(code(activity_hub::transport::request_failed))]
    Request { url: String, message: String },
}

/// Sends requests to the backend. Can be mocked in tests.
#[cfg_attr(test, automock)]
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest)
    -> BoxFuture<'static, Result<HttpResponse, TransportError>>;
}
