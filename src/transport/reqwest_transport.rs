use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use super::{HttpRequest, HttpResponse, Method, Transport, TransportError};

/// Production transport backed by a shared reqwest client.
#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

fn classify(url: &str, e: reqwest::Error) -> TransportError {
    if e.is_connect() || e.is_timeout() {
        TransportError::Connection {
            url: url.to_string(),
            message: e.to_string(),
        }
    } else {
        TransportError::Request {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'static, Result<HttpResponse, TransportError>> {
        let client = self.client.clone();
        async move {
            let HttpRequest {
                method,
                url,
                query,
                bearer,
                body,
                json,
            } = request;

            let mut builder = client.request(method.into(), &url);
            if !query.is_empty() {
                builder = builder.query(&query);
            }
            if let Some(token) = bearer {
                builder = builder.bearer_auth(token);
            }
            match body {
                Some(body) => builder = builder.json(&body),
                None if json => builder = builder.header(CONTENT_TYPE, "application/json"),
                None => {}
            }

            let response = builder.send().await.map_err(|e| classify(&url, e))?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|e| classify(&url, e))?;

            tracing::debug!(%method, %url, status, "request completed");
            Ok(HttpResponse { status, body })
        }
        .boxed()
    }
}

#[cfg(test)]
#[path = "reqwest_transport_test.rs"]
mod reqwest_transport_test;
