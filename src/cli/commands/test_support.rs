//! Scriptable stand-in for the backend, served over real HTTP.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::cli::api_client::ApiClient;
use crate::session::SessionStore;
use crate::transport::ReqwestTransport;

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

type Routes = HashMap<(String, String), Vec<(u16, Value)>>;

#[derive(Clone, Default)]
pub struct Backend {
    routes: Arc<Mutex<Routes>>,
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `body`. Registering the same route again
    /// queues another answer; the last one repeats.
    pub fn on(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push((status, body));
        self
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    /// Starts serving and returns the `/api` base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(respond).with_state(self.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }
}

async fn respond(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    backend.seen.lock().unwrap().push(Seen {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        authorization: header(&headers, "authorization"),
        content_type: header(&headers, "content-type"),
        body: serde_json::from_str(&body).ok(),
    });

    let mut routes = backend.routes.lock().unwrap();
    let key = (method.to_string(), uri.path().to_string());
    let (status, body) = match routes.get_mut(&key) {
        Some(answers) if answers.len() > 1 => answers.remove(0),
        Some(answers) => answers[0].clone(),
        None => (404, json!({"status_code": 404, "message": "Not found"})),
    };

    (
        StatusCode::from_u16(status).unwrap(),
        body.to_string(),
    )
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Client for `url` holding an in-memory session with `token`.
pub fn client(url: &str, token: &str) -> ApiClient {
    init_crypto();
    ApiClient::with_parts(
        url,
        Arc::new(SessionStore::with_token(token)),
        Arc::new(ReqwestTransport::new()),
    )
}

/// Envelope around one page of `results`.
pub fn page(results: Value, total_pages: u32, total_elements: u64) -> Value {
    json!({
        "status_code": 200,
        "message": "OK",
        "data": {
            "results": results,
            "total_pages": total_pages,
            "total_elements": total_elements,
        }
    })
}
