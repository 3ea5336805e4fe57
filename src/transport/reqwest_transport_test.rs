use super::*;
use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{any, get};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

fn init_crypto() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

async fn echo(
    method: axum::http::Method,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
    body: String,
) -> Json<Value> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({
        "method": method.as_str(),
        "query": params,
        "auth": auth,
        "content_type": content_type,
        "body": body,
    }))
}

async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route("/echo", any(echo))
        .route("/boom", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let url = format!("http://{}", addr);

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (url, handle)
}

#[tokio::test]
async fn get_sends_query_and_bearer() {
    init_crypto();
    let (url, _handle) = spawn_test_server().await;
    let transport = ReqwestTransport::new();

    let request = HttpRequest::get(format!("{}/echo", url))
        .with_query(vec![
            ("page".to_string(), "2".to_string()),
            ("sort".to_string(), "startDate,desc".to_string()),
        ])
        .with_bearer("token-123");

    let response = transport.send(request).await.unwrap();
    assert_eq!(response.status, 200);

    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "GET");
    assert_eq!(echoed["auth"], "Bearer token-123");
    assert_eq!(echoed["query"], json!([["page", "2"], ["sort", "startDate,desc"]]));
}

#[tokio::test]
async fn post_sends_json_body() {
    init_crypto();
    let (url, _handle) = spawn_test_server().await;
    let transport = ReqwestTransport::new();

    let request =
        HttpRequest::post(format!("{}/echo", url)).with_json(json!({"status": "CLOSED"}));

    let response = transport.send(request).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "POST");
    assert_eq!(echoed["content_type"], "application/json");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"status": "CLOSED"}));
}

#[tokio::test]
async fn json_request_without_body_keeps_content_type() {
    init_crypto();
    let (url, _handle) = spawn_test_server().await;
    let transport = ReqwestTransport::new();

    let marked = HttpRequest::new(Method::Delete, format!("{}/echo", url)).as_json();
    let response = transport.send(marked).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["body"], "");

    let plain = HttpRequest::get(format!("{}/echo", url));
    let response = transport.send(plain).await.unwrap();
    let echoed: Value = serde_json::from_str(&response.body).unwrap();
    assert!(echoed["content_type"].is_null());
}

#[tokio::test]
async fn error_status_is_returned_not_raised() {
    init_crypto();
    let (url, _handle) = spawn_test_server().await;
    let transport = ReqwestTransport::new();

    let response = transport
        .send(HttpRequest::get(format!("{}/boom", url)))
        .await
        .unwrap();
    assert_eq!(response.status, 500);
    assert_eq!(response.body, "boom");
}

#[tokio::test]
async fn unreachable_host_is_a_connection_error() {
    init_crypto();
    let transport = ReqwestTransport::new();

    // Port 9 (discard) on localhost is not expected to accept connections.
    let result = transport
        .send(HttpRequest::get("http://127.0.0.1:9/nothing"))
        .await;
    assert!(matches!(result, Err(TransportError::Connection { .. })));
}
