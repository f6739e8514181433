//! Scripted HTTP upstream for testing remote store clients
//!
//! `MockUpstream` binds an axum server to an ephemeral port on 127.0.0.1,
//! answers every request with the next scripted response, and records what
//! it received so tests can assert on method, path, query, headers and body.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A request captured by [`MockUpstream`]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    /// Raw, still percent-encoded query string
    pub query: Option<String>,
    decoded_query: Vec<(String, String)>,
    pub headers: HeaderMap,
    /// Parsed JSON body, `Value::Null` when empty or not JSON
    pub body: Value,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Query parameters decoded into `(key, value)` pairs, in order
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.decoded_query.clone()
    }
}

#[derive(Debug, Clone)]
struct ScriptedResponse {
    status: StatusCode,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: Value,
}

#[derive(Default)]
struct Script {
    responses: VecDeque<ScriptedResponse>,
    requests: Vec<RecordedRequest>,
}

type SharedScript = Arc<Mutex<Script>>;

/// Scripted upstream server, stopped when dropped
///
/// # Example
///
/// ```no_run
/// use serde_json::json;
/// use test_utils::MockUpstream;
///
/// # async fn example() {
/// let upstream = MockUpstream::start().await;
/// upstream.respond_json(200, json!({"rows": [], "rowCount": 0}));
///
/// // point the client under test at upstream.url("/sql") ...
///
/// let requests = upstream.requests();
/// assert_eq!(requests[0].path, "/sql");
/// # }
/// ```
pub struct MockUpstream {
    base_url: String,
    script: SharedScript,
    server: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let script = SharedScript::default();
        let app = Router::new()
            .fallback(handle)
            .with_state(script.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock upstream");
        let addr = listener
            .local_addr()
            .expect("Failed to read mock upstream address");

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Mock upstream stopped: {}", e);
            }
        });

        tracing::debug!(%addr, "Mock upstream listening");

        Self {
            base_url: format!("http://{}", addr),
            script,
            server,
        }
    }

    /// `http://127.0.0.1:{port}`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Queue a JSON response; responses are served in FIFO order
    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond_with_headers(status, &[], body);
    }

    pub fn respond_with_headers(&self, status: u16, headers: &[(&str, &str)], body: Value) {
        let status = StatusCode::from_u16(status).expect("Invalid scripted status code");
        let headers = headers
            .iter()
            .map(|(name, value)| {
                (
                    HeaderName::from_bytes(name.as_bytes()).expect("Invalid scripted header name"),
                    HeaderValue::from_str(value).expect("Invalid scripted header value"),
                )
            })
            .collect();

        self.lock().responses.push_back(ScriptedResponse {
            status,
            headers,
            body,
        });
    }

    /// Every request received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// The only request received; panics on zero or several
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(
            requests.len(),
            1,
            "expected exactly one upstream request, got {}",
            requests.len()
        );
        requests[0].clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().expect("Mock upstream state poisoned")
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(script): State<SharedScript>,
    method: Method,
    uri: Uri,
    decoded_query: Result<Query<Vec<(String, String)>>, QueryRejection>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let recorded = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        decoded_query: decoded_query
            .map(|Query(pairs)| pairs)
            .unwrap_or_default(),
        headers,
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };

    let next = {
        let mut script = script.lock().expect("Mock upstream state poisoned");
        script.requests.push(recorded);
        script.responses.pop_front()
    };

    match next {
        Some(scripted) => {
            let mut response = (scripted.status, Json(scripted.body)).into_response();
            for (name, value) in scripted.headers {
                response.headers_mut().insert(name, value);
            }
            response
        }
        None => (
            StatusCode::NOT_IMPLEMENTED,
            Json(json!({"message": "mock upstream has no scripted response left"})),
        )
            .into_response(),
    }
}
