//! In-process mock backend for request tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::config::ApiConfig;
use crate::provider::ClientProvider;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
pub(crate) struct Recorded {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

/// The fixed answer for one path.
#[derive(Debug, Clone)]
pub(crate) struct Canned {
    status: StatusCode,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Canned {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn ok() -> Self {
        Self::new(200, "")
    }

    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, Canned>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

pub(crate) struct MockBackend {
    pub origin: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockBackend {
    /// Serve `routes` (full paths including `/api`) on an ephemeral port.
    /// Unknown paths answer 404.
    pub async fn start(routes: Vec<(&str, Canned)>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            routes: Arc::new(
                routes
                    .into_iter()
                    .map(|(path, canned)| (path.to_string(), canned))
                    .collect(),
            ),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(record).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            origin: format!("http://{}", addr),
            requests,
        }
    }

    pub fn provider(&self) -> ClientProvider {
        provider_for(&self.origin)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn record(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(Recorded {
        method,
        path: path.clone(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    match state.routes.get(&path) {
        Some(canned) => {
            let mut headers = HeaderMap::new();
            for (name, value) in &canned.headers {
                headers.insert(
                    HeaderName::from_static(name),
                    HeaderValue::from_str(value).unwrap(),
                );
            }
            (canned.status, headers, canned.body.clone()).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub(crate) fn provider_for(origin: &str) -> ClientProvider {
    ClientProvider::new(&ApiConfig {
        origin: origin.to_string(),
        timeout: Some(5),
    })
    .unwrap()
}

/// An origin nothing listens on.
pub(crate) async fn closed_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// An origin that answers every request with a 500 whose body is cut off
/// before the advertised length.
pub(crate) async fn truncated_error_origin() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    const TRUNCATED_500: &[u8] = b"HTTP/1.1 500 Internal Server Error\r\n\
        content-length: 100\r\n\r\npartial";

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(TRUNCATED_500).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}", addr)
}
