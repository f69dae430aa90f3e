//! An in-process stand-in for a project's PostgREST `exec_sql` endpoint.

use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};

/// A request the mock endpoint received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub query: String,
    pub authorization: Option<String>,
    pub apikey: Option<String>,
}

/// Decides the response for each received query.
pub type Responder = fn(&str) -> (StatusCode, String);

#[derive(Clone)]
struct ServerState {
    responder: Responder,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct MockRpcServer {
    address: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockRpcServer {
    /// Start serving on a free local port.
    pub async fn start(responder: Responder) -> Self {
        let requests = Arc::new(Mutex::new(vec![]));
        let state = ServerState {
            responder,
            requests: requests.clone(),
        };
        let router = Router::new()
            .route("/rest/v1/rpc/exec_sql", post(exec_sql))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").expect("TcpListener::bind");
        let address = listener.local_addr().expect("local_addr");
        let server = axum::Server::from_tcp(listener)
            .expect("axum::Server::from_tcp")
            .serve(router.into_make_service());
        tokio::spawn(server);

        Self { address, requests }
    }

    /// The project URL clients should use.
    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("lock").clone()
    }
}

/// Every statement succeeds.
pub fn always_ok(_query: &str) -> (StatusCode, String) {
    (StatusCode::OK, String::new())
}

/// The function is not defined on the project.
pub fn not_found(_query: &str) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        r#"{"message":"Could not find the function public.exec_sql(query)"}"#.to_string(),
    )
}

/// Index creation reports that the index exists already; the rest succeed.
pub fn indexes_exist(query: &str) -> (StatusCode, String) {
    if query.starts_with("CREATE INDEX") {
        (
            StatusCode::BAD_REQUEST,
            r#"{"message":"relation already exists"}"#.to_string(),
        )
    } else {
        always_ok(query)
    }
}

async fn exec_sql(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    let query = body["query"].as_str().unwrap_or_default().to_string();

    state.requests.lock().expect("lock").push(RecordedRequest {
        query: query.clone(),
        authorization: header("authorization"),
        apikey: header("apikey"),
    });

    (state.responder)(&query)
}
