#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bloodaid_client::{
    ApiClient, ClientConfig, Identity, Session,
    models::{Blog, BlogStatus, DonationRequest, DonationStatus, Role, User, UserStatus},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// One request as the mock backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Default)]
struct Backend {
    // Canned replies per (method, path). The last reply of a queue is sticky.
    replies: HashMap<(String, String), VecDeque<(u16, Value)>>,
    seen: Vec<Recorded>,
}

type Shared = Arc<Mutex<Backend>>;

/// MockBackend
///
/// In-process stand-in for the REST backend, bound on a random local port.
#[derive(Clone)]
pub struct MockBackend {
    pub address: String,
    state: Shared,
}

impl MockBackend {
    /// Queues a reply. Repeated calls for the same route are answered in order.
    pub fn on(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body));
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().seen.clone()
    }

    pub fn hits(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_api_url(&self.address)
    }

    pub fn public_client(&self) -> ApiClient {
        ApiClient::public(&self.config()).expect("public client")
    }

    pub fn secure_client(&self, token: &str) -> ApiClient {
        ApiClient::secure(&self.config(), token).expect("secure client")
    }
}

async fn handle(State(state): State<Shared>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let recorded = Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        authorization: header("authorization"),
        request_id: header("x-request-id"),
        content_type: header("content-type"),
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    };

    let mut backend = state.lock().unwrap();
    let key = (recorded.method.clone(), recorded.path.clone());
    backend.seen.push(recorded);

    let reply = match backend.replies.get_mut(&key) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
    };
    let (status, body) = reply.unwrap_or((404, json!({ "message": "no such route" })));
    (StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
}

pub async fn spawn_backend() -> MockBackend {
    let state: Shared = Arc::new(Mutex::new(Backend::default()));
    let router = Router::new().fallback(handle).with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockBackend { address, state }
}

// --- Fixtures ---

pub fn session(email: &str, name: Option<&str>) -> Session {
    Session::new(
        Identity {
            email: email.to_string(),
            display_name: name.map(str::to_string),
            photo_url: Some("https://i.ibb.co/avatar.png".to_string()),
        },
        format!("token-for-{email}"),
    )
}

pub fn user(email: &str, name: &str, role: Role, status: Option<UserStatus>) -> User {
    User {
        id: Some(format!("u-{email}")),
        email: email.to_string(),
        name: name.to_string(),
        role,
        status,
        blood_group: "O+".to_string(),
        district: "Dhaka".to_string(),
        upazila: "Dhanmondi".to_string(),
        ..User::default()
    }
}

pub fn request(id: &str, recipient: &str, district: &str, status: DonationStatus) -> DonationRequest {
    DonationRequest {
        id: Some(id.to_string()),
        requester_name: "Rahim".to_string(),
        requester_email: "rahim@example.com".to_string(),
        recipient_name: recipient.to_string(),
        recipient_district: district.to_string(),
        recipient_upazila: "Sadar".to_string(),
        hospital_name: "City Hospital".to_string(),
        blood_group: "A+".to_string(),
        donation_date: "2026-10-20".to_string(),
        donation_time: "10:00".to_string(),
        donation_status: status,
        ..DonationRequest::default()
    }
}

pub fn blog(id: &str, title: &str, author_email: &str, status: BlogStatus) -> Blog {
    Blog {
        id: Some(id.to_string()),
        title: title.to_string(),
        author: "Karim".to_string(),
        author_email: author_email.to_string(),
        status,
        ..Blog::default()
    }
}

pub fn ack_modified() -> Value {
    json!({ "acknowledged": true, "matchedCount": 1, "modifiedCount": 1 })
}
