//! Integration test harness for Fashion Assistant.
//!
//! Each test starts its own stub search service and its own copy of the web
//! app, both on ephemeral ports, and drives the app with a cookie-enabled
//! `reqwest` client so the session persists across requests.
//!
//! ```rust,ignore
//! let app = TestApp::spawn().await;
//! app.skip_onboarding().await;
//! app.search("red dress").await;
//! assert_eq!(app.stub.requests()[0].query, "red dress");
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use fashion_assistant_web::{app, config::AssistantConfig, state::AppState};
use reqwest::Client;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

/// A search request as received by the stub service.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// Decoded `q` query parameter.
    pub query: String,
    /// Parsed JSON body.
    pub body: Value,
    pub content_type: Option<String>,
}

/// How the stub answers.
#[derive(Debug, Clone)]
pub enum StubMode {
    /// Respond 200 with these products.
    Products(Vec<Value>),
    /// Respond 500.
    Fail,
}

#[derive(Clone)]
struct StubState {
    requests: Arc<Mutex<Vec<RecordedSearch>>>,
    mode: Arc<Mutex<StubMode>>,
}

/// Stand-in for the product search service.
pub struct StubSearchService {
    pub addr: SocketAddr,
    state: StubState,
}

impl StubSearchService {
    /// Start the stub on an ephemeral port, answering with `products`.
    pub async fn spawn(products: Vec<Value>) -> Self {
        let state = StubState {
            requests: Arc::new(Mutex::new(Vec::new())),
            mode: Arc::new(Mutex::new(StubMode::Products(products))),
        };

        let router = Router::new()
            .route("/products/search", post(stub_search))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub search service");
        let addr = listener.local_addr().expect("Failed to read stub address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Stub search service failed");
        });

        Self { addr, state }
    }

    /// Base URL to configure the app with.
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Invalid stub URL")
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedSearch> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Change how later requests are answered.
    pub fn set_mode(&self, mode: StubMode) {
        *self
            .state
            .mode
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = mode;
    }
}

async fn stub_search(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(RecordedSearch {
            query: params.get("q").cloned().unwrap_or_default(),
            body,
            content_type: headers
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });

    let mode = state
        .mode
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    match mode {
        StubMode::Products(products) => Json(products).into_response(),
        StubMode::Fail => (StatusCode::INTERNAL_SERVER_ERROR, "search exploded").into_response(),
    }
}

/// A product as the search service would return it.
pub fn product(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "average_rating": 4.2,
        "rating_number": 87,
        "description": null,
        "details": null,
        "imageUrls": [format!("https://img.example.com/{id}.jpg")],
        "price": "39.99",
        "store": "Example Store",
        "createdAt": "2024-01-01T00:00:00Z",
        "modifiedAt": "2024-01-02T00:00:00Z",
        "similarity": 0.91
    })
}

/// A running app plus the client and stub it talks to.
pub struct TestApp {
    pub base_url: String,
    pub client: Client,
    pub stub: StubSearchService,
}

impl TestApp {
    /// Start a stub with no products and an app pointed at it.
    pub async fn spawn() -> Self {
        Self::spawn_with_products(Vec::new()).await
    }

    /// Start a stub answering with `products` and an app pointed at it.
    pub async fn spawn_with_products(products: Vec<Value>) -> Self {
        let stub = StubSearchService::spawn(products).await;
        let search_api_url = stub.base_url();
        Self::start(stub, search_api_url).await
    }

    /// Start an app pointed at `search_api_url` instead of the stub.
    ///
    /// The stub is still started but receives nothing.
    pub async fn spawn_with_search_url(search_api_url: Url) -> Self {
        let stub = StubSearchService::spawn(Vec::new()).await;
        Self::start(stub, search_api_url).await
    }

    async fn start(stub: StubSearchService, search_api_url: Url) -> Self {
        let config = AssistantConfig {
            search_api_url,
            ..AssistantConfig::default()
        };
        let router = app(AppState::new(config));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind app");
        let addr = listener.local_addr().expect("Failed to read app address");

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("App failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: new_client(),
            stub,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`, following redirects.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed")
    }

    /// POST a form to `path`, following redirects.
    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Skip every onboarding question.
    pub async fn skip_onboarding(&self) {
        for _ in 0..3 {
            let resp = self.post_form("/onboarding/skip", &[]).await;
            assert!(resp.status().is_success(), "skip failed: {}", resp.status());
        }
    }

    /// Submit the search form and return the rendered search page.
    pub async fn search(&self, query: &str) -> String {
        let resp = self.post_form("/search", &[("q", query)]).await;
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        resp.text().await.expect("Failed to read search page")
    }

    /// Current preferences via the JSON API.
    pub async fn preferences(&self) -> Value {
        self.get("/api/preferences")
            .await
            .json()
            .await
            .expect("Invalid preferences JSON")
    }

    /// Merge `update` into the preferences via the JSON API.
    pub async fn patch_preferences(&self, update: Value) -> Value {
        self.client
            .patch(self.url("/api/preferences"))
            .json(&update)
            .send()
            .await
            .expect("PATCH failed")
            .json()
            .await
            .expect("Invalid preferences JSON")
    }
}

/// A client with its own cookie jar.
pub fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// URL of a local port with nothing listening on it.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to reserve a port");
    let addr = listener.local_addr().expect("Failed to read port");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("Invalid URL")
}
