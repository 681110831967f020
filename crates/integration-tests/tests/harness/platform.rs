//! Mock engagement platform for end-to-end tests
//!
//! Serves a single agent plus the palette catalogs and records every
//! request so tests can assert on wire traffic. Membership updates are
//! applied the way the platform applies them.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use easel_client::PlatformClient;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A running mock platform instance
pub struct MockPlatform {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<PlatformState>,
}

/// Builder seeded with the agent document the mock serves
pub struct PlatformBuilder {
    agent: serde_json::Value,
    tools: Vec<serde_json::Value>,
    knowledge_bases: Vec<serde_json::Value>,
    inspections: HashMap<String, InspectResult>,
    fail_updates: bool,
}

enum InspectResult {
    SubTools(Vec<String>),
    Fail(String),
}

struct PlatformState {
    agent: Mutex<serde_json::Value>,
    tools: Vec<serde_json::Value>,
    knowledge_bases: Vec<serde_json::Value>,
    inspections: HashMap<String, InspectResult>,
    fail_updates: bool,
    agent_fetches: AtomicU32,
    update_bodies: Mutex<Vec<serde_json::Value>>,
    inspect_calls: Mutex<Vec<String>>,
}

impl MockPlatform {
    /// Start building a mock around one agent document
    ///
    /// The tool and knowledge-base catalogs start out holding exactly the
    /// entries already attached to the agent; extend them with the builder
    /// before dropping anything new.
    pub fn for_agent(agent: serde_json::Value) -> PlatformBuilder {
        let tools = array_field(&agent, "tools");
        let knowledge_bases = array_field(&agent, "knowledge_bases");
        PlatformBuilder {
            agent,
            tools,
            knowledge_bases,
            inspections: HashMap::new(),
            fail_updates: false,
        }
    }

    /// Base URL for pointing a client at the mock
    ///
    /// Ends with `/` so joining `api/v1/...` paths keeps the authority intact.
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// A client wired to this mock, unauthenticated
    pub fn client(&self) -> PlatformClient {
        let base_url = Url::parse(&self.base_url()).expect("valid URL");
        PlatformClient::new(base_url, None, Duration::from_secs(5)).expect("client builds")
    }

    /// Number of agent snapshot fetches served
    pub fn agent_fetches(&self) -> u32 {
        self.state.agent_fetches.load(Ordering::Relaxed)
    }

    /// Raw bodies of every `PUT` update received, in order
    pub fn update_bodies(&self) -> Vec<serde_json::Value> {
        self.state.update_bodies.lock().unwrap().clone()
    }

    /// Server URLs probed through the inspect endpoint, in arrival order
    pub fn inspect_calls(&self) -> Vec<String> {
        self.state.inspect_calls.lock().unwrap().clone()
    }
}

impl Drop for MockPlatform {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

impl PlatformBuilder {
    /// Add a tool to the catalog without attaching it to the agent
    pub fn tool_in_catalog(mut self, tool: serde_json::Value) -> Self {
        self.tools.push(tool);
        self
    }

    /// Add a knowledge base to the catalog without attaching it
    pub fn knowledge_base_in_catalog(mut self, kb: serde_json::Value) -> Self {
        self.knowledge_bases.push(kb);
        self
    }

    /// Program an MCP server to answer with the given sub-tool names
    pub fn inspection(mut self, url: &str, sub_tools: &[&str]) -> Self {
        let names = sub_tools.iter().map(|&name| name.to_owned()).collect();
        self.inspections.insert(url.to_owned(), InspectResult::SubTools(names));
        self
    }

    /// Program an MCP server to fail with the given message
    pub fn failing_inspection(mut self, url: &str, message: &str) -> Self {
        self.inspections
            .insert(url.to_owned(), InspectResult::Fail(message.to_owned()));
        self
    }

    /// Reject every update with a 500 instead of applying it
    pub fn rejecting_updates(mut self) -> Self {
        self.fail_updates = true;
        self
    }

    /// Bind a random port and start serving
    pub async fn start(self) -> anyhow::Result<MockPlatform> {
        let state = Arc::new(PlatformState {
            agent: Mutex::new(self.agent),
            tools: self.tools,
            knowledge_bases: self.knowledge_bases,
            inspections: self.inspections,
            fail_updates: self.fail_updates,
            agent_fetches: AtomicU32::new(0),
            update_bodies: Mutex::new(Vec::new()),
            inspect_calls: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route(
                "/api/v1/agents/{id}",
                routing::get(fetch_agent).put(update_agent),
            )
            .route("/api/v1/mcp/inspect", routing::post(inspect_server))
            .route("/api/v1/tools", routing::get(list_tools))
            .route("/api/v1/knowledge-bases", routing::get(list_knowledge_bases))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(MockPlatform { addr, shutdown, state })
    }
}

// -- Handlers --

async fn fetch_agent(
    State(state): State<Arc<PlatformState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state.agent_fetches.fetch_add(1, Ordering::Relaxed);

    let agent = state.agent.lock().unwrap().clone();
    if agent.get("id").and_then(serde_json::Value::as_i64) == Some(id) {
        Json(agent).into_response()
    } else {
        (StatusCode::NOT_FOUND, "agent not found".to_owned()).into_response()
    }
}

async fn update_agent(
    State(state): State<Arc<PlatformState>>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    state.update_bodies.lock().unwrap().push(body.clone());

    if state.fail_updates {
        return (StatusCode::INTERNAL_SERVER_ERROR, "update rejected".to_owned()).into_response();
    }

    let mut agent = state.agent.lock().unwrap();
    if agent.get("id").and_then(serde_json::Value::as_i64) != Some(id) {
        return (StatusCode::NOT_FOUND, "agent not found".to_owned()).into_response();
    }

    // Apply the membership list and re-expand the matching object array,
    // the same shape the platform echoes back.
    if let Some(ids) = body.get("tool_ids") {
        agent["tool_ids"] = ids.clone();
        agent["tools"] = expand_catalog(&state.tools, ids);
    }
    if let Some(ids) = body.get("knowledge_base_ids") {
        agent["knowledge_base_ids"] = ids.clone();
        agent["knowledge_bases"] = expand_catalog(&state.knowledge_bases, ids);
    }

    Json(agent.clone()).into_response()
}

async fn inspect_server(
    State(state): State<Arc<PlatformState>>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let url = body
        .get("url")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    state.inspect_calls.lock().unwrap().push(url.clone());

    match state.inspections.get(&url) {
        Some(InspectResult::SubTools(names)) => {
            let tools: Vec<serde_json::Value> = names
                .iter()
                .map(|name| serde_json::json!({ "name": name }))
                .collect();
            Json(serde_json::json!({ "tools": tools })).into_response()
        }
        Some(InspectResult::Fail(message)) => {
            (StatusCode::BAD_GATEWAY, message.clone()).into_response()
        }
        None => Json(serde_json::json!({ "tools": [] })).into_response(),
    }
}

async fn list_tools(State(state): State<Arc<PlatformState>>) -> impl IntoResponse {
    Json(serde_json::Value::Array(state.tools.clone()))
}

async fn list_knowledge_bases(State(state): State<Arc<PlatformState>>) -> impl IntoResponse {
    Json(serde_json::Value::Array(state.knowledge_bases.clone()))
}

fn expand_catalog(catalog: &[serde_json::Value], ids: &serde_json::Value) -> serde_json::Value {
    let wanted: Vec<i64> = ids
        .as_array()
        .map(|ids| ids.iter().filter_map(serde_json::Value::as_i64).collect())
        .unwrap_or_default();

    let entries: Vec<serde_json::Value> = wanted
        .iter()
        .filter_map(|id| {
            catalog
                .iter()
                .find(|entry| entry.get("id").and_then(serde_json::Value::as_i64) == Some(*id))
                .cloned()
        })
        .collect();
    serde_json::Value::Array(entries)
}

fn array_field(agent: &serde_json::Value, field: &str) -> Vec<serde_json::Value> {
    agent
        .get(field)
        .and_then(serde_json::Value::as_array)
        .cloned()
        .unwrap_or_default()
}
