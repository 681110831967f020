use easel_core::SubTool;
use serde::{Deserialize, Serialize};

/// Body of `POST api/v1/mcp/inspect`
#[derive(Debug, Clone, Serialize)]
pub struct InspectRequest {
    /// MCP server to probe
    pub url: String,
}

/// Response of `POST api/v1/mcp/inspect`
#[derive(Debug, Clone, Deserialize)]
pub struct InspectResponse {
    /// Sub-tools the server exposes; absent means none
    #[serde(default)]
    pub tools: Vec<SubTool>,
}
