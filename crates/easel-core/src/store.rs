use async_trait::async_trait;

use crate::error::PlatformError;
use crate::types::{Agent, AgentPatch, KnowledgeBase, SubTool, Tool};

/// Read/write access to the platform's agent resource
///
/// The synchronizer never constructs HTTP requests itself; it drives one of
/// these. Production code plugs in the reqwest-backed platform client, tests
/// plug in recording fakes.
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Fetch the current agent configuration
    async fn fetch_agent(&self, agent_id: i64) -> Result<Agent, PlatformError>;

    /// Apply a partial update to the agent configuration
    ///
    /// The returned agent is the platform's post-update view. Callers that
    /// follow the mutation-then-refetch discipline ignore it and call
    /// [`fetch_agent`](Self::fetch_agent) again.
    async fn update_agent(&self, agent_id: i64, patch: &AgentPatch) -> Result<Agent, PlatformError>;

    /// List the tool palette
    async fn list_tools(&self) -> Result<Vec<Tool>, PlatformError>;

    /// List the knowledge-base palette
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBase>, PlatformError>;
}

/// Access to the platform's MCP inspection endpoint
#[async_trait]
pub trait McpInspector: Send + Sync {
    /// Ask the platform to inspect an MCP server and report its sub-tools
    async fn inspect(&self, url: &str) -> Result<Vec<SubTool>, PlatformError>;
}
