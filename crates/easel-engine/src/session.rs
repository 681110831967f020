use std::collections::HashSet;
use std::sync::Arc;

use easel_core::{Agent, AgentPatch, AgentStore, DropKind, DropPayload, McpInspector};
use easel_graph::{CanvasGraph, EdgeId, NodeId};

use crate::error::EngineError;

/// Result of a drop-to-add gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Membership persisted and the graph rebuilt from the refetched agent
    Saved,
    /// Component already on the canvas; nothing was sent
    Duplicate,
}

/// Result of a node or edge removal gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetachOutcome {
    /// Membership persisted and the graph rebuilt from the refetched agent
    Saved,
    /// Discovered sub-tool stripped from the overlay; nothing to persist
    RemovedLocally,
    /// Fixed roots and their edge cannot be removed
    Protected,
}

/// One editing session over a single agent's canvas
///
/// The session exclusively owns its graph. Every persisted mutation follows
/// the same cycle: one single-field PUT, then a refetch that rebuilds the
/// base layer. Nothing is applied optimistically, so a failed call leaves
/// the graph exactly as it was.
pub struct Session {
    pub(crate) agent_id: i64,
    pub(crate) store: Arc<dyn AgentStore>,
    pub(crate) inspector: Arc<dyn McpInspector>,
    pub(crate) agent: Agent,
    pub(crate) graph: CanvasGraph,
    /// Tool ids whose inspection reached a terminal state this session
    pub(crate) inspected: HashSet<i64>,
}

impl Session {
    /// Open a session: fetch the agent and project its base layer
    pub async fn open(
        store: Arc<dyn AgentStore>,
        inspector: Arc<dyn McpInspector>,
        agent_id: i64,
    ) -> Result<Self, EngineError> {
        let agent = store.fetch_agent(agent_id).await?;
        let graph = CanvasGraph::from_agent(&agent);
        tracing::debug!(
            agent = agent_id,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "session opened"
        );
        Ok(Self {
            agent_id,
            store,
            inspector,
            agent,
            graph,
            inspected: HashSet::new(),
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn graph(&self) -> &CanvasGraph {
        &self.graph
    }

    /// Tool ids already inspected in this session
    pub fn inspected(&self) -> &HashSet<i64> {
        &self.inspected
    }

    /// Refetch the agent and rebuild the base layer
    ///
    /// The overlay goes with the stale base. Inspected ids are kept for the
    /// session lifetime, so refreshed MCP tools are not probed again until
    /// a new session opens.
    pub async fn refresh(&mut self) -> Result<(), EngineError> {
        self.agent = self.store.fetch_agent(self.agent_id).await?;
        self.graph.rebuild(&self.agent);
        Ok(())
    }

    /// Reconcile a palette drop into persisted membership
    ///
    /// Duplicates short-circuit before any network call. Otherwise the
    /// gesture becomes one single-field PUT followed by refetch + rebuild;
    /// the dropped component appears only through that rebuild.
    pub async fn attach(&mut self, payload: &DropPayload) -> Result<AttachOutcome, EngineError> {
        let node_id = match payload.node_type {
            DropKind::Tools => NodeId::Tool(payload.id),
            DropKind::Knowledge => NodeId::Knowledge(payload.id),
        };
        if self.graph.contains_node(&node_id) {
            tracing::warn!(node = %node_id, label = %payload.label, "component already on canvas");
            return Ok(AttachOutcome::Duplicate);
        }

        let patch = match payload.node_type {
            DropKind::Tools => {
                AgentPatch::tools(with_member(self.agent.effective_tool_ids(), payload.id))
            }
            DropKind::Knowledge => AgentPatch::knowledge_bases(with_member(
                self.agent.effective_knowledge_base_ids(),
                payload.id,
            )),
        };
        self.persist(patch).await?;
        Ok(AttachOutcome::Saved)
    }

    /// Remove a node from the canvas
    pub async fn detach_node(&mut self, id: &NodeId) -> Result<DetachOutcome, EngineError> {
        if !self.graph.contains_node(id) {
            return Err(EngineError::UnknownNode(id.clone()));
        }
        match id {
            NodeId::Agent | NodeId::ChatEntry => Ok(DetachOutcome::Protected),
            NodeId::Tool(tool) => self.detach_tool(*tool).await,
            NodeId::Knowledge(kb) => self.detach_knowledge(*kb).await,
            NodeId::McpSubTool { tool, name } => {
                self.graph.strip_sub_tool(*tool, name);
                Ok(DetachOutcome::RemovedLocally)
            }
        }
    }

    /// Remove an edge from the canvas
    ///
    /// Severing a membership edge means the same thing as deleting the node
    /// it leads to; both paths persist the identical id list.
    pub async fn detach_edge(&mut self, id: &EdgeId) -> Result<DetachOutcome, EngineError> {
        if !self.graph.contains_edge(id) {
            return Err(EngineError::UnknownEdge(id.clone()));
        }
        match id {
            EdgeId::ChatToAgent => Ok(DetachOutcome::Protected),
            EdgeId::AgentToTool(tool) => self.detach_tool(*tool).await,
            EdgeId::AgentToKnowledge(kb) => self.detach_knowledge(*kb).await,
            EdgeId::ToolToSubTool { tool, name } => {
                self.graph.strip_sub_tool(*tool, name);
                Ok(DetachOutcome::RemovedLocally)
            }
        }
    }

    async fn detach_tool(&mut self, tool: i64) -> Result<DetachOutcome, EngineError> {
        let ids = without_member(self.agent.effective_tool_ids(), tool);
        self.persist(AgentPatch::tools(ids)).await?;
        Ok(DetachOutcome::Saved)
    }

    async fn detach_knowledge(&mut self, kb: i64) -> Result<DetachOutcome, EngineError> {
        let ids = without_member(self.agent.effective_knowledge_base_ids(), kb);
        self.persist(AgentPatch::knowledge_bases(ids)).await?;
        Ok(DetachOutcome::Saved)
    }

    /// One persisted mutation: a single-field PUT followed by a refresh
    ///
    /// The PUT response body is discarded; the refetch is the only source
    /// of post-mutation state.
    async fn persist(&mut self, patch: AgentPatch) -> Result<(), EngineError> {
        tracing::debug!(
            agent = self.agent_id,
            field = patch.field_name(),
            "persisting membership"
        );
        self.store.update_agent(self.agent_id, &patch).await?;
        self.refresh().await
    }
}

/// Membership plus one id, order preserved, no duplicate
fn with_member(mut ids: Vec<i64>, id: i64) -> Vec<i64> {
    if !ids.contains(&id) {
        ids.push(id);
    }
    ids
}

/// Membership minus one id, order preserved
fn without_member(mut ids: Vec<i64>, id: i64) -> Vec<i64> {
    ids.retain(|existing| *existing != id);
    ids
}
