use easel_core::{KnowledgeBase, Tool, ToolType};

use crate::id::NodeId;

/// 2D canvas position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Variant-specific node payload
///
/// The node's identity is derived from this, so a node can never disagree
/// with its own id.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The agent root, labeled with the agent name
    Agent { label: String },
    /// The fixed chat entry point
    ChatEntry,
    /// An attached tool
    Tool {
        tool_id: i64,
        label: String,
        tool_type: ToolType,
        server_url: Option<String>,
    },
    /// An attached knowledge base
    Knowledge { kb_id: i64, label: String },
    /// A sub-tool discovered by MCP inspection
    McpSubTool { tool_id: i64, name: String },
}

/// A positioned node on the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub position: Position,
    pub kind: NodeKind,
}

impl GraphNode {
    pub fn agent(label: impl Into<String>, position: Position) -> Self {
        Self {
            position,
            kind: NodeKind::Agent {
                label: label.into(),
            },
        }
    }

    pub fn chat_entry(position: Position) -> Self {
        Self {
            position,
            kind: NodeKind::ChatEntry,
        }
    }

    pub fn tool(tool: &Tool, position: Position) -> Self {
        Self {
            position,
            kind: NodeKind::Tool {
                tool_id: tool.id,
                label: tool.name.clone(),
                tool_type: tool.tool_type,
                server_url: tool.mcp_server_url.clone(),
            },
        }
    }

    pub fn knowledge(kb: &KnowledgeBase, position: Position) -> Self {
        Self {
            position,
            kind: NodeKind::Knowledge {
                kb_id: kb.id,
                label: kb.name.clone(),
            },
        }
    }

    pub fn sub_tool(tool_id: i64, name: impl Into<String>, position: Position) -> Self {
        Self {
            position,
            kind: NodeKind::McpSubTool {
                tool_id,
                name: name.into(),
            },
        }
    }

    /// Identity of this node
    pub fn id(&self) -> NodeId {
        match &self.kind {
            NodeKind::Agent { .. } => NodeId::Agent,
            NodeKind::ChatEntry => NodeId::ChatEntry,
            NodeKind::Tool { tool_id, .. } => NodeId::Tool(*tool_id),
            NodeKind::Knowledge { kb_id, .. } => NodeId::Knowledge(*kb_id),
            NodeKind::McpSubTool { tool_id, name } => NodeId::McpSubTool {
                tool: *tool_id,
                name: name.clone(),
            },
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Agent { label }
            | NodeKind::Tool { label, .. }
            | NodeKind::Knowledge { label, .. } => label,
            NodeKind::ChatEntry => "Chat entry",
            NodeKind::McpSubTool { name, .. } => name,
        }
    }

    /// Whether the node is one of the two fixed roots
    ///
    /// Fixed roots are never deletable and always survive a rebuild.
    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, NodeKind::Agent { .. } | NodeKind::ChatEntry)
    }
}
