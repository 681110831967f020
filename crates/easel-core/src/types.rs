use std::fmt;

use serde::{Deserialize, Serialize};

/// One agent's configuration as held by the platform
///
/// The synchronizer keeps a read replica of this; the platform copy is
/// authoritative. Arrays the platform omits deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Attached tools, expanded
    #[serde(default)]
    pub tools: Vec<Tool>,
    /// Attached knowledge bases, expanded
    #[serde(default)]
    pub knowledge_bases: Vec<KnowledgeBase>,
    /// Attached tool ids (join-table view of `tools`)
    #[serde(default)]
    pub tool_ids: Vec<i64>,
    /// Attached knowledge base ids (join-table view of `knowledge_bases`)
    #[serde(default)]
    pub knowledge_base_ids: Vec<i64>,
    /// Model provider, irrelevant to graph synchronization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Model name, irrelevant to graph synchronization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Agent {
    /// Tool membership used for mutation math
    ///
    /// The id list is authoritative; when the platform sends only the
    /// expanded objects, membership is derived from them instead.
    pub fn effective_tool_ids(&self) -> Vec<i64> {
        if self.tool_ids.is_empty() {
            self.tools.iter().map(|t| t.id).collect()
        } else {
            self.tool_ids.clone()
        }
    }

    /// Knowledge-base membership used for mutation math
    pub fn effective_knowledge_base_ids(&self) -> Vec<i64> {
        if self.knowledge_base_ids.is_empty() {
            self.knowledge_bases.iter().map(|kb| kb.id).collect()
        } else {
            self.knowledge_base_ids.clone()
        }
    }
}

/// A tool attachable to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Tool identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Tool kind
    pub tool_type: ToolType,
    /// MCP server URL, present only for `ToolType::Mcp`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_server_url: Option<String>,
}

/// Tool kinds the platform distinguishes
///
/// Unknown kinds fold into `Other` so new platform-side types never break
/// deserialization of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Tool backed by a remote MCP server
    Mcp,
    /// User-defined tool
    Custom,
    /// Anything else
    #[serde(other)]
    Other,
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mcp => f.write_str("mcp"),
            Self::Custom => f.write_str("custom"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// A knowledge base attachable to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBase {
    /// Knowledge base identifier
    pub id: i64,
    /// Display name
    pub name: String,
}

/// Partial agent update
///
/// Exactly one field is set per mutation: the synchronizer persists only
/// the membership list a gesture changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentPatch {
    /// Replacement tool membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_ids: Option<Vec<i64>>,
    /// Replacement knowledge-base membership
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base_ids: Option<Vec<i64>>,
}

impl AgentPatch {
    /// Patch replacing the tool membership
    pub fn tools(ids: Vec<i64>) -> Self {
        Self {
            tool_ids: Some(ids),
            knowledge_base_ids: None,
        }
    }

    /// Patch replacing the knowledge-base membership
    pub fn knowledge_bases(ids: Vec<i64>) -> Self {
        Self {
            tool_ids: None,
            knowledge_base_ids: Some(ids),
        }
    }

    /// Name of the field this patch carries, for logging
    pub fn field_name(&self) -> &'static str {
        if self.tool_ids.is_some() {
            "tool_ids"
        } else {
            "knowledge_base_ids"
        }
    }
}

/// Sub-tool reported by an MCP server inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTool {
    /// Sub-tool name as exposed by the MCP server
    pub name: String,
}

/// Component category a drop gesture can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropKind {
    /// Knowledge-base component
    Knowledge,
    /// Tool component
    Tools,
}

/// Drag-and-drop payload as encoded in browser transfer data
///
/// This is the one wire shape that never crosses the network; it travels
/// between the component palette and the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropPayload {
    /// Which palette section the component came from
    pub node_type: DropKind,
    /// Entity id of the dropped component
    pub id: i64,
    /// Display label
    pub label: String,
    /// Tool kind, present for tool drops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_type: Option<ToolType>,
    /// MCP server URL, present for MCP tool drops
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mcp_server_url: Option<String>,
}

impl DropPayload {
    /// Payload for a tool dragged off the palette
    pub fn from_tool(tool: &Tool) -> Self {
        Self {
            node_type: DropKind::Tools,
            id: tool.id,
            label: tool.name.clone(),
            tool_type: Some(tool.tool_type),
            mcp_server_url: tool.mcp_server_url.clone(),
        }
    }

    /// Payload for a knowledge base dragged off the palette
    pub fn from_knowledge_base(kb: &KnowledgeBase) -> Self {
        Self {
            node_type: DropKind::Knowledge,
            id: kb.id,
            label: kb.name.clone(),
            tool_type: None,
            mcp_server_url: None,
        }
    }
}
