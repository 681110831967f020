use std::fmt;
use std::str::FromStr;

/// Node identifier, structured
///
/// The canvas historically encoded identity in strings like `tools-7` and
/// recovered the entity id by splitting on `-`. Here the variant is the
/// identity; the string form survives only as the `Display`/`FromStr`
/// encoding used on the CLI and in rendered output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeId {
    /// The fixed agent root node
    Agent,
    /// The fixed chat entry node
    ChatEntry,
    /// A tool attached to the agent
    Tool(i64),
    /// A knowledge base attached to the agent
    Knowledge(i64),
    /// A sub-tool discovered on an MCP tool's server
    McpSubTool {
        /// Parent tool id
        tool: i64,
        /// Sub-tool name as reported by the server
        name: String,
    },
}

const AGENT_NODE: &str = "agent-node";
const CHAT_MESSAGE_NODE: &str = "chat-message-node";
const TOOL_NODE_PREFIX: &str = "tools-";
const KNOWLEDGE_NODE_PREFIX: &str = "knowledge-";
const SUB_TOOL_NODE_PREFIX: &str = "mcp-sub-tool-";

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent => f.write_str(AGENT_NODE),
            Self::ChatEntry => f.write_str(CHAT_MESSAGE_NODE),
            Self::Tool(id) => write!(f, "{TOOL_NODE_PREFIX}{id}"),
            Self::Knowledge(id) => write!(f, "{KNOWLEDGE_NODE_PREFIX}{id}"),
            Self::McpSubTool { tool, name } => write!(f, "{SUB_TOOL_NODE_PREFIX}{tool}-{name}"),
        }
    }
}

impl FromStr for NodeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == AGENT_NODE {
            return Ok(Self::Agent);
        }
        if s == CHAT_MESSAGE_NODE {
            return Ok(Self::ChatEntry);
        }
        // Checked before the `tools-` prefix would ever matter: the two do
        // not overlap, but sub-tool ids also embed a free-form name.
        if let Some(rest) = s.strip_prefix(SUB_TOOL_NODE_PREFIX) {
            let (tool, name) = split_scoped(rest, s)?;
            return Ok(Self::McpSubTool { tool, name });
        }
        if let Some(rest) = s.strip_prefix(TOOL_NODE_PREFIX) {
            return Ok(Self::Tool(parse_entity_id(rest, s)?));
        }
        if let Some(rest) = s.strip_prefix(KNOWLEDGE_NODE_PREFIX) {
            return Ok(Self::Knowledge(parse_entity_id(rest, s)?));
        }

        Err(IdParseError::Unrecognized(s.to_owned()))
    }
}

/// Edge identifier, structured
///
/// Every valid edge in the canvas is fully determined by its id: the source
/// and target are derived, never stored. That makes the shape invariants
/// ("every tool node hangs off the agent node", "every sub-tool hangs off
/// its parent tool") impossible to violate by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EdgeId {
    /// `chat-message-node → agent-node`, always present
    ChatToAgent,
    /// `agent-node → tools-{id}`
    AgentToTool(i64),
    /// `agent-node → knowledge-{id}`
    AgentToKnowledge(i64),
    /// `tools-{tool} → mcp-sub-tool-{tool}-{name}`
    ToolToSubTool {
        /// Parent tool id
        tool: i64,
        /// Sub-tool name
        name: String,
    },
}

const CHAT_AGENT_EDGE: &str = "chat-agent-edge";
const AGENT_TOOL_EDGE_PREFIX: &str = "agent-tool-edge-";
const AGENT_KB_EDGE_PREFIX: &str = "agent-kb-edge-";
const SUB_TOOL_EDGE_PREFIX: &str = "edge-mcp-sub-";

impl EdgeId {
    /// Node this edge leaves from
    pub fn source(&self) -> NodeId {
        match self {
            Self::ChatToAgent => NodeId::ChatEntry,
            Self::AgentToTool(_) | Self::AgentToKnowledge(_) => NodeId::Agent,
            Self::ToolToSubTool { tool, .. } => NodeId::Tool(*tool),
        }
    }

    /// Node this edge points at
    pub fn target(&self) -> NodeId {
        match self {
            Self::ChatToAgent => NodeId::Agent,
            Self::AgentToTool(id) => NodeId::Tool(*id),
            Self::AgentToKnowledge(id) => NodeId::Knowledge(*id),
            Self::ToolToSubTool { tool, name } => NodeId::McpSubTool {
                tool: *tool,
                name: name.clone(),
            },
        }
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChatToAgent => f.write_str(CHAT_AGENT_EDGE),
            Self::AgentToTool(id) => write!(f, "{AGENT_TOOL_EDGE_PREFIX}{id}"),
            Self::AgentToKnowledge(id) => write!(f, "{AGENT_KB_EDGE_PREFIX}{id}"),
            Self::ToolToSubTool { tool, name } => write!(f, "{SUB_TOOL_EDGE_PREFIX}{tool}-{name}"),
        }
    }
}

impl FromStr for EdgeId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == CHAT_AGENT_EDGE {
            return Ok(Self::ChatToAgent);
        }
        if let Some(rest) = s.strip_prefix(AGENT_TOOL_EDGE_PREFIX) {
            return Ok(Self::AgentToTool(parse_entity_id(rest, s)?));
        }
        if let Some(rest) = s.strip_prefix(AGENT_KB_EDGE_PREFIX) {
            return Ok(Self::AgentToKnowledge(parse_entity_id(rest, s)?));
        }
        if let Some(rest) = s.strip_prefix(SUB_TOOL_EDGE_PREFIX) {
            let (tool, name) = split_scoped(rest, s)?;
            return Ok(Self::ToolToSubTool { tool, name });
        }

        Err(IdParseError::Unrecognized(s.to_owned()))
    }
}

/// Failure to parse a wire-form identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    /// No known prefix matched
    #[error("unrecognized identifier: {0}")]
    Unrecognized(String),
    /// Prefix matched but the remainder was not `{entity}-{name}`
    #[error("malformed identifier: {0}")]
    Malformed(String),
    /// The entity id portion was not an integer
    #[error("invalid entity id in identifier: {0}")]
    EntityId(String),
}

fn parse_entity_id(digits: &str, whole: &str) -> Result<i64, IdParseError> {
    digits
        .parse()
        .map_err(|_| IdParseError::EntityId(whole.to_owned()))
}

/// Split `{tool}-{name}` where the name itself may contain `-`
fn split_scoped(rest: &str, whole: &str) -> Result<(i64, String), IdParseError> {
    let (tool, name) = rest
        .split_once('-')
        .ok_or_else(|| IdParseError::Malformed(whole.to_owned()))?;
    if name.is_empty() {
        return Err(IdParseError::Malformed(whole.to_owned()));
    }
    Ok((parse_entity_id(tool, whole)?, name.to_owned()))
}
