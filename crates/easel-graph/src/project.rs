//! Projection of an agent snapshot into the base graph layer

use easel_core::Agent;

use crate::id::EdgeId;
use crate::layer::GraphLayer;
use crate::layout;
use crate::node::GraphNode;

/// Project an agent snapshot into a graph layer
///
/// Pure function of the agent's name and its attached knowledge bases and
/// tools. The two root nodes and the chat edge are always present; knowledge
/// bases and tools follow in array order so two identical snapshots always
/// project to the identical layer.
pub fn project(agent: &Agent) -> GraphLayer {
    let mut nodes = Vec::with_capacity(2 + agent.knowledge_bases.len() + agent.tools.len());
    let mut edges = Vec::with_capacity(1 + agent.knowledge_bases.len() + agent.tools.len());

    nodes.push(GraphNode::agent(&agent.name, layout::AGENT));
    nodes.push(GraphNode::chat_entry(layout::CHAT_ENTRY));
    edges.push(EdgeId::ChatToAgent);

    for (index, kb) in agent.knowledge_bases.iter().enumerate() {
        nodes.push(GraphNode::knowledge(kb, layout::knowledge(index)));
        edges.push(EdgeId::AgentToKnowledge(kb.id));
    }
    for (index, tool) in agent.tools.iter().enumerate() {
        nodes.push(GraphNode::tool(tool, layout::tool(index)));
        edges.push(EdgeId::AgentToTool(tool.id));
    }

    GraphLayer { nodes, edges }
}
