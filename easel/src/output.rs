//! Text and JSON renderings of the canvas graph

use easel_core::{Agent, KnowledgeBase, Tool};
use easel_engine::DiscoveryReport;
use easel_graph::{CanvasGraph, NodeId, NodeKind};
use serde::Serialize;

/// JSON document behind `show --json`
#[derive(Debug, Serialize)]
pub struct GraphDoc {
    pub agent: AgentDoc,
    pub nodes: Vec<NodeDoc>,
    pub edges: Vec<EdgeDoc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discovery: Option<ReportDoc>,
}

#[derive(Debug, Serialize)]
pub struct AgentDoc {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NodeDoc {
    pub id: String,
    pub kind: &'static str,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub layer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct EdgeDoc {
    pub id: String,
    pub source: String,
    pub target: String,
    pub layer: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReportDoc {
    pub inspected: Vec<i64>,
    pub skipped: Vec<i64>,
    pub failures: Vec<FailureDoc>,
    pub nodes_added: usize,
    pub edges_added: usize,
}

#[derive(Debug, Serialize)]
pub struct FailureDoc {
    pub tool: i64,
    pub message: String,
}

/// JSON document behind `catalog --json`
#[derive(Debug, Serialize)]
pub struct CatalogDoc {
    pub tools: Vec<Tool>,
    pub knowledge_bases: Vec<KnowledgeBase>,
}

impl GraphDoc {
    pub fn new(agent: &Agent, graph: &CanvasGraph, report: Option<&DiscoveryReport>) -> Self {
        let mut nodes = Vec::with_capacity(graph.node_count());
        let mut edges = Vec::with_capacity(graph.edge_count());

        for (layer, nodes_in_layer, edges_in_layer) in [
            ("base", &graph.base().nodes, &graph.base().edges),
            ("overlay", &graph.overlay().nodes, &graph.overlay().edges),
        ] {
            for node in nodes_in_layer {
                nodes.push(NodeDoc {
                    id: node.id().to_string(),
                    kind: kind_name(&node.kind),
                    label: node.label().to_owned(),
                    x: node.position.x,
                    y: node.position.y,
                    layer,
                });
            }
            for edge in edges_in_layer {
                edges.push(EdgeDoc {
                    id: edge.to_string(),
                    source: edge.source().to_string(),
                    target: edge.target().to_string(),
                    layer,
                });
            }
        }

        Self {
            agent: AgentDoc {
                id: agent.id,
                name: agent.name.clone(),
            },
            nodes,
            edges,
            discovery: report.map(ReportDoc::from),
        }
    }
}

impl From<&DiscoveryReport> for ReportDoc {
    fn from(report: &DiscoveryReport) -> Self {
        Self {
            inspected: report.inspected.clone(),
            skipped: report.skipped.clone(),
            failures: report
                .failures
                .iter()
                .map(|failure| FailureDoc {
                    tool: failure.tool,
                    message: failure.message.clone(),
                })
                .collect(),
            nodes_added: report.nodes_added,
            edges_added: report.edges_added,
        }
    }
}

const fn kind_name(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::Agent { .. } => "agent",
        NodeKind::ChatEntry => "chat-entry",
        NodeKind::Tool { .. } => "tool",
        NodeKind::Knowledge { .. } => "knowledge",
        NodeKind::McpSubTool { .. } => "mcp-sub-tool",
    }
}

/// Text rendering of the composed graph, grouped by palette section.
pub fn print_graph(agent: &Agent, graph: &CanvasGraph) {
    println!("{} (agent {})", agent.name, agent.id);
    println!("  chat entry");

    let knowledge: Vec<_> = graph
        .base()
        .nodes
        .iter()
        .filter_map(|node| match &node.kind {
            NodeKind::Knowledge { kb_id, label } => Some((*kb_id, label.as_str())),
            _ => None,
        })
        .collect();
    if !knowledge.is_empty() {
        println!("knowledge:");
        for (kb_id, label) in knowledge {
            println!("  {label} ({})", NodeId::Knowledge(kb_id));
        }
    }

    let tools: Vec<_> = graph
        .base()
        .nodes
        .iter()
        .filter_map(|node| match &node.kind {
            NodeKind::Tool {
                tool_id,
                label,
                tool_type,
                ..
            } => Some((*tool_id, label.as_str(), *tool_type)),
            _ => None,
        })
        .collect();
    if !tools.is_empty() {
        println!("tools:");
        for (tool_id, label, tool_type) in tools {
            println!("  {label} ({}) [{tool_type}]", NodeId::Tool(tool_id));
            for name in sub_tool_names(graph, tool_id) {
                println!("    - {name}");
            }
        }
    }

    println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
}

fn sub_tool_names(graph: &CanvasGraph, parent: i64) -> impl Iterator<Item = &str> {
    graph.overlay().nodes.iter().filter_map(move |node| match &node.kind {
        NodeKind::McpSubTool { tool_id, name } if *tool_id == parent => Some(name.as_str()),
        _ => None,
    })
}

pub fn print_report(report: &DiscoveryReport) {
    println!(
        "discovery: {} inspected, {} failed, {} skipped, +{} nodes / +{} edges",
        report.inspected.len(),
        report.failures.len(),
        report.skipped.len(),
        report.nodes_added,
        report.edges_added
    );
    for failure in &report.failures {
        println!("  tool {} failed: {}", failure.tool, failure.message);
    }
    for tool in &report.skipped {
        println!("  tool {tool} skipped: no MCP server URL");
    }
}

pub fn print_catalog(tools: &[Tool], knowledge_bases: &[KnowledgeBase]) {
    println!("tools:");
    for tool in tools {
        match &tool.mcp_server_url {
            Some(url) => println!("  {}  {} [{}] {url}", tool.id, tool.name, tool.tool_type),
            None => println!("  {}  {} [{}]", tool.id, tool.name, tool.tool_type),
        }
    }
    println!("knowledge bases:");
    for kb in knowledge_bases {
        println!("  {}  {}", kb.id, kb.name);
    }
}
