//! MCP sub-tool discovery: fan out over uninspected servers, fan in one batch

use std::sync::Arc;

use easel_core::ToolType;
use easel_graph::{EdgeId, GraphLayer, GraphNode, NodeKind, Position, layout};
use futures::future::join_all;

use crate::session::Session;

/// An MCP tool awaiting inspection
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryCandidate {
    /// Tool whose server would be probed
    pub tool_id: i64,
    /// Server URL from the base-layer node; absent means the pass skips it
    pub server_url: Option<String>,
    /// Parent node position, the anchor its sub-tools stack from
    pub anchor: Position,
}

/// One failed MCP server inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionFailure {
    /// Tool whose server failed
    pub tool: i64,
    /// Error shown to the user
    pub message: String,
}

/// What one discovery pass did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// Tool ids whose server answered with a sub-tool list
    pub inspected: Vec<i64>,
    /// Per-tool failures, isolated from their siblings
    pub failures: Vec<InspectionFailure>,
    /// Tool ids skipped for lack of a server URL; they stay candidates
    pub skipped: Vec<i64>,
    /// Nodes the fan-in merge appended
    pub nodes_added: usize,
    /// Edges the fan-in merge appended
    pub edges_added: usize,
}

impl Session {
    /// Base-layer MCP tools not yet inspected this session
    pub fn discovery_candidates(&self) -> Vec<DiscoveryCandidate> {
        self.graph
            .base()
            .nodes
            .iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Tool {
                    tool_id,
                    tool_type: ToolType::Mcp,
                    server_url,
                    ..
                } if !self.inspected.contains(tool_id) => Some(DiscoveryCandidate {
                    tool_id: *tool_id,
                    server_url: server_url.clone(),
                    anchor: node.position,
                }),
                _ => None,
            })
            .collect()
    }

    /// Run one discovery pass over uninspected MCP tools
    ///
    /// Inspections fan out concurrently and are joined before the graph
    /// changes, so each pass lands as a single batch. A failing server is
    /// confined to its own report entry and still counts as inspected;
    /// siblings proceed. A tool without a server URL is skipped and stays a
    /// candidate for the next pass. An empty candidate set is the fixed
    /// point: the pass does nothing.
    pub async fn discover(&mut self) -> DiscoveryReport {
        let candidates = self.discovery_candidates();
        if candidates.is_empty() {
            return DiscoveryReport::default();
        }

        let mut report = DiscoveryReport::default();
        let mut inspections = Vec::new();
        for candidate in candidates {
            let DiscoveryCandidate {
                tool_id,
                server_url,
                anchor,
            } = candidate;
            if let Some(url) = server_url {
                let inspector = Arc::clone(&self.inspector);
                inspections.push(async move { (tool_id, anchor, inspector.inspect(&url).await) });
            } else {
                tracing::warn!(tool = tool_id, "MCP tool has no server URL, skipping");
                report.skipped.push(tool_id);
            }
        }

        let mut batch = GraphLayer::default();
        for (tool, anchor, outcome) in join_all(inspections).await {
            match outcome {
                Ok(sub_tools) => {
                    for (index, sub) in sub_tools.iter().enumerate() {
                        batch.nodes.push(GraphNode::sub_tool(
                            tool,
                            sub.name.as_str(),
                            layout::sub_tool(anchor, index),
                        ));
                        batch.edges.push(EdgeId::ToolToSubTool {
                            tool,
                            name: sub.name.clone(),
                        });
                    }
                    report.inspected.push(tool);
                }
                Err(e) => {
                    tracing::warn!(tool, error = %e, "MCP inspection failed");
                    report.failures.push(InspectionFailure {
                        tool,
                        message: e.to_string(),
                    });
                }
            }
            self.inspected.insert(tool);
        }

        let stats = self.graph.merge_discovery(batch);
        report.nodes_added = stats.nodes_added;
        report.edges_added = stats.edges_added;
        tracing::info!(
            inspected = report.inspected.len(),
            failed = report.failures.len(),
            skipped = report.skipped.len(),
            nodes_added = report.nodes_added,
            "discovery pass complete"
        );
        report
    }
}
