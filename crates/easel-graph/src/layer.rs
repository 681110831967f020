use easel_core::Agent;

use crate::id::{EdgeId, NodeId};
use crate::node::GraphNode;
use crate::project::project;

/// One ordered set of nodes and edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphLayer {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<EdgeId>,
}

impl GraphLayer {
    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.iter().any(|n| n.id() == *id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains(id)
    }

    pub fn find_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id() == *id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

/// Counts of what a discovery merge actually appended
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub nodes_added: usize,
    pub edges_added: usize,
}

/// The canvas graph: a base layer projected from the agent plus an additive
/// overlay of discovered sub-tools
///
/// The base is replaced wholesale whenever the agent snapshot changes (the
/// server is the source of truth; the graph is a derived view). The overlay
/// only ever grows between rebuilds, and a rebuild clears it. Merging keeps
/// the layers disjoint by id, so composition is plain concatenation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasGraph {
    base: GraphLayer,
    overlay: GraphLayer,
}

impl CanvasGraph {
    /// Build the graph for an agent snapshot
    pub fn from_agent(agent: &Agent) -> Self {
        Self {
            base: project(agent),
            overlay: GraphLayer::default(),
        }
    }

    /// Replace the base layer from a fresh agent snapshot and drop the
    /// overlay
    pub fn rebuild(&mut self, agent: &Agent) {
        self.base = project(agent);
        self.overlay.clear();
    }

    pub fn base(&self) -> &GraphLayer {
        &self.base
    }

    pub fn overlay(&self) -> &GraphLayer {
        &self.overlay
    }

    /// All nodes, base first, then overlay
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.base.nodes.iter().chain(self.overlay.nodes.iter())
    }

    /// All edges, base first, then overlay
    pub fn edges(&self) -> impl Iterator<Item = &EdgeId> {
        self.base.edges.iter().chain(self.overlay.edges.iter())
    }

    pub fn node_count(&self) -> usize {
        self.base.nodes.len() + self.overlay.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.base.edges.len() + self.overlay.edges.len()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.base.contains_node(id) || self.overlay.contains_node(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.base.contains_edge(id) || self.overlay.contains_edge(id)
    }

    pub fn find_node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.base.find_node(id).or_else(|| self.overlay.find_node(id))
    }

    /// Append a discovery batch to the overlay, skipping anything whose id
    /// is already present in either layer or earlier in the batch
    ///
    /// This is the duplicate-safe union that makes re-running discovery for
    /// the same sub-tool list a no-op.
    pub fn merge_discovery(&mut self, batch: GraphLayer) -> MergeStats {
        let mut stats = MergeStats::default();

        for node in batch.nodes {
            if !self.contains_node(&node.id()) {
                self.overlay.nodes.push(node);
                stats.nodes_added += 1;
            }
        }
        for edge in batch.edges {
            if !self.contains_edge(&edge) {
                self.overlay.edges.push(edge);
                stats.edges_added += 1;
            }
        }

        stats
    }

    /// Remove a discovered sub-tool and its connecting edge from the overlay
    ///
    /// Node and edge go together: a sub-tool without its edge (or the
    /// reverse) would break the one-edge-per-sub-tool shape invariant.
    /// Returns false when no such sub-tool exists.
    pub fn strip_sub_tool(&mut self, tool: i64, name: &str) -> bool {
        let id = NodeId::McpSubTool {
            tool,
            name: name.to_owned(),
        };
        if !self.overlay.contains_node(&id) {
            return false;
        }

        self.overlay.nodes.retain(|n| n.id() != id);
        self.overlay
            .edges
            .retain(|e| !matches!(e, EdgeId::ToolToSubTool { tool: t, name: n } if *t == tool && n == name));
        true
    }
}
