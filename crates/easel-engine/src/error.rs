use easel_core::PlatformError;
use easel_graph::{EdgeId, NodeId};
use thiserror::Error;

/// Session operation errors
#[derive(Debug, Error)]
pub enum EngineError {
    /// A platform call failed; the graph is unchanged
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Node id absent from the composed graph
    #[error("no such node: {0}")]
    UnknownNode(NodeId),

    /// Edge id absent from the composed graph
    #[error("no such edge: {0}")]
    UnknownEdge(EdgeId),
}
