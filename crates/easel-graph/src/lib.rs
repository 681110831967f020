#![allow(clippy::must_use_candidate)]

//! In-memory canvas graph for the agent builder.
//!
//! The graph is an explicit two-layer structure: a *base* layer that is a
//! pure projection of the server-held agent, and an *overlay* layer holding
//! sub-tools discovered by MCP inspection. Composition is base-then-overlay;
//! the merge rules keep the two disjoint.

pub mod id;
pub mod layer;
pub mod layout;
pub mod node;
pub mod project;

pub use id::{EdgeId, IdParseError, NodeId};
pub use layer::{CanvasGraph, GraphLayer, MergeStats};
pub use node::{GraphNode, NodeKind, Position};
pub use project::project;
