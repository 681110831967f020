#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Shared vocabulary for the Easel workspace.
//!
//! Wire types mirror the platform's REST documents. The `AgentStore` and
//! `McpInspector` ports are the seams the synchronizer talks through, and
//! `PlatformError` is the error both surface.

pub mod error;
pub mod store;
pub mod types;

pub use error::PlatformError;
pub use store::{AgentStore, McpInspector};
pub use types::{Agent, AgentPatch, DropKind, DropPayload, KnowledgeBase, SubTool, Tool, ToolType};
