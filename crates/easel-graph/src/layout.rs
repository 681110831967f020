//! Deterministic canvas placement.
//!
//! Positions are a pure function of list index so that projecting the same
//! agent twice yields byte-identical layers. Knowledge bases and tools stack
//! in a shared column right of the agent; sub-tools hang right of their
//! parent tool.

use crate::node::Position;

/// Fixed position of the chat entry node
pub const CHAT_ENTRY: Position = Position { x: 80.0, y: 300.0 };

/// Fixed position of the agent root node
pub const AGENT: Position = Position { x: 400.0, y: 300.0 };

const ATTACHMENT_COLUMN_X: f64 = 760.0;
const KNOWLEDGE_START_Y: f64 = 80.0;
const TOOL_START_Y: f64 = 460.0;
const ROW_STEP: f64 = 130.0;

const SUB_TOOL_X_OFFSET: f64 = 300.0;
const SUB_TOOL_Y_STEP: f64 = 90.0;

/// Position of the `index`-th knowledge base node
pub fn knowledge(index: usize) -> Position {
    Position {
        x: ATTACHMENT_COLUMN_X,
        y: row(KNOWLEDGE_START_Y, index),
    }
}

/// Position of the `index`-th tool node
pub fn tool(index: usize) -> Position {
    Position {
        x: ATTACHMENT_COLUMN_X,
        y: row(TOOL_START_Y, index),
    }
}

/// Position of the `index`-th sub-tool under a parent tool node
///
/// Fixed horizontal offset from the parent, stacked vertically by index.
pub fn sub_tool(parent: Position, index: usize) -> Position {
    Position {
        x: parent.x + SUB_TOOL_X_OFFSET,
        y: parent.y + SUB_TOOL_Y_STEP * index_as_f64(index),
    }
}

fn row(start: f64, index: usize) -> f64 {
    start + ROW_STEP * index_as_f64(index)
}

#[allow(clippy::cast_precision_loss)]
fn index_as_f64(index: usize) -> f64 {
    index as f64
}
