#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod discovery;
pub mod error;
pub mod session;

pub use discovery::{DiscoveryCandidate, DiscoveryReport, InspectionFailure};
pub use error::EngineError;
pub use session::{AttachOutcome, DetachOutcome, Session};

#[cfg(test)]
mod testing;
