#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod client;
pub mod types;

pub use client::PlatformClient;
pub use types::{InspectRequest, InspectResponse};
