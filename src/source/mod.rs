//! Payload acquisition
//!
//! A payload comes either from the search endpoint or from a local JSON file.
//! Both adapters only fetch and parse; committing the result and rendering it
//! is left to [`App`](crate::app::App).

pub mod file;
pub mod network;

use crate::{data::payload::Payload, Result};
use async_trait::async_trait;

/// Anything that can produce one payload per call
#[async_trait]
pub trait PayloadSource: Send + Sync {
    /// Human-readable origin used in diagnostics
    fn describe(&self) -> String;

    /// Acquires and parses a payload. Nothing is retried.
    async fn fetch(&self) -> Result<Payload>;
}
