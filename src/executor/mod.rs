//! Stream operation executor interface.
//!
//! The executor owns the physical protocol: connections, retries, and cluster
//! routing. The append operation only depends on this trait.
//!
//! Implementations:
//! - `InMemoryStreamExecutor`: in-process streams for tests and local development

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TransportError;
use crate::event::EventData;
use crate::expectation::{CurrentRevision, ExpectedRevision};

pub mod memory;

pub use memory::{InMemoryStreamExecutor, RecordedEvent};

/// Store response to an append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// The store accepted the append.
    Success {
        /// Revision of the last event in the stream after the append.
        next_expected_version: CurrentRevision,
    },
    /// The expectation did not hold; nothing was written.
    WrongExpectedVersion {
        expected: ExpectedRevision,
        actual: CurrentRevision,
    },
}

/// Capability to execute stream operations against a store.
#[async_trait]
pub trait StreamExecutor: Send + Sync {
    /// Append `events` to `stream` if `expected` holds.
    ///
    /// Implementations should observe `cancel` and stop promptly once it fires.
    /// Concurrency conflicts are `Ok(WriteResult::WrongExpectedVersion)`, not errors.
    async fn append_to_stream(
        &self,
        stream: &str,
        expected: ExpectedRevision,
        events: Vec<EventData>,
        cancel: CancellationToken,
    ) -> Result<WriteResult, TransportError>;
}
