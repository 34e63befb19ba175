//! In-memory stream executor.
//!
//! Keeps every stream in a map and enforces expectations the same way a real
//! store does. Failure injection and artificial latency make it usable for
//! exercising the transport and deadline paths.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{StreamExecutor, WriteResult};
use crate::error::TransportError;
use crate::event::EventData;
use crate::expectation::{check_expectation, CurrentRevision, ExpectationCheck, ExpectedRevision};
use crate::position::StreamRevision;

/// An event as stored, with its assigned revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub stream_id: String,
    pub revision: StreamRevision,
    pub event: EventData,
}

/// Executor backed by in-process streams.
#[derive(Debug, Default)]
pub struct InMemoryStreamExecutor {
    streams: RwLock<HashMap<String, Vec<RecordedEvent>>>,
    fail_next: RwLock<Option<TransportError>>,
    latency: RwLock<Option<Duration>>,
}

impl InMemoryStreamExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next append with `error` before touching any stream.
    pub async fn set_fail_next(&self, error: TransportError) {
        *self.fail_next.write().await = Some(error);
    }

    /// Delay every append by `latency` before it is applied.
    pub async fn set_latency(&self, latency: Duration) {
        *self.latency.write().await = Some(latency);
    }

    /// Apply appends immediately again.
    pub async fn clear_latency(&self) {
        *self.latency.write().await = None;
    }

    /// Current head of `stream`.
    pub async fn current_revision(&self, stream: &str) -> Result<CurrentRevision, TransportError> {
        let streams = self.streams.read().await;
        head_of(streams.get(stream).map(Vec::as_slice).unwrap_or_default())
    }

    /// All events in `stream`, in revision order.
    pub async fn read_stream(&self, stream: &str) -> Vec<RecordedEvent> {
        self.streams
            .read()
            .await
            .get(stream)
            .cloned()
            .unwrap_or_default()
    }
}

fn head_of(events: &[RecordedEvent]) -> Result<CurrentRevision, TransportError> {
    match events.len() {
        0 => Ok(CurrentRevision::NoStream),
        len => revision_at(len - 1).map(CurrentRevision::Current),
    }
}

fn revision_at(index: usize) -> Result<StreamRevision, TransportError> {
    StreamRevision::new(index as u64).map_err(|e| TransportError::Protocol(e.to_string()))
}

#[async_trait]
impl StreamExecutor for InMemoryStreamExecutor {
    async fn append_to_stream(
        &self,
        stream: &str,
        expected: ExpectedRevision,
        events: Vec<EventData>,
        cancel: CancellationToken,
    ) -> Result<WriteResult, TransportError> {
        if let Some(error) = self.fail_next.write().await.take() {
            return Err(error);
        }

        let latency = *self.latency.read().await;
        if let Some(latency) = latency {
            tokio::select! {
                _ = cancel.cancelled() => return Err(TransportError::Cancelled),
                _ = tokio::time::sleep(latency) => {}
            }
        }
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled);
        }

        let mut streams = self.streams.write().await;
        let existing = streams.get(stream).map(Vec::as_slice).unwrap_or_default();
        let actual = head_of(existing)?;

        if let ExpectationCheck::Mismatch { expected, actual } = check_expectation(expected, actual) {
            debug!(stream = %stream, %expected, %actual, "Append rejected");
            return Ok(WriteResult::WrongExpectedVersion { expected, actual });
        }

        if events.is_empty() {
            return Ok(WriteResult::Success {
                next_expected_version: actual,
            });
        }

        let recorded = streams.entry(stream.to_string()).or_default();
        for event in events {
            let revision = revision_at(recorded.len())?;
            recorded.push(RecordedEvent {
                stream_id: stream.to_string(),
                revision,
                event,
            });
        }
        let next_expected_version = head_of(recorded)?;
        debug!(stream = %stream, %next_expected_version, "Append accepted");

        Ok(WriteResult::Success {
            next_expected_version,
        })
    }
}
