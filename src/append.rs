//! The append operation.
//!
//! One call runs `Pending -> Completed(outcome)` exactly once. Nothing here
//! retries; retry policy belongs to the executor.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::deadline::{run_with_deadline, GateOutcome};
use crate::error::{ClientError, Result, TransportError};
use crate::event::EventData;
use crate::executor::{StreamExecutor, WriteResult};
use crate::expectation::{CurrentRevision, ExpectedRevision, StreamState};
use crate::position::StreamRevision;

/// Per-call options for an append.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppendOptions {
    timeout: Option<Duration>,
}

impl AppendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abandon the call once `timeout` has elapsed. A zero timeout always expires.
    pub fn timeout_after(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Options seeded with the configured default deadline.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            timeout: config.default_deadline(),
        }
    }
}

/// Result of a single append call.
#[derive(Debug)]
pub enum AppendOutcome {
    /// The store accepted the append.
    Success {
        /// Revision of the last event in the stream, `NoStream` only for an
        /// empty append to a stream that does not exist.
        next_expected_version: CurrentRevision,
    },
    /// The caller's expectation did not hold. Nothing was written.
    WrongExpectedVersion {
        expected: StreamState,
        actual: CurrentRevision,
    },
    /// The deadline elapsed before the store answered.
    ///
    /// The outcome of the remote append is unknown: it may or may not have
    /// been applied.
    DeadlineExceeded,
    /// The executor failed for a reason other than a concurrency conflict.
    TransportFailure(TransportError),
}

impl AppendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AppendOutcome::Success { .. })
    }

    /// The new head revision, if the append succeeded and the stream exists.
    pub fn next_revision(&self) -> Option<StreamRevision> {
        match self {
            AppendOutcome::Success {
                next_expected_version,
            } => next_expected_version.revision(),
            _ => None,
        }
    }
}

fn validate(stream_id: &str, events: &[EventData]) -> Result<()> {
    if stream_id.trim().is_empty() {
        return Err(ClientError::InvalidArgument(
            "stream id must not be empty".to_string(),
        ));
    }
    if let Some(index) = events.iter().position(|e| e.event_type.is_empty()) {
        return Err(ClientError::InvalidArgument(format!(
            "event at index {index} has an empty event type"
        )));
    }
    Ok(())
}

/// Append `events` to `stream_id` through `executor`.
///
/// Invalid input is returned as `Err`. Every other result, including
/// concurrency conflicts, expired deadlines, and transport failures, is an
/// [`AppendOutcome`].
pub async fn append_to_stream(
    executor: &dyn StreamExecutor,
    stream_id: &str,
    expected: StreamState,
    events: Vec<EventData>,
    options: &AppendOptions,
) -> Result<AppendOutcome> {
    validate(stream_id, &events)?;

    let expected_revision = ExpectedRevision::from(expected);
    debug!(
        stream = %stream_id,
        expected = %expected,
        events = events.len(),
        timeout = ?options.timeout(),
        "Appending to stream"
    );

    let gated = run_with_deadline(options.timeout(), |cancel| {
        executor.append_to_stream(stream_id, expected_revision, events, cancel)
    })
    .await;

    let outcome = match gated {
        GateOutcome::Expired => AppendOutcome::DeadlineExceeded,
        GateOutcome::Completed(Ok(WriteResult::Success {
            next_expected_version,
        })) => {
            debug!(stream = %stream_id, %next_expected_version, "Append succeeded");
            AppendOutcome::Success {
                next_expected_version,
            }
        }
        GateOutcome::Completed(Ok(WriteResult::WrongExpectedVersion { actual, .. })) => {
            debug!(stream = %stream_id, %expected, %actual, "Wrong expected version");
            AppendOutcome::WrongExpectedVersion { expected, actual }
        }
        GateOutcome::Completed(Err(e)) if e.is_deadline_exceeded() => {
            warn!(stream = %stream_id, error = %e, "Store reported deadline exceeded");
            AppendOutcome::DeadlineExceeded
        }
        GateOutcome::Completed(Err(e)) => {
            warn!(stream = %stream_id, error = %e, "Append transport failure");
            AppendOutcome::TransportFailure(e)
        }
    };

    Ok(outcome)
}
