//! Stream store client.

use std::sync::Arc;

use tracing::info;

use crate::append::{append_to_stream, AppendOptions, AppendOutcome};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::event::EventData;
use crate::executor::StreamExecutor;
use crate::expectation::StreamState;

/// Client for appending to streams through a [`StreamExecutor`].
///
/// Cheap to clone; clones share the executor.
#[derive(Clone)]
pub struct StreamsClient {
    executor: Arc<dyn StreamExecutor>,
    defaults: AppendOptions,
}

impl StreamsClient {
    /// Create a client with no default deadline.
    pub fn new(executor: Arc<dyn StreamExecutor>) -> Self {
        Self {
            executor,
            defaults: AppendOptions::default(),
        }
    }

    /// Create a client whose appends default to the configured deadline.
    pub fn from_config(executor: Arc<dyn StreamExecutor>, config: &ClientConfig) -> Self {
        info!(
            connection = %config.connection_name,
            default_deadline_ms = ?config.default_deadline_ms,
            "Stream client created"
        );
        Self {
            executor,
            defaults: AppendOptions::from_config(config),
        }
    }

    /// Options applied by [`StreamsClient::append_to_stream`].
    pub fn default_options(&self) -> AppendOptions {
        self.defaults
    }

    /// Append using the client's default options.
    pub async fn append_to_stream(
        &self,
        stream_id: &str,
        expected: StreamState,
        events: Vec<EventData>,
    ) -> Result<AppendOutcome> {
        self.append_to_stream_with(stream_id, expected, events, &self.defaults)
            .await
    }

    /// Append with explicit per-call options.
    pub async fn append_to_stream_with(
        &self,
        stream_id: &str,
        expected: StreamState,
        events: Vec<EventData>,
        options: &AppendOptions,
    ) -> Result<AppendOutcome> {
        append_to_stream(self.executor.as_ref(), stream_id, expected, events, options).await
    }
}
