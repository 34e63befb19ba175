//! Client-side contract for an append-only event stream store.
//!
//! This crate provides checked stream revisions and an append operation with
//! optimistic concurrency and deadline enforcement. The physical protocol is
//! supplied by a [`StreamExecutor`] implementation.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//! use streamstore_client::{
//!     AppendOptions, AppendOutcome, EventData, InMemoryStreamExecutor, StreamState, StreamsClient,
//! };
//!
//! async fn example() -> streamstore_client::Result<()> {
//!     let client = StreamsClient::new(Arc::new(InMemoryStreamExecutor::new()));
//!     let event = EventData::json("CartCreated", &serde_json::json!({ "cart": "c-1" }))?;
//!
//!     let options = AppendOptions::new().timeout_after(Duration::from_secs(2));
//!     match client
//!         .append_to_stream_with("cart-c-1", StreamState::NoStream, vec![event], &options)
//!         .await?
//!     {
//!         AppendOutcome::Success { next_expected_version } => {
//!             println!("stream now at {next_expected_version}");
//!         }
//!         AppendOutcome::WrongExpectedVersion { expected, actual } => {
//!             println!("expected {expected}, stream is at {actual}");
//!         }
//!         // Unknown: the append may or may not have been applied.
//!         AppendOutcome::DeadlineExceeded => {}
//!         AppendOutcome::TransportFailure(cause) => eprintln!("append failed: {cause}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Revisions
//!
//! ```rust
//! use streamstore_client::{StreamPosition, StreamRevision};
//!
//! let revision = StreamRevision::new(41).unwrap();
//! assert_eq!(revision.next().unwrap().to_u64(), 42);
//! assert!(StreamRevision::new(1 << 63).is_err());
//! assert!(StreamRevision::from_stream_position(StreamPosition::End).is_err());
//! ```

pub mod append;
pub mod client;
pub mod config;
pub mod deadline;
pub mod error;
pub mod event;
pub mod executor;
pub mod expectation;
pub mod position;
pub mod utils;

// Re-export main types at crate root
pub use append::{append_to_stream, AppendOptions, AppendOutcome};
pub use client::StreamsClient;
pub use crate::config::ClientConfig;
pub use deadline::{run_with_deadline, Deadline, GateOutcome};
pub use error::{ClientError, Result, TransportError};
pub use event::EventData;
pub use executor::{InMemoryStreamExecutor, RecordedEvent, StreamExecutor, WriteResult};
pub use expectation::{
    check_expectation, CurrentRevision, ExpectationCheck, ExpectedRevision, StreamState,
};
pub use position::{add_to, subtract_from, PositionError, StreamPosition, StreamRevision, MAX_REVISION};
pub use utils::init_tracing;
