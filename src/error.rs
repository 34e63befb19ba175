//! Error types for the stream store client.

use tonic::{Code, Status};

use crate::position::PositionError;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced synchronously to the caller.
///
/// Concurrency conflicts and expired deadlines are not errors: they are
/// [`AppendOutcome`](crate::AppendOutcome) variants.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Invalid argument provided by caller.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Revision construction, conversion, or arithmetic failed.
    #[error("position error: {0}")]
    Position(#[from] PositionError),

    /// Event payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ClientError {
    /// Returns the error message.
    pub fn message(&self) -> String {
        match self {
            ClientError::InvalidArgument(msg) => msg.clone(),
            ClientError::Position(e) => e.to_string(),
            ClientError::Serialization(e) => e.to_string(),
            ClientError::Config(e) => e.to_string(),
        }
    }

    /// Returns true if this is an "invalid argument" error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ClientError::InvalidArgument(_))
    }
}

/// Failures reported by a stream executor other than concurrency conflicts.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to reach the store.
    #[error("connection failed: {0}")]
    Connection(String),

    /// gRPC error from the server.
    #[error("grpc error: {0}")]
    Grpc(Box<Status>),

    /// The store answered with something the executor could not interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The executor observed cancellation and stopped.
    #[error("operation cancelled")]
    Cancelled,
}

impl From<Status> for TransportError {
    fn from(status: Status) -> Self {
        TransportError::Grpc(Box::new(status))
    }
}

impl TransportError {
    /// Returns the gRPC status code if this is a gRPC error.
    pub fn code(&self) -> Option<Code> {
        match self {
            TransportError::Grpc(s) => Some(s.code()),
            _ => None,
        }
    }

    /// Returns the underlying gRPC Status if this is a gRPC error.
    pub fn status(&self) -> Option<&Status> {
        match self {
            TransportError::Grpc(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if the server reported that the call's deadline elapsed.
    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self.code(), Some(Code::DeadlineExceeded))
    }

    /// Returns true if this is a connection-level failure.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, TransportError::Connection(_))
            || matches!(self.code(), Some(Code::Unavailable))
    }
}
