//! Events proposed for appending.

use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::error::Result;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_BINARY: &str = "application/octet-stream";

/// An event to append. Payloads are opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventData {
    pub id: Uuid,
    pub event_type: String,
    pub content_type: String,
    pub data: Bytes,
    pub metadata: Bytes,
}

impl EventData {
    /// Build an event whose payload is `payload` serialized as JSON.
    pub fn json<T: Serialize>(event_type: impl Into<String>, payload: &T) -> Result<Self> {
        let data = serde_json::to_vec(payload)?;
        Ok(Self::new(event_type, CONTENT_TYPE_JSON, data))
    }

    /// Build an event with an opaque binary payload.
    pub fn binary(event_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(event_type, CONTENT_TYPE_BINARY, data)
    }

    fn new(event_type: impl Into<String>, content_type: &str, data: impl Into<Bytes>) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            content_type: content_type.to_string(),
            data: data.into(),
            metadata: Bytes::new(),
        }
    }

    /// Use a caller-chosen event id instead of a random one.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_metadata(mut self, metadata: impl Into<Bytes>) -> Self {
        self.metadata = metadata.into();
        self
    }
}
