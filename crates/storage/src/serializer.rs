// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invertible byte encoding for history events.
//!
//! Single events are stored as JSON (they end up embedded in state rows and
//! must stay cheap to peek at); event batches are JSON compressed with zstd,
//! since buffered batches can hold an entire decision's worth of events.

use cascade_core::HistoryEvent;
use thiserror::Error;

/// Errors from encoding or decoding events
#[derive(Debug, Error)]
pub enum SerializationError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compression error: {0}")]
    Compression(#[from] std::io::Error),
}

/// Stateless event codec. Cheap to copy and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventSerializer;

impl EventSerializer {
    pub fn new() -> Self {
        Self
    }

    /// Encode a single event.
    pub fn serialize(&self, event: &HistoryEvent) -> Result<Vec<u8>, SerializationError> {
        Ok(serde_json::to_vec(event)?)
    }

    /// Decode a single event.
    pub fn deserialize(&self, data: &[u8]) -> Result<HistoryEvent, SerializationError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Encode an ordered batch of events as one compressed blob.
    pub fn serialize_batch(
        &self,
        events: &[HistoryEvent],
    ) -> Result<Vec<u8>, SerializationError> {
        let json = serde_json::to_vec(events)?;
        Ok(zstd::stream::encode_all(&json[..], 0)?)
    }

    /// Decode a batch previously encoded with [`Self::serialize_batch`].
    pub fn deserialize_batch(
        &self,
        data: &[u8],
    ) -> Result<Vec<HistoryEvent>, SerializationError> {
        let json = zstd::stream::decode_all(data)?;
        Ok(serde_json::from_slice(&json)?)
    }
}

#[cfg(test)]
#[path = "serializer_tests.rs"]
mod tests;
