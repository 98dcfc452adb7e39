//! Packaging of notifications into transport records.

use crate::error::{MapperError, Result};
use crate::types::Response;

use super::timestamp::{split_timestamp, unix_time, SECONDS_DIGITS};
use super::types::{
    DocumentSplitter, EncoderConfig, FlatMap, Metadata, TransportRecord, TIMESTAMP_FIELD,
};
use std::time::SystemTime;

/// Turns update responses into transport records.
///
/// Holds no mutable state, so one encoder can serve many threads.
pub struct MessageEncoder<S> {
    config: EncoderConfig,
    splitter: S,
}

impl<S: DocumentSplitter> MessageEncoder<S> {
    pub fn new(config: EncoderConfig, splitter: S) -> Self {
        Self { config, splitter }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Encode one response into a record per flat document.
    ///
    /// Only update responses carry documents. Each record's timestamp comes
    /// from the document's embedded `Timestamp` field when it splits
    /// cleanly, and from the system clock otherwise.
    pub fn encode(&self, response: &Response) -> Result<Vec<TransportRecord>> {
        let notification = match response {
            Response::Update(notification) => notification,
            Response::Empty => return Err(MapperError::MissingUpdatePayload),
            other => {
                return Err(MapperError::UnhandledMessageKind {
                    kind: other.kind().to_string(),
                })
            }
        };

        let _span = tracing::trace_span!("encode", encoder = %self.config.name).entered();

        let maps = self.splitter.split(&self.config.dataset, notification)?;
        let start_time = unix_time(0, notification.timestamp);

        let mut records = Vec::with_capacity(maps.len());
        for map in &maps {
            let value = serde_json::to_vec(map)?;
            tracing::trace!(document = %String::from_utf8_lossy(&value), "serialized document");

            records.push(TransportRecord {
                topic: self.config.topic.clone(),
                key: self.config.key.clone(),
                value,
                timestamp: record_timestamp(map),
                metadata: Metadata {
                    start_time,
                    message_count: 1,
                },
            });
        }
        Ok(records)
    }
}

/// Embedded message time if present and splittable, else the system clock.
fn record_timestamp(map: &FlatMap) -> SystemTime {
    let Some(field) = map.get(TIMESTAMP_FIELD) else {
        tracing::trace!("using system time for timestamp");
        return SystemTime::now();
    };
    let Some(raw) = field.as_u64() else {
        tracing::debug!(%field, "embedded timestamp is not an unsigned integer");
        return SystemTime::now();
    };
    match split_timestamp(raw, SECONDS_DIGITS) {
        Ok((seconds, nanoseconds)) => {
            tracing::trace!(seconds, nanoseconds, "using message embedded time for timestamp");
            unix_time(seconds, nanoseconds)
        }
        Err(e) => {
            tracing::debug!(error = %e, raw, "using system time for timestamp");
            SystemTime::now()
        }
    }
}
