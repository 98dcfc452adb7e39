//! Transport record types and encoder configuration.

use crate::error::Result;
use crate::types::Notification;
use std::time::SystemTime;

/// A flat, independently serializable document produced from a notification.
pub type FlatMap = serde_json::Map<String, serde_json::Value>;

/// Key in a [`FlatMap`] holding the embedded message timestamp.
pub const TIMESTAMP_FIELD: &str = "Timestamp";

/// Configuration for a message encoder.
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// Encoder name, used in log spans.
    /// Default: "elasticsearch"
    pub name: String,

    /// Topic every record is published to.
    pub topic: String,

    /// Pre-encoded partitioning key shared by every record.
    pub key: Vec<u8>,

    /// Dataset name handed to the document splitter.
    pub dataset: String,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            name: "elasticsearch".to_string(),
            topic: String::new(),
            key: Vec::new(),
            dataset: String::new(),
        }
    }
}

impl EncoderConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }
}

/// Delivery bookkeeping attached to each record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    /// When the source notification was produced.
    pub start_time: SystemTime,
    pub message_count: usize,
}

/// A unit handed to the publish pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportRecord {
    pub topic: String,
    pub key: Vec<u8>,
    /// JSON-encoded flat map.
    pub value: Vec<u8>,
    pub timestamp: SystemTime,
    pub metadata: Metadata,
}

/// Splits a notification into flat per-document maps.
///
/// Implemented for any `Fn(&str, &Notification) -> Result<Vec<FlatMap>>`.
pub trait DocumentSplitter {
    fn split(&self, dataset: &str, notification: &Notification) -> Result<Vec<FlatMap>>;
}

impl<F> DocumentSplitter for F
where
    F: Fn(&str, &Notification) -> Result<Vec<FlatMap>>,
{
    fn split(&self, dataset: &str, notification: &Notification) -> Result<Vec<FlatMap>> {
        self(dataset, notification)
    }
}
