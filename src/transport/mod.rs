//! Transport packaging for the publish pipeline.
//!
//! An update response is split into flat documents by an injected
//! [`DocumentSplitter`]; each document becomes one [`TransportRecord`]
//! stamped with the time embedded in the document, or the system clock
//! when that time cannot be recovered.
//!
//! # Example
//!
//! ```ignore
//! let config = EncoderConfig::default()
//!     .with_topic("telemetry")
//!     .with_dataset("lab");
//! let encoder = MessageEncoder::new(config, |dataset: &str, notif: &Notification| {
//!     my_flattener(dataset, notif)
//! });
//!
//! for record in encoder.encode(&response)? {
//!     producer.send(record)?;
//! }
//! ```

mod encoder;
mod timestamp;
mod types;

pub use encoder::MessageEncoder;
pub use timestamp::{split_timestamp, unix_time, SECONDS_DIGITS};
pub use types::{
    DocumentSplitter, EncoderConfig, FlatMap, Metadata, TransportRecord, TIMESTAMP_FIELD,
};
