//! # Telemetry Mapper
//!
//! Converts streaming telemetry notifications (ordered path/value updates
//! from a network element) into indexable documents and transport records.
//!
//! ## Core Concepts
//!
//! - **Documents**: Nested trees mirroring update and delete paths, with
//!   injectable key escaping
//! - **Flattened JSON**: A readable rendering keyed by joined paths
//! - **Transport records**: Serialized flat documents stamped with the time
//!   embedded in each document
//!
//! Every operation is a pure function of its inputs and safe to call from
//! many threads at once.
//!
//! ## Example
//!
//! ```ignore
//! use telemetry_mapper::{notification_to_document, Notification, TypedValue, Update};
//!
//! let notif = Notification::new(1_625_097_600_000_000_000)
//!     .with_prefix(["interfaces", "eth0"])
//!     .with_update(Update::new(["state", "mtu"], TypedValue::json("1500")));
//!
//! // Escape dots, which a document store would treat as field separators
//! let escape = |k: &str| k.replace('.', "_");
//! let doc = notification_to_document(&notif, Some(&escape))?;
//! ```

pub mod document;
pub mod error;
pub mod render;
pub mod transport;
pub mod types;
pub mod value;

// Re-exports
pub use document::{
    notification_to_document, notification_to_json_document, Document, EscapeFn, Node, Tree,
};
pub use error::{MapperError, Result};
pub use render::response_to_json;
pub use transport::{
    split_timestamp, unix_time, DocumentSplitter, EncoderConfig, FlatMap, MessageEncoder,
    Metadata, TransportRecord, SECONDS_DIGITS, TIMESTAMP_FIELD,
};
pub use types::*;
pub use value::{decode_value, Value};
