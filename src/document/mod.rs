//! Nested document mapping.
//!
//! A notification becomes a tree whose branches mirror path elements.
//! Updates and deletes are kept in parallel subtrees so a delete never
//! disturbs the values recorded for the same notification.

mod builder;
mod tree;

pub use builder::{notification_to_document, notification_to_json_document, EscapeFn};
pub use tree::{Document, Node, Tree};
