//! Notification to document mapping.

use super::tree::{Document, Tree};
use crate::error::Result;
use crate::types::Notification;
use crate::value::decode_value;

/// Key-sanitizing transform applied to every document key.
pub type EscapeFn<'a> = &'a dyn Fn(&str) -> String;

fn identity(key: &str) -> String {
    key.to_string()
}

/// Build the nested document for a notification.
///
/// Deletes and updates land in separate `delete` and `update` subtrees,
/// both anchored under the escaped prefix. Every key, including keys
/// inside decoded JSON objects, passes through `escape` (identity when
/// `None`). Updates are applied in order; a later update at the same path
/// replaces an earlier one.
pub fn notification_to_document(
    notification: &Notification,
    escape: Option<EscapeFn<'_>>,
) -> Result<Document> {
    let escape: EscapeFn<'_> = escape.unwrap_or(&identity);
    let prefix = notification.prefix.clone().unwrap_or_default();

    let delete = if notification.deletes.is_empty() {
        None
    } else {
        let mut root = Tree::new();
        let anchor = root.descend(prefix.elements(), &prefix, escape)?;
        for path in &notification.deletes {
            anchor.descend(path.elements(), path, escape)?;
        }
        Some(root)
    };

    let update = if notification.updates.is_empty() {
        None
    } else {
        let mut root = Tree::new();
        let anchor = root.descend(prefix.elements(), &prefix, escape)?;
        for update in &notification.updates {
            let path = &update.path;
            let Some((last, parents)) = path.elements().split_last() else {
                // An empty path has no leaf to hold the value.
                tracing::debug!("skipping update with empty path");
                continue;
            };
            let parent = anchor.descend(parents, path, escape)?;
            let value = decode_value(&update.value, path)?.escape_keys(escape);
            parent.set_leaf(escape(last), value, last, path)?;
        }
        Some(root)
    };

    Ok(Document {
        timestamp: notification.timestamp,
        update,
        delete,
    })
}

/// Build the document for a notification and serialize it as compact JSON.
pub fn notification_to_json_document(
    notification: &Notification,
    escape: Option<EscapeFn<'_>>,
) -> Result<Vec<u8>> {
    let document = notification_to_document(notification, escape)?;
    Ok(serde_json::to_vec(&document)?)
}
