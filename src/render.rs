//! Flattened JSON rendering of responses.
//!
//! Unlike the nested document, each update is keyed by its full joined
//! path and no key escaping is applied.

use crate::error::{MapperError, Result};
use crate::types::{Notification, Response};
use crate::value::{decode_value, Value};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum FlatResponse {
    Notification(FlatNotification),
    Heartbeat(i64),
    SyncResponse(bool),
}

// Fields are declared in the order a sorted-key marshaller emits them.
#[derive(Serialize)]
struct FlatNotification {
    #[serde(skip_serializing_if = "Option::is_none")]
    deletes: Option<Vec<String>>,
    path: String,
    timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    updates: Option<BTreeMap<String, Value>>,
}

impl FlatNotification {
    fn from_notification(notif: &Notification) -> Result<Self> {
        let path = match &notif.prefix {
            Some(prefix) => prefix.to_string(),
            None => "/".to_string(),
        };

        let updates = if notif.updates.is_empty() {
            None
        } else {
            let mut updates = BTreeMap::new();
            for update in &notif.updates {
                updates.insert(update.path.join(), decode_value(&update.value, &update.path)?);
            }
            Some(updates)
        };

        let deletes = if notif.deletes.is_empty() {
            None
        } else {
            Some(notif.deletes.iter().map(|p| p.join()).collect())
        };

        Ok(Self {
            deletes,
            path,
            timestamp: notif.timestamp,
            updates,
        })
    }
}

/// Render a response as pretty-printed JSON with two-space indentation.
pub fn response_to_json(response: &Response) -> Result<String> {
    let flat = match response {
        Response::Update(notif) => {
            FlatResponse::Notification(FlatNotification::from_notification(notif)?)
        }
        Response::Heartbeat(interval) => FlatResponse::Heartbeat(*interval),
        Response::SyncResponse(done) => FlatResponse::SyncResponse(*done),
        Response::Empty => {
            return Err(MapperError::UnknownResponseVariant {
                kind: response.kind().to_string(),
            })
        }
    };
    Ok(serde_json::to_string_pretty(&flat)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TypedValue, Update};

    #[test]
    fn test_heartbeat() {
        let json = response_to_json(&Response::Heartbeat(30)).unwrap();
        assert_eq!(json, "{\n  \"heartbeat\": 30\n}");
    }

    #[test]
    fn test_sync_response() {
        let json = response_to_json(&Response::SyncResponse(true)).unwrap();
        assert_eq!(json, "{\n  \"syncResponse\": true\n}");
    }

    #[test]
    fn test_notification_without_prefix() {
        let notif = Notification::new(9).with_update(Update::new(["a", "b"], TypedValue::json("1")));
        let json = response_to_json(&Response::Update(notif)).unwrap();
        let expected = r#"{
  "notification": {
    "path": "/",
    "timestamp": 9,
    "updates": {
      "a/b": 1
    }
  }
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_empty_response_is_unknown() {
        assert!(matches!(
            response_to_json(&Response::Empty),
            Err(MapperError::UnknownResponseVariant { .. })
        ));
    }
}
