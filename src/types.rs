//! Core types for telemetry notifications.

use std::fmt;

/// Ordered sequence of path elements identifying a node in a data tree.
///
/// Two paths are equal only when their element sequences match exactly.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(pub Vec<String>);

impl Path {
    pub fn new(elements: Vec<String>) -> Self {
        Path(elements)
    }

    pub fn elements(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Elements joined with `/`, without a leading separator.
    pub fn join(&self) -> String {
        self.0.join("/")
    }

    /// True if `prefix` matches the leading elements of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// A new path with `other`'s elements appended to this one.
    pub fn concat(&self, other: &Path) -> Path {
        let mut elements = Vec::with_capacity(self.len() + other.len());
        elements.extend_from_slice(&self.0);
        elements.extend_from_slice(&other.0);
        Path(elements)
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Path {
    fn from(elements: [S; N]) -> Self {
        Path(elements.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Path {
    fn from(elements: Vec<String>) -> Self {
        Path(elements)
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Path(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({:?})", self.0)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.join())
    }
}

/// Declared encoding of an update's payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Json,
    Bytes,
    Proto,
    /// A tag this crate does not know about.
    Unknown(i32),
}

/// An opaque payload tagged with its encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedValue {
    pub value_type: ValueType,
    pub payload: Vec<u8>,
}

impl TypedValue {
    /// A JSON-encoded payload.
    pub fn json(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            value_type: ValueType::Json,
            payload: payload.into(),
        }
    }

    /// A raw byte payload, passed through untouched.
    pub fn bytes(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            value_type: ValueType::Bytes,
            payload: payload.into(),
        }
    }
}

/// A value written at a path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub path: Path,
    pub value: TypedValue,
}

impl Update {
    pub fn new(path: impl Into<Path>, value: TypedValue) -> Self {
        Self {
            path: path.into(),
            value,
        }
    }
}

/// One telemetry event emitted by a network element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notification {
    /// Nanoseconds since Unix epoch.
    pub timestamp: i64,

    /// Path shared by every update and delete.
    pub prefix: Option<Path>,

    /// Updates in emission order.
    pub updates: Vec<Update>,

    /// Deleted paths in emission order.
    pub deletes: Vec<Path>,
}

impl Notification {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<Path>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_update(mut self, update: Update) -> Self {
        self.updates.push(update);
        self
    }

    pub fn with_delete(mut self, path: impl Into<Path>) -> Self {
        self.deletes.push(path.into());
        self
    }
}

/// A response from the telemetry stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Update(Notification),
    /// Heartbeat interval in nanoseconds.
    Heartbeat(i64),
    SyncResponse(bool),
    /// No variant was set on the wire.
    Empty,
}

impl Response {
    /// Short name of the variant, used in errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Update(_) => "update",
            Response::Heartbeat(_) => "heartbeat",
            Response::SyncResponse(_) => "syncResponse",
            Response::Empty => "empty",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_join_and_display() {
        let path = Path::from(["interfaces", "eth0", "counters"]);
        assert_eq!(path.join(), "interfaces/eth0/counters");
        assert_eq!(path.to_string(), "/interfaces/eth0/counters");
        assert_eq!(Path::default().to_string(), "/");
    }

    #[test]
    fn test_path_equality_is_elementwise() {
        // Same joined text, different elements.
        let a = Path::from(["a/b"]);
        let b = Path::from(["a", "b"]);
        assert_eq!(a.join(), b.join());
        assert_ne!(a, b);
    }

    #[test]
    fn test_path_prefix_and_concat() {
        let prefix = Path::from(["system"]);
        let full = prefix.concat(&Path::from(["config", "hostname"]));
        assert_eq!(full, Path::from(["system", "config", "hostname"]));
        assert!(full.starts_with(&prefix));
        assert!(!prefix.starts_with(&full));
    }

    #[test]
    fn test_notification_builder() {
        let notif = Notification::new(42)
            .with_prefix(["a"])
            .with_update(Update::new(["b"], TypedValue::json("1")))
            .with_delete(["c"]);

        assert_eq!(notif.timestamp, 42);
        assert_eq!(notif.prefix, Some(Path::from(["a"])));
        assert_eq!(notif.updates.len(), 1);
        assert_eq!(notif.deletes, vec![Path::from(["c"])]);
    }
}
