//! Nested document tree.

use crate::error::{MapperError, Result};
use crate::types::Path;
use crate::value::Value;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// Interior node created by walking a path.
    Branch(Tree),
    /// Decoded update value.
    Leaf(Value),
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Branch(tree) => tree.serialize(serializer),
            Node::Leaf(value) => value.serialize(serializer),
        }
    }
}

/// A mapping from escaped path elements to nodes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tree {
    children: BTreeMap<String, Node>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.children.get(key)
    }

    /// Child branch at `key`, if that child is a branch.
    pub fn branch(&self, key: &str) -> Option<&Tree> {
        match self.children.get(key) {
            Some(Node::Branch(tree)) => Some(tree),
            _ => None,
        }
    }

    /// Child value at `key`, if that child is a leaf.
    pub fn leaf(&self, key: &str) -> Option<&Value> {
        match self.children.get(key) {
            Some(Node::Leaf(value)) => Some(value),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Walk `elements`, creating missing branches, and return the last one.
    ///
    /// Fails if any element along the way already names a leaf. `path` is
    /// the full path being traversed, for error context.
    pub fn descend(
        &mut self,
        elements: &[String],
        path: &Path,
        escape: &dyn Fn(&str) -> String,
    ) -> Result<&mut Tree> {
        let mut node = self;
        for element in elements {
            let child = node
                .children
                .entry(escape(element))
                .or_insert_with(|| Node::Branch(Tree::new()));
            node = match child {
                Node::Branch(tree) => tree,
                Node::Leaf(_) => {
                    tracing::debug!(%element, %path, "path descends through a leaf");
                    return Err(MapperError::TypeConflict {
                        element: element.clone(),
                        path: path.clone(),
                    });
                }
            };
        }
        Ok(node)
    }

    /// Set the leaf at `key`, replacing any previous leaf there.
    ///
    /// Fails if `key` already names a branch.
    pub fn set_leaf(
        &mut self,
        key: String,
        value: Value,
        element: &str,
        path: &Path,
    ) -> Result<()> {
        if let Some(Node::Branch(_)) = self.children.get(&key) {
            tracing::debug!(%element, %path, "leaf would replace a branch");
            return Err(MapperError::TypeConflict {
                element: element.to_string(),
                path: path.clone(),
            });
        }
        self.children.insert(key, Node::Leaf(value));
        Ok(())
    }

    /// Greatest number of edges from this tree to any leaf value.
    pub fn depth(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                Node::Branch(tree) => 1 + tree.depth(),
                Node::Leaf(_) => 1,
            })
            .max()
            .unwrap_or(0)
    }
}

/// The nested rendering of one notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// The notification's timestamp, verbatim.
    pub timestamp: i64,
    pub update: Option<Tree>,
    pub delete: Option<Tree>,
}

impl Document {
    /// Convert into a `serde_json::Value`.
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let len = 1 + self.update.is_some() as usize + self.delete.is_some() as usize;
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(delete) = &self.delete {
            map.serialize_entry("delete", delete)?;
        }
        map.serialize_entry("timestamp", &self.timestamp)?;
        if let Some(update) = &self.update {
            map.serialize_entry("update", update)?;
        }
        map.end()
    }
}
