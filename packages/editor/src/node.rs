//! # Document Nodes
//!
//! A resume is a forest of typed, nestable nodes. Every node carries:
//! - a permanent `uuid`, assigned once at creation
//! - a `type` discriminator that selects toolbar behavior
//! - a `data` map of named fields whose shape depends on the type
//! - ordered `children`
//! - a `hidden` flag (soft, reversible removal)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Permanent, structure-independent node identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeUuid(Uuid);

impl NodeUuid {
    /// Allocate a fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NodeUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for NodeUuid {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for NodeUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for NodeUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Value stored under a field name in a node's data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
    Map(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Merge `incoming` into `self`.
    ///
    /// Nested maps merge key by key; any other combination replaces the
    /// current value. Merging the same value twice is a no-op.
    pub fn merge(&mut self, incoming: FieldValue) {
        match (self, incoming) {
            (FieldValue::Map(current), FieldValue::Map(incoming)) => {
                for (key, value) in incoming {
                    match current.get_mut(&key) {
                        Some(existing) => existing.merge(value),
                        None => {
                            current.insert(key, value);
                        }
                    }
                }
            }
            (slot, incoming) => *slot = incoming,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// Field name → value
pub type NodeData = BTreeMap<String, FieldValue>;

/// A node in the document tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    uuid: NodeUuid,
    pub node_type: String,
    pub data: NodeData,
    pub children: Vec<Node>,
    pub hidden: bool,
}

impl Node {
    /// Create a node with a fresh uuid and no data
    pub fn new(node_type: impl Into<String>) -> Self {
        Self::with_uuid(NodeUuid::new(), node_type)
    }

    /// Create a node with a known uuid (used when loading records)
    pub fn with_uuid(uuid: NodeUuid, node_type: impl Into<String>) -> Self {
        Self {
            uuid,
            node_type: node_type.into(),
            data: NodeData::new(),
            children: Vec::new(),
            hidden: false,
        }
    }

    pub fn uuid(&self) -> NodeUuid {
        self.uuid
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.data.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(FieldValue::as_text)
    }

    /// Visit this node and every descendant, depth first
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in &self.children {
            child.walk(f);
        }
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// Blueprint for a node that does not exist yet.
///
/// Structural-add operations carry a template rather than a `Node` so that
/// the uuid is only assigned when the add is applied. Replaying the same
/// template twice yields two distinct nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub data: NodeData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeTemplate>,
}

impl NodeTemplate {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            data: NodeData::new(),
            children: Vec::new(),
        }
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: NodeTemplate) -> Self {
        self.children.push(child);
        self
    }

    /// Build a concrete node, assigning fresh uuids throughout
    pub fn instantiate(&self) -> Node {
        Node {
            uuid: NodeUuid::new(),
            node_type: self.node_type.clone(),
            data: self.data.clone(),
            children: self.children.iter().map(NodeTemplate::instantiate).collect(),
            hidden: false,
        }
    }
}
