//! Plain nested records for loading and saving documents
//!
//! The on-disk shape mirrors the tree: ordered child lists plus the per-type
//! data fields. Uuids are optional on input; nodes without one get a fresh
//! uuid on load.

use crate::errors::EditorResult;
use crate::node::{Node, NodeData, NodeUuid};
use crate::store::NodeStore;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<NodeUuid>,

    #[serde(rename = "type")]
    pub node_type: String,

    #[serde(default)]
    pub data: NodeData,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeRecord>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl NodeRecord {
    pub fn into_node(self) -> Node {
        let mut node = Node::with_uuid(self.uuid.unwrap_or_default(), self.node_type);
        node.data = self.data;
        node.hidden = self.hidden;
        node.children = self.children.into_iter().map(NodeRecord::into_node).collect();
        node
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            uuid: Some(node.uuid()),
            node_type: node.node_type.clone(),
            data: node.data.clone(),
            children: node.children.iter().map(NodeRecord::from).collect(),
            hidden: node.hidden,
        }
    }
}

/// Whole-document record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

impl DocumentRecord {
    pub fn from_store(store: &NodeStore) -> Self {
        Self {
            nodes: store.roots().iter().map(NodeRecord::from).collect(),
        }
    }

    /// Build a store, rejecting records that reuse a uuid
    pub fn into_store(self) -> EditorResult<NodeStore> {
        NodeStore::from_roots(self.nodes.into_iter().map(NodeRecord::into_node).collect())
    }

    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> EditorResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn save(&self, path: &Path) -> EditorResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::NodeAddress;
    use crate::errors::EditorError;

    const RESUME: &str = r#"{
        "nodes": [
            {
                "type": "section",
                "data": { "title": "Experience" },
                "children": [
                    { "type": "entry", "data": { "title": "Engineer", "showDates": true } },
                    { "type": "entry", "data": { "title": "Intern" }, "hidden": true }
                ]
            },
            { "type": "skills", "data": { "skills": ["Rust", "SQL"] } }
        ]
    }"#;

    #[test]
    fn test_load_assigns_uuids() {
        let store = DocumentRecord::from_json(RESUME).unwrap().into_store().unwrap();
        assert_eq!(store.len(), 4);

        let intern = store.resolve(&NodeAddress::from([0, 1])).unwrap();
        assert!(intern.hidden);
        assert_eq!(intern.text("title"), Some("Intern"));
    }

    #[test]
    fn test_uuids_survive_save_and_load() {
        let store = DocumentRecord::from_json(RESUME).unwrap().into_store().unwrap();
        let json = DocumentRecord::from_store(&store).to_json().unwrap();
        let reloaded = DocumentRecord::from_json(&json).unwrap().into_store().unwrap();

        assert_eq!(store, reloaded);
    }

    #[test]
    fn test_duplicate_uuid_rejected() {
        let uuid = NodeUuid::new();
        let json = format!(
            r#"{{"nodes": [{{"uuid": "{0}", "type": "section"}}, {{"uuid": "{0}", "type": "section"}}]}}"#,
            uuid
        );
        let result = DocumentRecord::from_json(&json).unwrap().into_store();
        assert!(matches!(result, Err(EditorError::DuplicateUuid(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = DocumentRecord::from_json("{ nodes: ");
        assert!(matches!(result, Err(EditorError::Serialization(_))));
    }
}
