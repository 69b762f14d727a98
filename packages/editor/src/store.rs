//! # Node Store
//!
//! Owns the document forest and exposes the structural mutation primitives.
//! Every primitive resolves its address against the current tree and fails
//! with `InvalidAddress` before touching anything if resolution fails, so a
//! rejected call never leaves a partial mutation behind.
//!
//! The store knows nothing about ids, selection or routing; callers go
//! through `MutationRouter` which re-derives addresses afterwards.

use crate::address::NodeAddress;
use crate::errors::{EditorError, EditorResult};
use crate::node::{FieldValue, Node, NodeUuid};
use std::collections::HashSet;

/// Exclusive owner of all document nodes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStore {
    roots: Vec<Node>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Build a store from existing roots, rejecting duplicate uuids
    pub fn from_roots(roots: Vec<Node>) -> EditorResult<Self> {
        let mut seen = HashSet::new();
        for root in &roots {
            check_unique(root, &mut seen)?;
        }
        Ok(Self { roots })
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<Node> {
        self.roots
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.roots.iter().map(Node::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Pure lookup
    pub fn resolve(&self, address: &NodeAddress) -> Option<&Node> {
        let (first, rest) = address.indices().split_first()?;
        let mut node = self.roots.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    fn resolve_mut(&mut self, address: &NodeAddress) -> Option<&mut Node> {
        let (first, rest) = address.indices().split_first()?;
        let mut node = self.roots.get_mut(*first)?;
        for index in rest {
            node = node.children.get_mut(*index)?;
        }
        Some(node)
    }

    fn require_mut(&mut self, address: &NodeAddress) -> EditorResult<&mut Node> {
        self.resolve_mut(address)
            .ok_or_else(|| EditorError::InvalidAddress(address.clone()))
    }

    /// Sibling list that `parent` owns (the root list for the empty address)
    fn children_mut(&mut self, parent: &NodeAddress) -> Option<&mut Vec<Node>> {
        if parent.is_root() {
            Some(&mut self.roots)
        } else {
            self.resolve_mut(parent).map(|node| &mut node.children)
        }
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// The empty address appends a new root. Returns the new node's address.
    pub fn add(&mut self, parent: &NodeAddress, node: Node) -> EditorResult<NodeAddress> {
        if !parent.is_root() && self.resolve(parent).is_none() {
            return Err(EditorError::InvalidAddress(parent.clone()));
        }

        let mut seen = self.uuids();
        check_unique(&node, &mut seen)?;

        let children = self
            .children_mut(parent)
            .ok_or_else(|| EditorError::InvalidAddress(parent.clone()))?;
        children.push(node);
        Ok(parent.child(children.len() - 1))
    }

    /// Merge `value` into `data[key]` of the addressed node
    pub fn update(&mut self, address: &NodeAddress, key: &str, value: FieldValue) -> EditorResult<()> {
        let node = self.require_mut(address)?;
        match node.data.get_mut(key) {
            Some(existing) => existing.merge(value),
            None => {
                node.data.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Flip the hidden flag, returning the new value
    pub fn toggle_hidden(&mut self, address: &NodeAddress) -> EditorResult<bool> {
        let node = self.require_mut(address)?;
        node.hidden = !node.hidden;
        Ok(node.hidden)
    }

    /// Detach and return the addressed subtree
    pub fn remove(&mut self, address: &NodeAddress) -> EditorResult<Node> {
        let invalid = || EditorError::InvalidAddress(address.clone());
        let parent = address.parent().ok_or_else(invalid)?;
        let index = address.last_index().ok_or_else(invalid)?;
        let siblings = self.children_mut(&parent).ok_or_else(invalid)?;
        if index >= siblings.len() {
            return Err(invalid());
        }
        Ok(siblings.remove(index))
    }

    /// Move a node to `index` within its own sibling list.
    ///
    /// The index is clamped to the last position. Returns the new address.
    pub fn move_to(&mut self, address: &NodeAddress, index: usize) -> EditorResult<NodeAddress> {
        let invalid = || EditorError::InvalidAddress(address.clone());
        let parent = address.parent().ok_or_else(invalid)?;
        let from = address.last_index().ok_or_else(invalid)?;
        let siblings = self.children_mut(&parent).ok_or_else(invalid)?;
        if from >= siblings.len() {
            return Err(invalid());
        }

        let node = siblings.remove(from);
        let to = index.min(siblings.len());
        siblings.insert(to, node);
        Ok(parent.child(to))
    }

    /// Locate a node by uuid (depth-first scan)
    pub fn find(&self, uuid: NodeUuid) -> Option<NodeAddress> {
        fn search(nodes: &[Node], path: &NodeAddress, uuid: NodeUuid) -> Option<NodeAddress> {
            for (i, node) in nodes.iter().enumerate() {
                let address = path.child(i);
                if node.uuid() == uuid {
                    return Some(address);
                }
                if let Some(found) = search(&node.children, &address, uuid) {
                    return Some(found);
                }
            }
            None
        }

        search(&self.roots, &NodeAddress::root(), uuid)
    }

    pub fn contains(&self, uuid: NodeUuid) -> bool {
        self.find(uuid).is_some()
    }

    fn uuids(&self) -> HashSet<NodeUuid> {
        let mut uuids = HashSet::new();
        for root in &self.roots {
            root.walk(&mut |node| {
                uuids.insert(node.uuid());
            });
        }
        uuids
    }
}

fn check_unique(node: &Node, seen: &mut HashSet<NodeUuid>) -> EditorResult<()> {
    if !seen.insert(node.uuid()) {
        return Err(EditorError::DuplicateUuid(node.uuid()));
    }
    for child in &node.children {
        check_unique(child, seen)?;
    }
    Ok(())
}
