//! Positional addressing for document nodes
//!
//! A `NodeAddress` is the path of sibling indices from the root list down to
//! a node: the first root is `[0]`, its second child is `[0, 1]`. Addresses
//! are derived from the current tree shape and are only meaningful against
//! the snapshot they were derived from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Hierarchical id: sibling indices from root to node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeAddress(Vec<usize>);

impl NodeAddress {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The empty address designates the root list itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index of the node within its sibling list
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Address of the parent (the root list for top-level nodes)
    pub fn parent(&self) -> Option<NodeAddress> {
        if self.0.is_empty() {
            None
        } else {
            Some(NodeAddress(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Address of the `index`-th child
    pub fn child(&self, index: usize) -> NodeAddress {
        let mut indices = self.0.clone();
        indices.push(index);
        NodeAddress(indices)
    }

    /// Same parent, different position
    pub fn with_last_index(&self, index: usize) -> Option<NodeAddress> {
        self.parent().map(|parent| parent.child(index))
    }

    /// True iff `ancestor` is a strict prefix of `self`
    pub fn is_descendant_of(&self, ancestor: &NodeAddress) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }

    pub fn is_ancestor_of(&self, descendant: &NodeAddress) -> bool {
        descendant.is_descendant_of(self)
    }
}

impl From<Vec<usize>> for NodeAddress {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[usize; N]> for NodeAddress {
    fn from(indices: [usize; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for NodeAddress {
    type Err = ParseIntError;

    /// Parse the dotted form produced by `Display` (`"0.1.2"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(NodeAddress::root());
        }
        s.split('.')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(NodeAddress)
    }
}
