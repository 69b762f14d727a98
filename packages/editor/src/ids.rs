//! Id Table - positional addresses derived from the current tree shape
//!
//! The table maps every node's uuid to its `NodeAddress` and back. It is
//! rebuilt in full after each structural mutation; documents are small
//! (tens of nodes) so a depth-first walk is cheap.

use crate::address::NodeAddress;
use crate::node::{Node, NodeUuid};
use crate::store::NodeStore;
use std::collections::{BTreeMap, HashMap};
use tracing::instrument;

/// Address table for one tree snapshot
#[derive(Debug, Clone, Default)]
pub struct IdTable {
    /// uuid → address
    addresses: HashMap<NodeUuid, NodeAddress>,
    /// address → uuid, in depth-first (lexicographic) order
    uuids: BTreeMap<NodeAddress, NodeUuid>,
}

impl IdTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive addresses for every node in `store`.
    ///
    /// Root `i` gets `[i]`; child `j` of a node at `p` gets `p ++ [j]`.
    #[instrument(skip(store), fields(nodes = store.len()))]
    pub fn derive(store: &NodeStore) -> Self {
        let mut table = Self::new();
        table.index_children(store.roots(), &NodeAddress::root());
        tracing::trace!(entries = table.len(), "Id table derived");
        table
    }

    fn index_children(&mut self, nodes: &[Node], parent: &NodeAddress) {
        for (i, node) in nodes.iter().enumerate() {
            let address = parent.child(i);
            self.index_children(&node.children, &address);
            self.addresses.insert(node.uuid(), address.clone());
            self.uuids.insert(address, node.uuid());
        }
    }

    pub fn address_of(&self, uuid: NodeUuid) -> Option<&NodeAddress> {
        self.addresses.get(&uuid)
    }

    pub fn uuid_at(&self, address: &NodeAddress) -> Option<NodeUuid> {
        self.uuids.get(address).copied()
    }

    pub fn contains(&self, uuid: NodeUuid) -> bool {
        self.addresses.contains_key(&uuid)
    }

    pub fn len(&self) -> usize {
        self.uuids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uuids.is_empty()
    }

    /// Entries in depth-first order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeAddress, NodeUuid)> {
        self.uuids.iter().map(|(address, uuid)| (address, *uuid))
    }

    /// Strict descendants of `ancestor`, in depth-first order
    pub fn descendants<'a>(
        &'a self,
        ancestor: &'a NodeAddress,
    ) -> impl Iterator<Item = (&'a NodeAddress, NodeUuid)> + 'a {
        self.uuids
            .range(ancestor.clone()..)
            .skip_while(move |(address, _)| *address == ancestor)
            .take_while(move |(address, _)| address.is_descendant_of(ancestor))
            .map(|(address, uuid)| (address, *uuid))
    }
}
