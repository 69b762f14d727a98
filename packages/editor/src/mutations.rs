//! # Mutations
//!
//! Every write to the document goes through `MutationRouter::apply`.
//!
//! ## Addressing
//!
//! Positional addresses shift whenever siblings are inserted, removed or
//! reordered. A mutation names its node through a `NodeTarget`:
//! - `Address`: positional only, fails with `InvalidAddress` if it does not
//!   resolve against the current snapshot. Only safe for an address derived
//!   in the same event cycle; callers that hold addresses across events pin
//!   them with `MutationRouter::pin`
//! - `Pinned`: positional plus the uuid the caller expects to find there; a
//!   mismatch fails with `StaleAddress` instead of touching the wrong node
//! - `Uuid`: resolved through the current id table
//!
//! ## Ordering
//!
//! Structural mutations (add, remove, move) re-derive the id table before
//! `apply` returns, so the next lookup in the same event cycle observes the
//! post-mutation shape. A rejected mutation leaves the tree untouched.

use crate::address::NodeAddress;
use crate::errors::{EditorError, EditorResult};
use crate::ids::IdTable;
use crate::node::{FieldValue, Node, NodeTemplate, NodeUuid};
use crate::store::NodeStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// How a mutation names the node it acts on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "camelCase")]
pub enum NodeTarget {
    Address { address: NodeAddress },
    Pinned { address: NodeAddress, uuid: NodeUuid },
    Uuid { uuid: NodeUuid },
}

impl NodeTarget {
    pub fn address(address: impl Into<NodeAddress>) -> Self {
        NodeTarget::Address {
            address: address.into(),
        }
    }

    pub fn pinned(address: NodeAddress, uuid: NodeUuid) -> Self {
        NodeTarget::Pinned { address, uuid }
    }

    pub fn uuid(uuid: NodeUuid) -> Self {
        NodeTarget::Uuid { uuid }
    }
}

impl From<NodeAddress> for NodeTarget {
    fn from(address: NodeAddress) -> Self {
        NodeTarget::Address { address }
    }
}

impl From<&NodeAddress> for NodeTarget {
    fn from(address: &NodeAddress) -> Self {
        NodeTarget::Address {
            address: address.clone(),
        }
    }
}

/// A single write to the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Append a new node (instantiated from `template`) under `parent`
    AddNode {
        parent: NodeTarget,
        template: NodeTemplate,
    },

    /// Merge `value` into `data[key]`
    UpdateField {
        target: NodeTarget,
        key: String,
        value: FieldValue,
    },

    /// Flip the hidden flag
    ToggleHidden { target: NodeTarget },

    /// Detach a node and its descendants
    RemoveNode { target: NodeTarget },

    /// Reorder a node within its sibling list
    MoveNode { target: NodeTarget, index: usize },
}

impl Mutation {
    /// True when the mutation changes tree shape (and therefore addresses)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Mutation::AddNode { .. } | Mutation::RemoveNode { .. } | Mutation::MoveNode { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddNode { .. } => "add_node",
            Mutation::UpdateField { .. } => "update_field",
            Mutation::ToggleHidden { .. } => "toggle_hidden",
            Mutation::RemoveNode { .. } => "remove_node",
            Mutation::MoveNode { .. } => "move_node",
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document revision after the mutation
    pub revision: u64,

    /// Post-mutation address of the affected node (`None` once removed)
    pub address: Option<NodeAddress>,
}

/// Single funnel for document writes
#[derive(Debug, Clone, Default)]
pub struct MutationRouter {
    store: NodeStore,
    ids: IdTable,
    revision: u64,
}

impl MutationRouter {
    pub fn new(store: NodeStore) -> Self {
        let ids = IdTable::derive(&store);
        Self {
            store,
            ids,
            revision: 0,
        }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn ids(&self) -> &IdTable {
        &self.ids
    }

    /// Increments on every successful mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn into_store(self) -> NodeStore {
        self.store
    }

    /// Resolve a target against the current snapshot
    pub fn resolve_target(&self, target: &NodeTarget) -> EditorResult<NodeAddress> {
        match target {
            NodeTarget::Address { address } => Ok(address.clone()),
            NodeTarget::Pinned { address, uuid } => match self.ids.uuid_at(address) {
                Some(found) if found == *uuid => Ok(address.clone()),
                Some(_) => Err(EditorError::StaleAddress {
                    address: address.clone(),
                    expected: *uuid,
                }),
                None => Err(EditorError::InvalidAddress(address.clone())),
            },
            NodeTarget::Uuid { uuid } => self
                .ids
                .address_of(*uuid)
                .cloned()
                .ok_or(EditorError::UnknownNode(*uuid)),
        }
    }

    /// Pin the node currently at `address` so a later write fails if it moves
    pub fn pin(&self, address: &NodeAddress) -> EditorResult<NodeTarget> {
        self.ids
            .uuid_at(address)
            .map(|uuid| NodeTarget::pinned(address.clone(), uuid))
            .ok_or_else(|| EditorError::InvalidAddress(address.clone()))
    }

    /// Apply a mutation, re-deriving addresses before returning
    #[instrument(skip(self, mutation), fields(op = mutation.name(), revision = self.revision))]
    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<MutationResult> {
        let structural = mutation.is_structural();
        let op = mutation.name();
        let outcome = self.dispatch(mutation);
        self.commit(op, structural, outcome)
    }

    /// Re-derive ids and bump the revision for a successful write
    fn commit(
        &mut self,
        op: &'static str,
        structural: bool,
        outcome: EditorResult<Option<NodeAddress>>,
    ) -> EditorResult<MutationResult> {
        match outcome {
            Ok(address) => {
                if structural {
                    self.ids = IdTable::derive(&self.store);
                }
                self.revision += 1;
                debug!(
                    op,
                    revision = self.revision,
                    address = ?address.as_ref().map(ToString::to_string),
                    "Mutation applied"
                );
                Ok(MutationResult {
                    revision: self.revision,
                    address,
                })
            }
            Err(e) => {
                warn!(op, error = %e, "Mutation rejected");
                Err(e)
            }
        }
    }

    fn dispatch(&mut self, mutation: Mutation) -> EditorResult<Option<NodeAddress>> {
        match mutation {
            Mutation::AddNode { parent, template } => {
                let parent = self.resolve_target(&parent)?;
                self.store.add(&parent, template.instantiate()).map(Some)
            }
            Mutation::UpdateField { target, key, value } => {
                let address = self.resolve_target(&target)?;
                self.store.update(&address, &key, value)?;
                Ok(Some(address))
            }
            Mutation::ToggleHidden { target } => {
                let address = self.resolve_target(&target)?;
                self.store.toggle_hidden(&address)?;
                Ok(Some(address))
            }
            Mutation::RemoveNode { target } => {
                let address = self.resolve_target(&target)?;
                self.store.remove(&address)?;
                Ok(None)
            }
            Mutation::MoveNode { target, index } => {
                let address = self.resolve_target(&target)?;
                self.store.move_to(&address, index).map(Some)
            }
        }
    }

    /// Append an already-built node under `parent`
    #[instrument(skip(self, node), fields(op = "add", revision = self.revision))]
    pub fn add(&mut self, parent: &NodeAddress, node: Node) -> EditorResult<MutationResult> {
        let outcome = self.store.add(parent, node).map(Some);
        self.commit("add", true, outcome)
    }

    pub fn update(
        &mut self,
        target: impl Into<NodeTarget>,
        key: &str,
        value: FieldValue,
    ) -> EditorResult<MutationResult> {
        self.apply(Mutation::UpdateField {
            target: target.into(),
            key: key.to_string(),
            value,
        })
    }

    pub fn toggle_hidden(&mut self, target: impl Into<NodeTarget>) -> EditorResult<MutationResult> {
        self.apply(Mutation::ToggleHidden {
            target: target.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> MutationRouter {
        MutationRouter::new(
            NodeStore::from_roots(vec![Node::new("section")
                .child(Node::new("entry").field("title", "First"))
                .child(Node::new("entry").field("title", "Second"))])
            .unwrap(),
        )
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::UpdateField {
            target: NodeTarget::address([0, 1]),
            key: "title".to_string(),
            value: FieldValue::text("Lead"),
        };

        let json = serde_json::to_string(&mutation).unwrap();
        assert!(json.contains(r#""op":"updateField""#));
        let deserialized: Mutation = serde_json::from_str(&json).unwrap();

        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_add_rederives_ids() {
        let mut router = router();
        let result = router
            .apply(Mutation::AddNode {
                parent: NodeTarget::address([0]),
                template: NodeTemplate::new("entry"),
            })
            .unwrap();

        let address = result.address.unwrap();
        assert_eq!(address, NodeAddress::from([0, 2]));
        assert!(router.ids().uuid_at(&address).is_some());
        assert_eq!(router.ids().len(), 4);
        assert_eq!(result.revision, 1);
    }

    #[test]
    fn test_update_field() {
        let mut router = router();
        router
            .update(&NodeAddress::from([0, 0]), "title", FieldValue::text("X"))
            .unwrap();
        let node = router.store().resolve(&NodeAddress::from([0, 0])).unwrap();
        assert_eq!(node.text("title"), Some("X"));
    }

    #[test]
    fn test_invalid_address_leaves_tree_unchanged() {
        let mut router = router();
        let before = router.store().clone();

        let result = router.update(&NodeAddress::from([0, 7]), "title", FieldValue::text("X"));

        assert!(matches!(result, Err(EditorError::InvalidAddress(_))));
        assert_eq!(router.store(), &before);
        assert_eq!(router.revision(), 0);
    }

    #[test]
    fn test_pinned_target_detects_stale_address() {
        let mut router = router();
        let address = NodeAddress::from([0, 0]);
        let first = router.ids().uuid_at(&address).unwrap();

        // Second entry moves into position 0
        router
            .apply(Mutation::MoveNode {
                target: NodeTarget::address([0, 1]),
                index: 0,
            })
            .unwrap();

        let before = router.store().clone();
        let result = router.apply(Mutation::UpdateField {
            target: NodeTarget::pinned(address, first),
            key: "title".to_string(),
            value: FieldValue::text("X"),
        });

        assert!(matches!(result, Err(EditorError::StaleAddress { .. })));
        assert_eq!(router.store(), &before);
    }

    #[test]
    fn test_uuid_target_follows_node() {
        let mut router = router();
        let second = router.ids().uuid_at(&NodeAddress::from([0, 1])).unwrap();

        router
            .apply(Mutation::RemoveNode {
                target: NodeTarget::address([0, 0]),
            })
            .unwrap();

        let result = router
            .apply(Mutation::ToggleHidden {
                target: NodeTarget::uuid(second),
            })
            .unwrap();
        assert_eq!(result.address, Some(NodeAddress::from([0, 0])));
        assert!(router.store().resolve(&NodeAddress::from([0, 0])).unwrap().hidden);

        let gone = NodeUuid::new();
        let result = router.apply(Mutation::RemoveNode {
            target: NodeTarget::uuid(gone),
        });
        assert!(matches!(result, Err(EditorError::UnknownNode(_))));
    }

    #[test]
    fn test_pinned_update_after_delete_is_rejected() {
        let mut router = router();
        let target = router.pin(&NodeAddress::from([0, 0])).unwrap();

        router
            .apply(Mutation::RemoveNode {
                target: NodeTarget::address([0, 0]),
            })
            .unwrap();

        let before = router.store().clone();
        let result = router.update(target, "title", FieldValue::text("X"));
        assert!(matches!(result, Err(EditorError::StaleAddress { .. })));
        assert_eq!(router.store(), &before);
        assert_eq!(router.revision(), 1);

        assert!(matches!(
            router.pin(&NodeAddress::from([0, 1])),
            Err(EditorError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_add_prebuilt_node() {
        let mut router = router();
        let node = Node::new("section");
        let uuid = node.uuid();
        let result = router.add(&NodeAddress::root(), node).unwrap();

        assert_eq!(result.address, Some(NodeAddress::from([1])));
        assert_eq!(router.ids().address_of(uuid), Some(&NodeAddress::from([1])));
        assert_eq!(result.revision, 1);

        let duplicate = router.store().resolve(&NodeAddress::from([1])).unwrap().clone();
        let result = router.add(&NodeAddress::root(), duplicate);
        assert!(matches!(result, Err(EditorError::DuplicateUuid(_))));
        assert_eq!(router.revision(), 1);
    }
}
