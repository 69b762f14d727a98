//! # Toolbar Options
//!
//! Contextual menus are produced per node type by plain functions held in a
//! `NodeDispatcher`. A resolver receives the node as it is now plus a
//! `NodeBinding` for it, and returns an option tree whose leaves carry a
//! `ToolbarAction`. An action wraps exactly one `Mutation` that targets the
//! node by pinned address, so invoking an action built against an older
//! snapshot fails instead of editing whatever moved into that slot.
//!
//! Types without a registered resolver yield an empty menu.

mod builtin;

pub use builtin::{
    BULLET_LIST, CONTACT, ENTRY, HEADING, PARAGRAPH, SECTION, SKILLS,
};

use crate::address::NodeAddress;
use crate::errors::EditorResult;
use crate::mutations::{Mutation, MutationResult, MutationRouter, NodeTarget};
use crate::node::{FieldValue, Node, NodeTemplate, NodeUuid};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Entry in a toolbar/context menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolbarOption {
    Action {
        label: String,
        action: ToolbarAction,
    },
    Submenu {
        label: String,
        submenu: Vec<ToolbarOption>,
    },
}

impl ToolbarOption {
    pub fn action(label: impl Into<String>, action: ToolbarAction) -> Self {
        ToolbarOption::Action {
            label: label.into(),
            action,
        }
    }

    pub fn submenu(label: impl Into<String>, submenu: Vec<ToolbarOption>) -> Self {
        ToolbarOption::Submenu {
            label: label.into(),
            submenu,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ToolbarOption::Action { label, .. } | ToolbarOption::Submenu { label, .. } => label,
        }
    }

    /// Follow a path of labels down the option tree
    pub fn find<'a>(options: &'a [ToolbarOption], path: &[&str]) -> Option<&'a ToolbarOption> {
        let (first, rest) = path.split_first()?;
        let option = options.iter().find(|option| option.label() == *first)?;
        match (option, rest.is_empty()) {
            (_, true) => Some(option),
            (ToolbarOption::Submenu { submenu, .. }, false) => Self::find(submenu, rest),
            (ToolbarOption::Action { .. }, false) => None,
        }
    }

    pub fn as_action(&self) -> Option<&ToolbarAction> {
        match self {
            ToolbarOption::Action { action, .. } => Some(action),
            ToolbarOption::Submenu { .. } => None,
        }
    }
}

/// Deferred write produced by a menu entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolbarAction {
    mutation: Mutation,
}

impl ToolbarAction {
    pub fn new(mutation: Mutation) -> Self {
        Self { mutation }
    }

    pub fn mutation(&self) -> &Mutation {
        &self.mutation
    }

    /// Apply the wrapped mutation through the router (once)
    pub fn invoke(&self, router: &mut MutationRouter) -> EditorResult<MutationResult> {
        router.apply(self.mutation.clone())
    }
}

/// A node's identity at resolution time, used to build its actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    address: NodeAddress,
    uuid: NodeUuid,
}

impl NodeBinding {
    pub fn new(address: NodeAddress, uuid: NodeUuid) -> Self {
        Self { address, uuid }
    }

    pub fn address(&self) -> &NodeAddress {
        &self.address
    }

    pub fn uuid(&self) -> NodeUuid {
        self.uuid
    }

    pub fn target(&self) -> NodeTarget {
        NodeTarget::pinned(self.address.clone(), self.uuid)
    }

    /// The bound update callback: merge `value` into `data[key]`
    pub fn update(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> ToolbarAction {
        ToolbarAction::new(Mutation::UpdateField {
            target: self.target(),
            key: key.into(),
            value: value.into(),
        })
    }

    pub fn toggle_hidden(&self) -> ToolbarAction {
        ToolbarAction::new(Mutation::ToggleHidden {
            target: self.target(),
        })
    }

    pub fn add_child(&self, template: NodeTemplate) -> ToolbarAction {
        ToolbarAction::new(Mutation::AddNode {
            parent: self.target(),
            template,
        })
    }

    pub fn remove(&self) -> ToolbarAction {
        ToolbarAction::new(Mutation::RemoveNode {
            target: self.target(),
        })
    }

    pub fn move_to(&self, index: usize) -> ToolbarAction {
        ToolbarAction::new(Mutation::MoveNode {
            target: self.target(),
            index,
        })
    }
}

/// Produces the option tree for one node type
pub type Resolver = fn(&Node, &NodeBinding) -> Vec<ToolbarOption>;

/// Registry of per-type toolbar resolvers
pub struct NodeDispatcher {
    resolvers: HashMap<String, Resolver>,
}

impl NodeDispatcher {
    /// Create a dispatcher with all builtin resume node types
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        builtin::register_all(&mut dispatcher);
        dispatcher
    }

    /// Create an empty dispatcher
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Register (or replace) the resolver for `node_type`
    pub fn register(&mut self, node_type: impl Into<String>, resolver: Resolver) -> Option<Resolver> {
        self.resolvers.insert(node_type.into(), resolver)
    }

    pub fn is_registered(&self, node_type: &str) -> bool {
        self.resolvers.contains_key(node_type)
    }

    /// Registered type names, sorted
    pub fn node_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.resolvers.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    /// Options for `node`; empty when `node_type` has no resolver
    pub fn resolve(&self, node_type: &str, node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
        match self.resolvers.get(node_type) {
            Some(resolver) => resolver(node, binding),
            None => Vec::new(),
        }
    }
}

impl Default for NodeDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NodeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeDispatcher")
            .field("resolvers", &self.node_types())
            .finish()
    }
}
