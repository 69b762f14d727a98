//! # Edit Session
//!
//! An `EditorSession` is the single context object for one open document:
//! the tree (behind the mutation router), the derived id table, the
//! hover/selection state and the toolbar dispatcher. The rendering layer
//! reads node views from it each cycle and feeds interaction events back
//! through its methods; there is no other write path.
//!
//! Events are processed one at a time, to completion. After every mutation
//! the selection is pruned against the refreshed id table, so a removed
//! node is never reported as selected.

use crate::address::NodeAddress;
use crate::config::EditorConfig;
use crate::errors::{EditorError, EditorResult};
use crate::ids::IdTable;
use crate::mutations::{Mutation, MutationResult, MutationRouter, NodeTarget};
use crate::node::{FieldValue, Node, NodeUuid};
use crate::record::DocumentRecord;
use crate::selection::{InteractionMode, InteractionState, SelectionState};
use crate::store::NodeStore;
use crate::toolbar::{NodeBinding, NodeDispatcher, ToolbarAction, ToolbarOption};
use serde::Serialize;

/// Per-node flags consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeView {
    pub address: NodeAddress,
    pub uuid: NodeUuid,
    pub node_type: String,
    pub hovered: bool,
    pub selected: bool,
    pub editing: bool,
    pub hidden: bool,
    pub select_blocked: bool,
}

/// Editing context for one open document
#[derive(Debug)]
pub struct EditorSession {
    router: MutationRouter,
    selection: SelectionState,
    dispatcher: NodeDispatcher,
}

impl EditorSession {
    /// Create an interactive session with the builtin toolbar
    pub fn new(store: NodeStore) -> Self {
        Self::with_config(store, &EditorConfig::default())
    }

    pub fn with_config(store: NodeStore, config: &EditorConfig) -> Self {
        let dispatcher = if config.builtin_toolbar {
            NodeDispatcher::new()
        } else {
            NodeDispatcher::empty()
        };

        Self {
            router: MutationRouter::new(store),
            selection: SelectionState::new(config.mode),
            dispatcher,
        }
    }

    pub fn from_record(record: DocumentRecord, config: &EditorConfig) -> EditorResult<Self> {
        Ok(Self::with_config(record.into_store()?, config))
    }

    pub fn from_json(json: &str, config: &EditorConfig) -> EditorResult<Self> {
        Self::from_record(DocumentRecord::from_json(json)?, config)
    }

    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord::from_store(self.router.store())
    }

    pub fn store(&self) -> &NodeStore {
        self.router.store()
    }

    pub fn ids(&self) -> &IdTable {
        self.router.ids()
    }

    pub fn revision(&self) -> u64 {
        self.router.revision()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn dispatcher(&self) -> &NodeDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut NodeDispatcher {
        &mut self.dispatcher
    }

    pub fn resolve(&self, address: &NodeAddress) -> Option<&Node> {
        self.router.store().resolve(address)
    }

    // ----- writes -----

    pub fn apply(&mut self, mutation: Mutation) -> EditorResult<MutationResult> {
        let result = self.router.apply(mutation);
        self.selection.prune(self.router.ids());
        result
    }

    pub fn add(&mut self, parent: &NodeAddress, node: Node) -> EditorResult<MutationResult> {
        let result = self.router.add(parent, node);
        self.selection.prune(self.router.ids());
        result
    }

    /// Merge a field value. Pass a pinned target for addresses held across events.
    pub fn update(
        &mut self,
        target: impl Into<NodeTarget>,
        key: &str,
        value: impl Into<FieldValue>,
    ) -> EditorResult<MutationResult> {
        self.router.update(target, key, value.into())
    }

    pub fn toggle_hidden(&mut self, target: impl Into<NodeTarget>) -> EditorResult<MutationResult> {
        self.router.toggle_hidden(target)
    }

    /// Target the node now at `address`, failing later writes if it moves
    pub fn pin(&self, address: &NodeAddress) -> EditorResult<NodeTarget> {
        self.router.pin(address)
    }

    /// Run a toolbar action's mutation
    pub fn invoke(&mut self, action: &ToolbarAction) -> EditorResult<MutationResult> {
        let result = action.invoke(&mut self.router);
        self.selection.prune(self.router.ids());
        result
    }

    // ----- interaction -----

    pub fn interaction_state(&self) -> InteractionState {
        self.selection.state()
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.selection.set_mode(mode);
    }

    pub fn hover_over(&mut self, address: NodeAddress) {
        self.selection.hover_over(address);
    }

    pub fn hover_out(&mut self, address: &NodeAddress) {
        self.selection.hover_out(address);
    }

    pub fn is_hovering(&self, address: &NodeAddress) -> bool {
        self.selection.is_hovering(address)
    }

    pub fn is_selected(&self, uuid: NodeUuid) -> bool {
        self.selection.is_selected(uuid)
    }

    pub fn is_select_blocked(&self, address: &NodeAddress) -> bool {
        self.selection.is_select_blocked(address)
    }

    /// Pointer click on a node region
    pub fn click(&mut self, address: &NodeAddress) -> bool {
        self.selection.click(address, self.router.ids())
    }

    /// Explicit selection override; unknown uuids clear the selection
    pub fn update_selected(&mut self, uuid: Option<NodeUuid>) {
        self.selection.update_selected(uuid);
        self.selection.prune(self.router.ids());
    }

    pub fn selected_node(&self) -> Option<(&NodeAddress, &Node)> {
        let uuid = self.selection.selected()?;
        let address = self.router.ids().address_of(uuid)?;
        Some((address, self.router.store().resolve(address)?))
    }

    pub fn toggle_edit_flag(&mut self) -> bool {
        self.selection.toggle_edit()
    }

    pub fn is_editing(&self, uuid: NodeUuid) -> bool {
        self.selection.is_editing(uuid)
    }

    // ----- toolbar -----

    pub fn resolve_toolbar_options(
        &self,
        node_type: &str,
        node: &Node,
        binding: &NodeBinding,
    ) -> Vec<ToolbarOption> {
        self.dispatcher.resolve(node_type, node, binding)
    }

    /// Options for the node currently at `address`
    pub fn toolbar_for(&self, address: &NodeAddress) -> EditorResult<Vec<ToolbarOption>> {
        let node = self
            .resolve(address)
            .ok_or_else(|| EditorError::InvalidAddress(address.clone()))?;
        let binding = NodeBinding::new(address.clone(), node.uuid());
        Ok(self.resolve_toolbar_options(&node.node_type, node, &binding))
    }

    // ----- views -----

    pub fn node_view(&self, address: &NodeAddress) -> Option<NodeView> {
        self.resolve(address).map(|node| self.view(address, node))
    }

    /// Views for every node in depth-first order
    pub fn views(&self) -> Vec<NodeView> {
        let store = self.router.store();
        self.router
            .ids()
            .iter()
            .filter_map(|(address, _)| store.resolve(address).map(|node| self.view(address, node)))
            .collect()
    }

    fn view(&self, address: &NodeAddress, node: &Node) -> NodeView {
        let uuid = node.uuid();
        NodeView {
            address: address.clone(),
            uuid,
            node_type: node.node_type.clone(),
            hovered: self.selection.is_hovering(address),
            selected: self.selection.is_selected(uuid),
            editing: self.selection.is_editing(uuid),
            hidden: node.hidden,
            select_blocked: self.selection.is_select_blocked(address),
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(NodeStore::new())
    }
}
