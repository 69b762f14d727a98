//! # Hover and Selection Tracking
//!
//! One `SelectionState` exists per open document. It records:
//! - the selected node, by uuid (survives reorders)
//! - the hovered node, by address (only valid for the current snapshot)
//! - the global edit flag
//!
//! ## Select blocking
//!
//! Pointer regions nest: hovering an inner node also places the pointer over
//! every ancestor. A click aimed at the inner node must not select the
//! container, so a node is *select-blocked* while the hover target is one of
//! its strict descendants. A node never blocks itself and is never blocked
//! by an ancestor.
//!
//! ## Static mode
//!
//! In print/export mode hover and selection stay `Idle` and every hover or
//! click call is silently absorbed.

use crate::address::NodeAddress;
use crate::ids::IdTable;
use crate::node::NodeUuid;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Whether the session reacts to pointer events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InteractionMode {
    #[default]
    Interactive,
    /// Print or export rendering: no hover, no selection
    Static,
}

/// Observable interaction state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionState {
    Idle,
    Hovering(NodeAddress),
    Selected(NodeUuid),
    SelectedAndHovering(NodeUuid, NodeAddress),
}

/// Session-wide hover/selection/edit state
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<NodeUuid>,
    hovered: Option<NodeAddress>,
    editing: bool,
    mode: InteractionMode,
}

impl SelectionState {
    pub fn new(mode: InteractionMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == InteractionMode::Interactive
    }

    /// Switch mode; entering static mode drops hover, selection and edit
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
        if mode == InteractionMode::Static {
            self.hovered = None;
            self.selected = None;
            self.editing = false;
        }
    }

    pub fn state(&self) -> InteractionState {
        match (self.selected, &self.hovered) {
            (None, None) => InteractionState::Idle,
            (None, Some(hovered)) => InteractionState::Hovering(hovered.clone()),
            (Some(selected), None) => InteractionState::Selected(selected),
            (Some(selected), Some(hovered)) => {
                InteractionState::SelectedAndHovering(selected, hovered.clone())
            }
        }
    }

    pub fn hovered(&self) -> Option<&NodeAddress> {
        self.hovered.as_ref()
    }

    pub fn selected(&self) -> Option<NodeUuid> {
        self.selected
    }

    pub fn hover_over(&mut self, address: NodeAddress) {
        if !self.is_interactive() {
            return;
        }
        self.hovered = Some(address);
    }

    /// Clear hover, but only if `address` is still the hover target.
    ///
    /// A late leave event from a previously hovered sibling must not clobber
    /// a newer enter.
    pub fn hover_out(&mut self, address: &NodeAddress) {
        if self.hovered.as_ref() == Some(address) {
            self.hovered = None;
        }
    }

    pub fn is_hovering(&self, address: &NodeAddress) -> bool {
        self.hovered.as_ref() == Some(address)
    }

    /// True iff the hover target is a strict descendant of `address`
    pub fn is_select_blocked(&self, address: &NodeAddress) -> bool {
        self.hovered
            .as_ref()
            .is_some_and(|hovered| hovered.is_descendant_of(address))
    }

    pub fn is_selected(&self, uuid: NodeUuid) -> bool {
        self.selected == Some(uuid)
    }

    /// Select the node at `address` unless it is already selected or
    /// select-blocked. Returns whether the selection changed.
    pub fn click(&mut self, address: &NodeAddress, ids: &IdTable) -> bool {
        if !self.is_interactive() || self.is_select_blocked(address) {
            return false;
        }
        let Some(uuid) = ids.uuid_at(address) else {
            return false;
        };
        if self.is_selected(uuid) {
            return false;
        }

        debug!(%address, %uuid, "Selecting node");
        self.select(Some(uuid));
        true
    }

    /// Explicit override, e.g. clicking empty canvas clears the selection
    pub fn update_selected(&mut self, uuid: Option<NodeUuid>) {
        if !self.is_interactive() {
            return;
        }
        self.select(uuid);
    }

    fn select(&mut self, uuid: Option<NodeUuid>) {
        if self.selected != uuid {
            self.editing = false;
        }
        self.selected = uuid;
    }

    /// Flip the global edit flag. No-op while nothing is selected.
    pub fn toggle_edit(&mut self) -> bool {
        if self.selected.is_some() {
            self.editing = !self.editing;
        }
        self.editing
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing
    }

    /// A node renders its editable form only when selected and editing
    pub fn is_editing(&self, uuid: NodeUuid) -> bool {
        self.editing && self.is_selected(uuid)
    }

    /// Drop references that no longer match the tree
    pub fn prune(&mut self, ids: &IdTable) {
        if let Some(selected) = self.selected {
            if !ids.contains(selected) {
                debug!(uuid = %selected, "Clearing selection of removed node");
                self.selected = None;
                self.editing = false;
            }
        }
        if let Some(hovered) = &self.hovered {
            if ids.uuid_at(hovered).is_none() {
                self.hovered = None;
            }
        }
    }
}
