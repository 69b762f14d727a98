//! # Vellum Editor
//!
//! Document tree and interaction-state engine for the Vellum resume editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ browser UI: pointer / click / field events  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditorSession                       │
//! │  - SelectionState (hover, select, edit)     │
//! │  - MutationRouter → NodeStore               │
//! │  - IdTable re-derived after each change     │
//! │  - NodeDispatcher → toolbar options         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: NodeView flags → markup           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Uuid is identity**: permanent, never derived from position
//! 2. **Addresses are snapshots**: recomputed after every structural change
//! 3. **One write path**: every mutation goes through the router
//! 4. **Menus are data**: toolbar actions are deferred mutations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vellum_editor::{EditorSession, Node, NodeAddress, NodeStore};
//!
//! let store = NodeStore::from_roots(vec![
//!     Node::new("section").child(Node::new("entry")),
//! ])?;
//! let mut session = EditorSession::new(store);
//!
//! session.hover_over(NodeAddress::from([0, 0]));
//! session.click(&NodeAddress::from([0, 0]));
//! session.update(&NodeAddress::from([0, 0]), "title", "Engineer")?;
//!
//! let options = session.toolbar_for(&NodeAddress::from([0, 0]))?;
//! ```

mod address;
mod config;
mod errors;
mod ids;
mod mutations;
mod node;
mod record;
mod selection;
mod session;
mod store;
pub mod toolbar;

pub use address::NodeAddress;
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use errors::{EditorError, EditorResult};
pub use ids::IdTable;
pub use mutations::{Mutation, MutationResult, MutationRouter, NodeTarget};
pub use node::{FieldValue, Node, NodeData, NodeTemplate, NodeUuid};
pub use record::{DocumentRecord, NodeRecord};
pub use selection::{InteractionMode, InteractionState, SelectionState};
pub use session::{EditorSession, NodeView};
pub use store::NodeStore;
pub use toolbar::{NodeBinding, NodeDispatcher, Resolver, ToolbarAction, ToolbarOption};
