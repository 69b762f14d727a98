//! Integration tests for the editor crate

use anyhow::{Context, Result};
use vellum_editor::{
    DocumentRecord, EditorConfig, EditorError, EditorSession, InteractionMode, InteractionState,
    Mutation, Node, NodeAddress, NodeStore, NodeTarget, NodeTemplate,
};

/// root = [A(children=[B])]
fn nested() -> Result<(EditorSession, Node)> {
    let b = Node::new("entry").field("title", "Engineer");
    let a = Node::new("section").field("title", "Experience").child(b.clone());
    Ok((EditorSession::new(NodeStore::from_roots(vec![a])?), b))
}

#[test]
fn test_addresses_for_nested_tree() -> Result<()> {
    let (session, b) = nested()?;
    assert_eq!(session.ids().address_of(b.uuid()), Some(&NodeAddress::from([0, 0])));
    assert!(session.resolve(&NodeAddress::from([0])).is_some());
    Ok(())
}

#[test]
fn test_hover_inner_blocks_container() -> Result<()> {
    let (mut session, _) = nested()?;
    session.hover_over(NodeAddress::from([0, 0]));

    assert!(session.is_select_blocked(&NodeAddress::from([0])));
    assert!(!session.is_select_blocked(&NodeAddress::from([0, 0])));
    Ok(())
}

#[test]
fn test_click_sequence_selects_inner_node() -> Result<()> {
    let (mut session, b) = nested()?;
    session.hover_over(NodeAddress::from([0, 0]));

    session.click(&NodeAddress::from([0]));
    assert_eq!(session.selection().selected(), None);

    session.click(&NodeAddress::from([0, 0]));
    assert!(session.is_selected(b.uuid()));
    Ok(())
}

#[test]
fn test_update_then_stale_update_after_delete() -> Result<()> {
    let (mut session, b) = nested()?;
    let address = NodeAddress::from([0, 0]);

    session.update(&address, "title", "X")?;
    let node = session.resolve(&address).context("node at [0, 0]")?;
    assert_eq!(node.text("title"), Some("X"));

    session.apply(Mutation::RemoveNode {
        target: address.clone().into(),
    })?;
    assert!(!session.store().contains(b.uuid()));

    let before = session.to_record().to_json()?;
    let result = session.update(&address, "title", "Y");
    assert!(matches!(result, Err(EditorError::InvalidAddress(_))));
    assert_eq!(session.to_record().to_json()?, before);
    Ok(())
}

#[test]
fn test_pinned_update_after_sibling_shift_is_rejected() -> Result<()> {
    // root = [A(children=[B, C])]
    let c = Node::new("entry").field("title", "Intern");
    let a = Node::new("section")
        .child(Node::new("entry").field("title", "Engineer"))
        .child(c.clone());
    let mut session = EditorSession::new(NodeStore::from_roots(vec![a])?);

    let held = session.pin(&NodeAddress::from([0, 0]))?;
    session.apply(Mutation::RemoveNode {
        target: NodeTarget::address([0, 0]),
    })?;

    // C shifted into [0, 0]; the held target must not reach it
    let before = session.store().clone();
    let result = session.update(held.clone(), "title", "X");
    assert!(matches!(result, Err(EditorError::StaleAddress { .. })));
    assert!(matches!(
        session.toggle_hidden(held),
        Err(EditorError::StaleAddress { .. })
    ));
    assert_eq!(session.store(), &before);

    let shifted = session.resolve(&NodeAddress::from([0, 0])).context("node at [0, 0]")?;
    assert_eq!(shifted.uuid(), c.uuid());
    assert_eq!(shifted.text("title"), Some("Intern"));

    // Re-pinning against the current snapshot succeeds
    let fresh = session.pin(&NodeAddress::from([0, 0]))?;
    session.update(fresh, "title", "Lead")?;
    Ok(())
}

#[test]
fn test_toggle_hidden_twice_is_identity() -> Result<()> {
    let (mut session, _) = nested()?;
    let address = NodeAddress::from([0, 0]);
    let before = session.store().clone();

    session.toggle_hidden(&address)?;
    assert!(session.node_view(&address).context("view at [0, 0]")?.hidden);
    session.toggle_hidden(&address)?;

    assert_eq!(session.store(), &before);
    Ok(())
}

#[test]
fn test_unknown_type_has_empty_toolbar() -> Result<()> {
    let mut session = EditorSession::default();
    session.add(&NodeAddress::root(), Node::new("unknown-type"))?;

    assert!(session.toolbar_for(&NodeAddress::from([0]))?.is_empty());
    Ok(())
}

#[test]
fn test_addresses_observed_after_add_in_same_cycle() -> Result<()> {
    let (mut session, _) = nested()?;
    let result = session.apply(Mutation::AddNode {
        parent: NodeTarget::address([0]),
        template: NodeTemplate::new("entry").field("title", "Intern"),
    })?;

    let address = result.address.context("added node address")?;
    assert_eq!(address, NodeAddress::from([0, 1]));
    let uuid = session.ids().uuid_at(&address).context("uuid at [0, 1]")?;
    assert!(session.click(&address));
    assert!(session.is_selected(uuid));
    Ok(())
}

#[test]
fn test_selection_follows_node_across_reorder() -> Result<()> {
    let (mut session, b) = nested()?;
    session.add(&NodeAddress::from([0]), Node::new("entry"))?;
    session.click(&NodeAddress::from([0, 0]));

    session.apply(Mutation::MoveNode {
        target: NodeTarget::address([0, 0]),
        index: 1,
    })?;

    let (address, node) = session.selected_node().context("selected node")?;
    assert_eq!(node.uuid(), b.uuid());
    assert_eq!(address, &NodeAddress::from([0, 1]));
    Ok(())
}

#[test]
fn test_static_mode_session() -> Result<()> {
    let json = r#"{"nodes": [{"type": "section", "children": [{"type": "entry"}]}]}"#;
    let mut session = EditorSession::from_json(json, &EditorConfig::static_render())?;

    session.hover_over(NodeAddress::from([0, 0]));
    session.click(&NodeAddress::from([0, 0]));
    assert_eq!(session.interaction_state(), InteractionState::Idle);
    assert!(!session.is_select_blocked(&NodeAddress::from([0])));

    // Writes still go through
    session.update(&NodeAddress::from([0, 0]), "title", "Lead")?;

    session.set_mode(InteractionMode::Interactive);
    assert!(session.click(&NodeAddress::from([0, 0])));
    Ok(())
}

#[test]
fn test_record_roundtrip_through_session() -> Result<()> {
    let (mut session, b) = nested()?;
    session.toggle_hidden(&NodeAddress::from([0]))?;

    let json = session.to_record().to_json()?;
    let record = DocumentRecord::from_json(&json)?;
    let reloaded = EditorSession::from_record(record, &EditorConfig::default())?;

    assert_eq!(reloaded.store(), session.store());
    assert_eq!(reloaded.ids().address_of(b.uuid()), Some(&NodeAddress::from([0, 0])));
    Ok(())
}
