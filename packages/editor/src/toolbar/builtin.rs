//! Toolbar resolvers for the builtin resume node types

use super::{NodeBinding, NodeDispatcher, ToolbarOption};
use crate::node::{FieldValue, Node, NodeTemplate};
use std::collections::BTreeMap;

pub const SECTION: &str = "section";
pub const HEADING: &str = "heading";
pub const PARAGRAPH: &str = "paragraph";
pub const BULLET_LIST: &str = "bullet-list";
pub const ENTRY: &str = "entry";
pub const SKILLS: &str = "skills";
pub const CONTACT: &str = "contact";

const CONTACT_FIELDS: [(&str, &str); 3] = [("email", "Email"), ("phone", "Phone"), ("website", "Website")];

pub(super) fn register_all(dispatcher: &mut NodeDispatcher) {
    dispatcher.register(SECTION, section);
    dispatcher.register(HEADING, heading);
    dispatcher.register(PARAGRAPH, paragraph);
    dispatcher.register(BULLET_LIST, bullet_list);
    dispatcher.register(ENTRY, entry);
    dispatcher.register(SKILLS, skills);
    dispatcher.register(CONTACT, contact);
}

fn section(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = vec![
        ToolbarOption::action(
            "Add entry",
            binding.add_child(
                NodeTemplate::new(ENTRY)
                    .field("title", "")
                    .field("subtitle", "")
                    .field("date", ""),
            ),
        ),
        ToolbarOption::action(
            "Add paragraph",
            binding.add_child(NodeTemplate::new(PARAGRAPH).field("text", "")),
        ),
        ToolbarOption::submenu(
            "Columns",
            vec![
                ToolbarOption::action("One column", binding.update("columns", "1")),
                ToolbarOption::action("Two columns", binding.update("columns", "2")),
            ],
        ),
    ];
    options.extend(common(node, binding));
    options
}

fn heading(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = vec![ToolbarOption::submenu(
        "Level",
        vec![
            ToolbarOption::action("Title", binding.update("level", "h1")),
            ToolbarOption::action("Heading", binding.update("level", "h2")),
            ToolbarOption::action("Subheading", binding.update("level", "h3")),
        ],
    )];
    options.extend(common(node, binding));
    options
}

fn paragraph(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = vec![ToolbarOption::submenu(
        "Align",
        vec![
            ToolbarOption::action("Left", binding.update("align", "left")),
            ToolbarOption::action("Center", binding.update("align", "center")),
            ToolbarOption::action("Right", binding.update("align", "right")),
        ],
    )];
    options.extend(common(node, binding));
    options
}

fn bullet_list(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = list_options(node, binding, "items", "bullet");
    options.extend(common(node, binding));
    options
}

fn skills(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = list_options(node, binding, "skills", "skill");
    options.extend(common(node, binding));
    options
}

fn entry(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let show_dates = node
        .get("showDates")
        .and_then(FieldValue::as_flag)
        .unwrap_or(true);

    let mut options = vec![
        ToolbarOption::action(
            "Add bullet list",
            binding.add_child(NodeTemplate::new(BULLET_LIST).field("items", Vec::<String>::new())),
        ),
        ToolbarOption::action(
            if show_dates { "Hide dates" } else { "Show dates" },
            binding.update("showDates", !show_dates),
        ),
    ];
    options.extend(common(node, binding));
    options
}

fn contact(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let visible = match node.get("visible") {
        Some(FieldValue::Map(map)) => map.clone(),
        _ => BTreeMap::new(),
    };

    let toggles = CONTACT_FIELDS
        .iter()
        .map(|(key, label)| {
            let shown = visible.get(*key).and_then(FieldValue::as_flag).unwrap_or(true);
            let patch = BTreeMap::from([(key.to_string(), FieldValue::Flag(!shown))]);
            ToolbarOption::action(
                format!("{} {}", if shown { "Hide" } else { "Show" }, label),
                binding.update("visible", FieldValue::Map(patch)),
            )
        })
        .collect();

    let mut options = vec![ToolbarOption::submenu("Fields", toggles)];
    options.extend(common(node, binding));
    options
}

/// "Add"/"Remove last" entries for a list-of-text field
fn list_options(node: &Node, binding: &NodeBinding, key: &str, noun: &str) -> Vec<ToolbarOption> {
    let items: Vec<String> = node
        .get(key)
        .and_then(FieldValue::as_list)
        .map(<[String]>::to_vec)
        .unwrap_or_default();

    let mut appended = items.clone();
    appended.push(String::new());
    let mut options = vec![ToolbarOption::action(
        format!("Add {}", noun),
        binding.update(key, appended),
    )];

    if let Some((_, rest)) = items.split_last() {
        options.push(ToolbarOption::action(
            format!("Remove last {}", noun),
            binding.update(key, rest.to_vec()),
        ));
    }
    options
}

/// Visibility, ordering and deletion, shared by every builtin type
fn common(node: &Node, binding: &NodeBinding) -> Vec<ToolbarOption> {
    let mut options = vec![ToolbarOption::action(
        if node.hidden { "Show" } else { "Hide" },
        binding.toggle_hidden(),
    )];

    if let Some(index) = binding.address().last_index() {
        if index > 0 {
            options.push(ToolbarOption::action("Move up", binding.move_to(index - 1)));
        }
        options.push(ToolbarOption::action("Move down", binding.move_to(index + 1)));
    }

    options.push(ToolbarOption::action("Delete", binding.remove()));
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::NodeAddress;
    use crate::mutations::Mutation;

    fn labels(options: &[ToolbarOption]) -> Vec<&str> {
        options.iter().map(ToolbarOption::label).collect()
    }

    #[test]
    fn test_all_builtins_registered() {
        let dispatcher = NodeDispatcher::new();
        assert_eq!(
            dispatcher.node_types(),
            vec![BULLET_LIST, CONTACT, ENTRY, HEADING, PARAGRAPH, SECTION, SKILLS]
        );
    }

    #[test]
    fn test_common_options_for_first_child() {
        let node = Node::new(PARAGRAPH);
        let binding = NodeBinding::new(NodeAddress::from([0, 0]), node.uuid());
        let options = paragraph(&node, &binding);
        assert_eq!(labels(&options), vec!["Align", "Hide", "Move down", "Delete"]);
    }

    #[test]
    fn test_hidden_node_offers_show() {
        let mut node = Node::new(HEADING);
        node.hidden = true;
        let binding = NodeBinding::new(NodeAddress::from([0, 2]), node.uuid());
        let options = heading(&node, &binding);
        assert_eq!(
            labels(&options),
            vec!["Level", "Show", "Move up", "Move down", "Delete"]
        );
    }

    #[test]
    fn test_list_options_use_current_items() {
        let node = Node::new(BULLET_LIST).field("items", vec!["Shipped v1".to_string()]);
        let binding = NodeBinding::new(NodeAddress::from([0, 0, 0]), node.uuid());
        let options = bullet_list(&node, &binding);

        let add = ToolbarOption::find(&options, &["Add bullet"])
            .and_then(ToolbarOption::as_action)
            .unwrap();
        match add.mutation() {
            Mutation::UpdateField { key, value, .. } => {
                assert_eq!(key, "items");
                assert_eq!(value.as_list().unwrap(), ["Shipped v1", ""]);
            }
            other => panic!("Unexpected mutation: {:?}", other),
        }

        let remove = ToolbarOption::find(&options, &["Remove last bullet"])
            .and_then(ToolbarOption::as_action)
            .unwrap();
        match remove.mutation() {
            Mutation::UpdateField { value, .. } => assert!(value.as_list().unwrap().is_empty()),
            other => panic!("Unexpected mutation: {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_has_no_remove() {
        let node = Node::new(SKILLS);
        let binding = NodeBinding::new(NodeAddress::from([1]), node.uuid());
        let options = skills(&node, &binding);
        assert!(ToolbarOption::find(&options, &["Add skill"]).is_some());
        assert!(ToolbarOption::find(&options, &["Remove last skill"]).is_none());
    }

    #[test]
    fn test_entry_date_toggle_reflects_state() {
        let node = Node::new(ENTRY).field("showDates", false);
        let binding = NodeBinding::new(NodeAddress::from([0, 0]), node.uuid());
        let options = entry(&node, &binding);
        assert!(ToolbarOption::find(&options, &["Show dates"]).is_some());
    }

    #[test]
    fn test_contact_toggles_patch_visible_map() {
        let visible = FieldValue::Map(BTreeMap::from([("phone".to_string(), FieldValue::Flag(false))]));
        let mut node = Node::new(CONTACT);
        node.data.insert("visible".to_string(), visible);
        let binding = NodeBinding::new(NodeAddress::from([0]), node.uuid());
        let options = contact(&node, &binding);

        assert!(ToolbarOption::find(&options, &["Fields", "Hide Email"]).is_some());
        let show_phone = ToolbarOption::find(&options, &["Fields", "Show Phone"])
            .and_then(ToolbarOption::as_action)
            .unwrap();
        match show_phone.mutation() {
            Mutation::UpdateField { key, value, .. } => {
                assert_eq!(key, "visible");
                let FieldValue::Map(patch) = value else {
                    panic!("Expected map patch");
                };
                assert_eq!(patch.len(), 1);
                assert_eq!(patch["phone"], FieldValue::Flag(true));
            }
            other => panic!("Unexpected mutation: {:?}", other),
        }
    }
}
