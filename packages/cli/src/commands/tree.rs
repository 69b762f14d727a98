use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use vellum_editor::{EditorSession, FieldValue, Node, NodeView};

#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Resume document (JSON record)
    pub document: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn tree(args: TreeArgs, config_dir: Option<&Path>) -> Result<()> {
    let session = open_session(&args.document, config_dir)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&session.views())?),
        _ => {
            for view in session.views() {
                println!("{}", render_line(&session, &view));
            }
            println!();
            println!("   {} nodes", session.ids().len());
        }
    }

    Ok(())
}

fn render_line(session: &EditorSession, view: &NodeView) -> String {
    let indent = "  ".repeat(view.address.depth().saturating_sub(1));
    let summary = session.resolve(&view.address).and_then(summary).unwrap_or_default();

    let mut line = format!(
        "{}{} {} {}",
        indent,
        format!("[{}]", view.address).dimmed(),
        view.node_type.cyan(),
        summary
    );
    line.push_str(&format!(" {}", view.uuid.to_string().dimmed()));
    if view.hidden {
        line.push_str(&format!(" {}", "(hidden)".yellow()));
    }
    line
}

/// First text field worth showing for a node
fn summary(node: &Node) -> Option<String> {
    ["title", "text", "email"]
        .iter()
        .find_map(|key| node.text(key))
        .map(|text| format!("\"{}\"", text))
        .or_else(|| {
            node.data.values().find_map(|value| match value {
                FieldValue::List(items) => Some(format!("{} items", items.len())),
                _ => None,
            })
        })
}
