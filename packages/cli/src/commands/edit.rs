use super::{open_session, parse_address};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use vellum_editor::{
    EditorError, EditorSession, FieldValue, NodeAddress, NodeTarget, NodeUuid, ToolbarOption,
};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// Resume document (JSON record)
    pub document: PathBuf,

    /// Node address, dotted (e.g. 2.0)
    pub address: String,

    /// Set a field: key=value (value parsed as JSON, plain text otherwise)
    #[arg(long, conflicts_with_all = ["toggle_hidden", "action"])]
    pub set: Option<String>,

    /// Flip the node's hidden flag
    #[arg(long, conflicts_with = "action")]
    pub toggle_hidden: bool,

    /// Run a toolbar action by label path, e.g. "Level/Heading"
    #[arg(long)]
    pub action: Option<String>,

    /// Uuid the node at the address must have (from `vellum tree`); refuses
    /// the edit if the document changed underneath
    #[arg(long)]
    pub expect: Option<String>,

    /// Print the result without writing the document
    #[arg(long)]
    pub dry_run: bool,
}

pub fn edit(args: EditArgs, config_dir: Option<&Path>) -> Result<()> {
    let mut session = open_session(&args.document, config_dir)?;
    let address = parse_address(&args.address)?;

    let target = pin_target(&session, &address, args.expect.as_deref())?;

    let result = if let Some(assignment) = &args.set {
        let (key, value) = parse_assignment(assignment)?;
        session.update(target, &key, value)?
    } else if args.toggle_hidden {
        session.toggle_hidden(target)?
    } else if let Some(path) = &args.action {
        let options = session.toolbar_for(&address)?;
        let labels: Vec<&str> = path.split('/').map(str::trim).collect();
        let action = ToolbarOption::find(&options, &labels)
            .and_then(ToolbarOption::as_action)
            .ok_or_else(|| anyhow!("No toolbar action '{}' at [{}]", path, address))?
            .clone();
        session.invoke(&action)?
    } else {
        return Err(anyhow!("Nothing to do: pass --set, --toggle-hidden or --action"));
    };

    let record = session.to_record();
    if args.dry_run {
        println!("{}", record.to_json()?);
    } else {
        record
            .save(&args.document)
            .with_context(|| format!("Failed to write {}", args.document.display()))?;
    }

    let at = result
        .address
        .map(|a| format!("[{}]", a))
        .unwrap_or_else(|| "(removed)".to_string());
    println!("{} revision {} {}", "✓".green(), result.revision, at.dimmed());
    Ok(())
}

/// Pin the node at `address`, checking it against the uuid the caller expects
fn pin_target(
    session: &EditorSession,
    address: &NodeAddress,
    expect: Option<&str>,
) -> Result<NodeTarget> {
    let target = session.pin(address)?;
    if let (Some(expected), NodeTarget::Pinned { uuid, .. }) = (expect, &target) {
        let expected = expected
            .parse::<NodeUuid>()
            .with_context(|| format!("Invalid uuid '{}'", expected))?;
        if *uuid != expected {
            return Err(EditorError::StaleAddress {
                address: address.clone(),
                expected,
            }
            .into());
        }
    }
    Ok(target)
}

fn parse_assignment(assignment: &str) -> Result<(String, FieldValue)> {
    let (key, raw) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected key=value, got '{}'", assignment))?;
    let value = serde_json::from_str::<FieldValue>(raw).unwrap_or_else(|_| FieldValue::text(raw));
    Ok((key.trim().to_string(), value))
}
