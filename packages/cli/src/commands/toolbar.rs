use super::{open_session, parse_address};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use vellum_editor::ToolbarOption;

#[derive(Args, Debug)]
pub struct ToolbarArgs {
    /// Resume document (JSON record)
    pub document: PathBuf,

    /// Node address, dotted (e.g. 2.0)
    pub address: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn toolbar(args: ToolbarArgs, config_dir: Option<&Path>) -> Result<()> {
    let session = open_session(&args.document, config_dir)?;
    let address = parse_address(&args.address)?;
    let options = session.toolbar_for(&address)?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&options)?);
        return Ok(());
    }

    if options.is_empty() {
        println!("   {}", "No actions for this node".dimmed());
        return Ok(());
    }
    print_options(&options, 1);
    Ok(())
}

fn print_options(options: &[ToolbarOption], depth: usize) {
    let indent = "  ".repeat(depth);
    for option in options {
        match option {
            ToolbarOption::Action { label, .. } => println!("{}• {}", indent, label),
            ToolbarOption::Submenu { label, submenu } => {
                println!("{}▸ {}", indent, label.bold());
                print_options(submenu, depth + 1);
            }
        }
    }
}
