use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use vellum_editor::toolbar::{BULLET_LIST, CONTACT, ENTRY, HEADING, SECTION, SKILLS};
use vellum_editor::{DocumentRecord, EditorConfig, Node, NodeStore, DEFAULT_CONFIG_NAME};

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Directory to create the resume in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Document file name
    #[arg(short, long, default_value = "resume.json")]
    pub name: String,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs) -> Result<()> {
    let document_path = args.dir.join(&args.name);
    let config_path = args.dir.join(DEFAULT_CONFIG_NAME);

    if document_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            args.name.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing resume...".bright_blue().bold());

    if !args.dir.exists() {
        fs::create_dir_all(&args.dir)?;
        println!("  {} Created {}/", "✓".green(), args.dir.display());
    }

    let store = NodeStore::from_roots(starter())?;
    DocumentRecord::from_store(&store).save(&document_path)?;
    println!("  {} Created {}", "✓".green(), args.name);

    if !config_path.exists() || args.force {
        let config_json = serde_json::to_string_pretty(&EditorConfig::default())?;
        fs::write(&config_path, config_json)?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    println!();
    println!("{}", "✨ Resume initialized!".green().bold());
    println!();
    println!("Next steps:");
    let document = document_path.display();
    println!("  1. Inspect the tree: {}", format!("vellum tree {}", document).bright_white());
    println!("  2. List actions:     {}", format!("vellum toolbar {} 1", document).bright_white());

    Ok(())
}

fn starter() -> Vec<Node> {
    vec![
        Node::new(HEADING)
            .field("text", "Your Name")
            .field("level", "h1"),
        Node::new(CONTACT)
            .field("email", "you@example.com")
            .field("phone", "")
            .field("website", ""),
        Node::new(SECTION)
            .field("title", "Experience")
            .child(
                Node::new(ENTRY)
                    .field("title", "Job title")
                    .field("subtitle", "Company")
                    .field("date", "2024 - present")
                    .child(Node::new(BULLET_LIST).field("items", vec!["What you shipped".to_string()])),
            ),
        Node::new(SECTION)
            .field("title", "Skills")
            .child(Node::new(SKILLS).field("skills", vec!["Rust".to_string()])),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_has_toolbar_for_every_node() {
        let store = NodeStore::from_roots(starter()).unwrap();
        let session = vellum_editor::EditorSession::new(store);

        for view in session.views() {
            assert!(
                !session.toolbar_for(&view.address).unwrap().is_empty(),
                "No toolbar for {}",
                view.node_type
            );
        }
    }
}
