pub mod edit;
pub mod init;
pub mod toolbar;
pub mod tree;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use toolbar::{toolbar, ToolbarArgs};
pub use tree::{tree, TreeArgs};

use anyhow::{Context, Result};
use std::path::Path;
use vellum_editor::{DocumentRecord, EditorConfig, EditorSession, NodeAddress};

/// Open a document with the config from `config_dir` (or the document's directory)
pub(crate) fn open_session(document: &Path, config_dir: Option<&Path>) -> Result<EditorSession> {
    let dir = match config_dir {
        Some(dir) => dir,
        None => document.parent().unwrap_or_else(|| Path::new(".")),
    };
    let config = EditorConfig::load(dir)
        .with_context(|| format!("Failed to load config from {}", dir.display()))?;
    let record = DocumentRecord::load(document)
        .with_context(|| format!("Failed to read {}", document.display()))?;

    tracing::debug!(document = %document.display(), mode = ?config.mode, "Opening document");
    EditorSession::from_record(record, &config)
        .with_context(|| format!("Invalid document {}", document.display()))
}

pub(crate) fn parse_address(value: &str) -> Result<NodeAddress> {
    value
        .parse::<NodeAddress>()
        .with_context(|| format!("Invalid address '{}', expected dotted indices like 0.1", value))
}
