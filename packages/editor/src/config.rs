use crate::errors::EditorResult;
use crate::selection::InteractionMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "vellum.config.json";

/// Editor session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// `interactive` for editing, `static` for print/export rendering
    #[serde(default)]
    pub mode: InteractionMode,

    /// Register toolbar resolvers for the builtin resume node types
    #[serde(default = "default_builtin_toolbar")]
    pub builtin_toolbar: bool,
}

fn default_builtin_toolbar() -> bool {
    true
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults
    pub fn load(dir: &Path) -> EditorResult<Self> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Config for print/export rendering
    pub fn static_render() -> Self {
        Self {
            mode: InteractionMode::Static,
            ..Default::default()
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            mode: InteractionMode::Interactive,
            builtin_toolbar: default_builtin_toolbar(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeUuid;

    #[test]
    fn test_parse_config() {
        let json = r#"{ "mode": "static", "builtinToolbar": false }"#;

        let config = EditorConfig::from_json(json).unwrap();
        assert_eq!(config.mode, InteractionMode::Static);
        assert!(!config.builtin_toolbar);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.mode, InteractionMode::Interactive);
        assert!(config.builtin_toolbar);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("vellum-config-{}", NodeUuid::new()));
        let config = EditorConfig::load(&dir).unwrap();
        assert_eq!(config, EditorConfig::default());
    }
}
