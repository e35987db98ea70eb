use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::prompt::PromptSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub prompt: PromptSettings,
    /// Directory relative resource paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Locations of the dataset files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// CSV mapping raw dataset ids to canonical sense ids.
    pub senses: String,
    /// JSON Lines file of sense definitions.
    pub definitions: String,
    /// Tab-separated relation files, ingested in this order.
    pub relations: Vec<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("glossgraph");
        Ok(config_dir)
    }

    /// Get the default configuration file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            anyhow::bail!(
                "Configuration file not found at {}. Run 'glossgraph init' first.",
                config_path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file at {}", config_path.display()))?;

        config.base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.expand_env_vars();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.resources.relations.is_empty() {
            anyhow::bail!("[resources] relations must list at least one file");
        }
        Ok(())
    }

    /// Expand environment variables in resource paths
    fn expand_env_vars(&mut self) {
        self.resources.senses = expand_env_var(&self.resources.senses);
        self.resources.definitions = expand_env_var(&self.resources.definitions);
        for path in &mut self.resources.relations {
            *path = expand_env_var(path);
        }
    }

    pub fn senses_path(&self) -> PathBuf {
        self.resolve(&self.resources.senses)
    }

    pub fn definitions_path(&self) -> PathBuf {
        self.resolve(&self.resources.definitions)
    }

    pub fn relation_paths(&self) -> Vec<PathBuf> {
        self.resources
            .relations
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }

    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Configuration template written by `glossgraph init`.
    pub fn template(data_dir: &Path) -> Self {
        let at = |name: &str| data_dir.join(name).to_string_lossy().to_string();
        Self {
            resources: ResourcesConfig {
                senses: at("storage/senses.csv"),
                definitions: at("storage/plwn_definitions.jsonl"),
                relations: vec![
                    at("relacje-jednostek/relacje-p1-fixed.txt"),
                    at("relacje-jednostek/relacje-p2-fixed.txt"),
                ],
            },
            prompt: PromptSettings::default(),
            base_dir: PathBuf::new(),
        }
    }
}

/// Expand environment variable references like ${VAR_NAME}
fn expand_env_var(value: &str) -> String {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).unwrap_or_default()
    } else if let Some(var_name) = value.strip_prefix('$') {
        std::env::var(var_name).unwrap_or_default()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [resources]
        senses = "storage/senses.csv"
        definitions = "storage/plwn_definitions.jsonl"
        relations = ["rels/p1.txt", "rels/p2.txt"]
    "#;

    #[test]
    fn test_expand_env_var_braces() {
        // SAFETY: test is single-threaded
        unsafe { std::env::set_var("GLOSSGRAPH_TEST_VAR_A", "value_a") };
        assert_eq!(expand_env_var("${GLOSSGRAPH_TEST_VAR_A}"), "value_a");
        unsafe { std::env::remove_var("GLOSSGRAPH_TEST_VAR_A") };
    }

    #[test]
    fn test_expand_env_var_dollar() {
        unsafe { std::env::set_var("GLOSSGRAPH_TEST_VAR_B", "value_b") };
        assert_eq!(expand_env_var("$GLOSSGRAPH_TEST_VAR_B"), "value_b");
        unsafe { std::env::remove_var("GLOSSGRAPH_TEST_VAR_B") };
    }

    #[test]
    fn test_expand_env_var_literal() {
        assert_eq!(expand_env_var("storage/senses.csv"), "storage/senses.csv");
    }

    #[test]
    fn test_expand_env_var_missing_returns_empty() {
        assert_eq!(expand_env_var("${DEFINITELY_NOT_SET_XYZ_123}"), "");
    }

    #[test]
    fn test_config_default_prompt_settings() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.prompt, PromptSettings::default());
        assert_eq!(config.resources.relations.len(), 2);
    }

    #[test]
    fn test_config_prompt_overrides() {
        let toml_str = format!("{}\n[prompt]\nincoming_limit = 3\nsuffix_len = 2\n", MINIMAL);
        let config = Config::from_toml(&toml_str).unwrap();
        assert_eq!(config.prompt.incoming_limit, 3);
        assert_eq!(config.prompt.suffix_len, 2);
        assert_eq!(config.prompt.outgoing_limit, 10);
    }

    #[test]
    fn test_config_requires_relations() {
        let toml_str = r#"
            [resources]
            senses = "s.csv"
            definitions = "d.jsonl"
            relations = []
        "#;
        assert!(Config::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_base_dir() {
        let mut config = Config::from_toml(MINIMAL).unwrap();
        config.base_dir = PathBuf::from("/data/plwn");
        assert_eq!(config.senses_path(), PathBuf::from("/data/plwn/storage/senses.csv"));
        assert_eq!(
            config.relation_paths(),
            vec![PathBuf::from("/data/plwn/rels/p1.txt"), PathBuf::from("/data/plwn/rels/p2.txt")]
        );
    }

    #[test]
    fn test_template_roundtrip_toml() {
        let config = Config::template(Path::new("/data/plwn"));
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&serialized).unwrap();
        assert_eq!(parsed.resources.relations.len(), 2);
        assert_eq!(parsed.resources.senses, "/data/plwn/storage/senses.csv");
        assert_eq!(parsed.prompt, PromptSettings::default());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("glossgraph init"));
    }
}
