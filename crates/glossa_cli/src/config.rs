//! Glossa configuration file handling

use anyhow::{Context, Result};
use glossa_labels::LabelsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "glossa.toml";

/// Top-level Glossa configuration (glossa.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GlossaConfig {
    #[serde(default)]
    pub labels: LabelsConfig,
}

impl GlossaConfig {
    /// Load an explicit config file, or `./glossa.toml` if present.
    ///
    /// Without either, the built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_path = PathBuf::from(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::load_from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load a config file; relative label paths are taken relative to it.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("No config file found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let mut config: GlossaConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if let Some(dir) = path.parent() {
            config.rebase(dir);
        }
        Ok(config)
    }

    fn rebase(&mut self, dir: &Path) {
        let labels = &mut self.labels;
        if labels.base_dir.is_relative() {
            labels.base_dir = dir.join(&labels.base_dir);
        }
        for root in labels.extensions.values_mut() {
            if root.is_relative() {
                *root = dir.join(&*root);
            }
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn load_rebases_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
[labels]
language = "de"
base_dir = "site"

[labels.extensions]
core = "vendor/core"
abs = "/opt/labels"

[labels.locales.dependencies]
de_LU = ["de"]
"#,
        )
        .unwrap();

        let config = GlossaConfig::load(Some(&path)).unwrap();
        assert_eq!(config.labels.language, "de");
        assert_eq!(config.labels.base_dir, dir.path().join("site"));
        assert_eq!(
            config.labels.extensions["core"],
            dir.path().join("vendor/core")
        );
        assert_eq!(config.labels.extensions["abs"], PathBuf::from("/opt/labels"));
        assert_eq!(config.labels.locales.dependencies["de_LU"], vec!["de"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GlossaConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn toml_round_trip_keeps_defaults() {
        let config = GlossaConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: GlossaConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
