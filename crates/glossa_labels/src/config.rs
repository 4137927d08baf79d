//! Serde-facing configuration for the label service.
//!
//! Hosts embed these tables in their own config files (the `glossa` CLI reads
//! them from `glossa.toml`).

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::label::DEFAULT_LANGUAGE;

/// Label resolution settings.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct LabelsConfig {
    /// Language activated for new resolvers
    #[serde(default = "default_language")]
    pub language: String,
    /// Append the looked-up reference to every resolved label
    #[serde(default)]
    pub debug: bool,
    /// Directory that plain (non-`EXT:`) file locators are relative to
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,
    /// Extension name -> directory, for `EXT:<name>/...` locators
    #[serde(default)]
    pub extensions: BTreeMap<String, PathBuf>,
    /// Bound the runtime cache to this many entries (unbounded if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_capacity: Option<usize>,
    /// Append to the dependency chain on re-activation instead of replacing it
    #[serde(default)]
    pub accumulate_dependencies: bool,
    #[serde(default)]
    pub locales: LocalesConfig,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            debug: false,
            base_dir: default_base_dir(),
            extensions: BTreeMap::new(),
            cache_capacity: None,
            accumulate_dependencies: false,
            locales: LocalesConfig::default(),
        }
    }
}

/// Additions to the built-in locale table.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct LocalesConfig {
    /// Extra language keys without dependencies
    #[serde(default)]
    pub extra: Vec<String>,
    /// Language key -> direct parent languages
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
}
