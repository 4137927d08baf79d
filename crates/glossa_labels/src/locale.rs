use std::collections::{HashMap, VecDeque};

use crate::config::LocalesConfig;
use crate::label::DEFAULT_LANGUAGE;

/// Registry of the language keys a resolver may activate.
#[cfg_attr(test, mockall::automock)]
pub trait LocaleCatalog: Send + Sync {
    /// Whether `language` is a supported language key.
    fn is_known(&self, language: &str) -> bool;

    /// All ancestors of `language`, nearest first, without `"default"`.
    fn dependencies_of(&self, language: &str) -> Vec<String>;
}

/// Language keys shipped with the catalog. These are not ISO codes; local
/// variants use an underscore suffix (`pt_BR`).
const BUILTIN_LOCALES: &[&str] = &[
    DEFAULT_LANGUAGE,
    "af",
    "ar",
    "bg",
    "bs",
    "ca",
    "cs",
    "da",
    "de",
    "de_AT",
    "de_CH",
    "el",
    "eo",
    "es",
    "et",
    "eu",
    "fa",
    "fi",
    "fo",
    "fr",
    "fr_CA",
    "gl",
    "he",
    "hi",
    "hr",
    "hu",
    "is",
    "it",
    "ja",
    "ka",
    "kl",
    "km",
    "ko",
    "lt",
    "lv",
    "mk",
    "ms",
    "nl",
    "no",
    "pl",
    "pt",
    "pt_BR",
    "ro",
    "ru",
    "sk",
    "sl",
    "sq",
    "sr",
    "sv",
    "th",
    "tr",
    "uk",
    "vi",
    "zh",
    "zh_CN",
    "zh_HK",
];

const BUILTIN_DEPENDENCIES: &[(&str, &[&str])] = &[
    ("de_AT", &["de"]),
    ("de_CH", &["de"]),
    ("fr_CA", &["fr"]),
    ("pt_BR", &["pt"]),
    ("zh_CN", &["zh"]),
    ("zh_HK", &["zh"]),
];

/// Stock [`LocaleCatalog`] backed by an in-memory table.
#[derive(Clone, Debug)]
pub struct Locales {
    known: Vec<String>,
    dependencies: HashMap<String, Vec<String>>,
}

impl Default for Locales {
    fn default() -> Self {
        Self::new()
    }
}

impl Locales {
    /// Catalog with the built-in language table.
    pub fn new() -> Self {
        let mut locales = Self::empty();
        for key in BUILTIN_LOCALES {
            locales.add_locale(*key);
        }
        for (key, deps) in BUILTIN_DEPENDENCIES {
            locales.set_dependencies(*key, deps.iter().map(|d| d.to_string()).collect());
        }
        locales
    }

    /// Catalog that only knows the base language.
    pub fn empty() -> Self {
        Self {
            known: vec![DEFAULT_LANGUAGE.to_string()],
            dependencies: HashMap::new(),
        }
    }

    /// Built-in table extended with configured locales and dependencies.
    pub fn from_config(config: &LocalesConfig) -> Self {
        let mut locales = Self::new();
        for key in &config.extra {
            locales.add_locale(key.as_str());
        }
        for (key, deps) in &config.dependencies {
            locales.set_dependencies(key.as_str(), deps.clone());
        }
        locales
    }

    pub fn add_locale(&mut self, language: impl Into<String>) {
        let language = language.into();
        if language.is_empty() || self.known.contains(&language) {
            return;
        }
        self.known.push(language);
    }

    /// Declare the direct parents of `language`, registering it if needed.
    pub fn set_dependencies(&mut self, language: impl Into<String>, parents: Vec<String>) {
        let language = language.into();
        self.add_locale(language.clone());
        self.dependencies.insert(language, parents);
    }

    pub fn with_dependencies(mut self, language: &str, parents: &[&str]) -> Self {
        self.set_dependencies(language, parents.iter().map(|p| p.to_string()).collect());
        self
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(|k| k.as_str())
    }
}

impl LocaleCatalog for Locales {
    fn is_known(&self, language: &str) -> bool {
        self.known.iter().any(|k| k == language)
    }

    fn dependencies_of(&self, language: &str) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let mut queue: VecDeque<&str> = self
            .dependencies
            .get(language)
            .map(|d| d.iter().map(|s| s.as_str()).collect())
            .unwrap_or_default();

        while let Some(dep) = queue.pop_front() {
            // Cycles and repeated ancestors are dropped, not followed.
            if dep == DEFAULT_LANGUAGE || dep == language || out.iter().any(|o| o == dep) {
                continue;
            }
            out.push(dep.to_string());
            if let Some(next) = self.dependencies.get(dep) {
                queue.extend(next.iter().map(|s| s.as_str()));
            }
        }
        out
    }
}
