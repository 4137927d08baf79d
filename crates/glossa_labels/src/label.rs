use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// The base language. Its section always holds the untranslated labels.
pub const DEFAULT_LANGUAGE: &str = "default";

/// Marker that turns a string into a label reference.
pub const REFERENCE_PREFIX: &str = "LLL:";

/// Marker for label files located inside a named extension.
pub const EXTENSION_PREFIX: &str = "EXT:";

/// A label value as it appears in a label file.
///
/// Simple catalogs store the text directly. Richer catalogs store a list of
/// translation units and the text lives in the first unit's `target`. Both
/// collapse to the same string once inserted into a [`LabelSection`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawLabelValue")]
pub enum LabelValue {
    Plain(String),
    Indirect(String),
}

impl LabelValue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Indirect(s) => s,
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Plain(s) | Self::Indirect(s) => s,
        }
    }
}

impl From<String> for LabelValue {
    fn from(v: String) -> Self {
        Self::Plain(v)
    }
}

impl From<&str> for LabelValue {
    fn from(v: &str) -> Self {
        Self::Plain(v.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabelValue {
    Plain(String),
    Units(Vec<TranslationUnit>),
}

#[derive(Deserialize)]
struct TranslationUnit {
    target: String,
}

impl TryFrom<RawLabelValue> for LabelValue {
    type Error = String;

    fn try_from(raw: RawLabelValue) -> Result<Self, Self::Error> {
        match raw {
            RawLabelValue::Plain(s) => Ok(Self::Plain(s)),
            RawLabelValue::Units(units) => units
                .into_iter()
                .next()
                .map(|unit| Self::Indirect(unit.target))
                .ok_or_else(|| "translation unit list is empty".to_string()),
        }
    }
}

/// Label key -> localized text, for a single language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSection {
    entries: BTreeMap<String, String>,
}

impl LabelSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. Indirect values are flattened to their text here, so
    /// lookups never see the original shape.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LabelValue>) {
        self.entries
            .insert(key.into(), value.into().into_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Merge `other` onto `self`; values from `other` win on collision.
    pub fn override_with(&mut self, other: &LabelSection) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LabelSection
where
    K: Into<String>,
    V: Into<LabelValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut section = Self::new();
        for (k, v) in iter {
            section.insert(k, v);
        }
        section
    }
}

impl<'a> IntoIterator for &'a LabelSection {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Language key -> [`LabelSection`].
///
/// A mapping produced by a loader holds the `"default"` section plus at most
/// the section of the requested language. A merged mapping holds `"default"`
/// and the active language with fallback already applied.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelMapping {
    sections: BTreeMap<String, LabelSection>,
}

impl LabelMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, language: impl Into<String>, section: LabelSection) -> Self {
        self.set_section(language, section);
        self
    }

    pub fn section(&self, language: &str) -> Option<&LabelSection> {
        self.sections.get(language)
    }

    pub fn section_mut(&mut self, language: &str) -> Option<&mut LabelSection> {
        self.sections.get_mut(language)
    }

    pub fn set_section(&mut self, language: impl Into<String>, section: LabelSection) {
        self.sections.insert(language.into(), section);
    }

    pub fn remove_section(&mut self, language: &str) -> Option<LabelSection> {
        self.sections.remove(language)
    }

    pub fn contains_section(&self, language: &str) -> bool {
        self.sections.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|k| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Recursive replace-merge: sections missing from `self` are copied,
    /// sections present in both are merged key by key with `other` winning.
    pub fn replace_recursive(&mut self, other: &LabelMapping) {
        for (language, section) in &other.sections {
            self.sections
                .entry(language.clone())
                .or_default()
                .override_with(section);
        }
    }

    /// Look up `key` for `language`, falling back to the base language.
    ///
    /// Returns `None` when neither section has the key. Callers that follow
    /// the label contract turn that into an empty string.
    pub fn lookup(&self, language: &str, key: &str) -> Option<&str> {
        self.sections
            .get(language)
            .and_then(|s| s.get(key))
            .or_else(|| {
                self.sections
                    .get(DEFAULT_LANGUAGE)
                    .and_then(|s| s.get(key))
            })
    }
}

/// A parsed `LLL:[EXT:]<file>:<key>` reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelReference {
    /// File locator, including its `EXT:` prefix when it had one.
    pub file: String,
    /// Label key; empty when the reference names no key.
    pub key: String,
}

impl LabelReference {
    /// Whether `input` would be treated as a reference rather than literal text.
    pub fn is_reference(input: &str) -> bool {
        input.trim().starts_with(REFERENCE_PREFIX)
    }

    /// Parse a reference. Returns `None` for literal (non-`LLL:`) input.
    ///
    /// The remainder after the markers is split on the first `:` only, so
    /// label keys may themselves contain colons.
    pub fn parse(input: &str) -> Option<Self> {
        let rest = input.trim().strip_prefix(REFERENCE_PREFIX)?.trim();

        let (prefix, rest) = match rest.strip_prefix(EXTENSION_PREFIX) {
            Some(r) => (EXTENSION_PREFIX, r.trim()),
            None => ("", rest),
        };

        let (file, key) = rest.split_once(':').unwrap_or((rest, ""));
        Some(Self {
            file: format!("{prefix}{file}"),
            key: key.to_string(),
        })
    }

    /// Split an `EXT:<extension>/<path>` locator into its extension name and path.
    pub fn split_extension_path(file: &str) -> Option<(&str, &str)> {
        let rest = file.strip_prefix(EXTENSION_PREFIX)?;
        Some(rest.split_once('/').unwrap_or((rest, "")))
    }
}

impl fmt::Display for LabelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{REFERENCE_PREFIX}{}:{}", self.file, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_extension_reference() {
        let r = LabelReference::parse("LLL:EXT:core/Resources/locallang.yaml:labels.depth_0")
            .unwrap();
        assert_eq!(r.file, "EXT:core/Resources/locallang.yaml");
        assert_eq!(r.key, "labels.depth_0");
        assert_eq!(
            r.to_string(),
            "LLL:EXT:core/Resources/locallang.yaml:labels.depth_0"
        );
    }

    #[test]
    fn parse_trims_and_handles_missing_key() {
        let r = LabelReference::parse("  LLL:  lang/site.yaml  ").unwrap();
        assert_eq!(r.file, "lang/site.yaml");
        assert_eq!(r.key, "");
    }

    #[test]
    fn parse_splits_on_first_colon_only() {
        let r = LabelReference::parse("LLL:EXT:foo/bar.yaml:a:b").unwrap();
        assert_eq!(r.file, "EXT:foo/bar.yaml");
        assert_eq!(r.key, "a:b");
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert!(LabelReference::parse("lll:foo.yaml:x").is_none());
        assert!(LabelReference::parse("Save").is_none());
        assert!(LabelReference::is_reference("\t LLL:foo.yaml:x"));
    }

    #[test]
    fn split_extension_path() {
        assert_eq!(
            LabelReference::split_extension_path("EXT:foo/lang/bar.yaml"),
            Some(("foo", "lang/bar.yaml"))
        );
        assert_eq!(LabelReference::split_extension_path("foo/bar.yaml"), None);
    }

    #[test]
    fn indirect_values_deserialize_from_translation_units() {
        let v: LabelValue = serde_yaml::from_str("- target: Speichern\n  source: Save\n").unwrap();
        assert_eq!(v, LabelValue::Indirect("Speichern".to_string()));

        let v: LabelValue = serde_yaml::from_str("Speichern").unwrap();
        assert_eq!(v, LabelValue::Plain("Speichern".to_string()));

        assert!(serde_yaml::from_str::<LabelValue>("[]").is_err());
    }

    #[test]
    fn section_normalizes_value_shapes() {
        let mut section = LabelSection::new();
        section.insert("a", LabelValue::Plain("Save".into()));
        section.insert("b", LabelValue::Indirect("Save".into()));
        assert_eq!(section.get("a"), section.get("b"));
    }

    #[test]
    fn replace_recursive_overrides_per_key() {
        let mut acc = LabelMapping::new().with_section(
            DEFAULT_LANGUAGE,
            [("save", "Save"), ("close", "Close")].into_iter().collect(),
        );
        let incoming = LabelMapping::new()
            .with_section(DEFAULT_LANGUAGE, [("save", "Store")].into_iter().collect())
            .with_section("de", [("save", "Speichern")].into_iter().collect());

        acc.replace_recursive(&incoming);

        assert_eq!(acc.lookup(DEFAULT_LANGUAGE, "save"), Some("Store"));
        assert_eq!(acc.lookup(DEFAULT_LANGUAGE, "close"), Some("Close"));
        assert_eq!(acc.lookup("de", "save"), Some("Speichern"));
        // falls back to the base section
        assert_eq!(acc.lookup("de", "close"), Some("Close"));
        assert_eq!(acc.lookup("de", "missing"), None);
    }
}
