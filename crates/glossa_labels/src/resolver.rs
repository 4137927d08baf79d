use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::cache::{file_cache_key, label_cache_key, CacheValue, RuntimeCache};
use crate::label::{
    LabelMapping, LabelReference, LabelSection, DEFAULT_LANGUAGE, REFERENCE_PREFIX,
};
use crate::loader::LabelFileLoader;
use crate::locale::LocaleCatalog;

/// Construction-time switches for a [`LabelResolver`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Append the looked-up reference (or key) to every resolved label.
    pub debug: bool,
    /// Append to the dependency chain on re-activation instead of replacing it.
    pub accumulate_dependencies: bool,
}

/// Resolves `LLL:` label references for one active language.
///
/// A resolver serves a single request or session. It owns its dependency
/// chain and its label accumulator; the locale catalog, the file loader and
/// the runtime cache are shared collaborators.
pub struct LabelResolver {
    language: String,
    options: ResolverOptions,
    dependencies: Vec<String>,
    labels: LabelMapping,
    locales: Arc<dyn LocaleCatalog>,
    loader: Arc<dyn LabelFileLoader>,
    cache: Arc<dyn RuntimeCache>,
}

impl LabelResolver {
    /// Create a resolver on the base language with an empty dependency chain.
    pub fn new(
        locales: Arc<dyn LocaleCatalog>,
        loader: Arc<dyn LabelFileLoader>,
        cache: Arc<dyn RuntimeCache>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            options,
            dependencies: Vec::new(),
            labels: LabelMapping::new(),
            locales,
            loader,
            cache,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// The dependency chain, active language first.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    pub fn is_debug(&self) -> bool {
        self.options.debug
    }

    /// Labels merged in through [`LabelResolver::include_file`].
    pub fn labels(&self) -> &LabelMapping {
        &self.labels
    }

    /// Make `language` the active language.
    ///
    /// Unknown language keys are ignored and leave the resolver untouched;
    /// callers keep working in the previous language.
    pub fn activate_language(&mut self, language: &str) {
        if !self.locales.is_known(language) {
            debug!(language, "ignoring unknown language key");
            return;
        }

        if !self.options.accumulate_dependencies {
            self.dependencies.clear();
        }
        self.language = language.to_string();
        self.dependencies.push(language.to_string());
        self.dependencies.extend(self.locales.dependencies_of(language));

        debug!(
            language,
            chain = ?self.dependencies,
            "activated label language"
        );
    }

    /// Resolve a label reference such as `LLL:EXT:core/lang/labels.yaml:labels.save`.
    ///
    /// Anything that is not an `LLL:` reference is returned unchanged. Missing
    /// files and missing keys resolve to an empty string.
    pub fn resolve(&self, input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let trimmed = input.trim();
        if !trimmed.starts_with(REFERENCE_PREFIX) {
            return input.to_string();
        }

        let cache_key = label_cache_key(&self.language, trimmed, self.options.debug);
        if let Some(CacheValue::Label(cached)) = self.cache.get(&cache_key) {
            trace!(reference = trimmed, "label cache hit");
            return cached;
        }

        let Some(reference) = LabelReference::parse(trimmed) else {
            return input.to_string();
        };

        let mapping = self.load_merged_mapping(&reference.file);
        let mut output = self.lookup(&mapping, &reference.key);
        if self.options.debug {
            output.push_str(&format!("[{trimmed}]"));
        }

        self.cache.set(&cache_key, CacheValue::Label(output.clone()));
        output
    }

    /// Look up `key` in the labels merged in through [`LabelResolver::include_file`].
    pub fn label(&self, key: &str) -> String {
        let mut output = self.lookup(&self.labels, key);
        if self.options.debug {
            output.push_str(&format!("[{key}]"));
        }
        output
    }

    /// Load a label file and merge it into this resolver's labels.
    ///
    /// Returns the freshly loaded file, not the merged result.
    pub fn include_file(&mut self, file: &str) -> Arc<LabelMapping> {
        let mapping = self.load_merged_mapping(file);
        self.labels.replace_recursive(&mapping);
        mapping
    }

    /// Load a label file and flatten it into one section: the active
    /// language's labels merged onto the base labels.
    pub fn read_file_flattened(&self, file: &str) -> LabelSection {
        let mapping = self.load_merged_mapping(file);
        let mut section = mapping
            .section(DEFAULT_LANGUAGE)
            .cloned()
            .unwrap_or_default();
        if self.language != DEFAULT_LANGUAGE {
            if let Some(local) = mapping.section(&self.language) {
                section.override_with(local);
            }
        }
        section
    }

    /// Load `file` for the active language with the dependency chain applied.
    ///
    /// The result holds the base section and a section for the active
    /// language in which the most specific translation of every key wins.
    pub fn load_merged_mapping(&self, file: &str) -> Arc<LabelMapping> {
        let cache_key = file_cache_key(file, &self.language);
        if let Some(CacheValue::Mapping(cached)) = self.cache.get(&cache_key) {
            trace!(file, language = %self.language, "label file cache hit");
            return cached;
        }

        let is_base = self.language == DEFAULT_LANGUAGE;
        let languages: Vec<&str> = if is_base {
            vec![DEFAULT_LANGUAGE]
        } else {
            self.dependencies.iter().rev().map(|l| l.as_str()).collect()
        };

        let mut merged = LabelMapping::new();
        for language in languages {
            let loaded = match self.loader.parse(file, language) {
                Ok(mapping) => mapping,
                Err(err) => {
                    warn!(
                        file,
                        language,
                        error = %err,
                        "label file could not be loaded; using no labels"
                    );
                    LabelMapping::new()
                }
            };

            let base = loaded
                .section(DEFAULT_LANGUAGE)
                .cloned()
                .unwrap_or_default();
            if !merged.contains_section(&self.language) {
                merged.set_section(self.language.clone(), base.clone());
            }
            merged.set_section(DEFAULT_LANGUAGE, base);

            if !is_base {
                if let (Some(local), Some(target)) = (
                    loaded.section(language),
                    merged.section_mut(&self.language),
                ) {
                    target.override_with(local);
                }
            }
        }

        let merged = Arc::new(merged);
        self.cache
            .set(&cache_key, CacheValue::Mapping(Arc::clone(&merged)));
        merged
    }

    fn lookup(&self, mapping: &LabelMapping, key: &str) -> String {
        mapping
            .lookup(&self.language, key)
            .unwrap_or_default()
            .to_string()
    }
}
