//! Label file loading.
//!
//! A loader reads one label file for one language. The resolver is in charge
//! of walking the dependency chain and merging the results.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::config::LabelsConfig;
use crate::label::{LabelMapping, LabelReference, LabelSection, DEFAULT_LANGUAGE};
use crate::simple::parse_simple;
use crate::LabelError;

/// Parses a label file for a single language.
#[cfg_attr(test, mockall::automock)]
pub trait LabelFileLoader: Send + Sync {
    /// Load `file` for `language`.
    ///
    /// The returned mapping holds the `"default"` section and, when the file
    /// has a translation for `language`, a section keyed by `language`.
    fn parse(&self, file: &str, language: &str) -> Result<LabelMapping, LabelError>;
}

/// Loads label files from the filesystem.
///
/// - `EXT:<name>/<path>` resolves below the root registered for `name`.
/// - Relative locators resolve below the base directory.
/// - Absolute locators are used as-is.
///
/// The base file provides the `"default"` section. The translation for a
/// language `xx` lives next to it as `xx.<file name>`.
#[derive(Clone, Debug)]
pub struct FileLabelLoader {
    base_dir: PathBuf,
    extensions: BTreeMap<String, PathBuf>,
}

impl FileLabelLoader {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            extensions: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &LabelsConfig) -> Self {
        Self {
            base_dir: config.base_dir.clone(),
            extensions: config.extensions.clone(),
        }
    }

    /// Register the root directory of an extension.
    pub fn with_extension(mut self, name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        self.extensions.insert(name.into(), root.into());
        self
    }

    /// Map a file locator to the path of its base file.
    pub fn locate(&self, file: &str) -> Result<PathBuf, LabelError> {
        if let Some((extension, rel)) = LabelReference::split_extension_path(file) {
            let root = self
                .extensions
                .get(extension)
                .ok_or_else(|| LabelError::UnknownExtension(extension.to_string()))?;
            let rel = Path::new(rel);
            if !is_contained(rel) {
                return Err(LabelError::PathTraversal(file.to_string()));
            }
            return Ok(root.join(rel));
        }

        let path = Path::new(file);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        if !is_contained(path) {
            return Err(LabelError::PathTraversal(file.to_string()));
        }
        Ok(self.base_dir.join(path))
    }

    #[cfg_attr(not(feature = "fluent"), allow(unused_variables))]
    fn read_section(&self, path: &Path, language: &str) -> Result<LabelSection, LabelError> {
        let src = std::fs::read_to_string(path).map_err(|source| LabelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "fluent")]
            Some("ftl") => crate::fluent::parse_ftl(language, &src).map_err(LabelError::Fluent),
            _ => Ok(parse_simple(&src)?),
        }
    }
}

impl LabelFileLoader for FileLabelLoader {
    fn parse(&self, file: &str, language: &str) -> Result<LabelMapping, LabelError> {
        let path = self.locate(file)?;
        debug!(file, language, path = %path.display(), "loading label file");

        let base = self.read_section(&path, DEFAULT_LANGUAGE)?;
        let mut mapping = LabelMapping::new().with_section(DEFAULT_LANGUAGE, base);

        if language != DEFAULT_LANGUAGE {
            if let Some(localized) = localized_path(&path, language) {
                if localized.is_file() {
                    mapping.set_section(language, self.read_section(&localized, language)?);
                }
            }
        }
        Ok(mapping)
    }
}

/// `dir/name.yaml` -> `dir/<language>.name.yaml`
fn localized_path(path: &Path, language: &str) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    Some(path.with_file_name(format!("{language}.{name}")))
}

fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
