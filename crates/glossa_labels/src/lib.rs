//! Glossa label resolution
//!
//! Resolves `LLL:[EXT:]<file>:<key>` references to localized text:
//! - Language activation with a dependency chain (`pt_BR` -> `pt` -> `default`)
//! - Per-key fallback from the most specific translation to the base labels
//! - Request-scoped caching of merged label files and resolved strings
//! - Pluggable collaborators for the locale catalog, file loading and caching
//! - Label file backends:
//!   - `simple`: YAML mapping catalogs (default, with legacy key=value fallback)
//!   - `fluent`: Fluent (.ftl) catalogs (optional feature)

mod cache;
mod config;
mod error;
mod factory;
mod label;
mod loader;
mod locale;
mod resolver;
mod simple;

#[cfg(feature = "fluent")]
mod fluent;

pub use cache::{
    file_cache_key, label_cache_key, BoundedCache, CacheValue, MemoryCache, RuntimeCache,
};
pub use config::{LabelsConfig, LocalesConfig};
pub use error::LabelError;
pub use factory::LabelResolverFactory;
pub use label::{
    LabelMapping, LabelReference, LabelSection, LabelValue, DEFAULT_LANGUAGE, EXTENSION_PREFIX,
    REFERENCE_PREFIX,
};
pub use loader::{FileLabelLoader, LabelFileLoader};
pub use locale::{LocaleCatalog, Locales};
pub use resolver::{LabelResolver, ResolverOptions};
pub use simple::{parse_simple, LabelFileParseError};
