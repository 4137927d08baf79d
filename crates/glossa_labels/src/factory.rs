use std::sync::Arc;

use crate::cache::{BoundedCache, MemoryCache, RuntimeCache};
use crate::config::LabelsConfig;
use crate::loader::{FileLabelLoader, LabelFileLoader};
use crate::locale::{LocaleCatalog, Locales};
use crate::resolver::{LabelResolver, ResolverOptions};

/// Hands out one [`LabelResolver`] per request or session.
///
/// The factory owns the shared collaborators; every resolver it creates
/// reads and writes the same runtime cache.
#[derive(Clone)]
pub struct LabelResolverFactory {
    locales: Arc<dyn LocaleCatalog>,
    loader: Arc<dyn LabelFileLoader>,
    cache: Arc<dyn RuntimeCache>,
    options: ResolverOptions,
}

impl LabelResolverFactory {
    pub fn new(
        locales: Arc<dyn LocaleCatalog>,
        loader: Arc<dyn LabelFileLoader>,
        cache: Arc<dyn RuntimeCache>,
        options: ResolverOptions,
    ) -> Self {
        Self {
            locales,
            loader,
            cache,
            options,
        }
    }

    /// Wire the stock catalog, file loader and cache from configuration.
    pub fn from_config(config: &LabelsConfig) -> Self {
        let cache: Arc<dyn RuntimeCache> = match config.cache_capacity {
            Some(capacity) => Arc::new(BoundedCache::new(capacity)),
            None => Arc::new(MemoryCache::new()),
        };
        Self::new(
            Arc::new(Locales::from_config(&config.locales)),
            Arc::new(FileLabelLoader::from_config(config)),
            cache,
            ResolverOptions {
                debug: config.debug,
                accumulate_dependencies: config.accumulate_dependencies,
            },
        )
    }

    pub fn cache(&self) -> &Arc<dyn RuntimeCache> {
        &self.cache
    }

    pub fn locales(&self) -> &Arc<dyn LocaleCatalog> {
        &self.locales
    }

    /// A resolver on the base language.
    pub fn create_default(&self) -> LabelResolver {
        LabelResolver::new(
            Arc::clone(&self.locales),
            Arc::clone(&self.loader),
            Arc::clone(&self.cache),
            self.options,
        )
    }

    /// A resolver with `language` activated. Unknown languages leave it on
    /// the base language.
    pub fn create(&self, language: &str) -> LabelResolver {
        let mut resolver = self.create_default();
        resolver.activate_language(language);
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::{LabelMapping, LabelSection, DEFAULT_LANGUAGE};
    use crate::loader::MockLabelFileLoader;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolvers_share_the_cache() {
        let mut loader = MockLabelFileLoader::new();
        loader.expect_parse().times(1).returning(|_, _| {
            let base: LabelSection = [("save", "Save")].into_iter().collect();
            Ok(LabelMapping::new().with_section(DEFAULT_LANGUAGE, base))
        });

        let factory = LabelResolverFactory::new(
            Arc::new(Locales::new()),
            Arc::new(loader),
            Arc::new(MemoryCache::new()),
            ResolverOptions::default(),
        );

        assert_eq!(factory.create_default().resolve("LLL:f.yaml:save"), "Save");
        assert_eq!(factory.create_default().resolve("LLL:f.yaml:save"), "Save");
    }

    #[test]
    fn create_activates_known_languages_only() {
        let factory = LabelResolverFactory::from_config(&LabelsConfig::default());
        assert_eq!(factory.create("pt_BR").dependencies(), ["pt_BR", "pt"]);

        let fallback = factory.create("xx");
        assert_eq!(fallback.language(), DEFAULT_LANGUAGE);
        assert!(fallback.dependencies().is_empty());
    }

    #[test]
    fn from_config_carries_options() {
        let config = LabelsConfig {
            debug: true,
            cache_capacity: Some(8),
            ..Default::default()
        };
        let factory = LabelResolverFactory::from_config(&config);
        assert!(factory.create_default().is_debug());
        assert!(factory.locales().is_known("fr_CA"));
    }
}
