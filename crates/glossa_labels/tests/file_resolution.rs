use std::fs;
use std::path::Path;

use glossa_labels::{
    file_cache_key, label_cache_key, CacheValue, LabelResolverFactory, LabelsConfig,
    DEFAULT_LANGUAGE,
};

fn write(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

fn site() -> (tempfile::TempDir, LabelsConfig) {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "ext/foo/bar.yaml",
        "labels.save: Save\ngreeting: Hello\nlabels.close:\n  - source: Close\n    target: Close\n",
    );
    write(dir.path(), "ext/foo/fr.bar.yaml", "greeting: Bonjour\n");
    write(
        dir.path(),
        "ext/foo/de.bar.yaml",
        "labels.save:\n  - source: Save\n    target: Speichern\n",
    );
    write(dir.path(), "site/legacy.txt", "# legacy catalog\nsite.title = \"My Site\"\n");

    let mut config = LabelsConfig {
        base_dir: dir.path().to_path_buf(),
        ..Default::default()
    };
    config
        .extensions
        .insert("foo".to_string(), dir.path().join("ext/foo"));
    (dir, config)
}

#[test]
fn base_language_scenario() {
    let (_dir, config) = site();
    let resolver = LabelResolverFactory::from_config(&config).create_default();
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:labels.save"), "Save");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:labels.close"), "Close");
    assert_eq!(resolver.resolve("LLL:site/legacy.txt:site.title"), "My Site");
}

#[test]
fn variant_falls_back_to_parent_translation() {
    let (_dir, config) = site();
    let resolver = LabelResolverFactory::from_config(&config).create("fr_CA");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:greeting"), "Bonjour");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:labels.save"), "Save");
}

#[test]
fn translation_units_override_base() {
    let (_dir, config) = site();
    let resolver = LabelResolverFactory::from_config(&config).create("de_CH");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:labels.save"), "Speichern");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:greeting"), "Hello");
}

#[test]
fn missing_files_and_extensions_resolve_to_empty() {
    let (_dir, config) = site();
    let resolver = LabelResolverFactory::from_config(&config).create("de");
    assert_eq!(resolver.resolve("LLL:EXT:foo/missing.yaml:labels.save"), "");
    assert_eq!(resolver.resolve("LLL:EXT:bar/bar.yaml:labels.save"), "");
    assert_eq!(resolver.resolve("LLL:EXT:foo/../foo/bar.yaml:labels.save"), "");
}

#[test]
fn debug_mode_decorates_output() {
    let (_dir, mut config) = site();
    config.debug = true;
    let resolver = LabelResolverFactory::from_config(&config).create_default();
    assert_eq!(
        resolver.resolve("LLL:EXT:foo/bar.yaml:missing.key"),
        "[LLL:EXT:foo/bar.yaml:missing.key]"
    );
    assert_eq!(
        resolver.resolve("LLL:EXT:foo/bar.yaml:labels.save"),
        "Save[LLL:EXT:foo/bar.yaml:labels.save]"
    );
}

#[test]
fn cache_outlives_file_changes_within_a_request() {
    let (dir, config) = site();
    let factory = LabelResolverFactory::from_config(&config);
    let resolver = factory.create_default();
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:greeting"), "Hello");

    write(dir.path(), "ext/foo/bar.yaml", "greeting: Howdy\n");
    assert_eq!(resolver.resolve("LLL:EXT:foo/bar.yaml:greeting"), "Hello");
    assert_eq!(
        factory.create_default().resolve("LLL:EXT:foo/bar.yaml:greeting"),
        "Hello"
    );
}

#[test]
fn include_file_feeds_label_lookups() {
    let (_dir, config) = site();
    let mut resolver = LabelResolverFactory::from_config(&config).create("fr");
    let loaded = resolver.include_file("EXT:foo/bar.yaml");
    assert_eq!(loaded.lookup("fr", "greeting"), Some("Bonjour"));
    assert_eq!(resolver.label("greeting"), "Bonjour");
    assert_eq!(resolver.label("labels.save"), "Save");
    assert_eq!(resolver.label("nope"), "");
}

#[test]
fn factory_cache_collects_file_and_label_entries() {
    let (_dir, config) = site();
    let factory = LabelResolverFactory::from_config(&config);
    let key = label_cache_key(DEFAULT_LANGUAGE, "LLL:EXT:foo/bar.yaml:greeting", false);
    assert!(factory.cache().get(&key).is_none());

    factory
        .create_default()
        .resolve("LLL:EXT:foo/bar.yaml:greeting");

    assert_eq!(
        factory.cache().get(&key),
        Some(CacheValue::Label("Hello".to_string()))
    );
    assert!(matches!(
        factory
            .cache()
            .get(&file_cache_key("EXT:foo/bar.yaml", DEFAULT_LANGUAGE)),
        Some(CacheValue::Mapping(_))
    ));
}

#[cfg(feature = "fluent")]
#[test]
fn fluent_label_files() {
    let (dir, config) = site();
    write(dir.path(), "ext/foo/app.ftl", "app-title = Application\napp-quit = Quit\n");
    write(dir.path(), "ext/foo/pt.app.ftl", "app-quit = Sair\n");

    let resolver = LabelResolverFactory::from_config(&config).create("pt_BR");
    assert_eq!(resolver.resolve("LLL:EXT:foo/app.ftl:app-quit"), "Sair");
    assert_eq!(resolver.resolve("LLL:EXT:foo/app.ftl:app-title"), "Application");
}
