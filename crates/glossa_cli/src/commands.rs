//! Subcommand execution

use anyhow::{Context, Result};
use glossa_labels::{LabelResolverFactory, Locales, DEFAULT_LANGUAGE};
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::config::GlossaConfig;

/// Run the parsed command and return what should be printed.
pub fn run(cli: &Cli, mut config: GlossaConfig) -> Result<String> {
    if let Some(language) = &cli.language {
        config.labels.language = language.clone();
    }
    if cli.debug {
        config.labels.debug = true;
    }
    let labels = &config.labels;
    let factory = LabelResolverFactory::from_config(labels);

    match &cli.command {
        Command::Resolve { references } => {
            let resolver = factory.create(&labels.language);
            if resolver.language() != labels.language {
                warn!(
                    "Unknown language key `{}`; resolving in `{}`",
                    labels.language,
                    resolver.language()
                );
            }
            info!(
                count = references.len(),
                language = resolver.language(),
                "resolving references"
            );
            let lines: Vec<String> = references.iter().map(|r| resolver.resolve(r)).collect();
            Ok(lines.join("\n"))
        }
        Command::Chain { language } => {
            if !factory.locales().is_known(language) {
                anyhow::bail!("Unknown language key `{}`", language);
            }
            let resolver = factory.create(language);
            let mut chain: Vec<&str> = resolver
                .dependencies()
                .iter()
                .map(|l| l.as_str())
                .collect();
            if chain.last() != Some(&DEFAULT_LANGUAGE) {
                chain.push(DEFAULT_LANGUAGE);
            }
            Ok(chain.join(" -> "))
        }
        Command::Dump { file, flat } => {
            let resolver = factory.create(&labels.language);
            let json = if *flat {
                serde_json::to_string_pretty(&resolver.read_file_flattened(file))
            } else {
                serde_json::to_string_pretty(&*resolver.load_merged_mapping(file))
            };
            json.context("Failed to serialize labels")
        }
        Command::Locales => {
            let locales = Locales::from_config(&labels.locales);
            Ok(locales.locales().collect::<Vec<_>>().join("\n"))
        }
    }
}
