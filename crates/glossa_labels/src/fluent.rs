use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::FluentResource;
use fluent_syntax::ast;
use unic_langid::LanguageIdentifier;

use crate::label::{LabelSection, DEFAULT_LANGUAGE};

/// Map a catalog language key onto a Unicode language identifier.
///
/// The base language is English. Keys that do not parse fall back to `und`.
pub(crate) fn language_identifier(language: &str) -> LanguageIdentifier {
    let tag = if language == DEFAULT_LANGUAGE {
        "en-US".to_string()
    } else {
        language.trim().replace('_', "-")
    };
    tag.parse().unwrap_or_default()
}

/// Parse a Fluent (.ftl) resource into a label section.
///
/// Every message with a value becomes one label, formatted without
/// arguments. Attributes and terms are not labels and are skipped.
pub(crate) fn parse_ftl(language: &str, ftl: &str) -> Result<LabelSection, String> {
    let res = FluentResource::try_new(ftl.to_string())
        .map_err(|(_res, errs)| format!("ftl parse error: {:?}", errs))?;

    let ids: Vec<String> = res
        .entries()
        .filter_map(|entry| match entry {
            ast::Entry::Message(msg) if msg.value.is_some() => Some(msg.id.name.to_string()),
            _ => None,
        })
        .collect();

    let mut bundle = FluentBundle::new_concurrent(vec![language_identifier(language)]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(res)
        .map_err(|errs| format!("ftl add_resource error: {:?}", errs))?;

    let mut section = LabelSection::new();
    for id in ids {
        let Some(pattern) = bundle.get_message(&id).and_then(|m| m.value()) else {
            continue;
        };
        let mut errs = Vec::new();
        let text = bundle.format_pattern(pattern, None, &mut errs).to_string();
        if !errs.is_empty() {
            tracing::warn!(
                language = %language,
                message_id = %id,
                errors = ?errs,
                "Fluent formatting errors"
            );
        }
        section.insert(id, text);
    }
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_messages_into_section() {
        let src = "labels-save = Speichern\nlabels-close = Schließen\n    .title = ignored\n";
        let section = parse_ftl("de", src).unwrap();
        assert_eq!(section.get("labels-save"), Some("Speichern"));
        assert_eq!(section.get("labels-close"), Some("Schließen"));
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn invalid_resource_is_an_error() {
        assert!(parse_ftl("de", "= no id\n").is_err());
    }

    #[test]
    fn language_keys_map_to_identifiers() {
        assert_eq!(language_identifier("default").to_string(), "en-US");
        assert_eq!(language_identifier("pt_BR").to_string(), "pt-BR");
        assert_eq!(language_identifier("!!").to_string(), "und");
    }
}
