use thiserror::Error;

use crate::label::{LabelSection, LabelValue};

const MAX_CATALOG_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;

fn is_valid_key(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

fn looks_like_yaml_mapping(src: &str) -> bool {
    for raw in src.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        // If `=` appears before `:`, it's more likely the legacy `key = value` format.
        if let Some(colon) = line.find(':') {
            match line.find('=') {
                Some(eq) if eq < colon => {}
                _ => return true,
            }
        }
        if line.contains('=') {
            return false;
        }
    }
    false
}

fn check_entry(key: &str, value: &str) -> Result<(), String> {
    if !is_valid_key(key) {
        return Err(format!(
            "invalid key `{key}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*)"
        ));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(format!("key `{key}` is too long (max {MAX_KEY_BYTES} bytes)"));
    }
    if value.len() > MAX_VALUE_BYTES {
        return Err(format!(
            "value for key `{key}` is too long (max {MAX_VALUE_BYTES} bytes)"
        ));
    }
    Ok(())
}

fn try_parse_yaml_map(src: &str) -> Result<Option<LabelSection>, LabelFileParseError> {
    match serde_yaml::from_str::<serde_yaml::Value>(src) {
        Ok(serde_yaml::Value::Mapping(raw)) => {
            if raw.len() > MAX_CATALOG_ENTRIES {
                return Err(LabelFileParseError::Yaml(format!(
                    "too many entries (max {MAX_CATALOG_ENTRIES})"
                )));
            }
            let mut out = LabelSection::new();
            for (k, v) in raw {
                let Some(key) = k.as_str() else {
                    return Err(LabelFileParseError::Yaml(
                        "yaml keys must be strings".to_string(),
                    ));
                };
                let value = match v {
                    serde_yaml::Value::String(s) => LabelValue::Plain(s),
                    other => serde_yaml::from_value::<LabelValue>(other).map_err(|_| {
                        LabelFileParseError::Yaml(format!(
                            "yaml value for key `{key}` must be a string or a list of translation units"
                        ))
                    })?,
                };
                check_entry(key, value.as_str()).map_err(LabelFileParseError::Yaml)?;
                out.insert(key, value);
            }
            Ok(Some(out))
        }
        // An empty document is an empty catalog, not a legacy file.
        Ok(serde_yaml::Value::Null) if src.trim().is_empty() => Ok(Some(LabelSection::new())),
        Ok(_) => Ok(None),
        Err(e) => {
            if looks_like_yaml_mapping(src) {
                return Err(LabelFileParseError::Yaml(format!("yaml parse error: {e}")));
            }
            Ok(None)
        }
    }
}

/// Parse a simple label catalog into a single language section.
///
/// The preferred format is a YAML mapping of key to value, where a value is
/// either a string or a one-element list of `{target: ...}` translation
/// units. Files that are not YAML mappings fall back to the legacy line
/// format:
/// - One entry per line: `key = value`
/// - Comments: `# ...` or `// ...`
/// - Optional quoting: `"..."` or `'...'` (supports a few escapes)
pub fn parse_simple(src: &str) -> Result<LabelSection, LabelFileParseError> {
    if let Some(section) = try_parse_yaml_map(src)? {
        return Ok(section);
    }

    let mut section = LabelSection::new();
    for (idx, raw_line) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        let Some(eq) = line.find('=') else {
            return Err(LabelFileParseError::Syntax {
                line: line_no,
                msg: "expected `key = value`".to_string(),
            });
        };

        let key = line[..eq].trim();
        let mut value = line[eq + 1..].trim().to_string();
        if key.is_empty() {
            return Err(LabelFileParseError::Syntax {
                line: line_no,
                msg: "empty key".to_string(),
            });
        }

        // Strip inline comments (only if preceded by whitespace).
        if let Some(pos) = value.find(" #") {
            value.truncate(pos);
            value = value.trim().to_string();
        }
        if let Some(pos) = value.find(" //") {
            value.truncate(pos);
            value = value.trim().to_string();
        }

        let value = unquote_and_unescape(&value).map_err(|e| LabelFileParseError::Syntax {
            line: line_no,
            msg: e,
        })?;

        check_entry(key, &value).map_err(|msg| LabelFileParseError::Syntax { line: line_no, msg })?;
        if section.len() >= MAX_CATALOG_ENTRIES && !section.contains_key(key) {
            return Err(LabelFileParseError::Syntax {
                line: line_no,
                msg: format!("too many entries (max {MAX_CATALOG_ENTRIES})"),
            });
        }

        section.insert(key, value);
    }
    Ok(section)
}

#[derive(Debug, Error)]
pub enum LabelFileParseError {
    #[error("yaml label file error: {0}")]
    Yaml(String),

    #[error("label file syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },
}

fn unquote_and_unescape(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
        return unescape(&s[1..s.len() - 1]);
    }
    if s.starts_with('\'') && s.ends_with('\'') && s.len() >= 2 {
        return unescape(&s[1..s.len() - 1]);
    }
    Ok(s.to_string())
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(n) = it.next() else {
            return Err("dangling escape".to_string());
        };
        match n {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            // Keep unknown escapes as-is.
            _ => out.push(n),
        }
    }
    Ok(out)
}
