//! Config validation - warns about unknown fields

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validate JSON config and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    let expected = expected_config_keys();
    for path in find_unknown_keys(&value, &expected, "") {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Find unknown keys in JSON value compared to expected keys.
/// Returns paths like "search.unknownField" for unknown fields.
fn find_unknown_keys(value: &Value, expected: &ExpectedKeys, prefix: &str) -> Vec<String> {
    let mut unknowns = Vec::new();

    let Value::Object(obj) = value else {
        return unknowns;
    };

    for (key, child) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if let Some(nested) = expected.nested.get(key.as_str()) {
            unknowns.extend(find_unknown_keys(child, nested, &path));
        } else if !expected.fields.contains(key.as_str()) {
            unknowns.push(path);
        }
    }

    unknowns
}

/// Expected keys for a config section.
/// `fields` are leaf fields, `nested` are nested objects with their own expected keys.
struct ExpectedKeys {
    fields: HashSet<&'static str>,
    nested: HashMap<&'static str, ExpectedKeys>,
}

impl ExpectedKeys {
    fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
            nested: HashMap::new(),
        }
    }

    fn with_nested(mut self, key: &'static str, nested: ExpectedKeys) -> Self {
        self.nested.insert(key, nested);
        self
    }
}

/// Expected keys for `Config` (settings.rs)
fn expected_config_keys() -> ExpectedKeys {
    let search_keys = ExpectedKeys::new(&["debounceMs", "maxPerCategory", "historyLimit"]);
    let remote_keys = ExpectedKeys::new(&["enabled", "baseUrl", "endpoint", "timeoutMs"]);

    ExpectedKeys::new(&[])
        .with_nested("search", search_keys)
        .with_nested("remote", remote_keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unknowns(value: &Value) -> Vec<String> {
        let mut found = find_unknown_keys(value, &expected_config_keys(), "");
        found.sort();
        found
    }

    #[test]
    fn test_known_fields_pass() {
        let value = json!({
            "search": {"debounceMs": 200, "historyLimit": 5},
            "remote": {"baseUrl": "https://example.com", "timeoutMs": 2000}
        });
        assert!(unknowns(&value).is_empty());
    }

    #[test]
    fn test_unknown_fields_reported_with_path() {
        let value = json!({
            "search": {"debounce": 200},
            "remote": {"enabled": true, "retries": 3},
            "theme": "dark"
        });
        assert_eq!(
            unknowns(&value),
            vec!["remote.retries", "search.debounce", "theme"]
        );
    }

    #[test]
    fn test_invalid_json_is_ignored() {
        warn_unknown_fields("{ nope", "config.json");
    }
}
