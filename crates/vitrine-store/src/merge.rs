//! Named merge policies
//!
//! Most collections either take the remote data wholesale or fall back to
//! defaults. Pricing is the exception: the compiled-in defaults own UI-only
//! fields the remote store knows nothing about, so matched remote entries
//! augment the defaults instead of replacing them.

use serde_json::Value;

/// How a collection's remote records combine with its defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Remote entries override matched defaults field-by-field
    ///
    /// A default matches a remote entry when the default title's first word
    /// is a case-insensitive substring of the remote name. Matched remote
    /// entries contribute [`OVERRIDE_FIELDS`]; unmatched defaults are kept
    /// unchanged; unmatched remote entries are dropped.
    ///
    /// Known fragility, reproduced as documented: two defaults sharing a
    /// first word would both match the same remote entry.
    ByTitlePrefix,
}

/// Fields a matched remote entry overrides on the default
pub const OVERRIDE_FIELDS: [&str; 4] = ["price", "plan_name", "features", "is_popular"];

/// Apply the title-prefix merge over raw JSON records
///
/// Operates pre-deserialization so the policy stays independent of the typed
/// record shape. Output order and length follow the defaults.
#[must_use]
pub fn merge_by_title_prefix(defaults: &[Value], remote: &[Value]) -> Vec<Value> {
    let merged: Vec<Value> = defaults
        .iter()
        .map(|default| {
            let Some(prefix) = title_prefix(default) else {
                return default.clone();
            };
            match remote.iter().find(|entry| {
                entry_name(entry)
                    .map(|name| name.to_lowercase().contains(&prefix))
                    .unwrap_or(false)
            }) {
                Some(entry) => overridden(default, entry),
                None => default.clone(),
            }
        })
        .collect();

    for entry in remote {
        let matched = merged_contains_source(&merged, entry);
        if !matched {
            tracing::debug!(
                name = entry_name(entry).unwrap_or("<unnamed>"),
                "remote pricing entry matched no default; dropped"
            );
        }
    }

    merged
}

fn title_prefix(default: &Value) -> Option<String> {
    default
        .get("title")
        .and_then(Value::as_str)
        .and_then(|title| title.split_whitespace().next())
        .map(str::to_lowercase)
}

fn entry_name(entry: &Value) -> Option<&str> {
    entry
        .get("name")
        .or_else(|| entry.get("title"))
        .and_then(Value::as_str)
}

fn overridden(default: &Value, entry: &Value) -> Value {
    let mut merged = default.clone();
    if let Value::Object(fields) = &mut merged {
        for field in OVERRIDE_FIELDS {
            if let Some(value) = entry.get(field) {
                fields.insert(field.to_string(), value.clone());
            }
        }
    }
    merged
}

fn merged_contains_source(merged: &[Value], entry: &Value) -> bool {
    let Some(name) = entry_name(entry) else {
        return false;
    };
    let lowered = name.to_lowercase();
    merged.iter().any(|default| {
        title_prefix(default)
            .map(|prefix| lowered.contains(&prefix))
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> Vec<Value> {
        vec![
            json!({
                "id": 1,
                "title": "Starter Plan",
                "price": "$29",
                "features": ["1 seat"],
                "is_popular": false,
                "icon": "rocket",
                "reveal_delay_ms": 0
            }),
            json!({
                "id": 2,
                "title": "Growth Plan",
                "price": "$99",
                "features": ["10 seats"],
                "is_popular": true,
                "icon": "chart",
                "reveal_delay_ms": 120
            }),
        ]
    }

    #[test]
    fn matched_remote_overrides_store_owned_fields_only() {
        let remote = vec![json!({
            "id": 40,
            "name": "New Starter Tier",
            "price": "$39",
            "plan_name": "Starter+",
            "features": "2 seats, Email support",
            "is_popular": true
        })];

        let merged = merge_by_title_prefix(&defaults(), &remote);
        assert_eq!(merged.len(), 2);

        let starter = &merged[0];
        assert_eq!(starter["price"], "$39");
        assert_eq!(starter["plan_name"], "Starter+");
        assert_eq!(starter["is_popular"], true);
        // default keeps ownership of UI fields and identity
        assert_eq!(starter["icon"], "rocket");
        assert_eq!(starter["id"], 1);
        assert_eq!(starter["title"], "Starter Plan");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let remote = vec![json!({"name": "GROWTH unlimited", "price": "$149"})];
        let merged = merge_by_title_prefix(&defaults(), &remote);
        assert_eq!(merged[1]["price"], "$149");
    }

    #[test]
    fn unmatched_defaults_are_retained_unchanged() {
        let remote = vec![json!({"name": "Enterprise", "price": "$999"})];
        let merged = merge_by_title_prefix(&defaults(), &remote);
        assert_eq!(merged, defaults());
    }

    #[test]
    fn empty_remote_keeps_defaults_verbatim() {
        let merged = merge_by_title_prefix(&defaults(), &[]);
        assert_eq!(merged, defaults());
    }

    #[test]
    fn remote_without_override_field_leaves_default_value() {
        let remote = vec![json!({"name": "Starter", "price": "$35"})];
        let merged = merge_by_title_prefix(&defaults(), &remote);
        assert_eq!(merged[0]["price"], "$35");
        // no remote features: default features survive
        assert_eq!(merged[0]["features"], json!(["1 seat"]));
    }
}
