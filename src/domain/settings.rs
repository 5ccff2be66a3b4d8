//! Free-form settings maps and the narrow readers renderers use to pull values out of them.
//!
//! Theme settings carry no declared schema. Each renderer asks for the handful of keys it
//! understands through these helpers and treats anything missing or mistyped as absent.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Settings attached to a section or block.
pub type SettingsMap = Map<String, Value>;

/// A logical setting plus every spelling it has been stored under, in lookup order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingKey {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl SettingKey {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// Returns the first alias holding a usable value. `null` and `""` count as unset so an
    /// empty hyphenated key does not shadow a populated underscore key.
    pub fn lookup<'a>(&self, settings: &'a SettingsMap) -> Option<&'a Value> {
        self.aliases.iter().find_map(|alias| {
            settings.get(*alias).filter(|value| match value {
                Value::Null => false,
                Value::String(text) => !text.is_empty(),
                _ => true,
            })
        })
    }

    pub fn string<'a>(&self, settings: &'a SettingsMap) -> Option<&'a str> {
        self.lookup(settings).and_then(Value::as_str)
    }

    /// Strings and numbers both stringify; booleans and containers do not.
    pub fn scalar(&self, settings: &SettingsMap) -> Option<String> {
        self.lookup(settings).and_then(scalar_string)
    }
}

/// JavaScript-style truthiness, which is how the theme editor stores toggles.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn flag(settings: &SettingsMap, key: &str) -> bool {
    settings.get(key).is_some_and(is_truthy)
}

/// Non-empty string value stored under `key`.
pub fn string<'a>(settings: &'a SettingsMap, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}

/// Numeric value under `key`, accepting numeric strings as written by older editors.
pub fn number(settings: &SettingsMap, key: &str) -> Option<f64> {
    settings.get(key).and_then(number_value)
}

pub fn number_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Media references arrive either as a bare URL or as an object with `src`/`url`.
pub fn media_url<'a>(settings: &'a SettingsMap, key: &str) -> Option<&'a str> {
    let value = settings.get(key)?;
    let url = match value {
        Value::String(text) => Some(text.as_str()),
        Value::Object(object) => object
            .get("src")
            .or_else(|| object.get("url"))
            .and_then(Value::as_str),
        _ => None,
    };
    url.map(str::trim).filter(|url| !url.is_empty())
}

/// List of strings, given either as a JSON array or a comma separated string.
pub fn string_list<'a>(settings: &'a SettingsMap, key: &str) -> Vec<&'a str> {
    match settings.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect(),
        Some(Value::String(text)) => text
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Serde helper: a `null` list or map deserializes to its empty default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Serde helper: reduce any JSON value to a boolean by truthiness.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| is_truthy(&value))
}

/// Serde helper: scalars become strings; `null`, arrays and objects become the empty string.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| scalar_text(value).unwrap_or_default())
}

/// Serde helper: like [`lenient_string`], but anything that is not a scalar is `None`.
pub(crate) fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_text)
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: Value) -> SettingsMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    const PADDING: SettingKey = SettingKey::new("padding_top", &["padding-top", "padding_top"]);

    #[test]
    fn lookup_prefers_earlier_alias() {
        let map = settings(json!({"padding-top": 12, "padding_top": 40}));
        assert_eq!(PADDING.lookup(&map), Some(&json!(12)));
    }

    #[test]
    fn lookup_falls_through_empty_and_null_values() {
        let map = settings(json!({"padding-top": "", "padding_top": 40}));
        assert_eq!(PADDING.scalar(&map).as_deref(), Some("40"));

        let map = settings(json!({"padding-top": null, "padding_top": "8px"}));
        assert_eq!(PADDING.string(&map), Some("8px"));

        assert_eq!(PADDING.lookup(&SettingsMap::new()), None);
    }

    #[test]
    fn truthiness_matches_editor_semantics() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn media_url_accepts_string_and_object_forms() {
        let map = settings(json!({
            "plain": "https://cdn.example.com/a.png",
            "object": {"src": "https://cdn.example.com/b.png"},
            "blank": "  ",
            "number": 3
        }));
        assert_eq!(
            media_url(&map, "plain"),
            Some("https://cdn.example.com/a.png")
        );
        assert_eq!(
            media_url(&map, "object"),
            Some("https://cdn.example.com/b.png")
        );
        assert_eq!(media_url(&map, "blank"), None);
        assert_eq!(media_url(&map, "number"), None);
        assert_eq!(media_url(&map, "missing"), None);
    }

    #[derive(Debug, Deserialize)]
    struct Labelled {
        #[serde(default, deserialize_with = "lenient_string")]
        id: String,
        #[serde(default, deserialize_with = "lenient_optional_string")]
        color: Option<String>,
    }

    #[test]
    fn lenient_strings_stringify_scalars_and_drop_containers() {
        let parsed: Vec<Labelled> = serde_json::from_value(json!([
            {"id": 7, "color": "#fff"},
            {"id": true, "color": 12},
            {"id": null, "color": {"hex": "#000"}},
            {"id": ["a"], "color": null},
            {}
        ]))
        .expect("lenient fields never fail");

        let ids: Vec<&str> = parsed.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["7", "true", "", "", ""]);
        let colors: Vec<Option<&str>> = parsed.iter().map(|item| item.color.as_deref()).collect();
        assert_eq!(colors, vec![Some("#fff"), Some("12"), None, None, None]);
    }

    #[test]
    fn number_reads_numeric_strings() {
        let map = settings(json!({"a": 4, "b": " 2.5 ", "c": "wide"}));
        assert_eq!(number(&map, "a"), Some(4.0));
        assert_eq!(number(&map, "b"), Some(2.5));
        assert_eq!(number(&map, "c"), None);
    }

    #[test]
    fn string_list_splits_commas_and_reads_arrays() {
        let map = settings(json!({
            "array": ["shirt", "", "hat"],
            "csv": "shirt, hat ,,scarf"
        }));
        assert_eq!(string_list(&map, "array"), vec!["shirt", "hat"]);
        assert_eq!(string_list(&map, "csv"), vec!["shirt", "hat", "scarf"]);
        assert!(string_list(&map, "missing").is_empty());
    }
}
