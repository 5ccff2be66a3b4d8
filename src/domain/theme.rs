//! Theme documents as produced by the theme-sync collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::settings::{
    self, SettingsMap, lenient_optional_string, lenient_string, null_as_default, truthy,
};

/// Whole theme export: global style, per-page section lists and a flat fallback list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeDocument {
    pub version: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub theme: ThemeStyle,
    #[serde(deserialize_with = "null_as_default")]
    pub pages: BTreeMap<String, PageDocument>,
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Section>,
    pub raw_data: Value,
}

impl ThemeDocument {
    /// Sections for `page`, falling back to the flat component list when the page is not
    /// declared.
    pub fn sections_for(&self, page: &str) -> &[Section] {
        match self.pages.get(page) {
            Some(document) => &document.components,
            None => &self.components,
        }
    }

    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeStyle {
    #[serde(deserialize_with = "null_as_default")]
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    #[serde(deserialize_with = "lenient_optional_string")]
    pub primary: Option<String>,
    #[serde(deserialize_with = "lenient_optional_string")]
    pub secondary: Option<String>,
    #[serde(deserialize_with = "lenient_optional_string")]
    pub background: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub components: Vec<Section>,
}

/// Top-level themed UI block with its settings and ordered blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, alias = "component_type", deserialize_with = "lenient_string")]
    pub component_type: String,
    #[serde(default, alias = "schema_type", deserialize_with = "lenient_optional_string")]
    pub schema_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: SettingsMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub blocks: Vec<Block>,
}

impl Section {
    pub fn is_disabled(&self) -> bool {
        settings::flag(&self.settings, "disabled")
    }

    /// Diagnostic label: the schema type when present, else the component type.
    pub fn label(&self) -> &str {
        self.schema_type
            .as_deref()
            .filter(|label| !label.is_empty())
            .or_else(|| (!self.component_type.is_empty()).then_some(self.component_type.as_str()))
            .unwrap_or("section")
    }
}

/// Sub-element of a section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: SettingsMap,
    #[serde(default, deserialize_with = "truthy")]
    pub disabled: bool,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, settings: SettingsMap) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            settings,
            disabled: false,
        }
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r##"{
        "version": 2,
        "theme": {"colors": {"primary": "#123456"}},
        "pages": {
            "index": {"components": [
                {"id": "hero-1", "componentType": "Hero", "schemaType": "image-banner",
                 "settings": {"image": "https://cdn.example.com/a.png"},
                 "blocks": [{"id": "b1", "type": "heading", "settings": {"heading": "Hi"}}]}
            ]},
            "product": {"components": null}
        },
        "components": [
            {"id": "flat-1", "component_type": "RichText", "settings": null, "blocks": null}
        ],
        "rawData": {"anything": true}
    }"##;

    #[test]
    fn parses_pages_and_flat_components() {
        let document: ThemeDocument = serde_json::from_str(DOCUMENT).expect("document parses");

        let index = document.sections_for("index");
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].component_type, "Hero");
        assert_eq!(index[0].label(), "image-banner");
        assert_eq!(index[0].blocks[0].kind, "heading");

        assert!(document.sections_for("product").is_empty());

        let fallback = document.sections_for("missing");
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback[0].component_type, "RichText");
        assert!(fallback[0].settings.is_empty());
        assert!(fallback[0].blocks.is_empty());

        assert_eq!(document.theme.colors.primary.as_deref(), Some("#123456"));
        assert_eq!(document.page_names().collect::<Vec<_>>(), vec!["index", "product"]);
    }

    #[test]
    fn empty_document_has_no_sections() {
        let document: ThemeDocument = serde_json::from_str("{}").expect("empty parses");
        assert!(document.sections_for("index").is_empty());
        assert_eq!(document.page_names().count(), 0);
    }

    #[test]
    fn block_disabled_accepts_truthy_values() {
        let blocks: Vec<Block> = serde_json::from_str(
            r#"[{"type": "text", "disabled": 1}, {"type": "text", "disabled": ""}, {"type": "text"}]"#,
        )
        .expect("blocks parse");
        let flags: Vec<bool> = blocks.iter().map(|block| block.disabled).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn malformed_identifiers_and_colours_degrade_instead_of_failing() {
        let document: ThemeDocument = serde_json::from_str(
            r##"{
                "theme": {"colors": {"primary": {"hex": "#123"}, "secondary": "#8a6d3b", "background": null}},
                "pages": {"index": {"components": [
                    {"id": 42, "componentType": null, "schemaType": ["x"],
                     "blocks": [{"id": 7, "type": null, "settings": {"text": "kept"}}]},
                    {"id": "hero", "componentType": "Hero"}
                ]}}
            }"##,
        )
        .expect("malformed fields are treated as absent");

        let sections = document.sections_for("index");
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].id, "42");
        assert_eq!(sections[0].component_type, "");
        assert_eq!(sections[0].schema_type, None);
        assert_eq!(sections[0].label(), "section");
        assert_eq!(sections[0].blocks[0].id, "7");
        assert_eq!(sections[0].blocks[0].kind, "");
        assert_eq!(sections[1].component_type, "Hero");

        let colors = &document.theme.colors;
        assert_eq!(colors.primary, None);
        assert_eq!(colors.secondary.as_deref(), Some("#8a6d3b"));
        assert_eq!(colors.background, None);
    }

    #[test]
    fn label_falls_back_to_component_type() {
        let section = Section {
            component_type: "Footer".into(),
            schema_type: Some(String::new()),
            ..Section::default()
        };
        assert_eq!(section.label(), "Footer");
        assert_eq!(Section::default().label(), "section");
    }

    #[test]
    fn disabled_setting_suppresses_section() {
        let section: Section = serde_json::from_str(
            r#"{"componentType": "Banner", "settings": {"disabled": true}}"#,
        )
        .expect("section parses");
        assert!(section.is_disabled());
    }
}
