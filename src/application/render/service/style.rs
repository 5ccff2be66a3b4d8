//! Setting alias tables and the style bags derived from them.
//!
//! Theme exports have stored the same concept under several spellings over time. Every
//! logical property lists its accepted spellings here, hyphenated form first.

use serde_json::Value;

use crate::application::render::types::StyleProps;
use crate::domain::settings::{SettingKey, SettingsMap, number_value};

pub(crate) const PADDING_TOP: SettingKey =
    SettingKey::new("padding_top", &["padding-top", "padding_top"]);
pub(crate) const PADDING_BOTTOM: SettingKey =
    SettingKey::new("padding_bottom", &["padding-bottom", "padding_bottom"]);
pub(crate) const BACKGROUND_COLOR: SettingKey = SettingKey::new(
    "background_color",
    &["background-color", "background_color", "background"],
);
pub(crate) const TEXT_COLOR: SettingKey =
    SettingKey::new("text_color", &["text-color", "text_color", "color"]);
pub(crate) const FLEX_DIRECTION: SettingKey =
    SettingKey::new("flex_direction", &["flex-direction", "flex_direction"]);
pub(crate) const JUSTIFY_CONTENT: SettingKey =
    SettingKey::new("justify_content", &["justify-content", "justify_content"]);
pub(crate) const ALIGN_ITEMS: SettingKey =
    SettingKey::new("align_items", &["align-items", "align_items"]);
pub(crate) const GAP: SettingKey = SettingKey::new("gap", &["gap", "spacing"]);
pub(crate) const SECTION_HEIGHT: SettingKey =
    SettingKey::new("section_height", &["section-height", "section_height"]);

pub(crate) const FONT_SIZE: SettingKey = SettingKey::new("font_size", &["font-size", "font_size"]);
pub(crate) const TEXT_ALIGN: SettingKey = SettingKey::new(
    "text_align",
    &["text-align", "text_align", "alignment", "content_alignment"],
);
pub(crate) const MAX_WIDTH: SettingKey = SettingKey::new("max_width", &["max-width", "max_width"]);
pub(crate) const WIDTH: SettingKey = SettingKey::new("width", &["width", "image_width"]);
pub(crate) const BORDER_RADIUS: SettingKey = SettingKey::new(
    "border_radius",
    &["border-radius", "border_radius", "corner_radius"],
);

/// Aliases consulted for the generic section container, in the order they are applied.
pub const SECTION_STYLE_KEYS: [SettingKey; 9] = [
    PADDING_TOP,
    PADDING_BOTTOM,
    BACKGROUND_COLOR,
    TEXT_COLOR,
    FLEX_DIRECTION,
    JUSTIFY_CONTENT,
    ALIGN_ITEMS,
    GAP,
    SECTION_HEIGHT,
];

/// Fixed height buckets for `section_height`.
pub fn section_height(value: Option<&str>) -> &'static str {
    match value {
        Some("small") => "300px",
        Some("medium") => "500px",
        Some("large") => "700px",
        _ => "auto",
    }
}

/// Numbers become pixel lengths; strings that already carry a unit pass through.
pub fn css_length(value: &Value) -> Option<String> {
    match value {
        Value::Number(_) => number_value(value).map(pixels),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else if let Ok(number) = trimmed.parse::<f64>() {
                Some(pixels(number))
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

pub(crate) fn length_of(key: &SettingKey, settings: &SettingsMap) -> Option<String> {
    key.lookup(settings).and_then(css_length)
}

/// Container style for sections rendered without a specialized renderer.
pub fn container_style(settings: &SettingsMap) -> StyleProps {
    let mut style = StyleProps::new();
    style.insert("display".into(), "flex".into());
    style.insert(
        "flex-direction".into(),
        FLEX_DIRECTION
            .scalar(settings)
            .unwrap_or_else(|| "column".into()),
    );
    style.insert(
        "justify-content".into(),
        JUSTIFY_CONTENT
            .scalar(settings)
            .unwrap_or_else(|| "center".into()),
    );
    style.insert(
        "align-items".into(),
        ALIGN_ITEMS
            .scalar(settings)
            .unwrap_or_else(|| "center".into()),
    );
    style.insert(
        "padding-top".into(),
        length_of(&PADDING_TOP, settings).unwrap_or_else(|| pixels(0.0)),
    );
    style.insert(
        "padding-bottom".into(),
        length_of(&PADDING_BOTTOM, settings).unwrap_or_else(|| pixels(0.0)),
    );
    style.insert(
        "height".into(),
        section_height(SECTION_HEIGHT.string(settings)).into(),
    );
    if let Some(color) = BACKGROUND_COLOR.scalar(settings) {
        style.insert("background-color".into(), color);
    }
    if let Some(color) = TEXT_COLOR.scalar(settings) {
        style.insert("color".into(), color);
    }
    if let Some(gap) = length_of(&GAP, settings) {
        style.insert("gap".into(), gap);
    }
    style
}

/// Typography shared by text and heading leaves.
pub fn text_style(settings: &SettingsMap) -> StyleProps {
    let mut style = StyleProps::new();
    if let Some(size) = length_of(&FONT_SIZE, settings) {
        style.insert("font-size".into(), size);
    }
    if let Some(color) = TEXT_COLOR.scalar(settings) {
        style.insert("color".into(), color);
    }
    if let Some(align) = TEXT_ALIGN.scalar(settings) {
        style.insert("text-align".into(), align);
    }
    if let Some(width) = length_of(&MAX_WIDTH, settings) {
        style.insert("max-width".into(), width);
    }
    style
}

/// Background and foreground colours only, for bars and chrome sections.
pub fn color_style(settings: &SettingsMap) -> StyleProps {
    let mut style = StyleProps::new();
    if let Some(color) = BACKGROUND_COLOR.scalar(settings) {
        style.insert("background-color".into(), color);
    }
    if let Some(color) = TEXT_COLOR.scalar(settings) {
        style.insert("color".into(), color);
    }
    style
}

/// `repeat(n, 1fr)` grid template for a `columns_desktop`-style setting.
pub fn grid_style(settings: &SettingsMap, key: &str, default_columns: u32) -> StyleProps {
    let columns = settings
        .get(key)
        .and_then(number_value)
        .filter(|value| value.is_finite() && *value >= 1.0)
        .map(|value| value.min(12.0) as u32)
        .unwrap_or(default_columns);

    let mut style = StyleProps::new();
    style.insert("display".into(), "grid".into());
    style.insert(
        "grid-template-columns".into(),
        format!("repeat({columns}, 1fr)"),
    );
    style
}

fn pixels(value: f64) -> String {
    format!("{value}px")
}
