//! Theme-level styling shared by every rendered page.

use std::collections::BTreeMap;

use crate::domain::theme::{ThemeColors, ThemeDocument};

use super::error::AppError;

pub const DEFAULT_PRIMARY: &str = "#000";
pub const DEFAULT_SECONDARY: &str = "#666";
pub const DEFAULT_BACKGROUND: &str = "#fff";

/// CSS custom properties for the theme palette. Missing or blank colours take the defaults.
pub fn css_variables(colors: &ThemeColors) -> BTreeMap<String, String> {
    [
        ("--color-primary", colors.primary.as_deref(), DEFAULT_PRIMARY),
        ("--color-secondary", colors.secondary.as_deref(), DEFAULT_SECONDARY),
        ("--color-background", colors.background.as_deref(), DEFAULT_BACKGROUND),
    ]
    .into_iter()
    .map(|(name, value, fallback)| {
        let value = value
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback);
        (name.to_string(), value.to_string())
    })
    .collect()
}

/// Checks that `page` has something to fall back on. An undeclared page is fine while the
/// document carries flat components, or declares no pages at all.
pub fn ensure_page_known(document: &ThemeDocument, page: &str) -> Result<(), AppError> {
    if document.pages.is_empty()
        || document.pages.contains_key(page)
        || !document.components.is_empty()
    {
        return Ok(());
    }

    let known = document.page_names().collect::<Vec<_>>().join(", ");
    Err(AppError::validation(format!(
        "page `{page}` is not declared (known pages: {known}) and the theme has no flat components"
    )))
}
