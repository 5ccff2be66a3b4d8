//! Reads theme documents and media registries exported by the theme sync.

use std::path::Path;

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::domain::{
    media::{MediaEntry, MediaRegistry},
    theme::ThemeDocument,
};

use super::error::InfraError;

/// Registry files come either as a bare array or wrapped in `{"media": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryFile {
    Entries(Vec<MediaEntry>),
    Wrapped {
        #[serde(default)]
        media: Vec<MediaEntry>,
    },
}

pub async fn load_theme_document(path: &Path) -> Result<ThemeDocument, InfraError> {
    let bytes = fs::read(path).await?;
    let document = parse_theme_document(path, &bytes)?;
    debug!(
        target = "infra::loader",
        path = %path.display(),
        pages = document.pages.len(),
        flat_sections = document.components.len(),
        "theme document loaded"
    );
    Ok(document)
}

pub async fn load_media_registry(path: &Path) -> Result<MediaRegistry, InfraError> {
    let bytes = fs::read(path).await?;
    let registry = parse_media_registry(path, &bytes)?;
    debug!(
        target = "infra::loader",
        path = %path.display(),
        entries = registry.len(),
        "media registry loaded"
    );
    Ok(registry)
}

/// Loads the registry when a path is given; no path means an empty registry.
pub async fn load_optional_media_registry(
    path: Option<&Path>,
) -> Result<MediaRegistry, InfraError> {
    match path {
        Some(path) => load_media_registry(path).await,
        None => Ok(MediaRegistry::default()),
    }
}

pub fn parse_theme_document(path: &Path, bytes: &[u8]) -> Result<ThemeDocument, InfraError> {
    serde_json::from_slice(bytes).map_err(|source| InfraError::decode(path, source))
}

pub fn parse_media_registry(path: &Path, bytes: &[u8]) -> Result<MediaRegistry, InfraError> {
    let file: RegistryFile =
        serde_json::from_slice(bytes).map_err(|source| InfraError::decode(path, source))?;
    let entries = match file {
        RegistryFile::Entries(entries) | RegistryFile::Wrapped { media: entries } => entries,
    };
    Ok(MediaRegistry::from(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn registry_accepts_array_and_wrapped_forms() {
        let path = Path::new("media.json");
        let bare = parse_media_registry(
            path,
            br#"[{"originalUrl": "shopify://a.png", "url": "/media/a.png"}]"#,
        )
        .expect("bare array");
        assert_eq!(bare.len(), 1);

        let wrapped = parse_media_registry(
            path,
            br#"{"media": [{"cdnUrl": "https://cdn.test/a.png", "servedUrl": "/media/a.png"}, {"originalUrl": "b", "url": "/b"}]}"#,
        )
        .expect("wrapped");
        assert_eq!(wrapped.len(), 2);
        assert_eq!(
            wrapped.find("https://cdn.test/a.png").map(|entry| entry.served_url.as_str()),
            Some("/media/a.png")
        );
    }

    #[test]
    fn decode_errors_name_the_file() {
        let err = parse_theme_document(Path::new("broken-theme.json"), b"{\"pages\": [")
            .expect_err("invalid json");
        assert!(matches!(err, InfraError::Decode { .. }));
        assert!(err.to_string().contains("broken-theme.json"));
    }

    #[tokio::test]
    async fn loads_theme_document_from_disk() {
        let file = write_temp(
            r#"{"pages": {"index": {"components": [{"id": "a", "componentType": "Hero"}]}}, "components": []}"#,
        );

        let document = load_theme_document(file.path()).await.expect("loads");
        assert_eq!(document.sections_for("index").len(), 1);
        assert_eq!(document.page_names().collect::<Vec<_>>(), vec!["index"]);
    }

    #[tokio::test]
    async fn missing_files_surface_io_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_media_registry(&dir.path().join("absent.json"))
            .await
            .expect_err("missing file");
        assert!(matches!(err, InfraError::Io(_)));
    }

    #[tokio::test]
    async fn absent_registry_path_yields_empty_registry() {
        let registry = load_optional_media_registry(None).await.expect("empty registry");
        assert!(registry.is_empty());
    }
}
