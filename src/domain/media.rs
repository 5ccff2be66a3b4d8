use serde::{Deserialize, Serialize};

/// One asset known to the theme-sync collaborator, mapping remote references to the
/// locally served copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    #[serde(default)]
    pub original_url: String,
    #[serde(default)]
    pub cdn_url: String,
    #[serde(rename = "url", alias = "servedUrl", default)]
    pub served_url: String,
}

impl MediaEntry {
    pub fn new(
        original_url: impl Into<String>,
        cdn_url: impl Into<String>,
        served_url: impl Into<String>,
    ) -> Self {
        Self {
            original_url: original_url.into(),
            cdn_url: cdn_url.into(),
            served_url: served_url.into(),
        }
    }

    pub fn matches(&self, url: &str) -> bool {
        self.original_url == url || self.cdn_url == url
    }
}

/// Flat, read-only registry supplied wholesale by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRegistry {
    entries: Vec<MediaEntry>,
}

impl MediaRegistry {
    pub fn new(entries: Vec<MediaEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MediaEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// First entry whose original or CDN URL equals `url` exactly.
    pub fn find(&self, url: &str) -> Option<&MediaEntry> {
        self.entries.iter().find(|entry| entry.matches(url))
    }
}

impl From<Vec<MediaEntry>> for MediaRegistry {
    fn from(entries: Vec<MediaEntry>) -> Self {
        Self::new(entries)
    }
}
