use tracing::trace;
use url::Url;

use crate::domain::media::MediaRegistry;

/// Rewrites remote media references to their locally served copies.
#[derive(Debug, Clone, Copy)]
pub struct MediaResolver<'a> {
    registry: &'a MediaRegistry,
    origin: &'a str,
}

impl<'a> MediaResolver<'a> {
    /// `origin` is resolved once per render by the caller and reused for every lookup.
    pub fn new(registry: &'a MediaRegistry, origin: &'a str) -> Self {
        Self {
            registry,
            origin: origin.trim_end_matches('/'),
        }
    }

    /// Returns the served URL for a registered asset, otherwise `url` unchanged.
    pub fn resolve(&self, url: &str) -> String {
        if url.is_empty() || self.registry.is_empty() {
            return url.to_string();
        }

        match self.registry.find(url) {
            Some(entry) if !entry.served_url.is_empty() => {
                join_origin(self.origin, &entry.served_url)
            }
            Some(_) => {
                trace!(
                    target = "application::render::media",
                    url, "registry entry has no served url; passing through"
                );
                url.to_string()
            }
            None => {
                trace!(
                    target = "application::render::media",
                    url, "no registry entry; passing through"
                );
                url.to_string()
            }
        }
    }
}

/// Free-function form of [`MediaResolver::resolve`].
pub fn resolve_media_url(url: &str, registry: &MediaRegistry, origin: &str) -> String {
    MediaResolver::new(registry, origin).resolve(url)
}

fn join_origin(origin: &str, served: &str) -> String {
    if origin.is_empty() || Url::parse(served).is_ok() {
        return served.to_string();
    }

    if served.starts_with('/') {
        format!("{origin}{served}")
    } else {
        format!("{origin}/{served}")
    }
}
