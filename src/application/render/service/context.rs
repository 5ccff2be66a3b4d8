use crate::domain::media::MediaRegistry;

use super::media::MediaResolver;

/// Read-only state shared by every renderer during one page render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    media: MediaResolver<'a>,
}

impl<'a> RenderContext<'a> {
    pub fn new(registry: &'a MediaRegistry, origin: &'a str) -> Self {
        Self {
            media: MediaResolver::new(registry, origin),
        }
    }

    pub fn resolve_media(&self, url: &str) -> String {
        self.media.resolve(url)
    }
}
