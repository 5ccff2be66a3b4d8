mod blocks;
mod context;
mod dispatch;
mod generic;
mod media;
mod sections;
mod style;
mod video;

use std::{sync::Arc, time::Instant};

use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use tracing::debug;

use crate::application::render::types::{PreviewOutput, PreviewRequest, PreviewService};
use crate::application::theme::css_variables;

pub use blocks::{BlockKind, render_block, render_blocks};
pub use context::RenderContext;
pub use dispatch::{Dispatch, SectionKind, dispatch_section};
pub use generic::render_generic_section;
pub use media::{MediaResolver, resolve_media_url};
pub use style::{SECTION_STYLE_KEYS, container_style, css_length, section_height};
pub use video::{is_native_video, normalize_video_url};

use dispatch::dispatch_section_traced;

/// Default preview pipeline: section dispatch over the requested page plus theme colours.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemePreviewService;

impl ThemePreviewService {
    pub fn new() -> Self {
        Self
    }
}

static PREVIEW_SERVICE: Lazy<Arc<ThemePreviewService>> =
    Lazy::new(|| Arc::new(ThemePreviewService::new()));

/// Access the shared preview service instance.
pub fn render_service() -> Arc<ThemePreviewService> {
    Arc::clone(&PREVIEW_SERVICE)
}

impl PreviewService for ThemePreviewService {
    fn render(&self, request: &PreviewRequest<'_>) -> PreviewOutput {
        let started = Instant::now();
        let context = RenderContext::new(request.media, request.origin);
        let candidates = request.document.sections_for(request.page);

        let mut tally = DispatchTally::default();
        let sections = candidates
            .iter()
            .filter_map(|section| {
                let (node, dispatch) = dispatch_section_traced(section, &context);
                tally.record(dispatch);
                node
            })
            .collect::<Vec<_>>();

        let output = PreviewOutput {
            sections,
            css_variables: css_variables(&request.document.theme.colors),
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        counter!("storefront_preview_sections_rendered_total").increment(tally.rendered);
        counter!("storefront_preview_sections_fallback_total").increment(tally.fallback);
        counter!("storefront_preview_sections_suppressed_total").increment(tally.suppressed);
        histogram!("storefront_preview_render_ms").record(elapsed_ms);

        debug!(
            target = "application::render::service",
            page = request.page,
            sections = candidates.len(),
            rendered = tally.rendered,
            fallback = tally.fallback,
            suppressed = tally.suppressed,
            elapsed_ms,
            "page rendered"
        );

        output
    }
}

#[derive(Debug, Default)]
struct DispatchTally {
    rendered: u64,
    fallback: u64,
    suppressed: u64,
}

impl DispatchTally {
    fn record(&mut self, dispatch: Dispatch) {
        match dispatch {
            Dispatch::Specialized(_) => self.rendered += 1,
            Dispatch::Generic => {
                self.rendered += 1;
                self.fallback += 1;
            }
            Dispatch::Suppressed => self.suppressed += 1,
        }
    }
}
