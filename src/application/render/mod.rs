//! Theme preview rendering.
//!
//! The pipeline is pure: it borrows a theme document, a media registry and an origin,
//! and produces a presentation-independent node tree. It never fails; unknown section
//! and block types degrade to generic output instead of surfacing errors.

mod service;
mod types;

pub use service::{
    BlockKind, Dispatch, MediaResolver, RenderContext, SECTION_STYLE_KEYS, SectionKind,
    ThemePreviewService, container_style, css_length, dispatch_section, is_native_video,
    normalize_video_url, render_block, render_blocks, render_generic_section, render_service,
    resolve_media_url, section_height,
};
pub use types::{
    NodeContent, NodeKind, PreviewOutput, PreviewRequest, PreviewService, RenderNode, StyleProps,
};
