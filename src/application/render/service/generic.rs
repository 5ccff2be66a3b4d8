use crate::application::render::types::RenderNode;
use crate::domain::{settings::SettingsMap, theme::Block};

use super::{blocks::render_blocks, context::RenderContext, style::container_style};

pub(crate) const GENERIC_TAG: &str = "generic-section";

/// Schema-agnostic section: container style from settings conventions, then every enabled
/// block in order.
pub fn render_generic_section(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    RenderNode::block(GENERIC_TAG)
        .with_styles(container_style(settings))
        .with_children(render_blocks(blocks, context))
}
