//! Renderers for the section types the storefront editor ships with.
//!
//! Each renderer reads the settings it understands and hands every block it does not
//! specialise to the block dispatcher, so unfamiliar blocks still show up in the tree.

mod catalog;
mod chrome;
mod content;
mod showcase;

pub(crate) use catalog::{collection_list, featured_collection, featured_product, product_list};
pub(crate) use chrome::{announcement_bar, footer, header};
pub(crate) use content::{multi_column, newsletter, rich_text};
pub(crate) use showcase::{banner, hero, image_with_text, video};

use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingsMap};
use crate::domain::theme::Block;

use super::blocks::{label_block, render_block};
use super::context::RenderContext;

/// Renders enabled blocks in order. `claim` builds the node for kinds the section owns and
/// returns `None` for everything else, which goes through the block dispatcher.
pub(crate) fn render_section_blocks<F>(
    blocks: &[Block],
    context: &RenderContext<'_>,
    mut claim: F,
) -> Vec<RenderNode>
where
    F: FnMut(&Block) -> Option<RenderNode>,
{
    blocks
        .iter()
        .filter(|block| !block.disabled)
        .filter_map(|block| match claim(block) {
            Some(node) => Some(label_block(node, block)),
            None => render_block(block, context),
        })
        .collect()
}

/// Section title as a heading leaf, when `key` holds one.
pub(crate) fn title_leaf(settings: &SettingsMap, key: &str) -> Option<RenderNode> {
    settings::string(settings, key).map(|title| RenderNode::leaf("heading").with_html(title))
}
