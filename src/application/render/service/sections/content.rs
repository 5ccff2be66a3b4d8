use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingsMap};
use crate::domain::theme::Block;

use super::super::{
    blocks::{CompositeParts, composite_leaf, render_blocks, rich_text_leaf},
    context::RenderContext,
    style::{MAX_WIDTH, TEXT_ALIGN, color_style, grid_style, length_of},
};
use super::{render_section_blocks, title_leaf};

const COLUMN_PARTS: CompositeParts = CompositeParts {
    image: "image",
    caption: "caption",
    heading: "title",
    text: "text",
    button_label: "link_label",
    button_link: "link",
};

pub(crate) fn multi_column(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block("multi-column").with_styles(color_style(settings));
    if let Some(title) = title_leaf(settings, "title") {
        node.push_child(title);
    }

    let columns = render_section_blocks(blocks, context, |block| {
        (block.kind == "column").then(|| composite_leaf("column", &block.settings, &COLUMN_PARTS, context))
    });
    node.with_child(
        RenderNode::block("column-grid")
            .with_styles(grid_style(settings, "columns_desktop", 3))
            .with_children(columns),
    )
}

pub(crate) fn rich_text(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    RenderNode::block("rich-text")
        .with_styles(color_style(settings))
        .with_style_opt("text-align", TEXT_ALIGN.scalar(settings))
        .with_style_opt("max-width", length_of(&MAX_WIDTH, settings))
        .with_attr_opt("data-position", settings::string(settings, "desktop_content_position"))
        .with_children(render_blocks(blocks, context))
}

pub(crate) fn newsletter(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    RenderNode::block("newsletter")
        .with_styles(color_style(settings))
        .with_children(render_section_blocks(blocks, context, |block| {
            match block.kind.as_str() {
                "email_form" => Some(email_form(&block.settings)),
                "paragraph" => Some(rich_text_leaf(
                    "text",
                    settings::string(&block.settings, "text"),
                    &block.settings,
                )),
                _ => None,
            }
        }))
}

/// Email input plus submit control. Nothing is posted; the form is a preview only.
pub(crate) fn email_form(settings: &SettingsMap) -> RenderNode {
    let placeholder = settings::string(settings, "placeholder").unwrap_or("Email");
    let label = settings::string(settings, "button_label").unwrap_or("Subscribe");
    RenderNode::block("email-form")
        .with_child(
            RenderNode::leaf("email-input")
                .with_attr("type", "email")
                .with_attr("name", "contact[email]")
                .with_attr("placeholder", placeholder),
        )
        .with_child(RenderNode::leaf("submit").with_text(label))
}
