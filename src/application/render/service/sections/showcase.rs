//! Media-led sections: banners, image with text and video.

use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingKey, SettingsMap};
use crate::domain::theme::Block;

use super::super::{
    blocks::{build_button, image_leaf, media_setting, render_blocks, video_leaf},
    context::RenderContext,
    style::{color_style, section_height},
};

const IMAGE_HEIGHT: SettingKey =
    SettingKey::new("image_height", &["image_height", "section_height", "height"]);
const SECTION_VIDEO: SettingKey = SettingKey::new("video_url", &["video_url", "video"]);

pub(crate) fn banner(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let content = content_column(settings).with_children(render_blocks(blocks, context));
    media_banner("banner", settings, context, None, content)
}

/// Banner with its own heading, subheading and call to action ahead of any blocks.
pub(crate) fn hero(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut content = content_column(settings);
    if let Some(heading) = settings::string(settings, "heading") {
        content.push_child(RenderNode::leaf("heading").with_html(heading));
    }
    if let Some(subheading) = settings::string(settings, "subheading") {
        content.push_child(RenderNode::leaf("text").with_html(subheading));
    }
    if let Some(label) = settings::string(settings, "button_label") {
        content.push_child(build_button(
            label,
            settings::string(settings, "button_link"),
            settings,
        ));
    }
    let content = content.with_children(render_blocks(blocks, context));
    media_banner("hero", settings, context, Some("large"), content)
}

fn content_column(settings: &SettingsMap) -> RenderNode {
    RenderNode::block("content")
        .with_attr_opt("data-position", settings::string(settings, "desktop_content_position"))
}

fn media_banner(
    tag: &str,
    settings: &SettingsMap,
    context: &RenderContext<'_>,
    default_height: Option<&str>,
    content: RenderNode,
) -> RenderNode {
    let height = IMAGE_HEIGHT.string(settings).or(default_height);
    let mut node = RenderNode::block(tag)
        .with_styles(color_style(settings))
        .with_style("position", "relative")
        .with_style("min-height", section_height(height));

    if let Some(image) = image_leaf("background-image", settings, "image", context) {
        node.push_child(
            image
                .with_style("width", "100%")
                .with_style("height", "100%")
                .with_style("object-fit", "cover"),
        );
    }
    if let Some(opacity) = overlay_opacity(settings) {
        node.push_child(RenderNode::leaf("overlay").with_style("opacity", opacity));
    }

    node.with_child(content)
}

/// Editor stores the overlay as a percentage.
fn overlay_opacity(settings: &SettingsMap) -> Option<String> {
    settings::number(settings, "image_overlay_opacity")
        .filter(|value| value.is_finite() && *value > 0.0)
        .map(|value| (value / 100.0).min(1.0).to_string())
}

pub(crate) fn image_with_text(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut media = RenderNode::block("media")
        .with_style_opt("width", image_width(settings::string(settings, "desktop_image_width")));
    if let Some(image) = image_leaf("image", settings, "image", context) {
        media.push_child(image);
    }
    let content = content_column(settings).with_children(render_blocks(blocks, context));

    let columns = if settings::string(settings, "layout") == Some("text_first") {
        [content, media]
    } else {
        [media, content]
    };

    RenderNode::block("image-with-text")
        .with_styles(color_style(settings))
        .with_style("display", "flex")
        .with_style("min-height", section_height(IMAGE_HEIGHT.string(settings)))
        .with_children(columns)
}

fn image_width(value: Option<&str>) -> Option<String> {
    let width = match value? {
        "small" => "33%",
        "medium" => "50%",
        "large" => "66%",
        _ => return None,
    };
    Some(width.to_string())
}

/// Video section. Blocks are not part of this section's schema and are ignored.
pub(crate) fn video(
    settings: &SettingsMap,
    _blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block("video-section").with_styles(color_style(settings));
    if settings::flag(settings, "full_width") {
        node = node
            .with_attr("data-full-width", "true")
            .with_style("width", "100%");
    }
    if let Some(heading) = settings::string(settings, "heading") {
        node.push_child(RenderNode::leaf("heading").with_html(heading));
    }

    let cover = settings::media_url(settings, "cover_image").map(|url| context.resolve_media(url));
    match video_leaf(media_setting(settings, &SECTION_VIDEO), settings, context) {
        Some(player) if player.tag == "video" => {
            node.push_child(player.with_attr_opt("poster", cover.as_deref()));
        }
        Some(player) => node.push_child(player),
        None => {
            if let Some(cover) = image_leaf("cover-image", settings, "cover_image", context) {
                node.push_child(cover);
            }
        }
    }

    if let Some(description) = settings::string(settings, "description") {
        node.push_child(RenderNode::leaf("text").with_html(description));
    }
    node
}
