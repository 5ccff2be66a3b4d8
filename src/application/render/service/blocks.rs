//! Block rendering over a small, closed vocabulary of block kinds.

use tracing::debug;

use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingKey, SettingsMap};
use crate::domain::theme::Block;

use super::{
    context::RenderContext,
    style::{BORDER_RADIUS, WIDTH, length_of, text_style},
    video::{is_native_video, normalize_video_url},
};

const BUTTON_LABEL: SettingKey =
    SettingKey::new("label", &["label", "button_label", "text", "title"]);
const BUTTON_LINK: SettingKey = SettingKey::new("link", &["link", "url", "href", "button_link"]);
const BUTTON_STYLE: SettingKey = SettingKey::new("style", &["style", "button_style"]);
const ALT_TEXT: SettingKey = SettingKey::new("alt", &["alt", "alt_text", "image_alt"]);
const VIDEO_URL: SettingKey = SettingKey::new("video_url", &["video_url", "url", "video"]);
const TEXT_CONTENT: SettingKey = SettingKey::new("text", &["text", "heading"]);
const HEADING_CONTENT: SettingKey = SettingKey::new("heading", &["heading", "text"]);
const EMBED_ALLOW: &str = "accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Text,
    Heading,
    Button,
    Image,
    Video,
    Row,
    Other,
}

impl BlockKind {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "text" => Self::Text,
            "heading" => Self::Heading,
            "button" => Self::Button,
            "image" => Self::Image,
            "video" => Self::Video,
            "row" => Self::Row,
            _ => Self::Other,
        }
    }
}

/// Renders one block. `None` only when an image or video block has no usable URL.
pub fn render_block(block: &Block, context: &RenderContext<'_>) -> Option<RenderNode> {
    let settings = &block.settings;
    let node = match BlockKind::from_type(&block.kind) {
        BlockKind::Text => Some(rich_text_leaf("text", TEXT_CONTENT.string(settings), settings)),
        BlockKind::Heading => Some(heading_leaf(settings)),
        BlockKind::Button => Some(button_leaf(settings)),
        BlockKind::Image => image_leaf("image", settings, "image", context),
        BlockKind::Video => video_leaf(media_setting(settings, &VIDEO_URL), settings, context),
        BlockKind::Row => Some(composite_leaf("row", settings, &ROW_PARTS, context)),
        BlockKind::Other => {
            debug!(
                target = "application::render::blocks",
                block_type = %block.kind,
                block_id = %block.id,
                "unknown block type; rendering fallback"
            );
            Some(fallback_leaf(block))
        }
    };

    node.map(|node| label_block(node, block))
}

/// Renders enabled blocks in their original order.
pub fn render_blocks(blocks: &[Block], context: &RenderContext<'_>) -> Vec<RenderNode> {
    blocks
        .iter()
        .filter(|block| !block.disabled)
        .filter_map(|block| render_block(block, context))
        .collect()
}

pub(crate) fn label_block(node: RenderNode, block: &Block) -> RenderNode {
    let node = node.with_attr("data-block-type", block.kind.as_str());
    if block.id.is_empty() {
        node
    } else {
        node.with_attr("data-block-id", block.id.as_str())
    }
}

/// Rich text is carried unescaped; sanitising it is the painter's call.
pub(crate) fn rich_text_leaf(tag: &str, html: Option<&str>, settings: &SettingsMap) -> RenderNode {
    let node = RenderNode::leaf(tag).with_styles(text_style(settings));
    match html {
        Some(html) => node.with_html(html),
        None => node,
    }
}

fn heading_leaf(settings: &SettingsMap) -> RenderNode {
    rich_text_leaf("heading", HEADING_CONTENT.string(settings), settings)
        .with_attr_opt("data-level", settings::string(settings, "heading_size"))
}

fn button_leaf(settings: &SettingsMap) -> RenderNode {
    build_button(
        BUTTON_LABEL.string(settings).unwrap_or_default(),
        BUTTON_LINK.string(settings),
        settings,
    )
}

/// Link styled as a button. Target, style class and width come from `settings`.
pub(crate) fn build_button(label: &str, href: Option<&str>, settings: &SettingsMap) -> RenderNode {
    let style = BUTTON_STYLE.string(settings).unwrap_or("primary");
    let mut node = RenderNode::leaf("button")
        .with_text(label)
        .with_attr("href", href.unwrap_or("#"))
        .with_attr("class", format!("button button--{style}"));

    if settings::flag(settings, "open_in_new_tab") {
        node = node
            .with_attr("target", "_blank")
            .with_attr("rel", "noopener noreferrer");
    }

    match WIDTH.scalar(settings).as_deref() {
        Some("full-width") => node.with_style("width", "100%"),
        Some(width) => node.with_style("width", width),
        None => node,
    }
}

/// Image leaf for the media setting `key`, or `None` when the setting is absent.
pub(crate) fn image_leaf(
    tag: &str,
    settings: &SettingsMap,
    key: &str,
    context: &RenderContext<'_>,
) -> Option<RenderNode> {
    let url = settings::media_url(settings, key)?;
    let node = RenderNode::leaf(tag)
        .with_attr("src", context.resolve_media(url))
        .with_attr("alt", ALT_TEXT.string(settings).unwrap_or_default())
        .with_style_opt("width", length_of(&WIDTH, settings))
        .with_style_opt("border-radius", length_of(&BORDER_RADIUS, settings));
    Some(node)
}

/// Native `<video>` leaf for direct files, embedded frame for everything else.
pub(crate) fn video_leaf(
    url: Option<&str>,
    settings: &SettingsMap,
    context: &RenderContext<'_>,
) -> Option<RenderNode> {
    let normalized = normalize_video_url(url)?;

    let node = if is_native_video(&normalized) {
        let mut node = RenderNode::leaf("video")
            .with_attr("src", context.resolve_media(&normalized))
            .with_attr("controls", "controls");
        for toggle in ["autoplay", "loop", "muted"] {
            if settings::flag(settings, toggle) {
                node = node.with_attr(toggle, toggle);
            }
        }
        node
    } else {
        RenderNode::leaf("embed")
            .with_attr("src", normalized)
            .with_attr("allow", EMBED_ALLOW)
            .with_attr("allowfullscreen", "true")
            .with_attr_opt("title", settings::string(settings, "title"))
    };

    Some(
        node.with_style("width", "100%")
            .with_style("aspect-ratio", "16 / 9"),
    )
}

pub(crate) fn media_setting<'a>(settings: &'a SettingsMap, key: &SettingKey) -> Option<&'a str> {
    key.aliases
        .iter()
        .find_map(|alias| settings::media_url(settings, alias))
}

/// Setting names feeding each optional part of a composite block.
pub(crate) struct CompositeParts {
    pub(crate) image: &'static str,
    pub(crate) caption: &'static str,
    pub(crate) heading: &'static str,
    pub(crate) text: &'static str,
    pub(crate) button_label: &'static str,
    pub(crate) button_link: &'static str,
}

pub(crate) const ROW_PARTS: CompositeParts = CompositeParts {
    image: "image",
    caption: "caption",
    heading: "heading",
    text: "text",
    button_label: "button_label",
    button_link: "button_link",
};

/// Image, caption, heading, rich text and button, each emitted only when present.
pub(crate) fn composite_leaf(
    tag: &str,
    settings: &SettingsMap,
    parts: &CompositeParts,
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block(tag);

    if let Some(image) = image_leaf("image", settings, parts.image, context) {
        node.push_child(image);
    }
    if let Some(caption) = settings::string(settings, parts.caption) {
        node.push_child(RenderNode::leaf("caption").with_text(caption));
    }
    if let Some(heading) = settings::string(settings, parts.heading) {
        node.push_child(RenderNode::leaf("heading").with_html(heading));
    }
    if let Some(text) = settings::string(settings, parts.text) {
        node.push_child(RenderNode::leaf("text").with_html(text));
    }
    if let Some(label) = settings::string(settings, parts.button_label) {
        node.push_child(build_button(
            label,
            settings::string(settings, parts.button_link),
            settings,
        ));
    }

    node
}

fn fallback_leaf(block: &Block) -> RenderNode {
    let label = if block.kind.is_empty() {
        "unknown"
    } else {
        block.kind.as_str()
    };
    let node = RenderNode::leaf("block-fallback").with_attr("label", label);
    let text = settings::string(&block.settings, "text")
        .or_else(|| settings::string(&block.settings, "title"));
    match text {
        Some(text) => node.with_text(text),
        None => node,
    }
}
