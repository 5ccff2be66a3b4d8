//! Page chrome: header, announcement bar and footer.

use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingKey, SettingsMap};
use crate::domain::theme::Block;

use super::super::{
    blocks::{image_leaf, rich_text_leaf},
    context::RenderContext,
    style::{color_style, css_length},
};
use super::content::email_form;
use super::render_section_blocks;

const LINK_LABEL: SettingKey = SettingKey::new("label", &["label", "title", "text"]);
const LINK_HREF: SettingKey = SettingKey::new("link", &["link", "url", "href"]);

pub(crate) fn header(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let shop_name = settings::string(settings, "shop_name");
    let mut node = RenderNode::block("header")
        .with_styles(color_style(settings))
        .with_attr_opt("data-logo-position", settings::string(settings, "logo_position"))
        .with_attr_opt("data-sticky", settings::string(settings, "sticky_header"));

    match image_leaf("logo", settings, "logo", context) {
        Some(logo) => node.push_child(
            logo.with_attr_opt("alt", shop_name)
                .with_style_opt("width", settings.get("logo_width").and_then(css_length)),
        ),
        None => {
            if let Some(name) = shop_name {
                node.push_child(RenderNode::leaf("brand").with_text(name));
            }
        }
    }

    let links = render_section_blocks(blocks, context, |block| {
        (block.kind == "link").then(|| nav_link(&block.settings))
    });
    let menu = settings::string(settings, "menu");
    if menu.is_some() || !links.is_empty() {
        node.push_child(
            RenderNode::block("navigation")
                .with_attr_opt("data-menu", menu)
                .with_children(links),
        );
    }

    node
}

fn nav_link(settings: &SettingsMap) -> RenderNode {
    RenderNode::leaf("nav-link")
        .with_text(LINK_LABEL.string(settings).unwrap_or_default())
        .with_attr("href", LINK_HREF.string(settings).unwrap_or("#"))
}

pub(crate) fn announcement_bar(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    RenderNode::block("announcement-bar")
        .with_styles(color_style(settings))
        .with_children(render_section_blocks(blocks, context, |block| {
            (block.kind == "announcement").then(|| announcement(&block.settings))
        }))
}

fn announcement(settings: &SettingsMap) -> RenderNode {
    rich_text_leaf("announcement", settings::string(settings, "text"), settings)
        .with_attr_opt("href", LINK_HREF.string(settings))
}

pub(crate) fn footer(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block("footer").with_styles(color_style(settings));

    let columns = render_section_blocks(blocks, context, |block| match block.kind.as_str() {
        "link_list" => Some(link_list(&block.settings)),
        "text" => Some(footer_text(&block.settings)),
        _ => None,
    });
    if !columns.is_empty() {
        node.push_child(RenderNode::block("footer-columns").with_children(columns));
    }

    if settings::flag(settings, "newsletter_enable") {
        let mut signup = RenderNode::block("footer-newsletter");
        if let Some(heading) = settings::string(settings, "newsletter_heading") {
            signup.push_child(RenderNode::leaf("heading").with_html(heading));
        }
        signup.push_child(email_form(settings));
        node.push_child(signup);
    }
    if settings::flag(settings, "show_social") {
        node.push_child(RenderNode::leaf("social-links"));
    }
    if settings::flag(settings, "payment_enable") {
        node.push_child(RenderNode::leaf("payment-icons"));
    }
    if let Some(copyright) = settings::string(settings, "copyright_text") {
        node.push_child(RenderNode::leaf("copyright").with_text(copyright));
    }

    node
}

fn link_list(settings: &SettingsMap) -> RenderNode {
    let mut node = RenderNode::block("link-list");
    if let Some(heading) = settings::string(settings, "heading") {
        node.push_child(RenderNode::leaf("heading").with_text(heading));
    }
    node.with_child(RenderNode::leaf("menu").with_attr_opt("data-menu", settings::string(settings, "menu")))
}

fn footer_text(settings: &SettingsMap) -> RenderNode {
    let mut node = RenderNode::block("footer-text");
    if let Some(heading) = settings::string(settings, "heading") {
        node.push_child(RenderNode::leaf("heading").with_html(heading));
    }
    let body = settings::string(settings, "subtext").or_else(|| settings::string(settings, "text"));
    if let Some(body) = body {
        node.push_child(RenderNode::leaf("text").with_html(body));
    }
    node
}
