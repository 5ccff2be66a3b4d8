//! Product and collection sections.
//!
//! Catalog data is not fetched during a preview. Cards are placeholders that carry the
//! product or collection handle and their position so a storefront can hydrate them later.

use crate::application::render::types::RenderNode;
use crate::domain::settings::{self, SettingsMap};
use crate::domain::theme::Block;

use super::super::{
    blocks::{build_button, image_leaf, render_blocks},
    context::RenderContext,
    style::{color_style, grid_style},
};
use super::{render_section_blocks, title_leaf};

const DEFAULT_PRODUCTS_TO_SHOW: usize = 4;
const MAX_PRODUCTS_TO_SHOW: f64 = 50.0;

pub(crate) fn featured_collection(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let collection = settings::string(settings, "collection");
    let mut node = RenderNode::block("featured-collection")
        .with_styles(color_style(settings))
        .with_attr_opt("data-collection", collection);
    if let Some(title) = title_leaf(settings, "title") {
        node.push_child(title);
    }

    let cards = (1..=products_to_show(settings)).map(|position| product_card(None, collection, position));
    node.push_child(
        RenderNode::block("product-grid")
            .with_styles(grid_style(settings, "columns_desktop", 4))
            .with_children(cards),
    );

    if settings::flag(settings, "show_view_all") {
        let href = format!("/collections/{}", collection.unwrap_or("all"));
        node.push_child(build_button("View all", Some(href.as_str()), settings));
    }

    node.with_children(render_blocks(blocks, context))
}

fn products_to_show(settings: &SettingsMap) -> usize {
    settings::number(settings, "products_to_show")
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(1.0, MAX_PRODUCTS_TO_SHOW) as usize)
        .unwrap_or(DEFAULT_PRODUCTS_TO_SHOW)
}

pub(crate) fn featured_product(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let product = settings::string(settings, "product");
    let mut node = RenderNode::block("featured-product")
        .with_styles(color_style(settings))
        .with_attr_opt("data-product", product);

    if let Some(image) = image_leaf("image", settings, "image", context) {
        node.push_child(RenderNode::block("media").with_child(image));
    }

    let info = render_section_blocks(blocks, context, |block| {
        let tag = match block.kind.as_str() {
            "title" => "product-title",
            "price" => "product-price",
            "description" => "product-description",
            "buy_buttons" => "buy-buttons",
            _ => return None,
        };
        let leaf = RenderNode::leaf(tag).with_attr_opt("data-product", product);
        if block.kind == "buy_buttons" {
            let dynamic = settings::flag(&block.settings, "show_dynamic_checkout");
            return Some(leaf.with_attr("data-dynamic-checkout", dynamic.to_string()));
        }
        Some(leaf)
    });
    node.with_child(RenderNode::block("product-info").with_children(info))
}

pub(crate) fn product_list(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block("product-list").with_styles(color_style(settings));
    if let Some(title) = title_leaf(settings, "title") {
        node.push_child(title);
    }

    let mut grid = RenderNode::block("product-grid")
        .with_styles(grid_style(settings, "columns_desktop", 4))
        .with_children(
            settings::string_list(settings, "products")
                .into_iter()
                .enumerate()
                .map(|(index, handle)| product_card(Some(handle), None, index + 1)),
        );

    let mut position = grid.children.len();
    let from_blocks = render_section_blocks(blocks, context, |block| {
        (block.kind == "product").then(|| {
            position += 1;
            product_card(settings::string(&block.settings, "product"), None, position)
        })
    });
    grid.children.extend(from_blocks);

    node.with_child(grid)
}

pub(crate) fn collection_list(
    settings: &SettingsMap,
    blocks: &[Block],
    context: &RenderContext<'_>,
) -> RenderNode {
    let mut node = RenderNode::block("collection-list").with_styles(color_style(settings));
    if let Some(title) = title_leaf(settings, "title") {
        node.push_child(title);
    }

    let mut position = 0;
    let cards = render_section_blocks(blocks, context, |block| {
        matches!(block.kind.as_str(), "featured_collection" | "collection").then(|| {
            position += 1;
            collection_card(&block.settings, position, context)
        })
    });

    node.with_child(
        RenderNode::block("collection-grid")
            .with_styles(grid_style(settings, "columns_desktop", 3))
            .with_children(cards),
    )
}

fn product_card(product: Option<&str>, collection: Option<&str>, position: usize) -> RenderNode {
    RenderNode::leaf("product-card")
        .with_attr_opt("data-product", product)
        .with_attr_opt("data-collection", collection)
        .with_attr("data-position", position.to_string())
}

fn collection_card(settings: &SettingsMap, position: usize, context: &RenderContext<'_>) -> RenderNode {
    let handle = settings::string(settings, "collection");
    let mut card = RenderNode::block("collection-card")
        .with_attr_opt("data-collection", handle)
        .with_attr("data-position", position.to_string());
    if let Some(image) = image_leaf("image", settings, "image", context) {
        card.push_child(image);
    }
    if let Some(title) = settings::string(settings, "title").or(handle) {
        card.push_child(RenderNode::leaf("collection-title").with_text(title));
    }
    card
}
