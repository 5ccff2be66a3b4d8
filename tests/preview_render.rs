use std::path::{Path, PathBuf};

use storefront_preview::{
    application::render::{
        NodeContent, NodeKind, PreviewOutput, PreviewRequest, PreviewService, RenderContext,
        RenderNode, ThemePreviewService, dispatch_section, render_service, resolve_media_url,
    },
    domain::{media::MediaRegistry, theme::ThemeDocument},
    infra::loader,
    presentation::html::HtmlPainter,
};

const ORIGIN: &str = "http://localhost:3000";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

async fn load_fixtures() -> (ThemeDocument, MediaRegistry) {
    let document = loader::load_theme_document(&fixture("theme.json"))
        .await
        .expect("theme fixture loads");
    let media = loader::load_media_registry(&fixture("media.json"))
        .await
        .expect("media fixture loads");
    (document, media)
}

fn render(document: &ThemeDocument, media: &MediaRegistry, page: &str) -> PreviewOutput {
    render_service().render(&PreviewRequest::new(document, media, page).with_origin(ORIGIN))
}

fn section<'a>(output: &'a PreviewOutput, id: &str) -> &'a RenderNode {
    output
        .sections
        .iter()
        .find(|node| node.attr("data-section-id") == Some(id))
        .unwrap_or_else(|| panic!("section {id} rendered"))
}

#[tokio::test]
async fn index_page_keeps_order_and_drops_disabled_sections() {
    let (document, media) = load_fixtures().await;
    let output = render(&document, &media, "index");

    let ids: Vec<_> = output
        .sections
        .iter()
        .filter_map(|node| node.attr("data-section-id"))
        .collect();
    assert_eq!(ids, vec!["announcement", "hero", "testimonials", "film"]);

    let tags: Vec<_> = output.sections.iter().map(|node| node.tag.as_str()).collect();
    assert_eq!(
        tags,
        vec!["announcement-bar", "image-banner", "Testimonials", "Video"]
    );
    assert!(output.sections.iter().all(|node| node.kind == NodeKind::Section));
}

#[tokio::test]
async fn unknown_section_types_use_generic_container() {
    let (document, media) = load_fixtures().await;
    let output = render(&document, &media, "index");

    let generic = &section(&output, "testimonials").children[0];
    assert_eq!(generic.tag, "generic-section");
    assert_eq!(generic.style("padding-top"), Some("36px"));
    assert_eq!(generic.style("padding-bottom"), Some("0px"));
    assert_eq!(generic.style("height"), Some("500px"));
    assert_eq!(generic.style("background-color"), Some("#f4efe6"));
    assert_eq!(generic.style("justify-content"), Some("center"));

    assert_eq!(
        generic.child_tags(),
        vec!["text", "block-fallback", "embed", "image"]
    );
    let block_ids: Vec<_> = generic
        .children
        .iter()
        .filter_map(|node| node.attr("data-block-id"))
        .collect();
    assert_eq!(block_ids, vec!["q1", "q3", "q4", "q5"]);

    let fallback = &generic.children[1];
    assert_eq!(fallback.attr("label"), Some("quote"));
    assert_eq!(
        fallback.content,
        Some(NodeContent::Text("Worth every penny".into()))
    );
    assert_eq!(
        generic.children[2].attr("src"),
        Some("https://www.youtube.com/embed/abc123")
    );
    assert_eq!(
        generic.children[3].attr("src"),
        Some("http://localhost:3000/media/customer.jpg")
    );
}

#[tokio::test]
async fn specialized_sections_resolve_media_and_video() {
    let (document, media) = load_fixtures().await;
    let output = render(&document, &media, "index");

    let hero = &section(&output, "hero").children[0];
    assert_eq!(hero.tag, "hero");
    assert_eq!(hero.style("min-height"), Some("700px"));
    let image = hero.find("background-image").expect("hero image");
    assert_eq!(image.attr("src"), Some("http://localhost:3000/media/hero.jpg"));
    let button = hero.find("button").expect("hero button");
    assert_eq!(button.attr("href"), Some("/collections/linen"));

    let film = &section(&output, "film").children[0];
    let embed = film.find("embed").expect("video embed");
    assert_eq!(embed.attr("src"), Some("https://www.youtube.com/embed/xyz789"));

    let bar = &section(&output, "announcement").children[0];
    assert_eq!(bar.style("background-color"), Some("#1f2a44"));
    assert_eq!(
        bar.children[0].text(),
        Some("Free shipping over <strong>$50</strong>")
    );
}

#[tokio::test]
async fn css_variables_default_missing_colours() {
    let (document, media) = load_fixtures().await;
    let output = render(&document, &media, "index");

    let variables: Vec<_> = output
        .css_variables
        .iter()
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    assert_eq!(
        variables,
        vec![
            ("--color-background", "#fff"),
            ("--color-primary", "#1f2a44"),
            ("--color-secondary", "#8a6d3b"),
        ]
    );
}

#[tokio::test]
async fn pages_fall_back_to_flat_components() {
    let (document, media) = load_fixtures().await;

    let product = render(&document, &media, "product");
    assert_eq!(product.sections.len(), 1);
    let info = product.sections[0].find("product-info").expect("product info");
    assert_eq!(info.child_tags(), vec!["product-title", "product-price"]);

    let missing = ThemePreviewService::new()
        .render(&PreviewRequest::new(&document, &media, "blog").with_origin(ORIGIN));
    assert_eq!(missing.sections.len(), 1);
    assert_eq!(missing.sections[0].attr("data-section-id"), Some("flat-footer"));
}

#[tokio::test]
async fn media_resolution_is_idempotent() {
    let (_, media) = load_fixtures().await;
    let urls = [
        "shopify://shop_images/hero.jpg",
        "https://cdn.shopify.com/s/files/1/customer.jpg",
        "shopify://shop_images/pending.jpg",
        "https://elsewhere.example.com/a.png",
        "/media/hero.jpg",
        "",
    ];

    for url in urls {
        let once = resolve_media_url(url, &media, ORIGIN);
        let twice = resolve_media_url(&once, &media, ORIGIN);
        assert_eq!(once, twice, "resolving {url:?} twice changed the result");
    }

    assert_eq!(
        resolve_media_url("shopify://shop_images/pending.jpg", &media, ORIGIN),
        "shopify://shop_images/pending.jpg"
    );
    assert_eq!(
        resolve_media_url("shopify://shop_images/hero.jpg", &MediaRegistry::default(), ORIGIN),
        "shopify://shop_images/hero.jpg"
    );
}

#[tokio::test]
async fn output_serialises_with_camel_case_fields() {
    let (document, media) = load_fixtures().await;
    let output = render(&document, &media, "index");

    let value = serde_json::to_value(&output).expect("serialises");
    assert!(value["cssVariables"].is_object());
    let first = &value["sections"][0];
    assert_eq!(first["kind"], "section");
    assert_eq!(first["attrs"]["data-component-type"], "AnnouncementBar");
    assert_eq!(first["children"][0]["styleProps"]["color"], "#ffffff");

    let round_trip: PreviewOutput = serde_json::from_value(value).expect("deserialises");
    assert_eq!(round_trip, output);
}

#[test]
fn painted_section_html_is_stable() {
    let section = serde_json::from_value(serde_json::json!({
        "id": "story",
        "componentType": "RichText",
        "settings": {"content_alignment": "center"},
        "blocks": [
            {"id": "t1", "type": "text", "settings": {"text": "<p>Hi</p>"}},
            {"id": "t2", "type": "button", "settings": {"label": "Read & learn", "link": "/pages/story"}}
        ]
    }))
    .expect("section json");
    let registry = MediaRegistry::default();
    let context = RenderContext::new(&registry, ORIGIN);
    let node = dispatch_section(&section, &context).expect("section renders");

    let mut html = String::new();
    HtmlPainter::default().paint_node(&node, &mut html);

    insta::assert_snapshot!(html, @r#"<section data-node="RichText" data-component-type="RichText" data-section-id="story"><div data-node="rich-text" style="text-align: center"><div data-node="text" data-block-id="t1" data-block-type="text"><p>Hi</p></div><a data-node="button" class="button button--primary" data-block-id="t2" data-block-type="button" href="/pages/story">Read &amp; learn</a></div></section>"#);
}
