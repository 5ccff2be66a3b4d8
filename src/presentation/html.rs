//! Paints render trees as HTML.

use std::collections::HashSet;

use ammonia::Builder as AmmoniaBuilder;

use crate::application::render::{NodeContent, NodeKind, RenderNode};

/// Writes nodes as HTML. Text content and attributes are always escaped; rich text is
/// written verbatim unless a sanitizer is configured.
pub struct HtmlPainter {
    sanitizer: Option<AmmoniaBuilder<'static>>,
}

impl HtmlPainter {
    pub fn new(sanitize_html: bool) -> Self {
        Self {
            sanitizer: sanitize_html.then(build_rich_text_sanitizer),
        }
    }

    pub fn sanitizes(&self) -> bool {
        self.sanitizer.is_some()
    }

    /// Paints every section, one per line.
    pub fn paint_sections(&self, sections: &[RenderNode]) -> String {
        let mut html = String::new();
        for section in sections {
            self.paint_node(section, &mut html);
            html.push('\n');
        }
        html
    }

    pub fn paint_node(&self, node: &RenderNode, out: &mut String) {
        let element = element_for(node);

        out.push('<');
        out.push_str(element.name);
        push_attribute(out, "data-node", &node.tag);
        for (name, value) in &node.attrs {
            push_attribute(out, name, value);
        }
        if node.tag == "submit" {
            push_attribute(out, "type", "submit");
        }
        if !node.style_props.is_empty() {
            let style = node
                .style_props
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            push_attribute(out, "style", &style);
        }
        out.push('>');

        if element.void {
            return;
        }

        match &node.content {
            Some(NodeContent::Text(text)) => out.push_str(&escape_text(text)),
            Some(NodeContent::Html(html)) => match &self.sanitizer {
                Some(sanitizer) => out.push_str(&sanitizer.clean(html).to_string()),
                None => out.push_str(html),
            },
            None => {}
        }
        for child in &node.children {
            self.paint_node(child, out);
        }

        out.push_str("</");
        out.push_str(element.name);
        out.push('>');
    }
}

impl Default for HtmlPainter {
    fn default() -> Self {
        Self::new(false)
    }
}

struct Element {
    name: &'static str,
    void: bool,
}

impl Element {
    const fn open(name: &'static str) -> Self {
        Self { name, void: false }
    }

    const fn void(name: &'static str) -> Self {
        Self { name, void: true }
    }
}

fn element_for(node: &RenderNode) -> Element {
    match node.kind {
        NodeKind::Section => return Element::open("section"),
        NodeKind::Block => return Element::open("div"),
        NodeKind::Leaf => {}
    }

    match node.tag.as_str() {
        "image" | "logo" | "background-image" | "cover-image" => Element::void("img"),
        "video" => Element::open("video"),
        "embed" => Element::open("iframe"),
        "email-input" => Element::void("input"),
        "submit" => Element::open("button"),
        "heading" => Element::open("h2"),
        _ if node.attr("href").is_some() => Element::open("a"),
        _ if matches!(node.content, Some(NodeContent::Html(_))) => Element::open("div"),
        _ => Element::open("p"),
    }
}

/// Allow-list for editor rich text: inline formatting, links and paragraphs.
fn build_rich_text_sanitizer() -> AmmoniaBuilder<'static> {
    let mut builder = AmmoniaBuilder::default();

    let tags: HashSet<&'static str> = HashSet::from([
        "a", "b", "br", "em", "h1", "h2", "h3", "h4", "h5", "h6", "i", "li", "ol", "p", "s",
        "span", "strong", "sub", "sup", "u", "ul",
    ]);
    builder.tags(tags);
    builder.add_generic_attributes(&["class"]);
    builder.add_tag_attributes("a", &["target"]);

    builder
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    out.push_str(&escape_attribute(value));
    out.push('"');
}

pub(crate) fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\n' | '\r' | '\t' => escaped.push(' '),
            _ => escaped.push(ch),
        }
    }
    escaped
}

pub(crate) fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint(painter: &HtmlPainter, node: &RenderNode) -> String {
        let mut out = String::new();
        painter.paint_node(node, &mut out);
        out
    }

    #[test]
    fn text_is_escaped_and_rich_text_is_verbatim() {
        let painter = HtmlPainter::default();
        let text = RenderNode::leaf("caption").with_text("Fish & <chips>");
        assert_eq!(
            paint(&painter, &text),
            r#"<p data-node="caption">Fish &amp; &lt;chips&gt;</p>"#
        );

        let html = RenderNode::leaf("text").with_html("<p>Hi <script>x()</script></p>");
        assert_eq!(
            paint(&painter, &html),
            r#"<div data-node="text"><p>Hi <script>x()</script></p></div>"#
        );
    }

    #[test]
    fn sanitizer_strips_scripts_from_rich_text() {
        let painter = HtmlPainter::new(true);
        assert!(painter.sanitizes());
        let node = RenderNode::leaf("text").with_html("<p>Hi <script>x()</script></p>");
        let painted = paint(&painter, &node);
        assert!(!painted.contains("script"));
        assert!(painted.contains("<p>Hi </p>"));
    }

    #[test]
    fn images_are_void_and_attributes_escaped() {
        let painter = HtmlPainter::default();
        let node = RenderNode::leaf("image")
            .with_attr("src", "/media/a.png?w=1&h=2")
            .with_attr("alt", "\"quoted\"")
            .with_style("width", "120px");
        assert_eq!(
            paint(&painter, &node),
            r#"<img data-node="image" alt="&quot;quoted&quot;" src="/media/a.png?w=1&amp;h=2" style="width: 120px">"#
        );
    }

    #[test]
    fn leaves_with_links_become_anchors() {
        let painter = HtmlPainter::default();
        let node = RenderNode::leaf("button").with_text("Shop").with_attr("href", "/shop");
        assert_eq!(
            paint(&painter, &node),
            r#"<a data-node="button" href="/shop">Shop</a>"#
        );
    }

    #[test]
    fn sections_and_blocks_nest() {
        let painter = HtmlPainter::default();
        let tree = RenderNode::section("image-banner")
            .with_child(RenderNode::block("hero").with_child(RenderNode::leaf("heading").with_html("Hi")));
        assert_eq!(
            painter.paint_sections(std::slice::from_ref(&tree)),
            "<section data-node=\"image-banner\"><div data-node=\"hero\"><h2 data-node=\"heading\">Hi</h2></div></section>\n"
        );
    }
}
