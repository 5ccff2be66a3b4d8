use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{media::MediaRegistry, theme::ThemeDocument};

/// Inline style properties resolved for a node, keyed by CSS property name.
pub type StyleProps = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    Block,
    Leaf,
}

/// Leaf payload. Plain text is escaped by painters; rich text is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", content = "value", rename_all = "lowercase")]
pub enum NodeContent {
    Text(String),
    Html(String),
}

impl NodeContent {
    pub fn as_str(&self) -> &str {
        match self {
            NodeContent::Text(value) | NodeContent::Html(value) => value,
        }
    }
}

/// Presentation-independent description of one piece of UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub kind: NodeKind,
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style_props: StyleProps,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<NodeContent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
}

impl RenderNode {
    pub fn new(kind: NodeKind, tag: impl Into<String>) -> Self {
        Self {
            kind,
            tag: tag.into(),
            style_props: StyleProps::new(),
            attrs: BTreeMap::new(),
            content: None,
            children: Vec::new(),
        }
    }

    pub fn section(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Section, tag)
    }

    pub fn block(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Block, tag)
    }

    pub fn leaf(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Leaf, tag)
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style_props.insert(property.into(), value.into());
        self
    }

    pub fn with_style_opt(self, property: &str, value: Option<String>) -> Self {
        match value {
            Some(value) => self.with_style(property, value),
            None => self,
        }
    }

    pub fn with_styles(mut self, styles: StyleProps) -> Self {
        self.style_props.extend(styles);
        self
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn with_attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_attr(name, value),
            None => self,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(NodeContent::Text(text.into()));
        self
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.content = Some(NodeContent::Html(html.into()));
        self
    }

    pub fn with_child(mut self, child: RenderNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push_child(&mut self, child: RenderNode) {
        self.children.push(child);
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style_props.get(property).map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().map(NodeContent::as_str)
    }

    /// Depth-first search for the first node with `tag`, including `self`.
    pub fn find(&self, tag: &str) -> Option<&RenderNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }

    /// Tags of direct children, in order.
    pub fn child_tags(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.tag.as_str()).collect()
    }
}

/// Everything one page render needs. All inputs are borrowed and read-only.
#[derive(Debug, Clone, Copy)]
pub struct PreviewRequest<'a> {
    pub document: &'a ThemeDocument,
    pub media: &'a MediaRegistry,
    pub page: &'a str,
    /// Base address prepended to locally served media paths.
    pub origin: &'a str,
}

impl<'a> PreviewRequest<'a> {
    pub fn new(document: &'a ThemeDocument, media: &'a MediaRegistry, page: &'a str) -> Self {
        Self {
            document,
            media,
            page,
            origin: "",
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = origin;
        self
    }
}

/// Rendered page: ordered section nodes plus the CSS custom properties from `theme.colors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOutput {
    pub sections: Vec<RenderNode>,
    pub css_variables: BTreeMap<String, String>,
}

impl PreviewOutput {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Turns a theme document page into a render tree.
pub trait PreviewService {
    fn render(&self, request: &PreviewRequest<'_>) -> PreviewOutput;
}
