use tracing::{debug, trace};

use crate::application::render::types::RenderNode;
use crate::domain::settings::SettingsMap;
use crate::domain::theme::{Block, Section};

use super::{context::RenderContext, generic::render_generic_section, sections};

/// Section types with a dedicated renderer, keyed by `componentType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Header,
    AnnouncementBar,
    Banner,
    Hero,
    FeaturedCollection,
    FeaturedProduct,
    ProductList,
    CollectionList,
    MultiColumn,
    RichText,
    Footer,
    ImageWithText,
    Video,
    Newsletter,
}

impl SectionKind {
    pub const ALL: [SectionKind; 14] = [
        SectionKind::Header,
        SectionKind::AnnouncementBar,
        SectionKind::Banner,
        SectionKind::Hero,
        SectionKind::FeaturedCollection,
        SectionKind::FeaturedProduct,
        SectionKind::ProductList,
        SectionKind::CollectionList,
        SectionKind::MultiColumn,
        SectionKind::RichText,
        SectionKind::Footer,
        SectionKind::ImageWithText,
        SectionKind::Video,
        SectionKind::Newsletter,
    ];

    /// Exact, case-sensitive match on the component type.
    pub fn from_component_type(component_type: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.component_type() == component_type)
    }

    pub fn component_type(self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::AnnouncementBar => "AnnouncementBar",
            SectionKind::Banner => "Banner",
            SectionKind::Hero => "Hero",
            SectionKind::FeaturedCollection => "FeaturedCollection",
            SectionKind::FeaturedProduct => "FeaturedProduct",
            SectionKind::ProductList => "ProductList",
            SectionKind::CollectionList => "CollectionList",
            SectionKind::MultiColumn => "MultiColumn",
            SectionKind::RichText => "RichText",
            SectionKind::Footer => "Footer",
            SectionKind::ImageWithText => "ImageWithText",
            SectionKind::Video => "Video",
            SectionKind::Newsletter => "Newsletter",
        }
    }

    pub fn render(
        self,
        settings: &SettingsMap,
        blocks: &[Block],
        context: &RenderContext<'_>,
    ) -> RenderNode {
        let render: fn(&SettingsMap, &[Block], &RenderContext<'_>) -> RenderNode = match self {
            SectionKind::Header => sections::header,
            SectionKind::AnnouncementBar => sections::announcement_bar,
            SectionKind::Banner => sections::banner,
            SectionKind::Hero => sections::hero,
            SectionKind::FeaturedCollection => sections::featured_collection,
            SectionKind::FeaturedProduct => sections::featured_product,
            SectionKind::ProductList => sections::product_list,
            SectionKind::CollectionList => sections::collection_list,
            SectionKind::MultiColumn => sections::multi_column,
            SectionKind::RichText => sections::rich_text,
            SectionKind::Footer => sections::footer,
            SectionKind::ImageWithText => sections::image_with_text,
            SectionKind::Video => sections::video,
            SectionKind::Newsletter => sections::newsletter,
        };
        render(settings, blocks, context)
    }
}

/// How a section was rendered, for metrics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Specialized(SectionKind),
    Generic,
    Suppressed,
}

/// Renders one section, or `None` when its settings mark it disabled.
pub fn dispatch_section(section: &Section, context: &RenderContext<'_>) -> Option<RenderNode> {
    dispatch_section_traced(section, context).0
}

pub(crate) fn dispatch_section_traced(
    section: &Section,
    context: &RenderContext<'_>,
) -> (Option<RenderNode>, Dispatch) {
    if section.is_disabled() {
        trace!(
            target = "application::render::dispatch",
            section_id = %section.id,
            component_type = %section.component_type,
            "section disabled; suppressed"
        );
        return (None, Dispatch::Suppressed);
    }

    let (body, dispatch) = match SectionKind::from_component_type(&section.component_type) {
        Some(kind) => (
            kind.render(&section.settings, &section.blocks, context),
            Dispatch::Specialized(kind),
        ),
        None => {
            debug!(
                target = "application::render::dispatch",
                section_id = %section.id,
                component_type = %section.component_type,
                "no specialized renderer; using generic section"
            );
            (
                render_generic_section(&section.settings, &section.blocks, context),
                Dispatch::Generic,
            )
        }
    };

    let mut wrapper = RenderNode::section(section.label())
        .with_attr("data-component-type", section.component_type.as_str())
        .with_child(body);
    if !section.id.is_empty() {
        wrapper = wrapper.with_attr("data-section-id", section.id.as_str());
    }
    (Some(wrapper), dispatch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::render::service::generic::GENERIC_TAG;
    use crate::application::render::types::NodeKind;
    use crate::domain::media::MediaRegistry;
    use serde_json::json;

    fn section(value: serde_json::Value) -> Section {
        serde_json::from_value(value).expect("section json")
    }

    fn dispatch(section: &Section) -> Option<RenderNode> {
        let registry = MediaRegistry::default();
        let context = RenderContext::new(&registry, "");
        dispatch_section(section, &context)
    }

    #[test]
    fn every_specialized_kind_round_trips_its_key() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_component_type(kind.component_type()), Some(kind));
        }
        assert_eq!(SectionKind::from_component_type("hero"), None);
        assert_eq!(SectionKind::from_component_type(""), None);
    }

    #[test]
    fn specialized_output_is_wrapped_and_labelled() {
        let node = dispatch(&section(json!({
            "id": "hero-1",
            "componentType": "Hero",
            "schemaType": "image-banner",
            "settings": {"heading": "Hi"}
        })))
        .expect("rendered");

        assert_eq!(node.kind, NodeKind::Section);
        assert_eq!(node.tag, "image-banner");
        assert_eq!(node.attr("data-section-id"), Some("hero-1"));
        assert_eq!(node.attr("data-component-type"), Some("Hero"));
        assert_eq!(node.child_tags(), vec!["hero"]);
    }

    #[test]
    fn unknown_types_reach_the_generic_renderer() {
        for component_type in ["Testimonials", "header", "", "Custom::Thing"] {
            let node = dispatch(&section(json!({
                "componentType": component_type,
                "blocks": [{"type": "text", "settings": {"text": "x"}}]
            })))
            .expect("rendered");
            assert_eq!(node.child_tags(), vec![GENERIC_TAG]);
            assert_eq!(node.children[0].child_tags(), vec!["text"]);
        }
    }

    #[test]
    fn disabled_sections_emit_nothing() {
        for component_type in ["Hero", "Footer", "Unknown"] {
            let suppressed = section(json!({
                "componentType": component_type,
                "settings": {"disabled": true},
                "blocks": [{"type": "text", "settings": {"text": "x"}}]
            }));
            assert!(dispatch(&suppressed).is_none());
        }
    }

    #[test]
    fn label_falls_back_to_component_type() {
        let node = dispatch(&section(json!({"componentType": "RichText"}))).expect("rendered");
        assert_eq!(node.tag, "RichText");
        assert_eq!(node.attr("data-section-id"), None);
    }
}
