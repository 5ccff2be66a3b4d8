use askama::{Error as AskamaError, Template};
use thiserror::Error;

use crate::application::{error::AppError, render::PreviewOutput};

use super::html::HtmlPainter;

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for AppError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;
        AppError::unexpected(format!("{public_message} ({source}): {error}"))
    }
}

pub fn render_template<T: Template>(template: T) -> Result<String, TemplateRenderError> {
    template.render().map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
    })
}

#[derive(Clone)]
pub struct CssVariableView {
    pub name: String,
    pub value: String,
}

#[derive(Template)]
#[template(path = "preview.html")]
pub struct PreviewTemplate {
    pub title: String,
    pub css_variables: Vec<CssVariableView>,
    pub body: String,
    pub is_empty: bool,
}

impl PreviewTemplate {
    pub fn new(title: impl Into<String>, output: &PreviewOutput, painter: &HtmlPainter) -> Self {
        let css_variables = output
            .css_variables
            .iter()
            .map(|(name, value)| CssVariableView {
                name: name.clone(),
                value: value.clone(),
            })
            .collect();

        Self {
            title: title.into(),
            css_variables,
            body: painter.paint_sections(&output.sections),
            is_empty: output.is_empty(),
        }
    }
}

/// Complete HTML document for one rendered page.
pub fn render_preview_document(
    title: &str,
    output: &PreviewOutput,
    painter: &HtmlPainter,
) -> Result<String, TemplateRenderError> {
    render_template(PreviewTemplate::new(title, output, painter))
}
