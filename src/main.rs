use std::{path::Path, process};

use storefront_preview::{
    application::{
        error::AppError,
        render::{PreviewOutput, PreviewRequest, PreviewService, render_service},
        theme::ensure_page_known,
    },
    config::{self, OutputFormat},
    infra::{error::InfraError, loader, telemetry},
    presentation::{html::HtmlPainter, views::render_preview_document},
};
use tokio::io::AsyncWriteExt;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let report = error.report();
    if dispatcher::has_been_set() {
        error!(
            error = %report.joined(),
            summary = error.presentation_message(),
            "application error"
        );
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(std::io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(
            error = %report.joined(),
            summary = error.presentation_message(),
            "application error"
        );
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    match cli_args.command {
        config::Command::Render(args) => run_render(settings, args).await,
        config::Command::Pages(args) => run_pages(args).await,
    }
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let document = loader::load_theme_document(&args.theme).await?;
    let media = loader::load_optional_media_registry(args.media.as_deref()).await?;
    let page = args
        .page
        .as_deref()
        .unwrap_or(settings.preview.default_page.as_str());
    ensure_page_known(&document, page)?;

    let request = PreviewRequest::new(&document, &media, page).with_origin(&settings.preview.origin);
    let output = render_service().render(&request);

    info!(
        target = "storefront_preview::render",
        page,
        sections = output.sections.len(),
        media_entries = media.len(),
        format = ?settings.preview.format,
        "preview rendered"
    );

    let rendered = match settings.preview.format {
        OutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|err| AppError::unexpected(format!("failed to serialise preview: {err}")))?,
        OutputFormat::Html => paint_document(page, &output, settings.preview.sanitize_html)?,
    };

    write_output(args.output.as_deref(), rendered).await
}

fn paint_document(page: &str, output: &PreviewOutput, sanitize_html: bool) -> Result<String, AppError> {
    let painter = HtmlPainter::new(sanitize_html);
    Ok(render_preview_document(page, output, &painter)?)
}

async fn run_pages(args: config::PagesArgs) -> Result<(), AppError> {
    let document = loader::load_theme_document(&args.theme).await?;

    let mut listing = document
        .page_names()
        .map(|name| format!("{name}\n"))
        .collect::<String>();
    if listing.is_empty() {
        listing.push_str("(flat components)\n");
    }

    write_output(None, listing).await
}

async fn write_output(path: Option<&Path>, mut contents: String) -> Result<(), AppError> {
    if !contents.ends_with('\n') {
        contents.push('\n');
    }

    match path {
        Some(path) => {
            tokio::fs::write(path, contents.as_bytes())
                .await
                .map_err(InfraError::from)?;
            info!(
                target = "storefront_preview::render",
                path = %path.display(),
                "preview written"
            );
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(contents.as_bytes())
                .await
                .map_err(InfraError::from)?;
            stdout
                .flush()
                .await
                .map_err(InfraError::from)?;
        }
    }

    Ok(())
}
