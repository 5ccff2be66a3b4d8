//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "storefront-preview";
const ENV_PREFIX: &str = "STOREFRONT_PREVIEW";
pub(crate) const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub(crate) const DEFAULT_PAGE: &str = "index";

/// Command-line arguments for the storefront preview binary.
#[derive(Debug, Parser)]
#[command(
    name = "storefront-preview",
    version,
    about = "Render storefront theme documents into preview trees"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "STOREFRONT_PREVIEW_CONFIG_FILE",
        value_name = "PATH"
    )]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Render one page of a theme document.
    Render(RenderArgs),
    /// List the pages a theme document declares.
    Pages(PagesArgs),
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: PreviewOverrides,

    /// Theme document exported by the theme sync.
    #[arg(value_name = "THEME", value_hint = ValueHint::FilePath)]
    pub theme: PathBuf,

    /// Media registry mapping source URLs to locally served copies.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub media: Option<PathBuf>,

    /// Page to render; defaults to `preview.default_page`.
    #[arg(long, value_name = "NAME")]
    pub page: Option<String>,

    /// Write the preview here instead of stdout.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct PagesArgs {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Theme document exported by the theme sync.
    #[arg(value_name = "THEME", value_hint = ValueHint::FilePath)]
    pub theme: PathBuf,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct PreviewOverrides {
    #[command(flatten)]
    pub logging: LoggingOverrides,

    /// Override the origin prepended to locally served media.
    #[arg(long = "origin", value_name = "URL")]
    pub origin: Option<String>,

    /// Override the output format.
    #[arg(long = "format", value_name = "FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Sanitise rich text when painting HTML.
    #[arg(
        long = "sanitize",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub sanitize: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct PreviewSettings {
    /// Base address for served media, without a trailing slash. Empty keeps paths relative.
    pub origin: String,
    pub default_page: String,
    pub sanitize_html: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Html,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match &cli.command {
        Command::Render(args) => raw.apply_preview_overrides(&args.overrides),
        Command::Pages(args) => raw.apply_logging_overrides(&args.logging),
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    preview: RawPreviewSettings,
}

impl RawSettings {
    fn apply_preview_overrides(&mut self, overrides: &PreviewOverrides) {
        if let Some(origin) = overrides.origin.as_ref() {
            self.preview.origin = Some(origin.clone());
        }
        if let Some(format) = overrides.format {
            self.preview.format = Some(format);
        }
        if let Some(sanitize) = overrides.sanitize {
            self.preview.sanitize_html = Some(sanitize);
        }

        self.apply_logging_overrides(&overrides.logging);
    }

    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { logging, preview } = raw;

        let logging = build_logging_settings(logging)?;
        let preview = build_preview_settings(preview)?;

        Ok(Self { logging, preview })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_preview_settings(preview: RawPreviewSettings) -> Result<PreviewSettings, LoadError> {
    let origin = normalize_origin(preview.origin.as_deref().unwrap_or(DEFAULT_ORIGIN))?;

    let default_page = preview
        .default_page
        .map(|page| page.trim().to_string())
        .unwrap_or_else(|| DEFAULT_PAGE.to_string());
    if default_page.is_empty() {
        return Err(LoadError::invalid(
            "preview.default_page",
            "must not be empty",
        ));
    }

    Ok(PreviewSettings {
        origin,
        default_page,
        sanitize_html: preview.sanitize_html.unwrap_or(false),
        format: preview.format.unwrap_or_default(),
    })
}

fn normalize_origin(value: &str) -> Result<String, LoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    let url = Url::parse(trimmed)
        .map_err(|err| LoadError::invalid("preview.origin", format!("failed to parse: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "preview.origin",
            "must use http or https",
        ));
    }
    if url.host_str().is_none() {
        return Err(LoadError::invalid("preview.origin", "must include a host"));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPreviewSettings {
    origin: Option<String>,
    default_page: Option<String>,
    sanitize_html: Option<bool>,
    format: Option<OutputFormat>,
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
