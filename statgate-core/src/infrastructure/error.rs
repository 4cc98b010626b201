// statgate-core/src/infrastructure/error.rs

use datafusion::arrow::error::ArrowError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(statgate::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- TABULAR DATA (CSV via Arrow) ---
    #[error("CSV Error: {0}")]
    #[diagnostic(
        code(statgate::infra::csv),
        help("Check the file is comma separated with a header row and a constant number of fields.")
    )]
    Arrow(#[from] ArrowError),

    // --- METADATA ---
    #[error("JSON Error: {0}")]
    #[diagnostic(code(statgate::infra::json))]
    Json(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(statgate::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(statgate::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(statgate::infra::config_invalid),
        help("quality-threshold must be within [0, 100] and paths/column names non-empty.")
    )]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Invalid pattern: {0}")]
    #[diagnostic(code(statgate::infra::pattern))]
    Pattern(#[from] regex::Error),

    // --- TEMPLATING ---
    #[error("Template Rendering Error: {0}")]
    #[diagnostic(
        code(statgate::infra::template),
        help("Check the Jinja syntax ({{ ... }}) of the bulletin template.")
    )]
    TemplateError(#[from] minijinja::Error),
}
