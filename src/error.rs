use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StencilError {
    #[error("Invalid service name '{name}': {reason}")]
    #[diagnostic(help(
        "Service names must contain at least one letter or digit and may not start with a digit"
    ))]
    InvalidName { name: String, reason: String },

    #[error("Template root is not readable: {path}")]
    #[diagnostic(help("Pass --templates or set `templates` in your stencil config.toml"))]
    TemplateTreeUnreadable { path: PathBuf, reason: String },

    #[error("Cannot create destination root: {path}")]
    #[diagnostic(help("Ensure the parent directory exists and is writable"))]
    DestinationRootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Destination already exists: {path}")]
    #[diagnostic(help(
        "Staged generation renames the staging directory over a fresh path; remove the existing directory first"
    ))]
    DestinationExists { path: PathBuf },

    #[error("Failed to parse user config")]
    #[diagnostic(help("Check the TOML syntax in your stencil config.toml"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt cancelled by user")]
    PromptCancelled,
}

pub type Result<T> = std::result::Result<T, StencilError>;
