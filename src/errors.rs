use std::process::ExitStatus;
use thiserror::Error;

/// Errors produced by value formatters.
///
/// A formatter error only ever fails the single field it was applied to;
/// the export engine folds it into the aggregate success signal.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Unparseable date value '{value}'")]
    InvalidDate { value: String },

    #[error("Unknown flash state '{value}'")]
    UnknownFlashState { value: String },
}

/// Errors that abort the export of a single file.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Raw metadata has no filename field in [{section}] {field}")]
    MissingFilename { section: String, field: String },

    #[error("Required field missing or unusable: [{section}] {field}")]
    MissingPrimaryField { section: String, field: String },
}

/// Errors from invoking the external probe tools.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to launch '{tool}': {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{tool}' exited with {status}: {stderr}")]
    Failed {
        tool: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("'{tool}' produced non-UTF-8 output")]
    InvalidUtf8 { tool: String },
}
