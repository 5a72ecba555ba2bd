//! Command-line errors

use std::io;

use qsskit_color::ColorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("unknown severity '{0}' (expected error, warning, weak or info)")]
    InvalidSeverity(String),

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("cannot write JSON: {0}")]
    Json(#[from] serde_json::Error),
}
