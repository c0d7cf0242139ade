//! Error types for driftconfig-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from manifest rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Tera template engine error.
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// A tier record lacked a field the manifest needs. No defaults are
    /// substituted; the whole document is aborted.
    #[error("tier {tier_index}: missing required field '{field}'")]
    MissingField {
        field: &'static str,
        tier_index: usize,
    },

    /// Filesystem error while loading a caller-supplied template.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
