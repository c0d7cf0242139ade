//! Error types for driftconfig-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::TierName;

/// All errors that can arise from inventory operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse inventory at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None` — cannot locate `~/.driftconfig/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The domain inventory file did not exist at the expected path.
    #[error("domain inventory not found at {path}")]
    DomainNotFound { path: PathBuf },

    /// A tier with this name is already stored in the domain.
    #[error("tier '{name}' already exists")]
    TierExists { name: TierName },
}
