//! Library error type.
//!
//! Rendering itself never fails; only loading style sheets and watching
//! source files do.

use std::path::PathBuf;

/// Errors raised at the filesystem edges of the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid style sheet: {0}")]
    InvalidStyles(#[source] serde_json::Error),

    #[error("cannot watch {}: {source}", path.display())]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
