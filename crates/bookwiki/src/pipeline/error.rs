use thiserror::Error;

use crate::replacer::ReplaceError;

/// Failures that abort the conversion of a single document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Replace(#[from] ReplaceError),
}
