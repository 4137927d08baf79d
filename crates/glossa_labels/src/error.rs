use std::path::PathBuf;

use thiserror::Error;

use crate::simple::LabelFileParseError;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error(transparent)]
    Parse(#[from] LabelFileParseError),

    #[error("failed to read label file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no root registered for extension `{0}`")]
    UnknownExtension(String),

    #[error("label file locator escapes its root: {0}")]
    PathTraversal(String),

    #[error("fluent error: {0}")]
    Fluent(String),
}
