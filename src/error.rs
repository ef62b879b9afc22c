use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("source tickets directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("cannot expand '~': home directory is unknown")]
    HomeDirUnavailable,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MigrateError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceNotFound(_) => "source_not_found",
            Self::HomeDirUnavailable => "home_dir_unavailable",
            Self::Io(_) => "io_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
