use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("path not found: {0}")]
    PathNotFound(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("no recent directories")]
    NoRecentDirectories,
    #[error("index {index} is out of range (1..={count})")]
    IndexOutOfRange { index: i64, count: usize },
    #[error("invalid index: {0:?}")]
    InvalidIndex(String),
    #[error("access denied: {}: {source}", path.display())]
    EntryAccessDenied {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("command registered twice: {0}")]
    DuplicateCommand(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable identifier for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Error::PathNotFound(_) => "path_not_found",
            Error::NotADirectory(_) => "not_a_directory",
            Error::NonUtf8Path(_) => "non_utf8_path",
            Error::UnknownCommand(_) => "unknown_command",
            Error::NoRecentDirectories => "no_recent_directories",
            Error::IndexOutOfRange { .. } => "index_out_of_range",
            Error::InvalidIndex(_) => "invalid_index",
            Error::EntryAccessDenied { .. } => "entry_access_denied",
            Error::DuplicateCommand(_) => "duplicate_command",
            Error::Io(_) => "io",
        }
    }
}
