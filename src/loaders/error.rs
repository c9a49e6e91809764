use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug)]
pub enum LoadError {
    FileNotFound(PathBuf),
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    CsvWriteError(String),
    MissingColumn(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::FileNotFound(path) => write!(f, "File not found: {:?}", path),
            LoadError::Io { path, source } => {
                write!(f, "I/O error on {:?}: {}", path, source)
            }
            LoadError::JsonError(err) => write!(f, "Invalid recipe JSON: {}", err),
            LoadError::CsvError(err) => write!(f, "Invalid pantry CSV: {}", err),
            LoadError::CsvWriteError(message) => {
                write!(f, "Failed to write pantry CSV: {}", message)
            }
            LoadError::MissingColumn(column) => write!(f, "Column '{}' not found", column),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::JsonError(err) => Some(err),
            LoadError::CsvError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::JsonError(err)
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvError(err)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> LoadError {
    if source.kind() == std::io::ErrorKind::NotFound {
        LoadError::FileNotFound(path.to_path_buf())
    } else {
        LoadError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub(crate) async fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path)
        .await
        .map_err(|source| io_error(path, source))
}

pub(crate) async fn write_file(path: &Path, content: &str) -> Result<(), LoadError> {
    fs::write(path, content)
        .await
        .map_err(|source| io_error(path, source))
}
