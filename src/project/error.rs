use std::path::PathBuf;

use thiserror::Error;

use crate::xml::XmlError;

/// Errors that can occur while loading layers from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: XmlError,
    },

    /// Every failure from one load, in path order.
    #[error("Failed to load {} file(s):\n  {}", .0.len(), join_failures(.0))]
    Failed(Vec<LoadError>),
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file or directory the error is about, if there is one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::DirectoryNotFound(path) | Self::Io { path, .. } | Self::Parse { path, .. } => {
                Some(path.as_path())
            }
            Self::Failed(_) => None,
        }
    }
}

fn join_failures(failures: &[LoadError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n  ")
}
