use std::path::{Path, PathBuf};

use super::error::LoadError;
use crate::base::constants;
use crate::layer::Layer;
use crate::xml;

/// Loads directories of definition documents into layers.
#[derive(Debug, Clone)]
pub struct LayerLoader {
    extension: String,
}

impl LayerLoader {
    pub fn new() -> Self {
        Self {
            extension: constants::DOCUMENT_EXTENSION.to_string(),
        }
    }

    /// Load files with this extension instead of `xml`. Compared ignoring case.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Load every document under `path` into a layer named `name`.
    ///
    /// Fails if any file fails; the error lists every failure.
    pub fn load_directory<P: AsRef<Path>>(
        &self,
        path: P,
        name: impl Into<String>,
    ) -> Result<Layer, LoadError> {
        let (layer, failures) = self.load_directory_partial(path, name)?;
        if failures.is_empty() {
            Ok(layer)
        } else {
            Err(LoadError::Failed(failures))
        }
    }

    /// Like [`load_directory`](Self::load_directory), but keeps what loaded.
    ///
    /// Only a missing or unreadable directory is an error; per-file failures
    /// are returned next to the layer.
    pub fn load_directory_partial<P: AsRef<Path>>(
        &self,
        path: P,
        name: impl Into<String>,
    ) -> Result<(Layer, Vec<LoadError>), LoadError> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(LoadError::DirectoryNotFound(path.to_path_buf()));
        }

        let mut layer = Layer::new(name);
        let mut failures = Vec::new();
        for file in collect_document_paths(path, &self.extension)? {
            match self.load_file(&file, &mut layer) {
                Ok(count) => {
                    tracing::debug!("[LOAD] {}: {} definition(s)", file.display(), count);
                }
                Err(e) => {
                    tracing::warn!("[LOAD] {}", e);
                    failures.push(e);
                }
            }
        }

        tracing::debug!(
            "[LOAD] layer '{}': {} definition(s), {} failure(s)",
            layer.name(),
            layer.len(),
            failures.len()
        );
        Ok((layer, failures))
    }

    /// Parse one document and append its definitions to `layer`.
    ///
    /// Returns the number of definitions added. On error `layer` is unchanged.
    pub fn load_file<P: AsRef<Path>>(&self, path: P, layer: &mut Layer) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| LoadError::io(path, e))?;
        let defs = xml::read_defs(&bytes).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let count = defs.len();
        for def in defs {
            layer.push_def(def);
        }
        Ok(count)
    }

    /// Load one layer per directory, in the order given.
    ///
    /// Each layer is named after its directory. Failures from every directory
    /// are collected before returning.
    pub fn load_layers<I, P>(&self, dirs: I) -> Result<Vec<Layer>, LoadError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut layers = Vec::new();
        let mut failures = Vec::new();
        for dir in dirs {
            let dir = dir.as_ref();
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| dir.display().to_string());
            match self.load_directory_partial(dir, name) {
                Ok((layer, errors)) => {
                    layers.push(layer);
                    failures.extend(errors);
                }
                Err(e) => failures.push(e),
            }
        }

        if failures.is_empty() {
            Ok(layers)
        } else {
            Err(LoadError::Failed(failures))
        }
    }
}

impl Default for LayerLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Every file under `dir` with the given extension, recursively, sorted by path.
pub fn collect_document_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, LoadError> {
    let mut results = Vec::new();
    collect_recursive(dir, extension, &mut results)?;
    results.sort();
    Ok(results)
}

fn collect_recursive(dir: &Path, extension: &str, results: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    let entries = std::fs::read_dir(dir).map_err(|e| LoadError::io(dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| LoadError::io(dir, e))?;
        let path = entry.path();

        if path.is_dir() {
            collect_recursive(&path, extension, results)?;
        } else if path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        {
            results.push(path);
        }
    }

    Ok(())
}
