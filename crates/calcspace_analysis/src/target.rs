//! Loaded targets and the loaders that produce them.

use std::fs;
use std::path::{Path, PathBuf};

use calcspace_foundation::{Error, Result};
use tracing::debug;

use crate::image::ImageKind;

/// A binary file loaded into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    name: String,
    path: PathBuf,
    bytes: Vec<u8>,
}

impl Target {
    /// Creates a target from a path and its contents.
    ///
    /// The display name is the final path component, falling back to the
    /// whole path when there is none (e.g. `..`).
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self { name, path, bytes }
    }

    /// Base file name, as shown in the prompt.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The path the target was loaded from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Container format detected from the magic number.
    #[must_use]
    pub fn kind(&self) -> ImageKind {
        ImageKind::probe(&self.bytes)
    }
}

/// Produces target buffers from paths.
///
/// Implementations report failure through `Err` and must not panic; the shell
/// keeps its previous target when loading fails.
pub trait TargetLoader {
    /// Loads the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a `TargetLoad` error if the file cannot be read or is not a
    /// usable target.
    fn load(&self, path: &Path) -> Result<Target>;
}

/// Loads targets from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl FileLoader {
    /// Creates a new file loader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TargetLoader for FileLoader {
    fn load(&self, path: &Path) -> Result<Target> {
        let shown = path.display().to_string();

        let metadata =
            fs::metadata(path).map_err(|e| Error::target_load(&shown, e.to_string()))?;
        if metadata.is_dir() {
            return Err(Error::target_load(shown, "is a directory"));
        }

        let bytes = fs::read(path).map_err(|e| Error::target_load(&shown, e.to_string()))?;
        if bytes.is_empty() {
            return Err(Error::target_load(shown, "file is empty"));
        }

        debug!(path = %shown, size = bytes.len(), "read target from disk");
        Ok(Target::new(path, bytes))
    }
}
