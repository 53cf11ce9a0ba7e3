//! Local Maven repository locator.
//!
//! Maps coordinates to archives under `~/.m2/repository`:
//! `{group as path}/{artifact}/{version}/{artifact}-{version}[-{classifier}].jar`

use jlayout_api::{ArtifactLocator, Coordinate, LayoutError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Local Maven repository
#[derive(Debug, Clone)]
pub struct MavenRepository {
    root: Option<PathBuf>,
}

impl MavenRepository {
    pub fn new() -> Self {
        let root = dirs::home_dir().map(|h| h.join(".m2/repository"));

        Self { root }
    }

    /// Create with a custom repository root
    pub fn with_path(path: PathBuf) -> Self {
        Self { root: Some(path) }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Expected archive location, whether or not it exists
    pub fn artifact_path(&self, coordinate: &Coordinate) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let mut path = root.clone();
        for segment in coordinate.group.split('.') {
            path.push(segment);
        }
        path.push(&coordinate.artifact);
        path.push(&coordinate.version);
        path.push(coordinate.jar_file_name());
        Some(path)
    }

    /// Existing archive for `coordinate`
    pub fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        let path = self
            .artifact_path(coordinate)
            .unwrap_or_else(|| PathBuf::from(coordinate.jar_file_name()));

        if path.is_file() {
            debug!("Located {} at {}", coordinate, path.display());
            Ok(path)
        } else {
            Err(LayoutError::ArtifactNotFound {
                coordinate: coordinate.to_string(),
                path,
            })
        }
    }
}

impl ArtifactLocator for MavenRepository {
    fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf> {
        MavenRepository::locate(self, coordinate)
    }
}

impl Default for MavenRepository {
    fn default() -> Self {
        Self::new()
    }
}
