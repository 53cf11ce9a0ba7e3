use crate::error::Result;
use crate::model::Coordinate;
use std::path::PathBuf;

/// Maps a coordinate to the archive backing it when the plan omits a path
pub trait ArtifactLocator: Send + Sync {
    fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf>;
}
