pub mod error;
pub mod locator;
pub mod model;
pub mod probe;

// Re-export commonly used types
pub use error::{LayoutError, Result};
pub use locator::ArtifactLocator;
pub use model::{
    Artifact, Category, Coordinate, ModuleDescriptor, OutputLayout, OverrideEntry, OverrideSet,
    ResolvedArtifact,
};
pub use probe::{BoxError, ManifestProbe};
