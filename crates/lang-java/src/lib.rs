//! Java archive support: manifest inspection and local repository lookup.

pub mod discoverer;
pub mod manifest;
pub mod probe;

pub use discoverer::maven::MavenRepository;
pub use manifest::{AUTOMATIC_MODULE_NAME, MANIFEST_PATH, MainAttributes, ManifestError};
pub use probe::JarManifestProbe;
