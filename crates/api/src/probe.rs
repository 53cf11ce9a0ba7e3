//! Archive inspection capability used by classification.

use std::path::Path;

/// Error type for probe implementations
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Reads the module name an archive declares for itself.
///
/// Implementations return `Ok(None)` when the archive carries no manifest or
/// the manifest has no `Automatic-Module-Name`, and an error when the archive
/// cannot be opened or read or its manifest is malformed.
pub trait ManifestProbe: Send + Sync {
    fn automatic_module_name(&self, archive: &Path) -> Result<Option<String>, BoxError>;
}
