//! Category decision for a single artifact.
//!
//! The decision table lives in [`decide`] and is pure. Only artifacts whose
//! descriptor marks them automatic, and which are not overridden, need a look
//! at the archive manifest; [`classify`] performs that read through a
//! [`ManifestProbe`].

use jlayout_api::{
    Artifact, Category, LayoutError, ManifestProbe, ModuleDescriptor, OverrideSet, Result,
};
use tracing::{debug, error};

/// Outcome of the pure part of classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Final(Category),
    /// Automatic descriptor, keep it only if the archive declares a name
    NeedsManifest,
}

pub fn decide(descriptor: Option<&ModuleDescriptor>, overridden: bool) -> Decision {
    match descriptor {
        None => Decision::Final(Category::ClasspathJar),
        Some(descriptor) if !descriptor.automatic => Decision::Final(Category::ExplicitModule),
        Some(_) if overridden => Decision::Final(Category::ClasspathJar),
        Some(_) => Decision::NeedsManifest,
    }
}

/// Category of an automatic candidate given its declared module name
pub fn settle(declared_name: Option<&str>) -> Category {
    match declared_name {
        Some(_) => Category::AutomaticModule,
        None => Category::ClasspathJar,
    }
}

pub fn classify(
    artifact: &Artifact,
    descriptor: Option<&ModuleDescriptor>,
    overrides: &OverrideSet,
    probe: &dyn ManifestProbe,
) -> Result<Category> {
    let overridden = overrides.contains(&artifact.coordinate);

    match decide(descriptor, overridden) {
        Decision::Final(category) => {
            if overridden && category == Category::ClasspathJar {
                debug!("{} pinned to the classpath", artifact.coordinate);
            }
            Ok(category)
        }
        Decision::NeedsManifest => {
            let declared = probe
                .automatic_module_name(&artifact.path)
                .map_err(|e| {
                    error!("error reading manifest of {}: {}", artifact.path.display(), e);
                    LayoutError::ArchiveRead {
                        coordinate: artifact.coordinate.to_string(),
                        path: artifact.path.clone(),
                        reason: e.to_string(),
                    }
                })?;

            let category = settle(declared.as_deref());
            if category == Category::ClasspathJar {
                debug!(
                    "{} has no Automatic-Module-Name, treating as classpath jar",
                    artifact.coordinate
                );
            }
            Ok(category)
        }
    }
}
