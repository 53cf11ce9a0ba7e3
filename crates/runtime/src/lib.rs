use jlayout_api::{ResolvedArtifact, Result};
use jlayout_core::{Collector, LayoutConfig, LogOptions, Plan};
use jlayout_java::{JarManifestProbe, MavenRepository};
use std::path::Path;
use std::sync::Arc;

/// Assembles a collector backed by the JAR manifest probe.
///
/// This is the single place where the core engine meets the Java archive
/// support; binaries should not wire the two by hand.
pub fn build_default_collector(config: &LayoutConfig) -> Collector {
    Collector::new(config.output_layout(), Arc::new(JarManifestProbe::new()))
        .with_overrides(config.override_set())
        .with_parallel(config.parallel)
}

/// Repository used to locate plan entries without a path
pub fn repository_for(config: &LayoutConfig) -> MavenRepository {
    match &config.repository {
        Some(root) => MavenRepository::with_path(root.clone()),
        None => MavenRepository::new(),
    }
}

/// Load a plan file and resolve every entry to an archive on disk
pub fn load_artifacts(plan_path: &Path, config: &LayoutConfig) -> Result<Vec<ResolvedArtifact>> {
    let plan = Plan::load(plan_path)?;
    let repository = repository_for(config);
    let artifacts = plan.resolve(&repository)?;
    tracing::debug!(
        "Resolved {} artifacts from {}",
        artifacts.len(),
        plan_path.display()
    );
    Ok(artifacts)
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, verbosity: u8) -> Option<impl Drop> {
    jlayout_core::init_logging(&LogOptions::new(component).with_verbosity(verbosity))
}
