//! Run driver: prepares output directories, then classifies and places every
//! resolved artifact.
//!
//! ## Ordering
//!
//! ```text
//! prepare()  ──▶  for each artifact: classify ──▶ place
//!   (all-or-nothing)     (sequential, or on the rayon pool)
//! ```
//!
//! Directory creation always completes before the first copy, in both modes.

use crate::classifier::classify;
use crate::placer::{PlacementOutcome, place};
use jlayout_api::{
    Category, Coordinate, LayoutError, ManifestProbe, OutputLayout, OverrideSet,
    ResolvedArtifact, Result,
};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Record of what happened to one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub coordinate: Coordinate,
    pub source: PathBuf,
    pub category: Category,
    pub outcome: PlacementOutcome,
}

/// Result of a collect run
#[derive(Debug, Default, Clone)]
pub struct CollectReport {
    /// Per-artifact records, in input order
    pub placements: Vec<Placement>,
    /// Number of artifacts per category
    pub by_category: BTreeMap<Category, usize>,
    /// Number of archives copied or already at their destination
    pub copied: usize,
    /// Artifacts whose category has no output directory
    pub skipped_no_target: usize,
    /// Artifacts whose path is not a regular file
    pub skipped_not_regular: usize,
    /// Time taken for the run
    pub duration: Duration,
}

impl CollectReport {
    fn from_placements(placements: Vec<Placement>, duration: Duration) -> Self {
        let mut report = CollectReport {
            duration,
            ..Default::default()
        };

        for placement in &placements {
            *report.by_category.entry(placement.category).or_default() += 1;
            match placement.outcome {
                PlacementOutcome::Copied { .. } | PlacementOutcome::AlreadyInPlace { .. } => {
                    report.copied += 1
                }
                PlacementOutcome::NoTarget => report.skipped_no_target += 1,
                PlacementOutcome::NotRegularFile => report.skipped_not_regular += 1,
            }
        }

        report.placements = placements;
        report
    }

    pub fn total(&self) -> usize {
        self.placements.len()
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }
}

/// Classifies and places resolved artifacts into an [`OutputLayout`]
pub struct Collector {
    layout: OutputLayout,
    overrides: OverrideSet,
    probe: Arc<dyn ManifestProbe>,
    parallel: bool,
}

impl Collector {
    pub fn new(layout: OutputLayout, probe: Arc<dyn ManifestProbe>) -> Self {
        Self {
            layout,
            overrides: OverrideSet::new(),
            probe,
            parallel: false,
        }
    }

    pub fn with_overrides(mut self, overrides: OverrideSet) -> Self {
        self.overrides = overrides;
        self
    }

    /// Process artifacts on the rayon pool instead of one by one
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Create every configured output directory that does not exist yet.
    ///
    /// Stops at the first directory that cannot be created.
    pub fn prepare(&self) -> Result<()> {
        for (category, dir) in self.layout.configured() {
            if dir.is_dir() {
                continue;
            }
            debug!("Creating {} directory {}", category, dir.display());
            fs::create_dir_all(dir).map_err(|e| {
                error!("directory can not be created: {}", dir.display());
                LayoutError::DirectoryCreate {
                    path: dir.to_path_buf(),
                    source: e,
                }
            })?;
        }
        Ok(())
    }

    /// Classification only: no directories are created and nothing is copied
    pub fn classify_all(&self, artifacts: &[ResolvedArtifact]) -> Result<Vec<Category>> {
        artifacts
            .iter()
            .map(|resolved| self.classify_one(resolved))
            .collect()
    }

    /// Prepare the layout, then classify and place every artifact.
    ///
    /// The first fatal error (in input order) aborts the run.
    pub fn run(&self, artifacts: &[ResolvedArtifact]) -> Result<CollectReport> {
        info!("collect-jars");
        let start = Instant::now();

        self.prepare()?;

        let placements = if self.parallel {
            let results: Vec<Result<Placement>> = artifacts
                .par_iter()
                .map(|resolved| self.process(resolved))
                .collect();
            results.into_iter().collect::<Result<Vec<_>>>()?
        } else {
            artifacts
                .iter()
                .map(|resolved| self.process(resolved))
                .collect::<Result<Vec<_>>>()?
        };

        let report = CollectReport::from_placements(placements, start.elapsed());
        info!(
            "Collected {} artifacts: {} modules, {} automatic, {} classpath, {} copied in {:?}",
            report.total(),
            report.count(Category::ExplicitModule),
            report.count(Category::AutomaticModule),
            report.count(Category::ClasspathJar),
            report.copied,
            report.duration
        );

        Ok(report)
    }

    fn classify_one(&self, resolved: &ResolvedArtifact) -> Result<Category> {
        classify(
            &resolved.artifact,
            resolved.descriptor.as_ref(),
            &self.overrides,
            self.probe.as_ref(),
        )
    }

    fn process(&self, resolved: &ResolvedArtifact) -> Result<Placement> {
        let category = self.classify_one(resolved)?;
        let outcome = place(&resolved.artifact, category, &self.layout)?;

        Ok(Placement {
            coordinate: resolved.artifact.coordinate.clone(),
            source: resolved.artifact.path.clone(),
            category,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jlayout_api::{Artifact, BoxError, ModuleDescriptor};
    use std::path::Path;
    use tempfile::tempdir;

    struct NoManifest;

    impl ManifestProbe for NoManifest {
        fn automatic_module_name(&self, _archive: &Path) -> std::result::Result<Option<String>, BoxError> {
            Ok(None)
        }
    }

    fn resolved(dir: &Path, name: &str, descriptor: Option<ModuleDescriptor>) -> ResolvedArtifact {
        let path = dir.join(format!("{name}.jar"));
        fs::write(&path, name.as_bytes()).unwrap();
        ResolvedArtifact::new(
            Artifact::new(Coordinate::new("com.example", name, "1.0"), path),
            descriptor,
        )
    }

    #[test]
    fn test_prepare_creates_nested_dirs() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new()
            .with_dir(Category::ExplicitModule, dir.path().join("image/mods"))
            .with_dir(Category::ClasspathJar, dir.path().join("image/lib/deep"));

        let collector = Collector::new(layout, Arc::new(NoManifest));
        collector.prepare().unwrap();
        // Second call is a no-op
        collector.prepare().unwrap();

        assert!(dir.path().join("image/mods").is_dir());
        assert!(dir.path().join("image/lib/deep").is_dir());
        assert!(!dir.path().join("image/automatic").exists());
    }

    #[test]
    fn test_prepare_failure_aborts_before_copy() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"a file, not a directory").unwrap();
        let lib = dir.path().join("lib");

        let layout = OutputLayout::new()
            .with_dir(Category::ExplicitModule, blocker.join("mods"))
            .with_dir(Category::ClasspathJar, &lib);
        let artifacts = vec![resolved(dir.path(), "a", None)];

        let err = Collector::new(layout, Arc::new(NoManifest))
            .run(&artifacts)
            .unwrap_err();

        assert!(matches!(err, LayoutError::DirectoryCreate { .. }));
        assert!(!lib.join("a.jar").exists());
    }

    #[test]
    fn test_report_counts() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        let lib = dir.path().join("lib");

        let artifacts = vec![
            resolved(&src, "a", None),
            resolved(&src, "e", Some(ModuleDescriptor::explicit("com.example.e"))),
            resolved(&src, "c", Some(ModuleDescriptor::automatic("c"))),
        ];
        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &lib);

        let report = Collector::new(layout, Arc::new(NoManifest))
            .run(&artifacts)
            .unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.count(Category::ClasspathJar), 2);
        assert_eq!(report.count(Category::ExplicitModule), 1);
        assert_eq!(report.count(Category::AutomaticModule), 0);
        assert_eq!(report.copied, 2);
        assert_eq!(report.skipped_no_target, 1);
        assert_eq!(report.skipped_not_regular, 0);
        assert_eq!(report.placements[1].category, Category::ExplicitModule);
        assert_eq!(report.placements[1].outcome, PlacementOutcome::NoTarget);
    }

    #[test]
    fn test_classify_all_touches_nothing() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        let artifacts = vec![
            resolved(dir.path(), "a", None),
            resolved(dir.path(), "e", Some(ModuleDescriptor::explicit("e"))),
        ];
        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &lib);

        let categories = Collector::new(layout, Arc::new(NoManifest))
            .classify_all(&artifacts)
            .unwrap();

        assert_eq!(
            categories,
            vec![Category::ClasspathJar, Category::ExplicitModule]
        );
        assert!(!lib.exists());
    }
}
