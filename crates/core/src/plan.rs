//! Resolved artifact plan, the input handed over by dependency resolution.
//!
//! ```json
//! {
//!   "artifacts": [
//!     {
//!       "coordinate": "com.example:b:1.0",
//!       "path": "libs/b-1.0.jar",
//!       "descriptor": { "name": "com.example.b", "automatic": true }
//!     }
//!   ]
//! }
//! ```

use jlayout_api::{
    Artifact, ArtifactLocator, Coordinate, ModuleDescriptor, ResolvedArtifact, Result,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    pub artifacts: Vec<PlanEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub coordinate: Coordinate,
    /// Backing archive; located through an [`ArtifactLocator`] when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<ModuleDescriptor>,
}

impl Plan {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a plan file. Relative artifact paths are taken relative to the
    /// directory holding the plan.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut plan = Self::from_json(&content)?;

        if let Some(base) = path.parent() {
            for entry in &mut plan.artifacts {
                if let Some(artifact_path) = entry.path.as_mut() {
                    if artifact_path.is_relative() {
                        *artifact_path = base.join(&*artifact_path);
                    }
                }
            }
        }

        debug!(
            "Loaded plan {} with {} artifacts",
            path.display(),
            plan.artifacts.len()
        );
        Ok(plan)
    }

    /// Turn plan entries into resolved artifacts, locating missing paths.
    pub fn resolve(&self, locator: &dyn ArtifactLocator) -> Result<Vec<ResolvedArtifact>> {
        self.artifacts
            .iter()
            .map(|entry| {
                let path = match &entry.path {
                    Some(path) => path.clone(),
                    None => locator.locate(&entry.coordinate)?,
                };
                Ok(ResolvedArtifact::new(
                    Artifact::new(entry.coordinate.clone(), path),
                    entry.descriptor.clone(),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jlayout_api::LayoutError;

    struct FixedLocator(PathBuf);

    impl ArtifactLocator for FixedLocator {
        fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf> {
            Ok(self.0.join(coordinate.jar_file_name()))
        }
    }

    struct NothingLocator;

    impl ArtifactLocator for NothingLocator {
        fn locate(&self, coordinate: &Coordinate) -> Result<PathBuf> {
            Err(LayoutError::ArtifactNotFound {
                coordinate: coordinate.to_string(),
                path: PathBuf::from(coordinate.jar_file_name()),
            })
        }
    }

    const PLAN: &str = r#"{
        "artifacts": [
            { "coordinate": "com.example:a:1.0", "path": "/libs/a-1.0.jar" },
            {
                "coordinate": "com.example:b:1.0",
                "descriptor": { "name": "com.example.b", "automatic": true }
            }
        ]
    }"#;

    #[test]
    fn test_parse_plan() {
        let plan = Plan::from_json(PLAN).unwrap();
        assert_eq!(plan.artifacts.len(), 2);
        assert_eq!(plan.artifacts[0].descriptor, None);
        assert_eq!(
            plan.artifacts[1].descriptor,
            Some(ModuleDescriptor::automatic("com.example.b"))
        );
    }

    #[test]
    fn test_resolve_uses_locator_for_missing_paths() {
        let plan = Plan::from_json(PLAN).unwrap();
        let resolved = plan.resolve(&FixedLocator(PathBuf::from("/repo"))).unwrap();

        assert_eq!(resolved[0].artifact.path, PathBuf::from("/libs/a-1.0.jar"));
        assert_eq!(resolved[1].artifact.path, PathBuf::from("/repo/b-1.0.jar"));
    }

    #[test]
    fn test_resolve_fails_when_artifact_cannot_be_located() {
        let plan = Plan::from_json(PLAN).unwrap();
        let err = plan.resolve(&NothingLocator).unwrap_err();
        assert!(matches!(err, LayoutError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_invalid_coordinate_is_rejected() {
        let err = Plan::from_json(r#"{ "artifacts": [ { "coordinate": "nope" } ] }"#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let plan_path = dir.path().join("plan.json");
        fs::write(
            &plan_path,
            r#"{ "artifacts": [ { "coordinate": "g:a:1", "path": "libs/a-1.jar" } ] }"#,
        )
        .unwrap();

        let plan = Plan::load(&plan_path).unwrap();
        assert_eq!(
            plan.artifacts[0].path.as_deref(),
            Some(dir.path().join("libs/a-1.jar").as_path())
        );
    }
}
