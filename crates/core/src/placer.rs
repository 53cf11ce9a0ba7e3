use jlayout_api::{Artifact, Category, LayoutError, OutputLayout, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// What placement did with one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Copied { destination: PathBuf },
    /// Destination is the source file itself, nothing was written
    AlreadyInPlace { destination: PathBuf },
    /// No output directory configured for the category
    NoTarget,
    /// Backing path is missing or not a regular file
    NotRegularFile,
}

impl PlacementOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(
            self,
            PlacementOutcome::Copied { .. } | PlacementOutcome::AlreadyInPlace { .. }
        )
    }
}

/// Copy the artifact's archive into the directory of its category,
/// replacing any file of the same name already there.
pub fn place(
    artifact: &Artifact,
    category: Category,
    layout: &OutputLayout,
) -> Result<PlacementOutcome> {
    let Some(dir) = layout.dir(category) else {
        return Ok(PlacementOutcome::NoTarget);
    };

    let source = artifact.path.as_path();
    let file_name = match artifact.file_name() {
        Some(name) if source.is_file() => name,
        _ => {
            debug!("Skipping {}: not a regular file", source.display());
            return Ok(PlacementOutcome::NotRegularFile);
        }
    };

    let destination = dir.join(file_name);
    if is_same_file(source, &destination) {
        debug!("{} is already in place", source.display());
        return Ok(PlacementOutcome::AlreadyInPlace { destination });
    }

    if category == Category::ExplicitModule {
        info!("copy jar {} to {}", source.display(), destination.display());
    } else {
        debug!("copy jar {} to {}", source.display(), destination.display());
    }

    fs::copy(source, &destination).map_err(|e| {
        error!(
            "Failure during copying of {} to {}: {}",
            source.display(),
            destination.display(),
            e
        );
        LayoutError::Copy {
            source_path: source.to_path_buf(),
            destination: destination.clone(),
            source: e,
        }
    })?;

    Ok(PlacementOutcome::Copied { destination })
}

// Copying a file onto itself truncates it
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jlayout_api::Coordinate;
    use tempfile::tempdir;

    fn artifact_at(path: PathBuf) -> Artifact {
        Artifact::new(Coordinate::new("com.example", "a", "1.0"), path)
    }

    #[test]
    fn test_copies_into_category_dir() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a-1.0.jar");
        fs::write(&source, b"jar bytes").unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();

        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &lib);
        let outcome = place(&artifact_at(source), Category::ClasspathJar, &layout).unwrap();

        let expected = lib.join("a-1.0.jar");
        assert_eq!(
            outcome,
            PlacementOutcome::Copied {
                destination: expected.clone()
            }
        );
        assert_eq!(fs::read(expected).unwrap(), b"jar bytes");
    }

    #[test]
    fn test_overwrites_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a-1.0.jar");
        fs::write(&source, b"fresh").unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        fs::write(lib.join("a-1.0.jar"), b"stale and longer content").unwrap();

        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &lib);
        let artifact = artifact_at(source);

        place(&artifact, Category::ClasspathJar, &layout).unwrap();
        place(&artifact, Category::ClasspathJar, &layout).unwrap();

        assert_eq!(fs::read(lib.join("a-1.0.jar")).unwrap(), b"fresh");
        assert_eq!(fs::read_dir(&lib).unwrap().count(), 1);
    }

    #[test]
    fn test_destination_is_source() {
        let dir = tempdir().unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();
        let source = lib.join("a-1.0.jar");
        fs::write(&source, b"precious jar bytes").unwrap();

        // Same directory reached through a different spelling
        let layout =
            OutputLayout::new().with_dir(Category::ClasspathJar, dir.path().join("lib/../lib"));
        let outcome = place(&artifact_at(source.clone()), Category::ClasspathJar, &layout).unwrap();

        assert!(matches!(outcome, PlacementOutcome::AlreadyInPlace { .. }));
        assert!(outcome.is_copied());
        assert_eq!(fs::read(&source).unwrap(), b"precious jar bytes");
    }

    #[test]
    fn test_unset_dir_is_noop() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a-1.0.jar");
        fs::write(&source, b"jar bytes").unwrap();

        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, dir.path().join("lib"));
        let outcome = place(&artifact_at(source), Category::AutomaticModule, &layout).unwrap();

        assert_eq!(outcome, PlacementOutcome::NoTarget);
        assert!(!dir.path().join("lib").exists());
    }

    #[test]
    fn test_directory_artifact_is_skipped() {
        let dir = tempdir().unwrap();
        let classes = dir.path().join("classes");
        fs::create_dir(&classes).unwrap();
        let lib = dir.path().join("lib");
        fs::create_dir(&lib).unwrap();

        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &lib);
        let outcome = place(&artifact_at(classes), Category::ClasspathJar, &layout).unwrap();

        assert_eq!(outcome, PlacementOutcome::NotRegularFile);
        assert_eq!(fs::read_dir(&lib).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let dir = tempdir().unwrap();
        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, dir.path());

        let outcome = place(
            &artifact_at(dir.path().join("gone.jar")),
            Category::ClasspathJar,
            &layout,
        )
        .unwrap();
        assert_eq!(outcome, PlacementOutcome::NotRegularFile);
    }

    #[test]
    fn test_copy_failure_names_both_paths() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("a-1.0.jar");
        fs::write(&source, b"jar bytes").unwrap();

        // Destination directory was never created
        let missing = dir.path().join("missing");
        let layout = OutputLayout::new().with_dir(Category::ClasspathJar, &missing);
        let err = place(&artifact_at(source.clone()), Category::ClasspathJar, &layout).unwrap_err();

        match err {
            LayoutError::Copy {
                source_path,
                destination,
                ..
            } => {
                assert_eq!(source_path, source);
                assert_eq!(destination, missing.join("a-1.0.jar"));
            }
            other => panic!("Expected Copy error, got {other:?}"),
        }
    }
}
