//! Domain model for artifact placement.
//!
//! Everything here is immutable for the duration of a run: artifacts and
//! descriptors come from the resolved plan, the override set and the output
//! layout come from configuration.

use crate::error::LayoutError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ==================== Coordinate ====================

/// Packaging types that never appear as a version
const PACKAGINGS: &[&str] = &[
    "jar", "war", "ear", "pom", "jmod", "aar", "ejb", "bundle", "zip", "test-jar",
    "maven-plugin",
];

/// Maven style artifact identity: `group:artifact:version[:classifier]`.
///
/// A fourth segment is always the classifier. The
/// `group:artifact:packaging:version` form printed by some Maven tools is
/// rejected when its third segment is a packaging type, since reading it
/// positionally would swap version and classifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            version: version.into(),
            classifier: None,
        }
    }

    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// File name used by Maven repository layouts, e.g. `guava-31.1-jre.jar`
    pub fn jar_file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("{}-{}-{}.jar", self.artifact, self.version, classifier),
            None => format!("{}-{}.jar", self.artifact, self.version),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(LayoutError::InvalidCoordinate(s.to_string()));
        }
        match parts.as_slice() {
            [group, artifact, version] => Ok(Coordinate::new(*group, *artifact, *version)),
            [_, _, packaging, _] if PACKAGINGS.contains(packaging) => {
                Err(LayoutError::InvalidCoordinate(s.to_string()))
            }
            [group, artifact, version, classifier] => {
                Ok(Coordinate::new(*group, *artifact, *version).with_classifier(*classifier))
            }
            _ => Err(LayoutError::InvalidCoordinate(s.to_string())),
        }
    }
}

impl TryFrom<String> for Coordinate {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

// ==================== Artifact ====================

/// A resolved dependency and the archive backing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub coordinate: Coordinate,
    pub path: PathBuf,
}

impl Artifact {
    pub fn new(coordinate: Coordinate, path: impl Into<PathBuf>) -> Self {
        Self {
            coordinate,
            path: path.into(),
        }
    }

    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.path.file_name()
    }
}

/// Static module metadata known for an artifact.
///
/// `automatic` is true when the descriptor was synthesized from a plain
/// archive rather than declared by a `module-info.class`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub automatic: bool,
}

impl ModuleDescriptor {
    pub fn explicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            automatic: false,
        }
    }

    pub fn automatic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            automatic: true,
        }
    }
}

/// One node of the resolved dependency traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedArtifact {
    pub artifact: Artifact,
    pub descriptor: Option<ModuleDescriptor>,
}

impl ResolvedArtifact {
    pub fn new(artifact: Artifact, descriptor: Option<ModuleDescriptor>) -> Self {
        Self {
            artifact,
            descriptor,
        }
    }
}

// ==================== Category ====================

/// Where an artifact ends up in the deployment image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ExplicitModule,
    AutomaticModule,
    ClasspathJar,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::ExplicitModule,
        Category::AutomaticModule,
        Category::ClasspathJar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::ExplicitModule => "explicit-module",
            Category::AutomaticModule => "automatic-module",
            Category::ClasspathJar => "classpath-jar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Override Set ====================

/// One operator supplied exception.
///
/// `group:artifact` matches every version and classifier of that artifact,
/// a full coordinate matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OverrideEntry {
    AnyVersion { group: String, artifact: String },
    Exact(Coordinate),
}

impl FromStr for OverrideEntry {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact] if !group.is_empty() && !artifact.is_empty() => {
                Ok(OverrideEntry::AnyVersion {
                    group: group.to_string(),
                    artifact: artifact.to_string(),
                })
            }
            _ => s.parse().map(OverrideEntry::Exact),
        }
    }
}

impl TryFrom<String> for OverrideEntry {
    type Error = LayoutError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OverrideEntry> for String {
    fn from(value: OverrideEntry) -> Self {
        match value {
            OverrideEntry::AnyVersion { group, artifact } => format!("{group}:{artifact}"),
            OverrideEntry::Exact(coordinate) => coordinate.to_string(),
        }
    }
}

/// Artifacts that must always land on the classpath
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    exact: HashSet<Coordinate>,
    /// group -> artifacts matched at any version
    any_version: HashMap<String, HashSet<String>>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: OverrideEntry) {
        match entry {
            OverrideEntry::AnyVersion { group, artifact } => {
                self.any_version.entry(group).or_default().insert(artifact);
            }
            OverrideEntry::Exact(coordinate) => {
                self.exact.insert(coordinate);
            }
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.exact.contains(coordinate)
            || self
                .any_version
                .get(&coordinate.group)
                .is_some_and(|artifacts| artifacts.contains(&coordinate.artifact))
    }

    pub fn len(&self) -> usize {
        self.exact.len() + self.any_version.values().map(HashSet::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<OverrideEntry> for OverrideSet {
    fn from_iter<I: IntoIterator<Item = OverrideEntry>>(iter: I) -> Self {
        let mut set = OverrideSet::new();
        for entry in iter {
            set.insert(entry);
        }
        set
    }
}

impl Extend<OverrideEntry> for OverrideSet {
    fn extend<I: IntoIterator<Item = OverrideEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

// ==================== Output Layout ====================

/// Per-category output directory. A category without a directory is
/// classified but never copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLayout {
    dirs: HashMap<Category, PathBuf>,
}

impl OutputLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, category: Category, dir: impl Into<PathBuf>) -> Self {
        self.set_dir(category, Some(dir.into()));
        self
    }

    pub fn set_dir(&mut self, category: Category, dir: Option<PathBuf>) {
        match dir {
            Some(dir) => {
                self.dirs.insert(category, dir);
            }
            None => {
                self.dirs.remove(&category);
            }
        }
    }

    pub fn dir(&self, category: Category) -> Option<&Path> {
        self.dirs.get(&category).map(PathBuf::as_path)
    }

    /// Configured directories in category order
    pub fn configured(&self) -> impl Iterator<Item = (Category, &Path)> + '_ {
        Category::ALL
            .into_iter()
            .filter_map(|category| self.dir(category).map(|dir| (category, dir)))
    }
}
