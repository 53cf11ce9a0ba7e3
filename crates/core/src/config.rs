use jlayout_api::{Category, OutputLayout, OverrideEntry, OverrideSet, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration, read from a JSON file and/or the command line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Destination for explicit modules
    pub modules_dir: Option<PathBuf>,
    /// Destination for named automatic modules
    pub automatic_dir: Option<PathBuf>,
    /// Destination for plain classpath jars
    pub classpath_dir: Option<PathBuf>,
    /// Artifacts always treated as classpath jars
    pub classpath_artifacts: Vec<OverrideEntry>,
    /// Local Maven repository root
    pub repository: Option<PathBuf>,
    pub parallel: bool,
}

impl LayoutConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Layer `other` on top of `self`: set values win, override lists add up.
    pub fn merge(mut self, other: LayoutConfig) -> Self {
        self.modules_dir = other.modules_dir.or(self.modules_dir);
        self.automatic_dir = other.automatic_dir.or(self.automatic_dir);
        self.classpath_dir = other.classpath_dir.or(self.classpath_dir);
        self.repository = other.repository.or(self.repository);
        self.classpath_artifacts.extend(other.classpath_artifacts);
        self.parallel |= other.parallel;
        self
    }

    pub fn output_layout(&self) -> OutputLayout {
        let mut layout = OutputLayout::new();
        layout.set_dir(Category::ExplicitModule, self.modules_dir.clone());
        layout.set_dir(Category::AutomaticModule, self.automatic_dir.clone());
        layout.set_dir(Category::ClasspathJar, self.classpath_dir.clone());
        layout
    }

    pub fn override_set(&self) -> OverrideSet {
        self.classpath_artifacts.iter().cloned().collect()
    }
}
