use crate::manifest::{MANIFEST_PATH, MainAttributes};
use jlayout_api::{BoxError, ManifestProbe};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;
use zip::ZipArchive;
use zip::result::ZipError;

/// Reads `Automatic-Module-Name` from the manifest of a JAR on disk
#[derive(Debug, Default, Clone, Copy)]
pub struct JarManifestProbe;

impl JarManifestProbe {
    pub fn new() -> Self {
        Self
    }

    /// Main manifest attributes of `archive`, `None` when it has no manifest.
    ///
    /// Fails when the file is not a readable ZIP, the manifest entry cannot
    /// be decompressed, or the manifest does not parse.
    pub fn read_main_attributes(&self, archive: &Path) -> Result<Option<MainAttributes>, BoxError> {
        let file = File::open(archive)?;
        let mut zip = ZipArchive::new(BufReader::new(file))?;

        let Some(entry_name) = Self::manifest_entry_name(&zip) else {
            trace!("No manifest in {}", archive.display());
            return Ok(None);
        };

        let mut entry = match zip.by_name(&entry_name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(Some(MainAttributes::parse(&bytes)?))
    }

    // Lookup is case-insensitive like the JDK's own JarFile
    fn manifest_entry_name<R: Read + std::io::Seek>(zip: &ZipArchive<R>) -> Option<String> {
        zip.file_names()
            .find(|name| name.eq_ignore_ascii_case(MANIFEST_PATH))
            .map(str::to_string)
    }
}

impl ManifestProbe for JarManifestProbe {
    fn automatic_module_name(&self, archive: &Path) -> Result<Option<String>, BoxError> {
        let attributes = self.read_main_attributes(archive)?;
        Ok(attributes.and_then(|attrs| attrs.automatic_module_name().map(str::to_string)))
    }
}
