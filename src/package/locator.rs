//! Resolution of the manifest and item document inside an export folder.

use super::options::LocatorOptions;
use crate::common::{Error, Result};
use memchr::memmem;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Paths of the two documents making up a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePaths {
    pub manifest: PathBuf,
    pub assessment: PathBuf,
}

/// One immediate entry of a listed folder.
#[derive(Debug)]
struct DirEntry {
    name: OsString,
    is_dir: bool,
}

/// Locates package files by name pattern.
///
/// Matching is done on the immediate entries of the root folder, or of its
/// only subfolder when the root holds nothing else. The first entry in
/// file-system enumeration order wins; no sorting is applied, so a folder
/// with several matching files resolves in an unspecified way.
#[derive(Debug, Clone, Default)]
pub struct Locator {
    options: LocatorOptions,
}

impl Locator {
    pub fn new(options: LocatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Find the manifest and item document under `root`.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if `root` is missing or not a directory
    /// - [`Error::ManifestNotFound`] / [`Error::AssessmentNotFound`] if no file
    ///   name matches
    /// - [`Error::Io`] if a folder cannot be listed
    pub fn locate<P: AsRef<Path>>(&self, root: P) -> Result<PackagePaths> {
        let root = root.as_ref();

        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {},
            Ok(_) => return Err(Error::NotFound { path: root.to_path_buf() }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound { path: root.to_path_buf() });
            },
            Err(e) => return Err(Error::io(root, e)),
        }

        let mut dir = root.to_path_buf();
        let mut entries = list_dir(&dir)?;

        let wrapper = match entries.as_slice() {
            [only] if only.is_dir && self.options.flatten_single_dir => Some(only.name.clone()),
            _ => None,
        };

        // One level only: a wrapper holding a single folder is not unwrapped again.
        if let Some(name) = wrapper {
            dir.push(name);
            tracing::debug!(dir = %dir.display(), "descending into single wrapper folder");
            entries = list_dir(&dir)?;
        }

        let manifest = self
            .find(&entries, &self.options.manifest_marker)
            .ok_or_else(|| Error::ManifestNotFound { dir: dir.clone() })?;
        let assessment = self
            .find(&entries, &self.options.assessment_marker)
            .ok_or_else(|| Error::AssessmentNotFound { dir: dir.clone() })?;

        let paths = PackagePaths {
            manifest: dir.join(manifest),
            assessment: dir.join(assessment),
        };
        tracing::debug!(
            manifest = %paths.manifest.display(),
            assessment = %paths.assessment.display(),
            "located package files"
        );
        Ok(paths)
    }

    /// First non-directory entry whose name contains `marker` and ends with
    /// the configured extension.
    fn find<'a>(&self, entries: &'a [DirEntry], marker: &str) -> Option<&'a OsString> {
        entries
            .iter()
            .filter(|entry| !entry.is_dir)
            .find(|entry| {
                let name = entry.name.to_string_lossy();
                tracing::trace!(%name, marker, "checking entry");
                name.ends_with(self.options.extension.as_str())
                    && memmem::find(name.as_bytes(), marker.as_bytes()).is_some()
            })
            .map(|entry| &entry.name)
    }
}

/// Locate package files under `root` with the default options.
///
/// The returned paths are `root` joined with the matched names (and the
/// wrapper folder, if one was looked through). They are absolute only when
/// `root` is; a relative `root` yields paths relative to the working
/// directory.
pub fn locate_package<P: AsRef<Path>>(root: P) -> Result<PackagePaths> {
    Locator::default().locate(root)
}

/// List the immediate entries of `dir` in enumeration order.
///
/// Symbolic links are not followed when classifying entries.
fn list_dir(dir: &Path) -> Result<Vec<DirEntry>> {
    let read_dir = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut entries = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(&entry.path(), e))?;
        entries.push(DirEntry {
            name: entry.file_name(),
            is_dir: file_type.is_dir(),
        });
    }
    Ok(entries)
}
