//! Package resolution: from an export folder to a parsed package.
//!
//! An export folder holds the manifest (`*qpl*.xml`), the item document
//! (`*qti*.xml`) and unrelated files such as media objects. Some export tools
//! wrap everything in one extra folder; that wrapper is looked through once.
//!
//! # Example
//!
//! ```no_run
//! use quizpack::Package;
//!
//! # fn main() -> quizpack::Result<()> {
//! let package = Package::open("exports/1700000000__0__qpl_7")?;
//! println!("{}", package.manifest.title.text);
//! for item in &package.assessment {
//!     println!("{}: {} choices", item.title, item.presentation.flow.response.choices.len());
//! }
//! # Ok(())
//! # }
//! ```

mod locator;
mod options;

pub use locator::{Locator, PackagePaths, locate_package};
pub use options::LocatorOptions;

use crate::common::Result;
use crate::qpl::{self, ManifestMetadata};
use crate::qti::{self, AssessmentDocument};
use std::path::Path;

/// A parsed package: manifest plus item document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    pub manifest: ManifestMetadata,
    pub assessment: AssessmentDocument,
}

impl Package {
    /// Locate and decode the package under `root` with default options.
    ///
    /// Any failure aborts the whole operation; there is no partial result.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with(root, &LocatorOptions::default())
    }

    /// Locate and decode the package under `root`.
    pub fn open_with<P: AsRef<Path>>(root: P, options: &LocatorOptions) -> Result<Self> {
        let paths = Locator::new(options.clone()).locate(root)?;
        Self::from_paths(&paths)
    }

    /// Decode an already located pair of documents.
    ///
    /// Decode errors carry the path of the offending file.
    pub fn from_paths(paths: &PackagePaths) -> Result<Self> {
        let manifest = qpl::read_manifest_file(&paths.manifest)?;
        let assessment = qti::read_assessment_file(&paths.assessment)?;

        tracing::debug!(
            entry = %manifest.identifier.entry,
            items = assessment.len(),
            "decoded package"
        );
        Ok(Self {
            manifest,
            assessment,
        })
    }
}

/// Open several independent packages, one result per root in input order.
#[cfg(feature = "parallel")]
pub fn open_all<P: AsRef<Path> + Sync>(roots: &[P]) -> Vec<Result<Package>> {
    use rayon::prelude::*;

    roots.par_iter().map(Package::open).collect()
}

/// Open several independent packages, one result per root in input order.
#[cfg(not(feature = "parallel"))]
pub fn open_all<P: AsRef<Path>>(roots: &[P]) -> Vec<Result<Package>> {
    roots.iter().map(Package::open).collect()
}
