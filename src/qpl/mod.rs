//! QPL manifest support.
//!
//! The manifest is the package-level metadata document of a question-pool
//! export. It names the package type and carries an identifier together with
//! localized title, language, description and keyword entries:
//!
//! ```xml
//! <ContentObject Type="Questionpool_Test">
//!   <MetaData>
//!     <General Structure="Hierarchical">
//!       <Identifier Catalog="ILIAS" Entry="il_0_qpl_42"/>
//!       <Title Language="en">Geography</Title>
//!       <Language Language="en"/>
//!       <Description Language="en">Capitals and rivers</Description>
//!       <Keyword Language="en"/>
//!     </General>
//!   </MetaData>
//! </ContentObject>
//! ```
//!
//! # Example
//!
//! ```rust
//! use quizpack::qpl::decode_manifest;
//!
//! # fn main() -> quizpack::Result<()> {
//! let xml = br#"<ContentObject Type="Questionpool_Test"><MetaData><General>
//!     <Identifier Catalog="ILIAS" Entry="il_0_qpl_42"/>
//!     <Title Language="en">Geography</Title>
//! </General></MetaData></ContentObject>"#;
//!
//! let manifest = decode_manifest(xml)?;
//! assert_eq!(manifest.identifier.entry, "il_0_qpl_42");
//! assert_eq!(manifest.title.text, "Geography");
//! # Ok(())
//! # }
//! ```

mod manifest;
mod wire;

pub use manifest::{Identifier, LocalizedText, ManifestMetadata};

use crate::common::{Result, xml};
use std::path::Path;
use wire::WireContentObject;

/// Decode a manifest document.
///
/// Unknown elements and attributes are ignored; missing fields decode to
/// empty strings. Malformed XML fails without returning a partial value.
pub fn decode_manifest(bytes: &[u8]) -> Result<ManifestMetadata> {
    let wire: WireContentObject = xml::from_bytes(bytes)?;
    Ok(wire.into())
}

/// Read and decode a manifest file.
///
/// Decode errors are wrapped in [`Error::InFile`](crate::Error::InFile)
/// with `path`; read failures are [`Error::Io`](crate::Error::Io).
pub fn read_manifest_file<P: AsRef<Path>>(path: P) -> Result<ManifestMetadata> {
    let path = path.as_ref();
    decode_manifest(&xml::read_file(path)?).map_err(|e| e.in_file(path))
}

/// Encode a manifest document using the same element mapping as
/// [`decode_manifest`].
pub fn encode_manifest(manifest: &ManifestMetadata) -> Result<String> {
    xml::to_string(wire::ROOT, &WireContentObject::from(manifest))
}
