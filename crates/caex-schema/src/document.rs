//! Version-sniffing loader for CAEX documents

use crate::error::{Error, Result};
use crate::xml::{FromXml, XmlDocument};
use crate::{v2_15, v3_0};
use caex_generic::{Generalizable, GenericTree};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// A supported CAEX schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaVersion {
    V2_15,
    V3_0,
}

impl SchemaVersion {
    /// The `SchemaVersion` attribute value
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaVersion::V2_15 => "2.15",
            SchemaVersion::V3_0 => "3.0",
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2.15" => Ok(SchemaVersion::V2_15),
            "3.0" => Ok(SchemaVersion::V3_0),
            other => Err(Error::UnsupportedSchemaVersion(other.to_string())),
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded CAEX document of either supported version
#[derive(Debug, Clone, PartialEq)]
pub enum CaexDocument {
    V2_15(v2_15::CaexFile),
    V3_0(v3_0::CaexFile),
}

impl CaexDocument {
    /// Parse a document from XML text.
    ///
    /// The document must contain exactly one `CAEXFile` element; its
    /// `SchemaVersion` attribute selects the object model.
    pub fn parse(xml: &str) -> Result<Self> {
        let document = XmlDocument::parse(xml)?;
        let mut roots = document.elements_named("CAEXFile");
        let root = roots
            .next()
            .ok_or_else(|| Error::malformed("<CAEXFile> root tag missing"))?;
        if roots.next().is_some() {
            return Err(Error::malformed("only 1 <CAEXFile> tag is allowed"));
        }

        let version = root
            .attribute("SchemaVersion")
            .ok_or_else(|| Error::malformed("<CAEXFile> has no SchemaVersion attribute"))?;
        debug!(version, "loading CAEX document");
        match version.parse()? {
            SchemaVersion::V2_15 => Ok(CaexDocument::V2_15(v2_15::CaexFile::from_xml(root)?)),
            SchemaVersion::V3_0 => Ok(CaexDocument::V3_0(v3_0::CaexFile::from_xml(root)?)),
        }
    }

    /// Read and parse a document from a file
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let xml = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&xml)
    }

    /// The schema version of the loaded model
    pub fn schema_version(&self) -> SchemaVersion {
        match self {
            CaexDocument::V2_15(_) => SchemaVersion::V2_15,
            CaexDocument::V3_0(_) => SchemaVersion::V3_0,
        }
    }

    /// The `FileName` attribute of the root
    pub fn file_name(&self) -> Option<&str> {
        match self {
            CaexDocument::V2_15(file) => file.file_name.as_deref(),
            CaexDocument::V3_0(file) => file.file_name.as_deref(),
        }
    }

    /// The root object, whichever version it is
    pub fn as_generalizable(&self) -> &dyn Generalizable {
        match self {
            CaexDocument::V2_15(file) => file,
            CaexDocument::V3_0(file) => file,
        }
    }

    /// Build the version-agnostic tree of this document
    pub fn generalize(&self) -> Result<GenericTree<'_>> {
        Ok(caex_generic::generalize(self.as_generalizable())?)
    }
}

impl FromStr for CaexDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
