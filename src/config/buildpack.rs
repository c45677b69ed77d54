use crate::utils::error::{ExtensionError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const BUILDPACK_TOML: &str = "buildpack.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildpackInfo {
    pub buildpack: BuildpackMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildpackMetadata {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl BuildpackInfo {
    /// Parses the contents of a `buildpack.toml`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads `buildpack.toml` from the buildpack root; a missing file is not an error.
    pub fn from_dir(buildpack_dir: &Path) -> Result<Option<Self>> {
        let path = buildpack_dir.join(BUILDPACK_TOML);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ExtensionError::IoError(e)),
        }
    }
}
