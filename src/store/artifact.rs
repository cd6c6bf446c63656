//! File-backed coefficient artifact persistence

use std::fs;
use std::path::PathBuf;

use crate::error::Result;
use crate::model::CoefficientArtifact;
use crate::store::ArtifactStore;

/// Artifact store persisting the fitted coefficients as a JSON file.
///
/// The on-disk representation is opaque to callers; only load/save are
/// contractual. A save fully replaces any prior artifact.
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    path: PathBuf,
}

impl JsonArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ArtifactStore for JsonArtifactStore {
    fn load(&self) -> Result<Option<CoefficientArtifact>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&text)?))
    }

    fn save(&mut self, artifact: &CoefficientArtifact) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(artifact)?)?;
        Ok(())
    }
}
