//! Install record storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fs::write_atomic;
use crate::install::{InstallError, InstallResult};

/// What was bootstrapped into the conda directory, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallRecord {
    /// Miniconda installer the base was created from
    pub installer_url: String,
    /// Platform label, e.g. `Linux-x86_64`
    pub platform: String,
    /// When the installer finished
    pub installed_at: DateTime<Utc>,
}

impl InstallRecord {
    pub fn new(installer_url: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            installer_url: installer_url.into(),
            platform: platform.into(),
            installed_at: Utc::now(),
        }
    }

    /// Save the record as pretty JSON.
    pub fn save(&self, path: &Path) -> InstallResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_atomic(path, &json).map_err(|source| InstallError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a previously saved record.
    pub fn load(path: &Path) -> InstallResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| InstallError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_install_record_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graf-install.json");

        let original = InstallRecord::new(
            "https://repo.anaconda.com/miniconda/Miniconda3-latest-Linux-x86_64.sh",
            "Linux-x86_64",
        );
        original.save(&path).unwrap();

        let loaded = InstallRecord::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graf-install.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            InstallRecord::load(&path),
            Err(InstallError::Record(_))
        ));
    }
}
