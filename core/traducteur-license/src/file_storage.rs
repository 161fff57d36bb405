//! File-backed secure storage.
//!
//! Each entry is one file under the storage directory holding the base64
//! sealed value. Writes go to a sibling temp file and are renamed into place.

use crate::device::DeviceFingerprint;
use crate::error::{LicenseError, LicenseResult};
use crate::storage::SecureStorage;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use traducteur_crypto::{open_string, seal_string, SealingKey};

/// Directory name under the platform data dir.
const APP_DIR: &str = "traducteur";

/// Secure storage sealed with a device-bound key.
#[derive(Debug)]
pub struct FileSecureStorage {
    dir: PathBuf,
    key: SealingKey,
}

impl FileSecureStorage {
    /// Opens (creating if needed) storage at `dir`, sealed with this
    /// device's fingerprint.
    pub fn open(dir: impl Into<PathBuf>) -> LicenseResult<Self> {
        Self::with_key(dir, DeviceFingerprint::generate().sealing_key())
    }

    /// Opens storage at the platform default location.
    pub fn open_default() -> LicenseResult<Self> {
        let dir = Self::default_dir().ok_or_else(|| {
            LicenseError::Storage("no local data directory on this platform".to_string())
        })?;
        Self::open(dir)
    }

    /// Opens storage at `dir` with an explicit sealing key.
    pub fn with_key(dir: impl Into<PathBuf>, key: SealingKey) -> LicenseResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            LicenseError::Storage(format!("failed to create {}: {e}", dir.display()))
        })?;
        Ok(Self { dir, key })
    }

    /// `<data_local_dir>/traducteur`, if the platform has one.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_local_dir().map(|d| d.join(APP_DIR))
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `name`.
    pub fn entry_path(&self, name: &str) -> LicenseResult<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(LicenseError::InvalidEntryName(name.to_string()));
        }
        Ok(self.dir.join(name))
    }
}

impl SecureStorage for FileSecureStorage {
    fn get_item(&self, name: &str) -> LicenseResult<Option<String>> {
        let path = self.entry_path(name)?;
        let sealed = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LicenseError::Storage(format!(
                    "failed to read {}: {e}",
                    path.display()
                )));
            }
        };

        let value = open_string(&self.key, name, &sealed)?;
        Ok(Some(value))
    }

    fn set_item(&self, name: &str, value: &str) -> LicenseResult<()> {
        let path = self.entry_path(name)?;
        let sealed = seal_string(&self.key, name, value)?;

        let tmp = self.dir.join(format!("{name}.tmp"));
        fs::write(&tmp, sealed.as_bytes()).map_err(|e| {
            LicenseError::Storage(format!("failed to write {}: {e}", tmp.display()))
        })?;
        restrict_permissions(&tmp)?;
        fs::rename(&tmp, &path).map_err(|e| {
            LicenseError::Storage(format!("failed to replace {}: {e}", path.display()))
        })?;

        debug!("Wrote secure entry {}", path.display());
        Ok(())
    }

    fn delete_item(&self, name: &str) -> LicenseResult<()> {
        let path = self.entry_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Deleted secure entry {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LicenseError::Storage(format!(
                "failed to delete {}: {e}",
                path.display()
            ))),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> LicenseResult<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
        LicenseError::Storage(format!("failed to restrict {}: {e}", path.display()))
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> LicenseResult<()> {
    Ok(())
}
