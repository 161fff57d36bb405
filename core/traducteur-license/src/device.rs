//! Device fingerprinting for at-rest sealing.
//!
//! The fingerprint is a stable hash of hardware and account identifiers. It
//! is the key material for [`FileSecureStorage`](crate::FileSecureStorage),
//! so an activation file copied to another machine does not open there.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use sha2::{Digest, Sha256};
use std::env;
use traducteur_crypto::{derive_key, SealingKey};

/// Key-derivation context for secure-storage sealing keys.
const SEALING_CONTEXT: &str = "traducteur/secure-storage/v1";

/// A stable identifier for this device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFingerprint {
    id: String,
}

impl DeviceFingerprint {
    /// Generates the fingerprint for the current device.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_components(&collect_hardware_ids())
    }

    /// Builds a fingerprint from explicit identifier components.
    #[must_use]
    pub fn from_components<S: AsRef<str>>(components: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for (i, part) in components.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(part.as_ref().as_bytes());
        }
        let hash = hasher.finalize();

        Self {
            id: BASE64.encode(&hash[..16]),
        }
    }

    /// Returns the fingerprint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Derives the key that seals secure-storage entries on this device.
    #[must_use]
    pub fn sealing_key(&self) -> SealingKey {
        derive_key(SEALING_CONTEXT, self.id.as_bytes())
    }
}

fn collect_hardware_ids() -> Vec<String> {
    let mut ids = vec![
        env::consts::OS.to_string(),
        env::consts::ARCH.to_string(),
        get_hostname(),
    ];

    if let Some(machine_id) = get_machine_id() {
        ids.push(machine_id);
    }

    if let Ok(user) = env::var("USER").or_else(|_| env::var("USERNAME")) {
        ids.push(user);
    }

    ids
}

fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}

fn get_machine_id() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        std::fs::read_to_string("/etc/machine-id")
            .or_else(|_| std::fs::read_to_string("/var/lib/dbus/machine-id"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("ioreg")
            .args(["-rd1", "-c", "IOPlatformExpertDevice"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .and_then(|output| {
                output
                    .lines()
                    .find(|l| l.contains("IOPlatformUUID"))
                    .and_then(|l| l.split('"').nth(3))
                    .map(String::from)
            })
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        None
    }
}
