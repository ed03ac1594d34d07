use std::fs;
use std::path::{Path, PathBuf};

use chromiumoxide::cdp::browser_protocol::network::{Cookie, CookieParam};
use log::{debug, info, warn};

use crate::error_handling::types::StoreError;

/// Persists browser session cookies as a JSON file so a restart does not
/// force a fresh interactive login.
///
/// The file holds the full cookie records as reported by the browser. On
/// load they are reparsed as cookie parameters, which accept the same field
/// names, so expiry and flags survive the round trip untouched.
pub struct CookieStore {
    path: PathBuf,
}

impl CookieStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads persisted cookies, if any.
    ///
    /// A missing or empty file is a normal first-run condition and yields
    /// `None`. A file that exists but does not parse is reported as an error
    /// so the operator notices the corruption instead of silently relogging.
    pub fn load(&self) -> Result<Option<Vec<CookieParam>>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No cookie file at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                warn!("Failed to read cookie file {}: {}", self.path.display(), e);
                return Err(StoreError::ReadFailed(e.to_string()));
            }
        };

        if raw.trim().is_empty() {
            debug!("Cookie file {} is empty", self.path.display());
            return Ok(None);
        }

        let cookies: Vec<CookieParam> = serde_json::from_str(&raw).map_err(|e| {
            warn!("Cookie file {} is corrupt: {}", self.path.display(), e);
            StoreError::ParseFailed(e.to_string())
        })?;

        if cookies.is_empty() {
            return Ok(None);
        }

        info!(
            "Loaded {} cookies from {}",
            cookies.len(),
            self.path.display()
        );
        Ok(Some(cookies))
    }

    /// Writes the current browser cookies to disk.
    ///
    /// The write goes through a temporary sibling file and a rename so a
    /// crash mid-write never leaves a truncated cookie file behind.
    pub fn save(&self, cookies: &[Cookie]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(cookies)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    warn!("Failed to create cookie dir {}: {}", parent.display(), e);
                    StoreError::WriteFailed(e.to_string())
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| {
            warn!("Failed to write cookie file {}: {}", tmp.display(), e);
            StoreError::WriteFailed(e.to_string())
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            warn!("Failed to move cookie file into place: {}", e);
            StoreError::WriteFailed(e.to_string())
        })?;

        info!("Saved {} cookies to {}", cookies.len(), self.path.display());
        Ok(())
    }
}
