//! Random image selection.
//!
//! The catalog is the set of files in the image directory whose extension is
//! on the allow-list. Symlinks count when they resolve to a file. It is
//! listed fresh on every call, so files added or removed while the server
//! runs are picked up immediately.

use crate::error::Result;
use rand::seq::IndexedRandom;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Extensions eligible for voting, compared case-insensitively
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

/// Picks a random image from a directory
#[derive(Debug, Clone)]
pub struct ImagePicker {
    dir: PathBuf,
}

impl ImagePicker {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the catalog is read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List eligible file names. A missing directory counts as empty.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut images = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            // Follows symlinks; broken links are skipped
            match fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            }
            // Skip non UTF-8 names
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_allowed(&name) {
                images.push(name);
            }
        }

        Ok(images)
    }

    /// Pick one eligible file name uniformly at random
    pub async fn pick_random(&self) -> Result<Option<String>> {
        let images = self.list().await?;
        let picked = images.choose(&mut rand::rng()).cloned();

        debug!(
            dir = %self.dir.display(),
            candidates = images.len(),
            picked = ?picked,
            "Picked random image"
        );

        Ok(picked)
    }
}

/// Check a file name against the extension allow-list
pub fn is_allowed(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false)
}
