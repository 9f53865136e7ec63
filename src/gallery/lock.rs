// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Week folders and their lock markers

use std::path::{Path, PathBuf};

use crate::{GalleryError, Result};

/// Folder name prefix of a week directory
pub const WEEK_PREFIX: &str = "CW_";

/// Phase of a week that can be closed by an admin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockKind {
    /// No more uploads
    Upload,
    /// No more votes
    Vote,
}

impl LockKind {
    /// Sentinel file name for this phase
    pub fn file_name(self) -> &'static str {
        match self {
            LockKind::Upload => "upload.lock",
            LockKind::Vote => "vote.lock",
        }
    }
}

/// A `CW_<n>` directory under the gallery root
#[derive(Debug, Clone)]
pub struct WeekDir {
    path: PathBuf,
    name: String,
}

impl WeekDir {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Folder name, e.g. `CW_42`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Week number from the folder name suffix
    pub fn number(&self) -> Result<u32> {
        self.name
            .strip_prefix(WEEK_PREFIX)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| GalleryError::InvalidWeek(self.name.clone()))
    }

    /// Whether the given phase has been closed
    pub fn is_locked(&self, kind: LockKind) -> bool {
        self.path.join(kind.file_name()).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_week_number() {
        assert_eq!(WeekDir::new(PathBuf::from("/g/CW_7")).number().unwrap(), 7);
        assert_eq!(WeekDir::new(PathBuf::from("CW_052")).number().unwrap(), 52);
    }

    #[test]
    fn test_invalid_week_number() {
        let err = WeekDir::new(PathBuf::from("/g/CW_next")).number().unwrap_err();
        assert!(matches!(err, GalleryError::InvalidWeek(name) if name == "CW_next"));
        assert!(WeekDir::new(PathBuf::from("/g/CW_")).number().is_err());
    }

    #[test]
    fn test_lock_markers() {
        let dir = TempDir::new().unwrap();
        let week = WeekDir::new(dir.path().to_path_buf());
        assert!(!week.is_locked(LockKind::Upload));
        assert!(!week.is_locked(LockKind::Vote));

        std::fs::write(dir.path().join("upload.lock"), "").unwrap();
        assert!(week.is_locked(LockKind::Upload));
        assert!(!week.is_locked(LockKind::Vote));
    }
}
