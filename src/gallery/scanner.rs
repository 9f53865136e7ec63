// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Week folder scanner
//!
//! Walks the `CW_<n>` folders below the gallery root and builds one
//! [`Week`] per folder. Nothing is cached; every call reads the disk again.

use chrono::{DateTime, Datelike, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::lock::{LockKind, WeekDir, WEEK_PREFIX};
use super::votes::read_ballot;
use super::{Entry, Week};
use crate::Result;

/// Image formats shown in the gallery
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gif", "png"];

/// Scanner over a gallery root directory
#[derive(Debug, Clone)]
pub struct WeekScanner {
    root: PathBuf,
    path_prefix: String,
}

impl WeekScanner {
    pub fn new(root: impl Into<PathBuf>, path_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            path_prefix: path_prefix.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan all week folders, newest week first.
    ///
    /// A folder with an unparseable week number or an unreadable listing
    /// fails the whole scan. A broken ballot only drops that week's tallies.
    pub fn scan(&self) -> Result<Vec<Week>> {
        let current_week = Local::now().iso_week().week();
        let mut weeks = Vec::new();

        for dir in self.week_dirs()? {
            let mut week = self.scan_week(&dir)?;
            week.is_current_week = week.number == current_week;
            weeks.push(week);
        }

        weeks.sort_by(|a, b| b.number.cmp(&a.number));
        debug!("Scanned {} weeks in {:?}", weeks.len(), self.root);
        Ok(weeks)
    }

    /// Week folders below the root, in name order
    fn week_dirs(&self) -> Result<Vec<WeekDir>> {
        let root = glob::Pattern::escape(&self.root.to_string_lossy());
        let pattern = Path::new(&root).join(format!("{}*", WEEK_PREFIX));

        let mut dirs = Vec::new();
        for path in glob::glob(&pattern.to_string_lossy())? {
            let path = path.map_err(glob::GlobError::into_error)?;
            if path.is_dir() {
                dirs.push(WeekDir::new(path));
            }
        }
        Ok(dirs)
    }

    /// Build the week record for a single folder
    pub fn scan_week(&self, dir: &WeekDir) -> Result<Week> {
        let number = dir.number()?;

        let mut children: Vec<fs::DirEntry> = fs::read_dir(dir.path())?
            .collect::<std::io::Result<_>>()?;
        children.sort_by_key(|c| c.file_name());

        let mut entries = Vec::new();
        for child in children {
            let metadata = child.metadata()?;
            if metadata.is_dir() {
                continue;
            }
            let file_name = child.file_name().to_string_lossy().into_owned();
            if !is_image(Path::new(&file_name)) {
                continue;
            }
            entries.push(Entry {
                href: entry_href(&self.path_prefix, dir.name(), &file_name),
                file_name,
                modified: DateTime::<Local>::from(metadata.modified()?),
            });
        }

        entries.sort_by(|a, b| b.modified.cmp(&a.modified));

        let upload_locked = dir.is_locked(LockKind::Upload);
        let tallies = if upload_locked && dir.is_locked(LockKind::Vote) {
            match read_ballot(dir.path()) {
                Ok(tallies) => Some(tallies),
                Err(e) => {
                    warn!("Ignoring votes of {}: {}", dir.name(), e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Week {
            number,
            entries,
            can_vote: upload_locked,
            is_current_week: false,
            tallies,
        })
    }
}

/// Check whether a file has an allow-listed image extension
pub fn is_image(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => IMAGE_EXTENSIONS.iter().any(|e| e.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Link for an image: prefix, week folder, file name
pub fn entry_href(prefix: &str, week: &str, file_name: &str) -> String {
    let base = prefix.trim_end_matches('/');
    if base.is_empty() && !prefix.starts_with('/') {
        format!("{}/{}", week, file_name)
    } else {
        format!("{}/{}/{}", base, week, file_name)
    }
}
