// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Weekly gallery model: weeks, their image entries and vote tallies

pub mod lock;
pub mod scanner;
pub mod votes;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub use lock::{LockKind, WeekDir};
pub use scanner::WeekScanner;
pub use votes::{read_ballot, parse_ballot};

/// One uploaded image within a week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    /// File name, also the candidate name used on ballots
    pub file_name: String,
    /// Link to the image (path prefix + week folder + file name)
    pub href: String,
    /// Last modification time of the file
    pub modified: DateTime<Local>,
}

/// One voting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Week {
    /// Calendar week parsed from the folder name
    pub number: u32,
    /// Images, newest first
    pub entries: Vec<Entry>,
    /// Uploads are closed and voting may happen
    pub can_vote: bool,
    /// Week number matches the current ISO week.
    ///
    /// Folder names carry no year, so `CW_42` from an earlier year is
    /// flagged as well during week 42.
    pub is_current_week: bool,
    /// Ranked results, only once both uploads and voting are closed
    pub tallies: Option<Vec<Tally>>,
}

/// Aggregated vote count for one entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tally {
    pub file: String,
    pub votes: u32,
}

/// Number of vote slots shown for a week with `entries` images.
///
/// Grows with the square root of the entry count.
pub fn vote_count(entries: usize) -> usize {
    ((entries as f64).sqrt() * 1.15) as usize
}
