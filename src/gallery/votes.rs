// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Ballot file parsing and vote ranking
//!
//! A ballot file (`votes.txt`) has one line per voter:
//! `voter:file_a.jpg:file_b.png`. The first field names the voter and is
//! ignored, every further field is one vote for that file.
//!
//! Fields may be wrapped in `"` (with `""` for a literal quote), but a quoted
//! field never spans lines. Any other `"` makes the whole ballot malformed.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use super::Tally;
use crate::{GalleryError, Result};

/// Ballot file name inside a week folder
pub const BALLOT_FILE: &str = "votes.txt";

/// Read and rank the ballot of a week folder.
///
/// A missing ballot file means nobody has voted yet and yields no tallies.
pub fn read_ballot(week_dir: &Path) -> Result<Vec<Tally>> {
    let path = week_dir.join(BALLOT_FILE);
    if !path.exists() {
        debug!("No ballot file at {:?}", path);
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(&path)?;
    parse_ballot(file)
}

/// Parse colon-delimited ballot lines and rank the candidates
pub fn parse_ballot<R: Read>(input: R) -> Result<Vec<Tally>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b':')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| GalleryError::Ballot(e.to_string()))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        for (index, field) in record.iter().enumerate() {
            let field = unquote(field)
                .map_err(|reason| GalleryError::Ballot(format!("line {}: {}", line, reason)))?;
            // field 0 is the voter
            if index == 0 || field.is_empty() {
                continue;
            }
            *counts.entry(field.into_owned()).or_insert(0) += 1;
        }
    }

    Ok(rank(counts))
}

/// Strip the quotes of a quoted field, rejecting stray `"`
fn unquote(field: &str) -> std::result::Result<Cow<'_, str>, &'static str> {
    match field.strip_prefix('"') {
        None if field.contains('"') => Err("bare \" in non-quoted field"),
        None => Ok(Cow::Borrowed(field)),
        Some(rest) => {
            let inner = rest
                .strip_suffix('"')
                .ok_or("unterminated quoted field")?;
            if inner.replace("\"\"", "").contains('"') {
                Err("extraneous \" in quoted field")
            } else {
                Ok(Cow::Owned(inner.replace("\"\"", "\"")))
            }
        }
    }
}

/// Order tallies by vote count, highest first.
///
/// Equal counts keep the map's order, i.e. candidate name ascending.
pub fn rank(counts: BTreeMap<String, u32>) -> Vec<Tally> {
    let mut tallies: Vec<Tally> = counts
        .into_iter()
        .map(|(file, votes)| Tally { file, votes })
        .collect();
    tallies.sort_by(|a, b| b.votes.cmp(&a.votes));
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn tally(file: &str, votes: u32) -> Tally {
        Tally { file: file.to_string(), votes }
    }

    #[test]
    fn test_parse_ballot_counts_and_ranks() {
        let input = "alice:img1.jpg:img2.jpg\nbob:img1.jpg\n";
        let tallies = parse_ballot(input.as_bytes()).unwrap();
        assert_eq!(tallies, vec![tally("img1.jpg", 2), tally("img2.jpg", 1)]);
    }

    #[test]
    fn test_ragged_rows_and_voter_only_lines() {
        let input = "a:x.png\nb\nc:y.png:x.png:z.png\r\nd:z.png:x.png\n";
        let tallies = parse_ballot(input.as_bytes()).unwrap();
        assert_eq!(
            tallies,
            vec![tally("x.png", 3), tally("z.png", 2), tally("y.png", 1)]
        );
    }

    #[test]
    fn test_ties_break_by_name() {
        let input = "v1:c.jpg:a.jpg\nv2:b.jpg\n";
        let tallies = parse_ballot(input.as_bytes()).unwrap();
        let names: Vec<&str> = tallies.iter().map(|t| t.file.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_empty_fields_are_not_votes() {
        let input = "v1::a.jpg:\n";
        let tallies = parse_ballot(input.as_bytes()).unwrap();
        assert_eq!(tallies, vec![tally("a.jpg", 1)]);
    }

    #[test]
    fn test_quoted_fields() {
        let input = "\"alice\":\"img1.jpg\":img2.jpg\nbob:\"say \"\"hi\"\".png\"\n";
        let tallies = parse_ballot(input.as_bytes()).unwrap();
        assert_eq!(
            tallies,
            vec![tally("img1.jpg", 1), tally("img2.jpg", 1), tally("say \"hi\".png", 1)]
        );
    }

    #[test]
    fn test_unterminated_quote_is_ballot_error() {
        let input = "alice:\"img1.jpg\nbob:img2.jpg\n";
        let err = parse_ballot(input.as_bytes()).unwrap_err();
        assert!(matches!(err, GalleryError::Ballot(msg) if msg.contains("line 1")));
    }

    #[test]
    fn test_bare_quote_is_ballot_error() {
        let err = parse_ballot("alice:img\"1.jpg\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GalleryError::Ballot(_)));

        let err = parse_ballot("alice:\"img\"1.jpg\"\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GalleryError::Ballot(_)));

        let err = parse_ballot("al\"ice:img1.jpg\n".as_bytes()).unwrap_err();
        assert!(matches!(err, GalleryError::Ballot(_)));
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("a.jpg").unwrap(), "a.jpg");
        assert_eq!(unquote("\"a.jpg\"").unwrap(), "a.jpg");
        assert_eq!(unquote("\"\"").unwrap(), "");
        assert!(unquote("\"").is_err());
        assert!(unquote("a\"").is_err());
    }

    #[test]
    fn test_empty_ballot() {
        assert!(parse_ballot("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_ballot_error() {
        let input: &[u8] = b"alice:\xff\xfe.jpg\n";
        let err = parse_ballot(input).unwrap_err();
        assert!(matches!(err, GalleryError::Ballot(_)));
    }

    #[test]
    fn test_missing_ballot_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_ballot(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_ballot_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(BALLOT_FILE), "alice:a.gif\nbob:a.gif:b.gif\n").unwrap();
        let tallies = read_ballot(dir.path()).unwrap();
        assert_eq!(tallies, vec![tally("a.gif", 2), tally("b.gif", 1)]);
    }
}
