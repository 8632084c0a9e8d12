//! Round snapshots exported by the data store.
//!
//! A snapshot is everything the results page needs for one round, already
//! filtered by the store's access rules (authors are absent before
//! publication).

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::SnapshotError;
use crate::model::{RawSubmission, VoteRecord, VotingRule};
use crate::text::truncate_comment;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub title: String,
    /// Round phase as reported by the store. Display only.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rules: Vec<VotingRule>,
    #[serde(default)]
    pub entries: Vec<RawSubmission>,
    #[serde(default)]
    pub votes: Vec<VoteRecord>,
}

impl RoundSnapshot {
    /// Read a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            entries = snapshot.entries.len(),
            votes = snapshot.votes.len(),
            "loaded round snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot and check that entry numbers are unique.
    ///
    /// Vote comments are trimmed and cut to the ballot length limit.
    pub fn from_json(raw: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Self = serde_json::from_str(raw)?;
        for vote in &mut snapshot.votes {
            vote.comment = vote.comment.as_deref().and_then(truncate_comment);
        }
        let mut seen = HashSet::new();
        for entry in &snapshot.entries {
            if !seen.insert(entry.entry_no) {
                return Err(SnapshotError::DuplicateEntry(entry.entry_no));
            }
        }
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "title": "第一回 句会",
        "status": "RESULTS_PUBLISHED",
        "rules": [{"label": "特選", "points": 2, "max_picks": 1}],
        "entries": [
            {"entry_no": 1, "body": "古池や", "author": "芭蕉"},
            {"entry_no": 2, "body": "閑さや"}
        ],
        "votes": [{"voter": "蕪村", "entry_no": 1, "category": "特選"}]
    }"#;

    #[test]
    fn parses_sample() {
        let snap = RoundSnapshot::from_json(SAMPLE).unwrap();
        assert_eq!(snap.title, "第一回 句会");
        assert_eq!(snap.entries.len(), 2);
        assert_eq!(snap.entries[1].author, None);
        assert_eq!(snap.votes[0].comment, None);
    }

    #[test]
    fn missing_collections_default_empty() {
        let snap = RoundSnapshot::from_json(r#"{"title": "空"}"#).unwrap();
        assert!(snap.rules.is_empty());
        assert!(snap.entries.is_empty());
        assert!(snap.votes.is_empty());
    }

    #[test]
    fn rejects_duplicate_entry_numbers() {
        let raw = r#"{"title": "t", "entries": [
            {"entry_no": 4, "body": "a"}, {"entry_no": 4, "body": "b"}
        ]}"#;
        assert!(matches!(
            RoundSnapshot::from_json(raw),
            Err(SnapshotError::DuplicateEntry(4))
        ));
    }

    #[test]
    fn vote_comments_are_truncated() {
        let long = "長".repeat(310);
        let raw = format!(
            r#"{{"title": "t", "votes": [
                {{"entry_no": 1, "category": "特選", "comment": "{long}"}},
                {{"entry_no": 1, "category": "入選", "comment": "  "}}
            ]}}"#
        );
        let snap = RoundSnapshot::from_json(&raw).unwrap();
        assert_eq!(snap.votes[0].comment.as_ref().unwrap().chars().count(), 300);
        assert_eq!(snap.votes[1].comment, None);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let snap = RoundSnapshot::load(file.path()).unwrap();
        assert_eq!(snap.rules.len(), 1);
    }

    #[test]
    fn load_missing_file() {
        let err = RoundSnapshot::load(Path::new("/nonexistent/round.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }
}
