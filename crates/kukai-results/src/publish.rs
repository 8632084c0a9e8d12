//! Flattened, display-ready results.

use kukai_core::{RankGroup, RawSubmission, VoteRecord, VotingRule};
use serde::Serialize;

use crate::aggregate::{aggregate, ranked};
use crate::comments::{attributed_verse, format_comments};

/// One entry as it appears on the published results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub rank: usize,
    pub score: i64,
    pub entry_no: u32,
    /// Verse with the author's pen-name appended.
    pub verse: String,
    /// Formatted comment block; empty when nobody picked the entry.
    pub comments: String,
}

/// Aggregate a round and format every row for publication.
pub fn publish(
    entries: &[RawSubmission],
    votes: &[VoteRecord],
    rules: &[VotingRule],
) -> Vec<Placement> {
    placements(&aggregate(entries, votes, rules), rules)
}

pub fn placements(groups: &[RankGroup], rules: &[VotingRule]) -> Vec<Placement> {
    ranked(groups)
        .flat_map(move |(rank, group)| {
            group.rows.iter().map(move |row| Placement {
                rank,
                score: group.score,
                entry_no: row.entry_no,
                verse: attributed_verse(row),
                comments: format_comments(row, rules),
            })
        })
        .collect()
}
