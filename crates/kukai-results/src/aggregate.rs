//! Score tally and dense ranking.
//!
//! # Scoring
//!
//! An entry's score is the sum of the rule points for the category of every
//! vote that targets it. Picks are never de-duplicated: a voter choosing the
//! same entry twice in one category scores it twice.
//!
//! A category missing from the rule set (rules edited after voting) scores
//! zero. The vote is still kept as a comment, and the mismatch is logged at
//! `warn` and reported by [`unmatched_categories`].
//!
//! # Ranking
//!
//! Rows sort by score descending, then entry number ascending. Equal scores
//! share one [`RankGroup`]; the Nth group holds rank N, so ties never leave
//! gaps.

use std::collections::HashMap;

use kukai_core::{Comment, RankGroup, RawSubmission, ResultRow, VoteRecord, VotingRule};
use serde::Serialize;
use tracing::{debug, warn};

/// A vote category that the active rule set does not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedCategory {
    pub label: String,
    /// Number of votes cast in this category.
    pub votes: usize,
}

/// Score every entry and group the results by rank.
pub fn aggregate(
    entries: &[RawSubmission],
    votes: &[VoteRecord],
    rules: &[VotingRule],
) -> Vec<RankGroup> {
    let points = points_by_label(rules);

    let mut rows: Vec<ResultRow> = entries
        .iter()
        .map(|e| ResultRow {
            entry_no: e.entry_no,
            body: e.body.clone(),
            score: 0,
            author: e.author.clone(),
            comments: Vec::new(),
        })
        .collect();
    let index: HashMap<u32, usize> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| (r.entry_no, i))
        .collect();

    for vote in votes {
        let Some(&i) = index.get(&vote.entry_no) else {
            debug!(entry_no = vote.entry_no, "vote for unknown entry ignored");
            continue;
        };
        let row = &mut rows[i];
        let pts = points.get(vote.category.as_str()).copied().unwrap_or(0);
        row.score = row.score.saturating_add(pts);
        row.comments.push(Comment::from(vote));
    }

    for missing in unmatched_categories(votes, rules) {
        warn!(
            label = %missing.label,
            votes = missing.votes,
            "vote category not in rule set, scored as zero"
        );
    }

    let groups = rank_rows(rows);
    debug!(groups = groups.len(), "aggregated results");
    groups
}

/// Sort already-scored rows and fold them into rank groups.
pub fn rank_rows(mut rows: Vec<ResultRow>) -> Vec<RankGroup> {
    rows.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.entry_no.cmp(&b.entry_no))
    });

    let mut groups: Vec<RankGroup> = Vec::new();
    for row in rows {
        match groups.last_mut() {
            Some(group) if group.score == row.score => group.rows.push(row),
            _ => groups.push(RankGroup {
                score: row.score,
                rows: vec![row],
            }),
        }
    }
    groups
}

/// Pair each group with its dense rank, starting at 1.
pub fn ranked(groups: &[RankGroup]) -> impl Iterator<Item = (usize, &RankGroup)> {
    groups.iter().enumerate().map(|(i, g)| (i + 1, g))
}

/// Categories used by `votes` but absent from `rules`, in first-seen order.
pub fn unmatched_categories(votes: &[VoteRecord], rules: &[VotingRule]) -> Vec<UnmatchedCategory> {
    let points = points_by_label(rules);
    let mut out: Vec<UnmatchedCategory> = Vec::new();
    for vote in votes {
        if points.contains_key(vote.category.as_str()) {
            continue;
        }
        match out.iter_mut().find(|u| u.label == vote.category) {
            Some(u) => u.votes += 1,
            None => out.push(UnmatchedCategory {
                label: vote.category.clone(),
                votes: 1,
            }),
        }
    }
    out
}

pub(crate) fn points_by_label(rules: &[VotingRule]) -> HashMap<&str, i64> {
    rules.iter().map(|r| (r.label.as_str(), r.points)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(no: u32) -> RawSubmission {
        RawSubmission {
            entry_no: no,
            body: format!("句{no}"),
            author: Some(format!("作者{no}")),
        }
    }

    fn vote(voter: &str, category: &str, no: u32) -> VoteRecord {
        VoteRecord {
            voter: Some(voter.into()),
            entry_no: no,
            category: category.into(),
            comment: None,
        }
    }

    fn standard_rules() -> Vec<VotingRule> {
        vec![VotingRule::new("特選", 2, 1), VotingRule::new("入選", 1, 2)]
    }

    fn shape(groups: &[RankGroup]) -> Vec<(i64, Vec<u32>)> {
        groups
            .iter()
            .map(|g| (g.score, g.rows.iter().map(|r| r.entry_no).collect()))
            .collect()
    }

    #[test]
    fn worked_example() {
        let entries = [entry(1), entry(2), entry(3)];
        let votes = [vote("A", "特選", 2), vote("B", "入選", 2), vote("C", "入選", 1)];
        let groups = aggregate(&entries, &votes, &standard_rules());
        assert_eq!(shape(&groups), vec![(3, vec![2]), (1, vec![1]), (0, vec![3])]);
        let ranks: Vec<usize> = ranked(&groups).map(|(r, _)| r).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn ties_share_group_without_rank_gap() {
        let entries = [entry(1), entry(2), entry(3), entry(4)];
        let votes = [
            vote("A", "特選", 3),
            vote("B", "特選", 1),
            vote("C", "入選", 4),
        ];
        let groups = aggregate(&entries, &votes, &standard_rules());
        assert_eq!(shape(&groups), vec![(2, vec![1, 3]), (1, vec![4]), (0, vec![2])]);
        let ranks: Vec<(usize, i64)> = ranked(&groups).map(|(r, g)| (r, g.score)).collect();
        assert_eq!(ranks, [(1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn repeated_picks_add_independently() {
        let entries = [entry(1)];
        let votes = [vote("A", "入選", 1), vote("A", "入選", 1)];
        let groups = aggregate(&entries, &votes, &standard_rules());
        assert_eq!(groups[0].score, 2);
        assert_eq!(groups[0].rows[0].comments.len(), 2);
    }

    #[test]
    fn negative_points_rank_below_zero() {
        let rules = vec![VotingRule::new("逆選", -1, 1), VotingRule::new("特選", 2, 1)];
        let entries = [entry(1), entry(2), entry(3)];
        let votes = [vote("A", "逆選", 1), vote("B", "特選", 3)];
        let groups = aggregate(&entries, &votes, &rules);
        assert_eq!(shape(&groups), vec![(2, vec![3]), (0, vec![2]), (-1, vec![1])]);
    }

    #[test]
    fn unknown_category_scores_zero_and_is_reported() {
        let entries = [entry(1), entry(2)];
        let votes = [
            vote("A", "秀逸", 1),
            vote("B", "入選", 2),
            vote("C", "秀逸", 2),
        ];
        let groups = aggregate(&entries, &votes, &standard_rules());
        assert_eq!(shape(&groups), vec![(1, vec![2]), (0, vec![1])]);
        // The zero-scored vote still shows up as a comment.
        assert_eq!(groups[1].rows[0].comments.len(), 1);
        assert_eq!(
            unmatched_categories(&votes, &standard_rules()),
            vec![UnmatchedCategory {
                label: "秀逸".into(),
                votes: 2
            }]
        );
    }

    #[test]
    fn votes_for_missing_entries_ignored() {
        let groups = aggregate(&[entry(1)], &[vote("A", "特選", 9)], &standard_rules());
        assert_eq!(shape(&groups), vec![(0, vec![1])]);
    }

    #[test]
    fn rows_within_group_sorted_by_entry_no() {
        let entries = [entry(5), entry(2), entry(9)];
        let groups = aggregate(&entries, &[], &standard_rules());
        assert_eq!(shape(&groups), vec![(0, vec![2, 5, 9])]);
    }

    #[test]
    fn comments_keep_vote_order() {
        let entries = [entry(1)];
        let votes = [vote("B", "入選", 1), vote("A", "特選", 1)];
        let groups = aggregate(&entries, &votes, &standard_rules());
        let voters: Vec<&str> = groups[0].rows[0]
            .comments
            .iter()
            .filter_map(|c| c.voter.as_deref())
            .collect();
        assert_eq!(voters, ["B", "A"]);
    }

    #[test]
    fn empty_inputs() {
        assert!(aggregate(&[], &[], &[]).is_empty());
        assert!(rank_rows(Vec::new()).is_empty());
    }

    #[test]
    fn empty_rule_set_scores_everything_zero() {
        let groups = aggregate(&[entry(1), entry(2)], &[vote("A", "特選", 1)], &[]);
        assert_eq!(shape(&groups), vec![(0, vec![1, 2])]);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let entries = [entry(3), entry(1), entry(2)];
        let votes = [vote("A", "特選", 1), vote("B", "入選", 3), vote("C", "入選", 2)];
        let first = aggregate(&entries, &votes, &standard_rules());
        let second = aggregate(&entries, &votes, &standard_rules());
        assert_eq!(first, second);
    }

    #[test]
    fn rank_rows_groups_prescored_rows() {
        let row = |no, score| ResultRow {
            entry_no: no,
            body: String::new(),
            score,
            author: None,
            comments: vec![],
        };
        let groups = rank_rows(vec![row(4, 1), row(2, 5), row(1, 1), row(3, 5)]);
        assert_eq!(shape(&groups), vec![(5, vec![2, 3]), (1, vec![1, 4])]);
    }
}
