//! Per-entry comment blocks for the results page.
//!
//! Comments are bucketed by category and printed as
//!
//! ```text
//! 【特選】
//! 季語が効いている　　　――青嵐
//!
//! 【入選】
//! 　　　――蕪村
//! ```
//!
//! The block is plain text carrying full-width punctuation, meant to go
//! through the verse renderer for vertical display.

use std::cmp::Ordering;

use kukai_core::{ResultRow, UNKNOWN_CATEGORY, UNSET_PEN_NAME, VotingRule, compare_labels};

use crate::aggregate::points_by_label;

/// Between a comment and its attribution.
pub const COMMENT_SEPARATOR: &str = "　　　";
/// Precedes the voter's pen-name.
pub const ATTRIBUTION_DASH: &str = "――";
/// Between a verse and its author on the results page.
pub const AUTHOR_SEPARATOR: &str = "　　　";

/// Render an entry's comments grouped by category.
///
/// Buckets are ordered by rule points (highest first), then by label.
/// Labels missing from `rules` count as 0 points. Comment order inside a
/// bucket is the order the votes arrived in.
pub fn format_comments(row: &ResultRow, rules: &[VotingRule]) -> String {
    let mut buckets: Vec<(&str, Vec<String>)> = Vec::new();
    for c in &row.comments {
        let label = c.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
        let line = format!(
            "{}{COMMENT_SEPARATOR}{ATTRIBUTION_DASH}{}",
            c.comment.as_deref().unwrap_or(""),
            c.voter.as_deref().unwrap_or(UNSET_PEN_NAME),
        );
        match buckets.iter_mut().find(|(l, _)| *l == label) {
            Some((_, lines)) => lines.push(line),
            None => buckets.push((label, vec![line])),
        }
    }

    let points = points_by_label(rules);
    buckets.sort_by(|(a, _), (b, _)| {
        let pa = points.get(a).copied().unwrap_or(0);
        let pb = points.get(b).copied().unwrap_or(0);
        match pb.cmp(&pa) {
            Ordering::Equal => compare_labels(a, b),
            other => other,
        }
    });

    buckets
        .into_iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(label, lines)| {
            let mut block = format!("【{label}】");
            for line in lines {
                block.push('\n');
                block.push_str(&line);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The verse text shown on the results page: body, a wide gap, then the
/// author's pen-name.
pub fn attributed_verse(row: &ResultRow) -> String {
    format!(
        "{}{AUTHOR_SEPARATOR}{}",
        row.body,
        row.author_or_placeholder()
    )
}
