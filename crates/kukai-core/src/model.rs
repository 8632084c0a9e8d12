//! Round records owned by the external data store, and the result rows
//! derived from them.

use serde::{Deserialize, Serialize};

/// Shown in place of a missing pen-name (author or voter).
pub const UNSET_PEN_NAME: &str = "（俳号未設定）";

/// Bucket label for a comment whose category is missing.
pub const UNKNOWN_CATEGORY: &str = "カテゴリ不明";

/// A submitted verse.
///
/// `entry_no` is assigned when submission closes and never changes afterwards.
/// `author` is withheld (`None`) until results are published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSubmission {
    pub entry_no: u32,
    /// Raw text including preface and ruby markup.
    pub body: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// One pick by one voter in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    #[serde(default)]
    pub voter: Option<String>,
    pub entry_no: u32,
    pub category: String,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A selection category and its weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingRule {
    pub label: String,
    pub points: i64,
    pub max_picks: u32,
}

impl VotingRule {
    pub fn new(label: impl Into<String>, points: i64, max_picks: u32) -> Self {
        Self {
            label: label.into(),
            points,
            max_picks,
        }
    }
}

/// A voter's remark attached to a result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub voter: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<&VoteRecord> for Comment {
    fn from(vote: &VoteRecord) -> Self {
        Self {
            voter: vote.voter.clone(),
            comment: vote.comment.clone(),
            category: Some(vote.category.clone()),
        }
    }
}

/// An entry with its aggregate score and every comment it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub entry_no: u32,
    pub body: String,
    pub score: i64,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl ResultRow {
    /// Author pen-name, or the placeholder when it is not set.
    pub fn author_or_placeholder(&self) -> &str {
        self.author.as_deref().unwrap_or(UNSET_PEN_NAME)
    }
}

/// Entries sharing one score. A group's dense rank is its 1-based position
/// in the ranked list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankGroup {
    pub score: i64,
    pub rows: Vec<ResultRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_json_defaults_optional_fields() {
        let vote: VoteRecord =
            serde_json::from_str(r#"{"entry_no": 3, "category": "特選"}"#).unwrap();
        assert_eq!(vote.entry_no, 3);
        assert_eq!(vote.voter, None);
        assert_eq!(vote.comment, None);
    }

    #[test]
    fn comment_from_vote_keeps_category() {
        let vote = VoteRecord {
            voter: Some("青嵐".into()),
            entry_no: 1,
            category: "入選".into(),
            comment: Some("季語が効いている".into()),
        };
        let c = Comment::from(&vote);
        assert_eq!(c.category.as_deref(), Some("入選"));
        assert_eq!(c.voter.as_deref(), Some("青嵐"));
    }

    #[test]
    fn missing_author_uses_placeholder() {
        let row = ResultRow {
            entry_no: 1,
            body: "古池や".into(),
            score: 0,
            author: None,
            comments: vec![],
        };
        assert_eq!(row.author_or_placeholder(), UNSET_PEN_NAME);
    }
}
