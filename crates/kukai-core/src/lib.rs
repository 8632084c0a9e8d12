//! Core types for a haiku round: submissions, votes, voting rules and results.

mod error;
pub mod model;
pub mod rules;
pub mod snapshot;
pub mod sort_key;
pub mod text;

pub use error::{RuleError, SnapshotError};
pub use model::{
    Comment, RankGroup, RawSubmission, ResultRow, UNKNOWN_CATEGORY, UNSET_PEN_NAME, VoteRecord,
    VotingRule,
};
pub use rules::RuleSet;
pub use snapshot::RoundSnapshot;
pub use sort_key::compare_labels;
pub use text::{entry_snippet, truncate_comment};
