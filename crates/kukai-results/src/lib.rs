//! Results engine: vote tally, dense ranking, and grouped comment formatting.

pub mod aggregate;
pub mod comments;
pub mod publish;

pub use aggregate::{UnmatchedCategory, aggregate, rank_rows, ranked, unmatched_categories};
pub use comments::{attributed_verse, format_comments};
pub use publish::{Placement, placements, publish};
