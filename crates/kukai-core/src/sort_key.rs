//! Japanese collation for category labels.
//!
//! Category labels are ordered the way a Japanese reader expects when their
//! point values tie. Comparison uses the CLDR `ja` collation tailoring from
//! ICU's compiled data: kana follow gojūon order with katakana interleaved,
//! full-width and half-width Latin compare equal at primary strength, and
//! kanji follow the JIS X 0208 reading order (佳作 < 秀逸 < 人 < 地 < 天 <
//! 特選 < 入選).
//!
//! Labels the collator considers equal fall back to raw string order, so
//! [`compare_labels`] is a total order.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use tracing::warn;

thread_local! {
    static JA_COLLATOR: Option<Collator> = new_collator();
}

fn new_collator() -> Option<Collator> {
    match Collator::try_new(&locale!("ja").into(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            warn!(error = %err, "ja collator unavailable, labels sort by code point");
            None
        }
    }
}

/// Order two labels by Japanese collation, then by raw text.
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    JA_COLLATOR
        .with(|collator| match collator {
            Some(c) => c.compare(a, b),
            None => Ordering::Equal,
        })
        .then_with(|| a.cmp(b))
}
