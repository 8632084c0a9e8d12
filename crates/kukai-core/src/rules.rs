//! Rule-set validation as performed when the organiser saves the rules editor.
//!
//! The aggregator never calls into this module: it assumes the rule set it
//! receives has already passed through [`RuleSet::from_json`] or
//! [`RuleSet::validate`] upstream.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::RuleError;
use crate::model::VotingRule;

/// Upper bound on the number of categories in one round.
pub const MAX_RULES: usize = 10;

/// A validated, ordered list of voting rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<VotingRule>,
}

impl Default for RuleSet {
    /// 特選 (2 points, 1 pick) and 入選 (1 point, 2 picks).
    fn default() -> Self {
        Self {
            rules: vec![VotingRule::new("特選", 2, 1), VotingRule::new("入選", 1, 2)],
        }
    }
}

impl RuleSet {
    /// Parse and validate the editor's JSON payload.
    ///
    /// Rows are normalised before checks: labels are trimmed and rows whose
    /// label is empty are dropped. The 1..=10 size check applies to the raw
    /// rows. Label uniqueness is checked across every remaining row before
    /// any numeric field is read.
    ///
    /// Numeric fields coerce the way a browser form does: missing points
    /// default to 0, missing `max_picks` to 1, booleans count as 0 or 1, and
    /// blank strings as 0.
    pub fn from_json(raw: &str) -> Result<Self, RuleError> {
        let value: Value = serde_json::from_str(raw)?;
        let Value::Array(rows) = value else {
            return Err(RuleError::NotAnArray);
        };
        check_size(rows.len())?;

        let labelled: Vec<(String, &Value)> = rows
            .iter()
            .map(|row| (label_field(row.get("label")), row))
            .filter(|(label, _)| !label.is_empty())
            .collect();
        if labelled.is_empty() {
            return Err(RuleError::Empty);
        }
        check_unique(labelled.iter().map(|(label, _)| label.as_str()))?;

        let mut rules = Vec::with_capacity(labelled.len());
        for (label, row) in labelled {
            let points = integer_field(row.get("points"), 0)
                .ok_or_else(|| RuleError::NonIntegerPoints(label.clone()))?;
            let max_picks = integer_field(row.get("max_picks"), 1)
                .and_then(|n| u32::try_from(n).ok())
                .filter(|&n| n >= 1)
                .ok_or_else(|| RuleError::InvalidMaxPicks(label.clone()))?;
            rules.push(VotingRule {
                label,
                points,
                max_picks,
            });
        }
        Self::checked(rules)
    }

    /// Validate rules that are already typed.
    pub fn validate(rules: Vec<VotingRule>) -> Result<Self, RuleError> {
        check_size(rules.len())?;
        let mut normalised = Vec::with_capacity(rules.len());
        for rule in rules {
            let label = rule.label.trim().to_string();
            if label.is_empty() {
                continue;
            }
            if rule.max_picks < 1 {
                return Err(RuleError::InvalidMaxPicks(label));
            }
            normalised.push(VotingRule { label, ..rule });
        }
        Self::checked(normalised)
    }

    fn checked(rules: Vec<VotingRule>) -> Result<Self, RuleError> {
        if rules.is_empty() {
            return Err(RuleError::Empty);
        }
        check_unique(rules.iter().map(|r| r.label.as_str()))?;
        debug!(count = rules.len(), "rule set validated");
        Ok(Self { rules })
    }

    pub fn as_slice(&self) -> &[VotingRule] {
        &self.rules
    }

    pub fn into_inner(self) -> Vec<VotingRule> {
        self.rules
    }

    /// Total number of picks a voter may make across all categories.
    pub fn total_picks(&self) -> u32 {
        self.rules.iter().map(|r| r.max_picks).sum()
    }
}

fn check_size(len: usize) -> Result<(), RuleError> {
    match len {
        0 => Err(RuleError::Empty),
        n if n > MAX_RULES => Err(RuleError::TooMany(n)),
        _ => Ok(()),
    }
}

fn check_unique<'a>(labels: impl IntoIterator<Item = &'a str>) -> Result<(), RuleError> {
    let mut seen = HashSet::new();
    for label in labels {
        if !seen.insert(label) {
            return Err(RuleError::DuplicateLabel(label.to_string()));
        }
    }
    Ok(())
}

fn label_field(v: Option<&Value>) -> String {
    match v {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Read an integer-valued field. Whole floats (`2.0`), numeric strings,
/// booleans and blank strings count as integers; anything else is `None`.
fn integer_field(v: Option<&Value>, default: i64) -> Option<i64> {
    let n = match v {
        None | Some(Value::Null) => return Some(default),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => return Some(i),
            None => n.as_f64()?,
        },
        Some(Value::Bool(b)) => return Some(i64::from(*b)),
        Some(Value::String(s)) => match s.trim() {
            "" => return Some(0),
            t => t.parse::<f64>().ok()?,
        },
        Some(_) => return None,
    };
    (n.is_finite() && n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
}
