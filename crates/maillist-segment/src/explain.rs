//! Per-condition breakdown of a segment evaluation.

use serde::Serialize;

use maillist_model::{FilterCondition, Record};

use crate::filter::condition_matches;

/// How one condition fares against a record set, independent of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionStats {
    pub condition: FilterCondition,
    /// Records satisfying this condition alone.
    pub satisfied: usize,
    /// Records lacking the condition's field. Always a subset of the failures.
    pub missing_field: usize,
}

impl ConditionStats {
    pub fn failed(&self, total: usize) -> usize {
        total.saturating_sub(self.satisfied)
    }
}

/// Scores each condition separately against `records`.
///
/// Useful when a segment comes back empty: a condition with a high
/// `missing_field` count usually targets a key most lists never imported.
pub fn explain(conditions: &[FilterCondition], records: &[Record]) -> Vec<ConditionStats> {
    conditions
        .iter()
        .map(|condition| {
            let mut stats = ConditionStats {
                condition: condition.clone(),
                satisfied: 0,
                missing_field: 0,
            };
            for record in records {
                if !record.data.contains_key(&condition.field) {
                    stats.missing_field += 1;
                } else if condition_matches(&record.data, condition) {
                    stats.satisfied += 1;
                }
            }
            stats
        })
        .collect()
}
