use tracing::debug;

use maillist_model::{FilterCondition, Operator, Record, RecordData, Segment};

/// Tests one condition against one record's data.
///
/// A record without `condition.field` fails under every operator, including
/// the negated ones.
pub fn condition_matches(data: &RecordData, condition: &FilterCondition) -> bool {
    let Some(value) = data.get(&condition.field) else {
        return false;
    };
    match condition.operator {
        Operator::Equals => *value == condition.value,
        Operator::NotEquals => *value != condition.value,
        Operator::Contains => lower(value).contains(&lower(&condition.value)),
        Operator::NotContains => !lower(value).contains(&lower(&condition.value)),
        Operator::StartsWith => lower(value).starts_with(&lower(&condition.value)),
        Operator::EndsWith => lower(value).ends_with(&lower(&condition.value)),
    }
}

fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// Conjunction of filter conditions.
///
/// An empty condition list matches every record.
#[derive(Debug, Clone, Copy)]
pub struct SegmentFilter<'a> {
    conditions: &'a [FilterCondition],
}

impl<'a> SegmentFilter<'a> {
    pub fn new(conditions: &'a [FilterCondition]) -> Self {
        Self { conditions }
    }

    pub fn for_segment(segment: &'a Segment) -> Self {
        Self::new(&segment.filter_conditions)
    }

    pub fn conditions(&self) -> &'a [FilterCondition] {
        self.conditions
    }

    pub fn matches(&self, data: &RecordData) -> bool {
        self.conditions
            .iter()
            .all(|condition| condition_matches(data, condition))
    }

    /// Borrows the matching records, keeping input order.
    pub fn apply<'r>(&self, records: &'r [Record]) -> Vec<&'r Record> {
        records.iter().filter(|r| self.matches(&r.data)).collect()
    }

    /// Consumes `records` and keeps the matching ones in input order.
    pub fn evaluate(&self, records: Vec<Record>) -> Vec<Record> {
        let total = records.len();
        let matched: Vec<Record> = records
            .into_iter()
            .filter(|r| self.matches(&r.data))
            .collect();
        debug!(
            conditions = self.conditions.len(),
            total,
            matched = matched.len(),
            "evaluated segment filter"
        );
        matched
    }
}
