use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CampaignId, ModelError, SegmentId, UserId};

/// Comparison applied by a [`FilterCondition`].
///
/// `Equals` and `NotEquals` compare exactly. The other four lowercase both
/// sides first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Self::Equals,
        Self::NotEquals,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::EndsWith,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Contains => "contains",
            Self::NotContains => "notContains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "Not Equals",
            Self::Contains => "Contains",
            Self::NotContains => "Not Contains",
            Self::StartsWith => "Starts With",
            Self::EndsWith => "Ends With",
        }
    }

    pub const fn is_case_sensitive(self) -> bool {
        matches!(self, Self::Equals | Self::NotEquals)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    /// Accepts the camelCase wire name as well as snake/kebab spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(&compact))
            .ok_or_else(|| ModelError::UnknownOperator(s.to_string()))
    }
}

/// A single predicate over one record field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCondition {
    /// Record data key, compared by exact string equality.
    pub field: String,
    pub operator: Operator,
    pub value: String,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

impl fmt::Display for FilterCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.operator, self.value)
    }
}

impl FromStr for FilterCondition {
    type Err = ModelError;

    /// Parses `field:operator:value`. The value may itself contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(ModelError::InvalidCondition {
                input: s.to_string(),
            });
        };
        if field.is_empty() {
            return Err(ModelError::InvalidCondition {
                input: s.to_string(),
            });
        }
        Ok(Self::new(field, operator.parse()?, value))
    }
}

/// A named, saved filter over a campaign's records.
///
/// Membership is the conjunction of `filter_conditions`; an empty list
/// matches every record. Matching records are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub name: String,
    pub filter_conditions: Vec<FilterCondition>,
    pub created_at: DateTime<Utc>,
}

impl Segment {
    pub fn new(
        campaign_id: CampaignId,
        user_id: UserId,
        name: impl Into<String>,
        filter_conditions: Vec<FilterCondition>,
    ) -> Self {
        Self {
            id: SegmentId::generate(),
            campaign_id,
            user_id,
            name: name.into(),
            filter_conditions,
            created_at: Utc::now(),
        }
    }
}
