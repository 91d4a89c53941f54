use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CampaignId, UserId};

/// Top-level grouping owned by a user; contains lists, records and segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub user_id: UserId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(user_id: UserId, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: CampaignId::generate(),
            user_id,
            name: name.into(),
            description,
            created_at: Utc::now(),
        }
    }
}
