use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CampaignId, ListId, RecordId, UserId};

/// Flat contact data. Keys are whatever the ingesting mapping produced.
pub type RecordData = BTreeMap<String, String>;

/// One contact row. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub list_id: ListId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub data: RecordData,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn new(list_id: ListId, campaign_id: CampaignId, user_id: UserId, data: RecordData) -> Self {
        Self {
            id: RecordId::generate(),
            list_id,
            campaign_id,
            user_id,
            data,
            created_at: Utc::now(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }
}
