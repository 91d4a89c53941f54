use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CampaignId, ColumnMapping, FieldId, ListId, UserId};

/// One uploaded file, with the mapping that was frozen at commit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedList {
    pub id: ListId,
    pub campaign_id: CampaignId,
    pub user_id: UserId,
    pub filename: String,
    /// Headers in the order they appeared in the file.
    pub original_headers: Vec<String>,
    pub mapped_headers: ColumnMapping,
    /// SHA-256 of the uploaded bytes, lowercase hex.
    pub source_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UploadedList {
    /// Field ids this list exports, in import header order.
    pub fn export_columns(&self) -> Vec<FieldId> {
        self.mapped_headers.targets_in_order(&self.original_headers)
    }
}
