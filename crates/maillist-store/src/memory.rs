use serde::{Deserialize, Serialize};

use maillist_model::{
    Campaign, CampaignId, ListId, Record, Segment, SegmentId, SystemHeader, UploadedList, UserId,
};

use crate::error::{Result, StoreError};
use crate::traits::{CampaignStore, CatalogStore, ListStore, RecordStore, SegmentStore};

/// In-process store backed by vectors in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    campaigns: Vec<Campaign>,
    lists: Vec<UploadedList>,
    records: Vec<Record>,
    segments: Vec<Segment>,
    catalog: Vec<SystemHeader>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

/// Clones the items passing `keep`, newest first. Equal timestamps put the
/// later insertion first.
fn newest_first<T: Clone>(
    items: &[T],
    keep: impl Fn(&T) -> bool,
    created: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().filter(|i| keep(i)).cloned().collect();
    out.sort_by_key(|i| std::cmp::Reverse(created(i)));
    out
}

fn oldest_first(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by_key(|r| r.created_at);
    records
}

impl CampaignStore for MemoryStore {
    fn insert_campaign(&mut self, campaign: Campaign) -> Result<()> {
        if self.campaigns.iter().any(|c| c.id == campaign.id) {
            return Err(StoreError::Duplicate {
                kind: "campaign",
                id: campaign.id.to_string(),
            });
        }
        self.campaigns.push(campaign);
        Ok(())
    }

    fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>> {
        Ok(self.campaigns.iter().find(|c| &c.id == id).cloned())
    }

    fn campaigns_by_user(&self, user: &UserId) -> Result<Vec<Campaign>> {
        Ok(newest_first(
            &self.campaigns,
            |c| &c.user_id == user,
            |c| c.created_at,
        ))
    }

    fn update_campaign(&mut self, campaign: Campaign) -> Result<()> {
        let slot = self
            .campaigns
            .iter_mut()
            .find(|c| c.id == campaign.id)
            .ok_or_else(|| StoreError::not_found("campaign", &campaign.id))?;
        *slot = campaign;
        Ok(())
    }

    fn delete_campaign(&mut self, id: &CampaignId) -> Result<bool> {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| &c.id != id);
        Ok(self.campaigns.len() != before)
    }
}

impl ListStore for MemoryStore {
    fn insert_list(&mut self, list: UploadedList) -> Result<()> {
        if self.lists.iter().any(|l| l.id == list.id) {
            return Err(StoreError::Duplicate {
                kind: "list",
                id: list.id.to_string(),
            });
        }
        self.lists.push(list);
        Ok(())
    }

    fn get_list(&self, id: &ListId) -> Result<Option<UploadedList>> {
        Ok(self.lists.iter().find(|l| &l.id == id).cloned())
    }

    fn lists_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<UploadedList>> {
        Ok(newest_first(
            &self.lists,
            |l| &l.campaign_id == campaign,
            |l| l.created_at,
        ))
    }

    fn delete_list(&mut self, id: &ListId) -> Result<bool> {
        let before = self.lists.len();
        self.lists.retain(|l| &l.id != id);
        Ok(self.lists.len() != before)
    }
}

impl RecordStore for MemoryStore {
    fn insert_record(&mut self, record: Record) -> Result<()> {
        self.records.push(record);
        Ok(())
    }

    fn records_by_list(&self, list: &ListId) -> Result<Vec<Record>> {
        Ok(oldest_first(
            self.records
                .iter()
                .filter(|r| &r.list_id == list)
                .cloned()
                .collect(),
        ))
    }

    fn records_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Record>> {
        Ok(oldest_first(
            self.records
                .iter()
                .filter(|r| &r.campaign_id == campaign)
                .cloned()
                .collect(),
        ))
    }

    fn delete_records_by_list(&mut self, list: &ListId) -> Result<usize> {
        let before = self.records.len();
        self.records.retain(|r| &r.list_id != list);
        Ok(before - self.records.len())
    }
}

impl SegmentStore for MemoryStore {
    fn insert_segment(&mut self, segment: Segment) -> Result<()> {
        if self.segments.iter().any(|s| s.id == segment.id) {
            return Err(StoreError::Duplicate {
                kind: "segment",
                id: segment.id.to_string(),
            });
        }
        self.segments.push(segment);
        Ok(())
    }

    fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>> {
        Ok(self.segments.iter().find(|s| &s.id == id).cloned())
    }

    fn update_segment(&mut self, segment: Segment) -> Result<()> {
        let slot = self
            .segments
            .iter_mut()
            .find(|s| s.id == segment.id)
            .ok_or_else(|| StoreError::not_found("segment", &segment.id))?;
        slot.name = segment.name;
        slot.filter_conditions = segment.filter_conditions;
        Ok(())
    }

    fn delete_segment(&mut self, id: &SegmentId) -> Result<bool> {
        let before = self.segments.len();
        self.segments.retain(|s| &s.id != id);
        Ok(self.segments.len() != before)
    }

    fn segments_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Segment>> {
        Ok(newest_first(
            &self.segments,
            |s| &s.campaign_id == campaign,
            |s| s.created_at,
        ))
    }
}

impl CatalogStore for MemoryStore {
    fn catalog(&self) -> Result<Vec<SystemHeader>> {
        Ok(self.catalog.clone())
    }

    fn insert_catalog(&mut self, headers: Vec<SystemHeader>) -> Result<()> {
        for header in headers {
            if self.catalog.iter().any(|h| h.id == header.id) {
                return Err(StoreError::Duplicate {
                    kind: "field",
                    id: header.id.to_string(),
                });
            }
            self.catalog.push(header);
        }
        Ok(())
    }
}
