use tracing::{debug, error, info, warn};

use maillist_model::{CampaignId, FilterCondition, Record, Segment, SegmentId, UserId};
use maillist_segment::{ConditionStats, SegmentFilter, explain};
use maillist_store::Store;

use crate::error::{Result, ServiceError};
use crate::service::MailingList;

fn segment_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::EmptyName { kind: "segment" });
    }
    Ok(name.to_string())
}

impl<S: Store> MailingList<S> {
    pub fn create_segment(
        &mut self,
        campaign: &CampaignId,
        user: &UserId,
        name: &str,
        conditions: Vec<FilterCondition>,
    ) -> Result<Segment> {
        self.owned_campaign(campaign, user)?;
        let segment = Segment::new(campaign.clone(), user.clone(), segment_name(name)?, conditions);
        self.store.insert_segment(segment.clone())?;
        info!(
            segment = %segment.id,
            campaign = %campaign,
            conditions = segment.filter_conditions.len(),
            "created segment"
        );
        Ok(segment)
    }

    pub fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>> {
        Ok(self.store.get_segment(id)?)
    }

    /// Segments of a campaign, newest first.
    pub fn segments_for(&self, campaign: &CampaignId) -> Result<Vec<Segment>> {
        Ok(self.store.segments_by_campaign(campaign)?)
    }

    /// Replaces a segment's name and conditions.
    pub fn update_segment(
        &mut self,
        id: &SegmentId,
        name: &str,
        conditions: Vec<FilterCondition>,
    ) -> Result<Segment> {
        let mut segment = self
            .store
            .get_segment(id)?
            .ok_or_else(|| ServiceError::not_found("segment", id))?;
        segment.name = segment_name(name)?;
        segment.filter_conditions = conditions;
        self.store.update_segment(segment.clone())?;
        info!(segment = %id, "updated segment");
        Ok(segment)
    }

    /// Returns false if the delete failed or nothing was stored under `id`.
    pub fn delete_segment(&mut self, id: &SegmentId) -> bool {
        match self.store.delete_segment(id) {
            Ok(true) => {
                info!(segment = %id, "deleted segment");
                true
            }
            Ok(false) => {
                warn!(segment = %id, "segment not found for delete");
                false
            }
            Err(e) => {
                error!(segment = %id, error = %e, "failed to delete segment");
                false
            }
        }
    }

    /// Records of the segment's campaign matching every condition, in
    /// ascending creation order.
    ///
    /// Returns `None` when the segment does not exist, so callers can tell
    /// "no such segment" apart from "nothing matches".
    pub fn evaluate_segment(&self, id: &SegmentId) -> Result<Option<Vec<Record>>> {
        let Some(segment) = self.store.get_segment(id)? else {
            debug!(segment = %id, "segment not found");
            return Ok(None);
        };
        let records = self.store.records_by_campaign(&segment.campaign_id)?;
        Ok(Some(SegmentFilter::for_segment(&segment).evaluate(records)))
    }

    /// Like [`evaluate_segment`](Self::evaluate_segment), but a missing
    /// segment matches nothing.
    pub fn records_by_segment(&self, id: &SegmentId) -> Result<Vec<Record>> {
        Ok(self.evaluate_segment(id)?.unwrap_or_default())
    }

    /// Per-condition match counts over the segment's campaign.
    pub fn explain_segment(&self, id: &SegmentId) -> Result<Option<Vec<ConditionStats>>> {
        let Some(segment) = self.store.get_segment(id)? else {
            return Ok(None);
        };
        let records = self.store.records_by_campaign(&segment.campaign_id)?;
        Ok(Some(explain(&segment.filter_conditions, &records)))
    }
}
