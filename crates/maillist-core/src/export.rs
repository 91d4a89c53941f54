use tracing::info;

use maillist_csv::write_csv;
use maillist_model::{CampaignId, SegmentId};
use maillist_segment::SegmentFilter;
use maillist_store::Store;

use crate::error::{Result, ServiceError};
use crate::service::MailingList;

impl<S: Store> MailingList<S> {
    /// Field ids exported for a campaign: the targets of its most recent
    /// list's mapping, in that file's header order.
    pub fn export_columns(&self, campaign: &CampaignId) -> Result<Vec<String>> {
        let columns = self
            .store
            .lists_by_campaign(campaign)?
            .first()
            .map(|list| {
                list.export_columns()
                    .iter()
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(columns)
    }

    /// Renders every record of a campaign as CSV.
    pub fn export_campaign(&self, campaign: &CampaignId) -> Result<String> {
        if self.store.get_campaign(campaign)?.is_none() {
            return Err(ServiceError::not_found("campaign", campaign));
        }
        let columns = self.export_columns(campaign)?;
        let records = self.store.records_by_campaign(campaign)?;
        let csv = write_csv(&columns, records.iter().map(|r| &r.data))?;
        info!(
            campaign = %campaign,
            columns = columns.len(),
            rows = records.len(),
            "exported campaign"
        );
        Ok(csv)
    }

    /// Renders a segment's current members as CSV, with the campaign's columns.
    pub fn export_segment(&self, segment: &SegmentId) -> Result<String> {
        let segment = self
            .store
            .get_segment(segment)?
            .ok_or_else(|| ServiceError::not_found("segment", segment))?;
        let columns = self.export_columns(&segment.campaign_id)?;
        let records = self.store.records_by_campaign(&segment.campaign_id)?;
        let members = SegmentFilter::for_segment(&segment).apply(&records);
        let csv = write_csv(&columns, members.iter().map(|r| &r.data))?;
        info!(
            segment = %segment.id,
            columns = columns.len(),
            rows = members.len(),
            "exported segment"
        );
        Ok(csv)
    }
}
