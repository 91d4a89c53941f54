use std::collections::BTreeSet;

use tracing::{error, info, warn};

use maillist_model::{CampaignId, ListId, Record, UploadedList};
use maillist_store::Store;

use crate::error::Result;
use crate::service::MailingList;

impl<S: Store> MailingList<S> {
    pub fn get_list(&self, id: &ListId) -> Result<Option<UploadedList>> {
        Ok(self.store.get_list(id)?)
    }

    /// Lists uploaded to a campaign, newest first.
    pub fn lists_for(&self, campaign: &CampaignId) -> Result<Vec<UploadedList>> {
        Ok(self.store.lists_by_campaign(campaign)?)
    }

    pub fn records_for_list(&self, list: &ListId) -> Result<Vec<Record>> {
        Ok(self.store.records_by_list(list)?)
    }

    pub fn records_for_campaign(&self, campaign: &CampaignId) -> Result<Vec<Record>> {
        Ok(self.store.records_by_campaign(campaign)?)
    }

    /// Deletes a list's records, then the list.
    ///
    /// Returns false on any failure or if the list did not exist.
    pub fn delete_list(&mut self, id: &ListId) -> bool {
        let outcome = self
            .store
            .delete_records_by_list(id)
            .and_then(|records| Ok((records, self.store.delete_list(id)?)));
        match outcome {
            Ok((records, true)) => {
                info!(list = %id, records, "deleted list");
                true
            }
            Ok((_, false)) => {
                warn!(list = %id, "list not found for delete");
                false
            }
            Err(e) => {
                error!(list = %id, error = %e, "failed to delete list");
                false
            }
        }
    }

    /// Distinct record data keys across a campaign, sorted.
    ///
    /// These are the field names a segment condition can usefully target.
    pub fn campaign_fields(&self, campaign: &CampaignId) -> Result<Vec<String>> {
        let fields: BTreeSet<String> = self
            .store
            .records_by_campaign(campaign)?
            .into_iter()
            .flat_map(|record| record.data.into_keys())
            .collect();
        Ok(fields.into_iter().collect())
    }
}
