use tracing::{error, info, warn};

use maillist_model::{Campaign, CampaignId, UserId};
use maillist_store::Store;

use crate::error::{Result, ServiceError};
use crate::service::MailingList;

fn clean_name(kind: &'static str, name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ServiceError::EmptyName { kind });
    }
    Ok(name.to_string())
}

pub(crate) fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

impl<S: Store> MailingList<S> {
    pub fn create_campaign(
        &mut self,
        user: &UserId,
        name: &str,
        description: Option<String>,
    ) -> Result<Campaign> {
        let campaign = Campaign::new(
            user.clone(),
            clean_name("campaign", name)?,
            clean_description(description),
        );
        self.store.insert_campaign(campaign.clone())?;
        info!(campaign = %campaign.id, name = %campaign.name, "created campaign");
        Ok(campaign)
    }

    pub fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>> {
        Ok(self.store.get_campaign(id)?)
    }

    /// Fetches a campaign and checks that `user` owns it.
    pub fn owned_campaign(&self, id: &CampaignId, user: &UserId) -> Result<Campaign> {
        let campaign = self
            .store
            .get_campaign(id)?
            .ok_or_else(|| ServiceError::not_found("campaign", id))?;
        if &campaign.user_id != user {
            return Err(ServiceError::NotOwner {
                kind: "campaign",
                id: id.to_string(),
            });
        }
        Ok(campaign)
    }

    /// Campaigns owned by `user`, newest first.
    pub fn campaigns_for(&self, user: &UserId) -> Result<Vec<Campaign>> {
        Ok(self.store.campaigns_by_user(user)?)
    }

    /// Replaces name and description.
    pub fn update_campaign(
        &mut self,
        id: &CampaignId,
        name: &str,
        description: Option<String>,
    ) -> Result<Campaign> {
        let mut campaign = self
            .store
            .get_campaign(id)?
            .ok_or_else(|| ServiceError::not_found("campaign", id))?;
        campaign.name = clean_name("campaign", name)?;
        campaign.description = clean_description(description);
        self.store.update_campaign(campaign.clone())?;
        info!(campaign = %id, "updated campaign");
        Ok(campaign)
    }

    /// Deletes a campaign with its segments, records and lists, in that order.
    ///
    /// Returns false if any step fails or the campaign did not exist. Steps
    /// already completed are not undone.
    pub fn delete_campaign(&mut self, id: &CampaignId) -> bool {
        match self.cascade_delete_campaign(id) {
            Ok(true) => true,
            Ok(false) => {
                warn!(campaign = %id, "campaign not found for delete");
                false
            }
            Err(e) => {
                error!(campaign = %id, error = %e, "failed to delete campaign");
                false
            }
        }
    }

    fn cascade_delete_campaign(&mut self, id: &CampaignId) -> Result<bool> {
        let segments = self.store.segments_by_campaign(id)?;
        for segment in &segments {
            self.store.delete_segment(&segment.id)?;
        }

        let lists = self.store.lists_by_campaign(id)?;
        let mut records = 0usize;
        for list in &lists {
            records += self.store.delete_records_by_list(&list.id)?;
        }
        for list in &lists {
            self.store.delete_list(&list.id)?;
        }

        let deleted = self.store.delete_campaign(id)?;
        info!(
            campaign = %id,
            segments = segments.len(),
            lists = lists.len(),
            records,
            "deleted campaign"
        );
        Ok(deleted)
    }
}
