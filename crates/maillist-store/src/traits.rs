//! Per-entity storage contracts.
//!
//! Each call is atomic on its own. Nothing spans calls: a bulk upload is a
//! sequence of `insert_record` calls and a cascade delete is a sequence of
//! deletes, either of which can stop partway.

use maillist_model::{
    Campaign, CampaignId, ListId, Record, Segment, SegmentId, SystemHeader, UploadedList, UserId,
};

use crate::Result;

pub trait CampaignStore {
    fn insert_campaign(&mut self, campaign: Campaign) -> Result<()>;

    fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>>;

    /// Campaigns owned by `user`, newest first.
    fn campaigns_by_user(&self, user: &UserId) -> Result<Vec<Campaign>>;

    /// Replaces the stored campaign with the same id.
    fn update_campaign(&mut self, campaign: Campaign) -> Result<()>;

    /// Returns false when nothing was stored under `id`.
    fn delete_campaign(&mut self, id: &CampaignId) -> Result<bool>;
}

pub trait ListStore {
    fn insert_list(&mut self, list: UploadedList) -> Result<()>;

    fn get_list(&self, id: &ListId) -> Result<Option<UploadedList>>;

    /// Lists uploaded to `campaign`, newest first.
    fn lists_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<UploadedList>>;

    fn delete_list(&mut self, id: &ListId) -> Result<bool>;
}

pub trait RecordStore {
    fn insert_record(&mut self, record: Record) -> Result<()>;

    /// Records of one list in ascending creation order.
    fn records_by_list(&self, list: &ListId) -> Result<Vec<Record>>;

    /// Records of every list in `campaign`, in ascending creation order.
    fn records_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Record>>;

    /// Returns the number of records removed.
    fn delete_records_by_list(&mut self, list: &ListId) -> Result<usize>;
}

pub trait SegmentStore {
    fn insert_segment(&mut self, segment: Segment) -> Result<()>;

    fn get_segment(&self, id: &SegmentId) -> Result<Option<Segment>>;

    /// Replaces name and conditions wholesale.
    fn update_segment(&mut self, segment: Segment) -> Result<()>;

    fn delete_segment(&mut self, id: &SegmentId) -> Result<bool>;

    /// Segments of `campaign`, newest first.
    fn segments_by_campaign(&self, campaign: &CampaignId) -> Result<Vec<Segment>>;
}

pub trait CatalogStore {
    /// Catalog entries in the order they were seeded.
    fn catalog(&self) -> Result<Vec<SystemHeader>>;

    fn insert_catalog(&mut self, headers: Vec<SystemHeader>) -> Result<()>;
}

/// Everything the service layer needs from storage.
pub trait Store: CampaignStore + ListStore + RecordStore + SegmentStore + CatalogStore {}

impl<T> Store for T where T: CampaignStore + ListStore + RecordStore + SegmentStore + CatalogStore {}
