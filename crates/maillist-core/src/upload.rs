//! Two-step upload: propose a mapping, then commit rows under it.

use std::time::Instant;

use chrono::Utc;
use tracing::{error, info, info_span};

use maillist_csv::{SourceFile, SourceTable};
use maillist_map::{MappingState, validate_mapping};
use maillist_model::{
    CampaignId, ColumnMapping, ListId, Record, RecordData, UploadedList, UserId,
};
use maillist_store::Store;

use crate::error::{Result, ServiceError};
use crate::service::MailingList;

/// Result of committing an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutcome {
    pub list: UploadedList,
    /// Rows written.
    pub inserted: usize,
    /// Rows whose insert failed. They are logged and skipped.
    pub failed: usize,
}

impl UploadOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

/// Builds a record's data from one source row.
///
/// Keys are the mapped field ids. Columns without a mapping and cells the row
/// lacks are skipped. When several columns share a field, the one furthest
/// right in `headers` wins.
pub fn project_row(headers: &[String], row: &RecordData, mapping: &ColumnMapping) -> RecordData {
    let mut data = RecordData::new();
    for header in headers {
        if let (Some(field), Some(value)) = (mapping.get(header), row.get(header)) {
            data.insert(field.to_string(), value.clone());
        }
    }
    data
}

impl<S: Store> MailingList<S> {
    /// Opens the mapping review for an upload.
    ///
    /// With no initial mapping (or an empty one) the catalog auto-mapping
    /// proposes one.
    pub fn prepare_upload(
        &self,
        table: &SourceTable,
        initial: Option<ColumnMapping>,
    ) -> Result<MappingState> {
        let catalog = self.system_headers()?;
        Ok(MappingState::new(table.headers.clone(), catalog, initial))
    }

    /// Opens the mapping review with no column mapped and no auto-mapping.
    pub fn prepare_manual_upload(&self, table: &SourceTable) -> Result<MappingState> {
        let catalog = self.system_headers()?;
        Ok(MappingState::manual(table.headers.clone(), catalog))
    }

    /// Commits `source` under the reviewed mapping.
    pub fn commit_upload(
        &mut self,
        campaign: &CampaignId,
        user: &UserId,
        source: &SourceFile,
        mapper: MappingState,
    ) -> Result<UploadOutcome> {
        self.commit_upload_with_progress(campaign, user, source, mapper, |_| {})
    }

    /// Commits `source`, calling `progress` after each row with the number of
    /// rows processed so far.
    ///
    /// Rejects the commit if a required field is unmapped. Rows are written
    /// one at a time; a failed row is logged and counted, not retried, and
    /// rows already written stay written.
    pub fn commit_upload_with_progress(
        &mut self,
        campaign: &CampaignId,
        user: &UserId,
        source: &SourceFile,
        mapper: MappingState,
        mut progress: impl FnMut(usize),
    ) -> Result<UploadOutcome> {
        let span = info_span!("upload", campaign = %campaign, file = %source.filename);
        let _guard = span.enter();
        let start = Instant::now();

        self.owned_campaign(campaign, user)?;
        let catalog = self.system_headers()?;
        let mapping = mapper.into_mapping();
        let validation = validate_mapping(&mapping, &catalog);
        if !validation.is_complete() {
            return Err(ServiceError::IncompleteMapping {
                missing: validation.missing_names(),
            });
        }

        let table = &source.table;
        let list = UploadedList {
            id: ListId::generate(),
            campaign_id: campaign.clone(),
            user_id: user.clone(),
            filename: source.filename.clone(),
            original_headers: table.headers.clone(),
            mapped_headers: mapping,
            source_hash: Some(source.source_hash.clone()),
            created_at: Utc::now(),
        };
        self.store.insert_list(list.clone())?;

        let mut inserted = 0usize;
        let mut failed = 0usize;
        for (index, row) in table.rows.iter().enumerate() {
            let data = project_row(&table.headers, row, &list.mapped_headers);
            let record = Record::new(list.id.clone(), campaign.clone(), user.clone(), data);
            match self.store.insert_record(record) {
                Ok(()) => inserted += 1,
                Err(e) => {
                    failed += 1;
                    error!(list = %list.id, row = index + 1, error = %e, "failed to insert record");
                }
            }
            progress(index + 1);
        }

        info!(
            list = %list.id,
            inserted,
            failed,
            duration_ms = start.elapsed().as_millis(),
            "upload committed"
        );
        Ok(UploadOutcome {
            list,
            inserted,
            failed,
        })
    }
}
