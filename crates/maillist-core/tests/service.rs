use maillist_core::{MailingList, ServiceError};
use maillist_csv::{SourceFile, read_csv_bytes, sha256_hex};
use maillist_model::{
    Campaign, CampaignId, FilterCondition, ListId, Operator, Record, Segment, SegmentId,
    SystemHeader, UploadedList, UserId, default_catalog,
};
use maillist_store::{
    CampaignStore, CatalogStore, ListStore, MemoryStore, RecordStore, Result as StoreResult,
    SegmentStore, StoreError,
};

fn user() -> UserId {
    UserId::new("user-1").unwrap()
}

fn source(filename: &str, content: &str) -> SourceFile {
    SourceFile {
        filename: filename.to_string(),
        source_hash: sha256_hex(content.as_bytes()),
        table: read_csv_bytes(content.as_bytes()).expect("parse csv"),
    }
}

fn seeded() -> MailingList<MemoryStore> {
    let mut service = MailingList::new(MemoryStore::new());
    service.seed_catalog(default_catalog()).unwrap();
    service
}

fn upload<S: maillist_store::Store>(
    service: &mut MailingList<S>,
    campaign: &CampaignId,
    file: &SourceFile,
) -> maillist_core::UploadOutcome {
    let mapper = service.prepare_upload(&file.table, None).unwrap();
    service
        .commit_upload(campaign, &user(), file, mapper)
        .expect("commit upload")
}

#[test]
fn upload_maps_columns_and_drops_unmapped_ones() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let file = source(
        "contacts.csv",
        "Email,First,Shoe Size\na@x.com,Ann,7\nb@x.com,Bob,9\n",
    );

    let outcome = upload(&mut service, &campaign.id, &file);
    assert_eq!(outcome.inserted, 2);
    assert!(outcome.is_complete());
    assert_eq!(outcome.list.source_hash.as_deref(), Some(file.source_hash.as_str()));

    let records = service.records_for_list(&outcome.list.id).unwrap();
    assert_eq!(records[0].value("email"), Some("a@x.com"));
    assert_eq!(records[0].value("first_name"), Some("Ann"));
    assert_eq!(records[0].value("Shoe Size"), None);
    assert_eq!(
        service.campaign_fields(&campaign.id).unwrap(),
        vec!["email", "first_name"]
    );
}

#[test]
fn auto_mapping_walks_the_catalog_by_name() {
    let service = seeded();
    let file = source(
        "contacts.csv",
        "Email Address,Name,Phone Number\na@x.com,Ann,555-0100\n",
    );

    let mapper = service.prepare_upload(&file.table, None).unwrap();
    assert!(mapper.is_auto_mapped());
    let target = |column: &str| mapper.mapping().get(column).map(|f| f.to_string());
    // "Address" sorts before "Email", so it claims the header first.
    assert_eq!(target("Email Address").as_deref(), Some("address"));
    assert_eq!(target("Phone Number").as_deref(), Some("phone"));
    assert_eq!(target("Name").as_deref(), Some("first_name"));
    assert_eq!(mapper.validation().missing_names(), vec!["Email".to_string()]);
}

#[test]
fn manual_review_starts_without_suggestions() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let file = source("contacts.csv", "Email,City\na@x.com,Boston\n");

    let mut mapper = service.prepare_manual_upload(&file.table).unwrap();
    assert!(!mapper.is_auto_mapped());
    assert!(mapper.mapping().is_empty());
    mapper.assign("Email", "email").unwrap();

    let outcome = service
        .commit_upload(&campaign.id, &user(), &file, mapper)
        .unwrap();
    let records = service.records_for_list(&outcome.list.id).unwrap();
    assert_eq!(records[0].value("email"), Some("a@x.com"));
    assert_eq!(records[0].value("city"), None);
}

#[test]
fn commit_is_blocked_when_email_is_unmapped() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let file = source("contacts.csv", "Contact,Town\na@x.com,Boston\n");

    let mapper = service.prepare_upload(&file.table, None).unwrap();
    assert_eq!(mapper.validation().missing_names(), vec!["Email".to_string()]);
    let err = service
        .commit_upload(&campaign.id, &user(), &file, mapper)
        .unwrap_err();
    assert!(matches!(err, ServiceError::IncompleteMapping { ref missing } if missing == &["Email"]));
    assert!(service.lists_for(&campaign.id).unwrap().is_empty());
}

#[test]
fn manual_override_fixes_the_mapping() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let file = source("contacts.csv", "Contact,Town\na@x.com,Boston\n");

    let mut mapper = service.prepare_upload(&file.table, None).unwrap();
    mapper.assign("Contact", "email").unwrap();
    mapper.assign("Town", "city").unwrap();
    let outcome = service
        .commit_upload(&campaign.id, &user(), &file, mapper)
        .unwrap();
    let records = service.records_for_list(&outcome.list.id).unwrap();
    assert_eq!(records[0].value("city"), Some("Boston"));
}

#[test]
fn segment_scenarios_over_uploaded_records() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    upload(
        &mut service,
        &campaign.id,
        &source("first.csv", "Email,City\na@x.com,Boston\n"),
    );
    upload(&mut service, &campaign.id, &source("second.csv", "Email\nb@x.com\n"));

    let equals = service
        .create_segment(
            &campaign.id,
            &user(),
            "Boston",
            vec![FilterCondition::new("city", Operator::Equals, "Boston")],
        )
        .unwrap();
    let not_equals = service
        .create_segment(
            &campaign.id,
            &user(),
            "Not Boston",
            vec![FilterCondition::new("city", Operator::NotEquals, "Boston")],
        )
        .unwrap();
    let everyone = service
        .create_segment(&campaign.id, &user(), "Everyone", vec![])
        .unwrap();

    let matched = service.records_by_segment(&equals.id).unwrap();
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].value("email"), Some("a@x.com"));
    assert!(service.records_by_segment(&not_equals.id).unwrap().is_empty());

    let all: Vec<String> = service
        .records_by_segment(&everyone.id)
        .unwrap()
        .iter()
        .filter_map(|r| r.value("email").map(str::to_string))
        .collect();
    assert_eq!(all, vec!["a@x.com", "b@x.com"]);
}

#[test]
fn deleting_a_campaign_cascades_and_spares_others() {
    let mut service = seeded();
    let doomed = service.create_campaign(&user(), "Doomed", None).unwrap();
    let kept = service.create_campaign(&user(), "Kept", None).unwrap();
    for campaign in [&doomed, &kept] {
        upload(
            &mut service,
            &campaign.id,
            &source("contacts.csv", "Email,City\na@x.com,Boston\nb@x.com,Chicago\n"),
        );
        service
            .create_segment(&campaign.id, &user(), "All", vec![])
            .unwrap();
    }

    assert!(service.delete_campaign(&doomed.id));

    assert!(service.get_campaign(&doomed.id).unwrap().is_none());
    assert!(service.segments_for(&doomed.id).unwrap().is_empty());
    assert!(service.lists_for(&doomed.id).unwrap().is_empty());
    assert!(service.records_for_campaign(&doomed.id).unwrap().is_empty());

    assert!(service.get_campaign(&kept.id).unwrap().is_some());
    assert_eq!(service.segments_for(&kept.id).unwrap().len(), 1);
    assert_eq!(service.lists_for(&kept.id).unwrap().len(), 1);
    assert_eq!(service.records_for_campaign(&kept.id).unwrap().len(), 2);
}

#[test]
fn deleting_a_list_removes_its_records_only() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let first = upload(
        &mut service,
        &campaign.id,
        &source("first.csv", "Email\na@x.com\n"),
    );
    upload(&mut service, &campaign.id, &source("second.csv", "Email\nb@x.com\n"));

    assert!(service.delete_list(&first.list.id));
    assert!(!service.delete_list(&first.list.id));
    let remaining = service.records_for_campaign(&campaign.id).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].value("email"), Some("b@x.com"));
}

#[test]
fn export_uses_latest_list_columns() {
    let mut service = seeded();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    upload(
        &mut service,
        &campaign.id,
        &source("first.csv", "Email,Phone\na@x.com,555-0100\n"),
    );
    upload(
        &mut service,
        &campaign.id,
        &source("second.csv", "City,Email\nBoston,b@x.com\n"),
    );

    insta::assert_snapshot!(service.export_campaign(&campaign.id).unwrap(), @r"
    city,email
    ,a@x.com
    Boston,b@x.com
    ");

    let segment = service
        .create_segment(
            &campaign.id,
            &user(),
            "Boston",
            vec![FilterCondition::new("city", Operator::Contains, "BOS")],
        )
        .unwrap();
    insta::assert_snapshot!(service.export_segment(&segment.id).unwrap(), @r"
    city,email
    Boston,b@x.com
    ");
}

#[test]
fn export_of_unknown_segment_is_not_found() {
    let service = seeded();
    let err = service
        .export_segment(&SegmentId::new("ghost").unwrap())
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { kind: "segment", .. }));
}

/// Store that can be told to fail specific operations.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_record_inserts_after: Option<usize>,
    fail_list_deletes: bool,
    inserted: usize,
}

fn backend(message: &str) -> StoreError {
    StoreError::Backend {
        message: message.to_string(),
    }
}

impl CampaignStore for FlakyStore {
    fn insert_campaign(&mut self, campaign: Campaign) -> StoreResult<()> {
        self.inner.insert_campaign(campaign)
    }
    fn get_campaign(&self, id: &CampaignId) -> StoreResult<Option<Campaign>> {
        self.inner.get_campaign(id)
    }
    fn campaigns_by_user(&self, user: &UserId) -> StoreResult<Vec<Campaign>> {
        self.inner.campaigns_by_user(user)
    }
    fn update_campaign(&mut self, campaign: Campaign) -> StoreResult<()> {
        self.inner.update_campaign(campaign)
    }
    fn delete_campaign(&mut self, id: &CampaignId) -> StoreResult<bool> {
        self.inner.delete_campaign(id)
    }
}

impl ListStore for FlakyStore {
    fn insert_list(&mut self, list: UploadedList) -> StoreResult<()> {
        self.inner.insert_list(list)
    }
    fn get_list(&self, id: &ListId) -> StoreResult<Option<UploadedList>> {
        self.inner.get_list(id)
    }
    fn lists_by_campaign(&self, campaign: &CampaignId) -> StoreResult<Vec<UploadedList>> {
        self.inner.lists_by_campaign(campaign)
    }
    fn delete_list(&mut self, id: &ListId) -> StoreResult<bool> {
        if self.fail_list_deletes {
            return Err(backend("list delete refused"));
        }
        self.inner.delete_list(id)
    }
}

impl RecordStore for FlakyStore {
    fn insert_record(&mut self, record: Record) -> StoreResult<()> {
        if self
            .fail_record_inserts_after
            .is_some_and(|limit| self.inserted >= limit)
        {
            return Err(backend("record insert refused"));
        }
        self.inserted += 1;
        self.inner.insert_record(record)
    }
    fn records_by_list(&self, list: &ListId) -> StoreResult<Vec<Record>> {
        self.inner.records_by_list(list)
    }
    fn records_by_campaign(&self, campaign: &CampaignId) -> StoreResult<Vec<Record>> {
        self.inner.records_by_campaign(campaign)
    }
    fn delete_records_by_list(&mut self, list: &ListId) -> StoreResult<usize> {
        self.inner.delete_records_by_list(list)
    }
}

impl SegmentStore for FlakyStore {
    fn insert_segment(&mut self, segment: Segment) -> StoreResult<()> {
        self.inner.insert_segment(segment)
    }
    fn get_segment(&self, id: &SegmentId) -> StoreResult<Option<Segment>> {
        self.inner.get_segment(id)
    }
    fn update_segment(&mut self, segment: Segment) -> StoreResult<()> {
        self.inner.update_segment(segment)
    }
    fn delete_segment(&mut self, id: &SegmentId) -> StoreResult<bool> {
        self.inner.delete_segment(id)
    }
    fn segments_by_campaign(&self, campaign: &CampaignId) -> StoreResult<Vec<Segment>> {
        self.inner.segments_by_campaign(campaign)
    }
}

impl CatalogStore for FlakyStore {
    fn catalog(&self) -> StoreResult<Vec<SystemHeader>> {
        self.inner.catalog()
    }
    fn insert_catalog(&mut self, headers: Vec<SystemHeader>) -> StoreResult<()> {
        self.inner.insert_catalog(headers)
    }
}

#[test]
fn failed_row_inserts_are_counted_not_rolled_back() {
    let mut service = MailingList::new(FlakyStore {
        fail_record_inserts_after: Some(2),
        ..FlakyStore::default()
    });
    service.seed_catalog(default_catalog()).unwrap();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    let file = source("contacts.csv", "Email\na@x.com\nb@x.com\nc@x.com\n");

    let mut seen = Vec::new();
    let mapper = service.prepare_upload(&file.table, None).unwrap();
    let outcome = service
        .commit_upload_with_progress(&campaign.id, &user(), &file, mapper, |done| seen.push(done))
        .unwrap();

    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.failed, 1);
    assert!(!outcome.is_complete());
    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(service.records_for_list(&outcome.list.id).unwrap().len(), 2);
}

#[test]
fn failed_cascade_reports_false_and_keeps_earlier_deletions() {
    let mut service = MailingList::new(FlakyStore {
        fail_list_deletes: true,
        ..FlakyStore::default()
    });
    service.seed_catalog(default_catalog()).unwrap();
    let campaign = service.create_campaign(&user(), "Spring", None).unwrap();
    upload(
        &mut service,
        &campaign.id,
        &source("contacts.csv", "Email\na@x.com\n"),
    );
    service
        .create_segment(&campaign.id, &user(), "All", vec![])
        .unwrap();

    assert!(!service.delete_campaign(&campaign.id));

    assert!(service.segments_for(&campaign.id).unwrap().is_empty());
    assert!(service.records_for_campaign(&campaign.id).unwrap().is_empty());
    assert_eq!(service.lists_for(&campaign.id).unwrap().len(), 1);
    assert!(service.get_campaign(&campaign.id).unwrap().is_some());
}
