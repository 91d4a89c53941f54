use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, trace};

use maillist_cli::logging::redact_value;
use maillist_cli::settings::Settings;
use maillist_core::{MailingList, UploadOutcome};
use maillist_csv::read_csv_file;
use maillist_model::{
    CampaignId, FilterCondition, ListId, Segment, SegmentId, UploadedList, UserId,
};
use maillist_store::{MemoryStore, snapshot};

use crate::cli::{CampaignCommand, ExportArgs, ListCommand, SegmentCommand, UploadArgs};
use crate::summary::{
    print_campaign, print_campaigns, print_catalog, print_fields, print_list, print_mapping,
    print_records, print_segment, print_segments,
};

type Service = MailingList<MemoryStore>;

/// Resolved settings for one invocation.
pub struct AppContext {
    pub settings: Settings,
    pub data_file: PathBuf,
    pub user: UserId,
}

impl AppContext {
    pub fn new(settings: Settings, data_file: Option<&Path>, user: Option<&str>) -> Result<Self> {
        let data_file = settings.data_file(data_file);
        let user = UserId::new(user.unwrap_or(&settings.user.id)).context("user id")?;
        debug!(data_file = %data_file.display(), user = %user, "resolved context");
        Ok(Self {
            settings,
            data_file,
            user,
        })
    }

    /// Loads the data file and seeds the catalog on first use.
    fn open(&self) -> Result<Service> {
        let store = snapshot::load(&self.data_file)
            .with_context(|| format!("load data file {}", self.data_file.display()))?;
        let mut service = MailingList::new(store);
        if service.seed_catalog(self.settings.catalog())? {
            self.save(&service)?;
        }
        Ok(service)
    }

    fn save(&self, service: &Service) -> Result<()> {
        snapshot::save(service.store(), &self.data_file)
            .with_context(|| format!("save data file {}", self.data_file.display()))
    }
}

pub fn run_catalog(ctx: &AppContext) -> Result<()> {
    let service = ctx.open()?;
    print_catalog(&service.system_headers()?);
    Ok(())
}

pub fn run_campaign(ctx: &AppContext, command: &CampaignCommand) -> Result<()> {
    let mut service = ctx.open()?;
    match command {
        CampaignCommand::Create { name, description } => {
            let campaign = service.create_campaign(&ctx.user, name, description.clone())?;
            ctx.save(&service)?;
            println!("Created campaign {} ({})", campaign.name, campaign.id);
        }
        CampaignCommand::List => {
            print_campaigns(&service.campaigns_for(&ctx.user)?);
        }
        CampaignCommand::Show { id } => {
            let campaign = service.owned_campaign(&CampaignId::from_str(id)?, &ctx.user)?;
            let lists = service.lists_for(&campaign.id)?;
            let segments = service.segments_for(&campaign.id)?;
            let records = service.records_for_campaign(&campaign.id)?.len();
            print_campaign(&campaign, &lists, &segments, records);
        }
        CampaignCommand::Update {
            id,
            name,
            description,
        } => {
            let id = CampaignId::from_str(id)?;
            service.owned_campaign(&id, &ctx.user)?;
            let campaign = service.update_campaign(&id, name, description.clone())?;
            ctx.save(&service)?;
            println!("Updated campaign {} ({})", campaign.name, campaign.id);
        }
        CampaignCommand::Delete { id } => {
            let id = CampaignId::from_str(id)?;
            service.owned_campaign(&id, &ctx.user)?;
            let deleted = service.delete_campaign(&id);
            // Partial cascades still removed data, so persist either way.
            ctx.save(&service)?;
            if !deleted {
                bail!("campaign {id} was not fully deleted");
            }
            println!("Deleted campaign {id}");
        }
    }
    Ok(())
}

/// Reads, maps and imports one CSV file.
///
/// Returns `None` for a dry run.
pub fn run_upload(ctx: &AppContext, args: &UploadArgs) -> Result<Option<UploadOutcome>> {
    let start = Instant::now();
    let campaign = CampaignId::from_str(&args.campaign)?;
    let mut service = ctx.open()?;
    service.owned_campaign(&campaign, &ctx.user)?;

    let source = read_csv_file(&args.file, ctx.settings.upload.max_file_size)
        .with_context(|| format!("read {}", args.file.display()))?;
    info!(
        file = %source.filename,
        columns = source.table.headers.len(),
        rows = source.table.row_count(),
        hash = %source.source_hash,
        "read upload file"
    );
    if let Some(row) = source.table.rows.first() {
        for (column, value) in row {
            trace!(column = %column, value = redact_value(value), "first row");
        }
    }

    let mut state = if args.no_auto_map {
        service.prepare_manual_upload(&source.table)?
    } else {
        service.prepare_upload(&source.table, None)?
    };
    for entry in &args.map {
        let (column, target) = parse_map_entry(entry)?;
        state.assign(column, target)?;
        debug!(column, target, "manual mapping");
    }
    print_mapping(&state);

    if args.dry_run {
        return Ok(None);
    }
    if !state.validation().is_complete() {
        bail!(
            "required fields are not mapped: {}",
            state.validation().missing_names().join(", ")
        );
    }

    let progress = ProgressBar::new(source.table.row_count() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} rows ({eta})")
            .context("progress template")?
            .progress_chars("=> "),
    );
    let result = service.commit_upload_with_progress(
        &campaign,
        &ctx.user,
        &source,
        state,
        |done| progress.set_position(done as u64),
    );
    progress.finish_and_clear();
    let outcome = result?;
    ctx.save(&service)?;
    debug!(
        duration_ms = start.elapsed().as_millis(),
        "upload command finished"
    );
    Ok(Some(outcome))
}

pub fn run_list(ctx: &AppContext, command: &ListCommand) -> Result<()> {
    let mut service = ctx.open()?;
    match command {
        ListCommand::Show { id, limit } => {
            let list = owned_list(&service, &ListId::from_str(id)?, &ctx.user)?;
            let records = service.records_for_list(&list.id)?;
            print_list(&list, &records, *limit);
        }
        ListCommand::Delete { id } => {
            let list = owned_list(&service, &ListId::from_str(id)?, &ctx.user)?;
            let deleted = service.delete_list(&list.id);
            ctx.save(&service)?;
            if !deleted {
                bail!("list {} was not fully deleted", list.id);
            }
            println!("Deleted list {} ({})", list.filename, list.id);
        }
    }
    Ok(())
}

pub fn run_segment(ctx: &AppContext, command: &SegmentCommand) -> Result<()> {
    let mut service = ctx.open()?;
    match command {
        SegmentCommand::Create {
            campaign,
            name,
            conditions,
        } => {
            let campaign = CampaignId::from_str(campaign)?;
            let conditions = parse_conditions(conditions)?;
            let segment = service.create_segment(&campaign, &ctx.user, name, conditions)?;
            ctx.save(&service)?;
            println!("Created segment {} ({})", segment.name, segment.id);
        }
        SegmentCommand::List { campaign } => {
            let campaign = service.owned_campaign(&CampaignId::from_str(campaign)?, &ctx.user)?;
            print_segments(&service.segments_for(&campaign.id)?);
        }
        SegmentCommand::Show { id } => {
            let id = SegmentId::from_str(id)?;
            let segment = owned_segment(&service, &id, &ctx.user)?;
            let stats = service
                .explain_segment(&id)?
                .ok_or_else(|| anyhow!("segment {id} not found"))?;
            let total = service.records_for_campaign(&segment.campaign_id)?.len();
            let matched = service.records_by_segment(&id)?.len();
            print_segment(&segment, &stats, total, matched);
        }
        SegmentCommand::Update {
            id,
            name,
            conditions,
        } => {
            let id = SegmentId::from_str(id)?;
            owned_segment(&service, &id, &ctx.user)?;
            let conditions = parse_conditions(conditions)?;
            let segment = service.update_segment(&id, name, conditions)?;
            ctx.save(&service)?;
            println!("Updated segment {} ({})", segment.name, segment.id);
        }
        SegmentCommand::Delete { id } => {
            let id = SegmentId::from_str(id)?;
            owned_segment(&service, &id, &ctx.user)?;
            if !service.delete_segment(&id) {
                bail!("segment {id} was not deleted");
            }
            ctx.save(&service)?;
            println!("Deleted segment {id}");
        }
        SegmentCommand::Records { id, limit } => {
            let id = SegmentId::from_str(id)?;
            let segment = owned_segment(&service, &id, &ctx.user)?;
            let records = service
                .evaluate_segment(&id)?
                .ok_or_else(|| anyhow!("segment {id} not found"))?;
            let columns = service.export_columns(&segment.campaign_id)?;
            print_records(&columns, &records, *limit);
        }
    }
    Ok(())
}

pub fn run_export(ctx: &AppContext, args: &ExportArgs) -> Result<()> {
    let service = ctx.open()?;
    let campaign = service.owned_campaign(&CampaignId::from_str(&args.campaign)?, &ctx.user)?;
    let csv = match &args.segment {
        Some(segment) => {
            let segment = SegmentId::from_str(segment)?;
            let found = owned_segment(&service, &segment, &ctx.user)?;
            if found.campaign_id != campaign.id {
                bail!("segment {segment} does not belong to campaign {}", campaign.id);
            }
            service.export_segment(&segment)?
        }
        None => service.export_campaign(&campaign.id)?,
    };
    match &args.output {
        Some(path) => {
            fs::write(path, csv.as_bytes())
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), bytes = csv.len(), "wrote export");
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{csv}"),
    }
    Ok(())
}

pub fn run_fields(ctx: &AppContext, campaign: &str) -> Result<()> {
    let service = ctx.open()?;
    let campaign = service.owned_campaign(&CampaignId::from_str(campaign)?, &ctx.user)?;
    print_fields(&service.campaign_fields(&campaign.id)?);
    Ok(())
}

fn owned_list(service: &Service, id: &ListId, user: &UserId) -> Result<UploadedList> {
    let list = service
        .get_list(id)?
        .ok_or_else(|| anyhow!("list {id} not found"))?;
    service.owned_campaign(&list.campaign_id, user)?;
    Ok(list)
}

fn owned_segment(service: &Service, id: &SegmentId, user: &UserId) -> Result<Segment> {
    let segment = service
        .get_segment(id)?
        .ok_or_else(|| anyhow!("segment {id} not found"))?;
    service.owned_campaign(&segment.campaign_id, user)?;
    Ok(segment)
}

fn parse_conditions(raw: &[String]) -> Result<Vec<FilterCondition>> {
    raw.iter()
        .map(|text| {
            FilterCondition::from_str(text).with_context(|| format!("invalid condition '{text}'"))
        })
        .collect()
}

/// Splits `HEADER=ID` at the last `=`, so headers may contain `=`.
fn parse_map_entry(entry: &str) -> Result<(&str, &str)> {
    entry
        .rsplit_once('=')
        .map(|(column, target)| (column, target.trim()))
        .ok_or_else(|| anyhow!("invalid --map '{entry}', expected HEADER=ID"))
}
