use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use maillist_core::UploadOutcome;
use maillist_map::{MappingEngine, MappingState};
use maillist_model::{Campaign, Record, Segment, SystemHeader, UploadedList};
use maillist_segment::ConditionStats;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn print_catalog(headers: &[SystemHeader]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Required"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for header in headers {
        table.add_row(vec![
            Cell::new(&header.id),
            Cell::new(&header.name),
            required_cell(header.is_required),
        ]);
    }
    println!("{table}");
}

pub fn print_campaigns(campaigns: &[Campaign]) {
    if campaigns.is_empty() {
        println!("No campaigns.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Description"),
        header_cell("Created"),
    ]);
    apply_table_style(&mut table);
    for campaign in campaigns {
        table.add_row(vec![
            Cell::new(&campaign.id),
            Cell::new(&campaign.name).add_attribute(Attribute::Bold),
            optional_cell(campaign.description.as_deref()),
            dim_cell(campaign.created_at.format(DATE_FORMAT)),
        ]);
    }
    println!("{table}");
}

pub fn print_campaign(
    campaign: &Campaign,
    lists: &[UploadedList],
    segments: &[Segment],
    records: usize,
) {
    println!("Campaign: {} ({})", campaign.name, campaign.id);
    if let Some(description) = &campaign.description {
        println!("Description: {description}");
    }
    println!("Records: {records}");

    if !lists.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("List"),
            header_cell("File"),
            header_cell("Columns"),
            header_cell("Mapped"),
            header_cell("Uploaded"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for list in lists {
            table.add_row(vec![
                Cell::new(&list.id),
                Cell::new(&list.filename),
                Cell::new(list.original_headers.len()),
                Cell::new(list.mapped_headers.len()),
                dim_cell(list.created_at.format(DATE_FORMAT)),
            ]);
        }
        println!();
        println!("Lists:");
        println!("{table}");
    }

    if !segments.is_empty() {
        println!();
        println!("Segments:");
        print_segments(segments);
    }
}

pub fn print_segments(segments: &[Segment]) {
    if segments.is_empty() {
        println!("No segments.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Name"),
        header_cell("Conditions"),
    ]);
    apply_table_style(&mut table);
    for segment in segments {
        table.add_row(vec![
            Cell::new(&segment.id),
            Cell::new(&segment.name).add_attribute(Attribute::Bold),
            conditions_cell(segment),
        ]);
    }
    println!("{table}");
}

/// Segment header plus how each condition fares on its own.
pub fn print_segment(segment: &Segment, stats: &[ConditionStats], total: usize, matched: usize) {
    println!("Segment: {} ({})", segment.name, segment.id);
    println!("Campaign: {}", segment.campaign_id);
    println!("Matching records: {matched} of {total}");
    if stats.is_empty() {
        println!("No conditions; every record matches.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Operator"),
        header_cell("Value"),
        header_cell("Satisfied"),
        header_cell("Failed"),
        header_cell("Missing field"),
    ]);
    apply_table_style(&mut table);
    for index in 3..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for stat in stats {
        table.add_row(vec![
            Cell::new(&stat.condition.field),
            Cell::new(stat.condition.operator.label()),
            Cell::new(&stat.condition.value),
            count_cell(stat.satisfied, Color::Green),
            count_cell(stat.failed(total), Color::Red),
            count_cell(stat.missing_field, Color::Yellow),
        ]);
    }
    println!("{table}");
}

pub fn print_list(list: &UploadedList, records: &[Record], limit: usize) {
    println!("List: {} ({})", list.filename, list.id);
    println!("Campaign: {}", list.campaign_id);
    if let Some(hash) = &list.source_hash {
        println!("SHA-256: {hash}");
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Column"), header_cell("Field")]);
    apply_table_style(&mut table);
    for header in &list.original_headers {
        let target = match list.mapped_headers.get(header) {
            Some(field) => Cell::new(field),
            None => dim_cell("not imported"),
        };
        table.add_row(vec![Cell::new(header), target]);
    }
    println!("{table}");
    println!();
    let columns: Vec<String> = list
        .export_columns()
        .iter()
        .map(ToString::to_string)
        .collect();
    print_records(&columns, records, limit);
}

/// Prints at most `limit` records, one column per field.
pub fn print_records(columns: &[String], records: &[Record], limit: usize) {
    println!("Records: {}", records.len());
    if records.is_empty() || columns.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| header_cell(c)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for record in records.iter().take(limit) {
        table.add_row(
            columns
                .iter()
                .map(|column| match record.value(column) {
                    Some(value) => Cell::new(value),
                    None => dim_cell("-"),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
    if records.len() > limit {
        println!("... {} more", records.len() - limit);
    }
}

/// Mapping review: each file column, where it lands and why.
pub fn print_mapping(state: &MappingState) {
    let engine = MappingEngine::new(state.catalog().to_vec());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Field"),
        header_cell("Match"),
    ]);
    apply_table_style(&mut table);
    for column in state.file_headers() {
        let row = match state.target_of(column) {
            Some(field) => {
                let suggested = engine
                    .match_column(column)
                    .filter(|(header, _)| header.id == field.id);
                let reason = match suggested {
                    Some((_, kind)) => dim_cell(kind.description()),
                    None => Cell::new("manual").fg(Color::Blue),
                };
                vec![Cell::new(column), field_cell(field), reason]
            }
            None => vec![Cell::new(column), dim_cell("do not import"), dim_cell("-")],
        };
        table.add_row(row);
    }
    println!("{table}");

    let summary = state.summary();
    println!(
        "Mapped {} of {} columns; required fields {}/{}",
        summary.mapped, summary.total_columns, summary.required_mapped, summary.required_total
    );
    let validation = state.validation();
    if !validation.is_complete() {
        eprintln!(
            "Missing required fields: {}",
            validation.missing_names().join(", ")
        );
    }
}

pub fn print_upload_outcome(outcome: &UploadOutcome) {
    println!(
        "Uploaded {} as list {}",
        outcome.list.filename, outcome.list.id
    );
    let mut table = Table::new();
    table.set_header(vec![header_cell("Inserted"), header_cell("Failed")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        count_cell(outcome.inserted, Color::Green),
        count_cell(outcome.failed, Color::Red),
    ]);
    println!("{table}");
}

pub fn print_fields(fields: &[String]) {
    if fields.is_empty() {
        println!("No records.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field")]);
    apply_table_style(&mut table);
    for field in fields {
        table.add_row(vec![Cell::new(field)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn conditions_cell(segment: &Segment) -> Cell {
    if segment.filter_conditions.is_empty() {
        return dim_cell("(all records)");
    }
    let text = segment
        .filter_conditions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    Cell::new(text)
}

fn field_cell(field: &SystemHeader) -> Cell {
    let cell = Cell::new(format!("{} ({})", field.name, field.id));
    if field.is_required {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn required_cell(required: bool) -> Cell {
    if required {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
