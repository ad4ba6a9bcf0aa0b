use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_json::{Value, json};

use intake_cli::session::LoadOutcome;
use intake_ingest::format_file_size;
use intake_model::{RequiredFields, SubmissionOutcome, ValidationOutcome};

use crate::types::{CheckReport, SendReport};

pub fn print_check(report: &CheckReport) {
    println!("File: {}", report.file_name);
    if let Some(size) = report.file_size {
        println!("Size: {}", format_file_size(size));
    }
    if let Some(rows) = report.row_count {
        println!("Rows: {rows}");
    }
    if let Some(validation) = report.outcome.validation() {
        println!("Headers checked: {}", validation.headers.len());
        print_field_table(validation);
    }
    let status = status_text(&report.outcome);
    match &report.outcome {
        LoadOutcome::Ready(_) => println!("{status}: {}", report.outcome.message()),
        _ => eprintln!("{status}: {}", report.outcome.message()),
    }
}

pub fn print_send(report: &SendReport) {
    print_check(&report.check);
    let Some(submission) = &report.submission else {
        eprintln!("Not sent.");
        return;
    };
    println!("Webhook URL from: {}", report.webhook_source);
    print_submission(submission);
}

fn print_submission(outcome: &SubmissionOutcome) {
    if outcome.success {
        println!("Sent: {}", outcome.text());
    } else {
        eprintln!("Send failed: {}", outcome.text());
    }
}

fn print_field_table(validation: &ValidationOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Required field"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for (index, (field, present)) in field_statuses(validation).into_iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(field),
            field_status_cell(present),
        ]);
    }
    println!("{table}");
}

/// Every required field in registry order, paired with whether it was found.
fn field_statuses(validation: &ValidationOutcome) -> Vec<(&'static str, bool)> {
    let present = validation.present_fields();
    RequiredFields
        .iter()
        .map(|field| (field, present.contains(&field)))
        .collect()
}

fn field_status_cell(present: bool) -> Cell {
    if present {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("missing")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn status_text(outcome: &LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Rejected(_) => "Rejected",
        LoadOutcome::ParseFailed(_) => "Parse failed",
        LoadOutcome::Invalid(_) => "Invalid",
        LoadOutcome::Ready(_) => "Ready",
    }
}

/// Machine-readable form of a check report.
pub fn check_json(report: &CheckReport) -> Value {
    json!({
        "file": report.file_name,
        "size": report.file_size,
        "sizeDisplay": report.file_size.map(format_file_size),
        "rowCount": report.row_count,
        "status": report.outcome.kind(),
        "message": report.outcome.message(),
        "validation": report.outcome.validation(),
    })
}

pub fn print_check_json(report: &CheckReport) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(&check_json(report))?);
    Ok(())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
