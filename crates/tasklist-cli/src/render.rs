use chrono::NaiveDate;
use colored::*;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement,
    Table,
};
use tasklist_core::{Cost, Task};

use crate::config::Settings;

pub const HIGH_COST_FLAG: &str = "high cost";

pub fn is_high_cost(task: &Task, settings: &Settings) -> bool {
    task.is_costlier_than_or_equal(settings.high_cost_threshold)
}

pub fn format_cost(cost: Cost, settings: &Settings) -> String {
    format!("{} {}", settings.currency_symbol, cost)
}

pub fn format_due(date: NaiveDate, settings: &Settings) -> String {
    date.format(&settings.date_format).to_string()
}

/// List view: one row per task, expensive rows highlighted.
pub fn list_view(tasks: &[Task], settings: &Settings) -> String {
    if tasks.is_empty() {
        return format!(
            "{}\n{}",
            "No tasks yet".yellow(),
            "Use 'add <name> <cost> [YYYY-MM-DD]' to create one".dimmed()
        );
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);

    table.set_header(vec!["#", "ID", "Name", "Cost", "Due", "Flag"]);

    for task in tasks {
        let high = is_high_cost(task, settings);
        let cells = vec![
            task.order.to_string(),
            task.id.to_string(),
            task.name.clone(),
            format_cost(task.cost, settings),
            format_due(task.due_date, settings),
            if high { HIGH_COST_FLAG.to_string() } else { String::new() },
        ];

        table.add_row(cells.into_iter().map(|text| {
            let cell = Cell::new(text);
            if high {
                cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
            } else {
                cell
            }
        }));
    }

    // Summing u64 cents can overflow
    let total: u128 = tasks.iter().map(|t| u128::from(t.cost.cents())).sum();
    format!(
        "{}\n{} task(s), total {} {}.{:02}",
        table,
        tasks.len(),
        settings.currency_symbol,
        total / 100,
        total % 100
    )
}

/// Item view for a single task.
pub fn item_view(task: &Task, settings: &Settings) -> String {
    let mut lines = vec![
        format!("Task: {}", task.id),
        format!("  Name: {}", task.name),
        format!("  Cost: {}", format_cost(task.cost, settings)),
        format!("  Due: {}", format_due(task.due_date, settings)),
        format!("  Position: {}", task.order),
    ];
    if is_high_cost(task, settings) {
        lines.push(format!("  {}", HIGH_COST_FLAG.yellow().bold()));
    }
    lines.join("\n")
}

pub fn success(message: &str) -> String {
    format!("{} {}", "✓".green(), message)
}

pub fn failure(message: &str) -> String {
    format!("{} {}", "✗".red(), message.red())
}

pub fn note(message: &str) -> String {
    message.dimmed().to_string()
}
