//! Terminal output helpers

use challenge_sync::{Challenge, TimingSnapshot, TimingTracker};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, Table};

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn print_failure(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
}

/// Tracked seconds as text, "-" when the id has no record
fn tracked(tracker: &TimingTracker, id: &str) -> String {
    tracker
        .elapsed_time(id)
        .map(|secs| format!("{}s", secs))
        .unwrap_or_else(|_| "-".to_string())
}

pub fn challenge_table(challenges: &[Challenge], tracker: &TimingTracker) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Title", "Progress", "Reward", "Tracked"]);

    for challenge in challenges {
        let progress = Cell::new(format!("{}%", challenge.progress)).fg(if challenge.is_complete() {
            Color::Green
        } else {
            Color::Yellow
        });
        table.add_row(vec![
            Cell::new(&challenge.id),
            Cell::new(&challenge.title),
            progress,
            Cell::new(challenge.reward),
            Cell::new(tracked(tracker, &challenge.id)),
        ]);
    }

    table
}

pub fn timing_table(report: &[TimingSnapshot]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "First seen", "Last update", "Elapsed", "Since update"]);

    for snapshot in report {
        table.add_row(vec![
            Cell::new(&snapshot.id),
            Cell::new(snapshot.first_seen),
            Cell::new(snapshot.last_update),
            Cell::new(format!("{}s", snapshot.elapsed_secs)),
            Cell::new(format!("{}s", snapshot.since_update_secs)),
        ]);
    }

    table
}
