use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::models::CheckOutcome;

/// Print the result of a `check` run: offending modules with their
/// violations, followed by a one-line tally.
pub fn render_check(outcomes: &[CheckOutcome], failed: usize) {
    let offending: Vec<&CheckOutcome> = outcomes.iter().filter(|o| !o.is_clean()).collect();
    let violations: usize = offending.iter().map(|o| o.violations.len()).sum();

    if !offending.is_empty() {
        println!("{}", violation_table(&offending));
    }

    let clean = outcomes.len() - offending.len();
    println!(
        " Modules: {}  Clean: {}  With violations: {}  Violations: {}  Errors: {}",
        outcomes.len() + failed,
        clean.to_string().green(),
        offending.len().to_string().red(),
        violations.to_string().red(),
        failed.to_string().yellow(),
    );
}

fn violation_table(offending: &[&CheckOutcome]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Module").add_attribute(Attribute::Bold),
            Cell::new("Violation").add_attribute(Attribute::Bold),
        ]);

    for outcome in offending {
        let lines: Vec<&str> = outcome.violations.iter().map(String::as_str).collect();
        table.add_row(vec![
            Cell::new(outcome.dir.display().to_string()),
            Cell::new(lines.join("\n")).fg(Color::Red),
        ]);
    }

    table
}
