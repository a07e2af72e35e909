use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Row, Table};

use crate::recommendation::{CategoryChange, ParsedRecommendation};

pub fn render_recommendations(parsed: &ParsedRecommendation) -> String {
    let mut out = String::new();

    if !parsed.greeting.is_empty() {
        out.push_str(&parsed.greeting);
        out.push('\n');
    }

    let mut summary = Table::new();
    summary
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    summary.add_row(Row::from(vec![
        Cell::new("Spending Behavior"),
        Cell::new(format!(
            "{} (Risk: {})",
            parsed.behavior_type, parsed.behavior_risk
        )),
    ]));
    summary.add_row(Row::from(vec![
        Cell::new("Financial Health"),
        Cell::new(format!(
            "{} (Score: {})",
            parsed.health_level, parsed.health_score
        )),
    ]));
    summary.add_row(Row::from(vec![
        Cell::new("Total Income"),
        Cell::new(&parsed.income),
    ]));
    summary.add_row(Row::from(vec![
        Cell::new("Total Expenses"),
        Cell::new(&parsed.total_expenses),
    ]));
    summary.add_row(Row::from(vec![
        Cell::new("Recommended Budget"),
        Cell::new(&parsed.recommended_budget),
    ]));
    out.push_str(&summary.to_string());
    out.push('\n');

    if parsed.scaled_to_income {
        out.push_str("⚠ The recommended budget was adjusted to fit within your income.\n");
    }

    let increases = parsed.increases();
    if !increases.is_empty() {
        out.push_str("\nAreas to Increase\n");
        out.push_str(&changes_table(&increases).to_string());
        out.push('\n');
    }

    let decreases = parsed.decreases();
    if !decreases.is_empty() {
        out.push_str("\nAreas to Reduce\n");
        out.push_str(&changes_table(&decreases).to_string());
        out.push('\n');
    }

    for note in &parsed.notes {
        out.push_str(&format!("* {note}\n"));
    }

    if !parsed.closing.is_empty() {
        out.push('\n');
        out.push_str(&parsed.closing);
        out.push('\n');
    }

    out
}

fn changes_table(changes: &[&CategoryChange]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "From", "To", "Change", "Why"]);
    for change in changes {
        table.add_row(Row::from(vec![
            Cell::new(&change.category),
            Cell::new(&change.from),
            Cell::new(&change.to),
            Cell::new(&change.percent),
            Cell::new(&change.reason),
        ]));
    }
    table
}

#[cfg(test)]
mod tests {
    use crate::recommendation::extract::parse_recommendation_text;

    use super::render_recommendations;

    #[test]
    fn sections_appear_only_when_present() {
        let parsed = parse_recommendation_text(
            "Hello! Here's your update.\n\
Total Income: $5000\n\
- Savings (USD): increase from 100.00 USD to 200.00 USD (+100.0%) to increase savings or investment focus.",
        );
        let rendered = render_recommendations(&parsed);
        assert!(rendered.contains("Hello! Here's your update."));
        assert!(rendered.contains("$5,000"));
        assert!(rendered.contains("Areas to Increase"));
        assert!(!rendered.contains("Areas to Reduce"));
    }

    #[test]
    fn defaults_render_without_panicking() {
        let parsed = parse_recommendation_text("");
        let rendered = render_recommendations(&parsed);
        assert!(rendered.contains("Unknown"));
        assert!(rendered.contains("$0"));
    }
}
