use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::insight::BudgetRecommendation;
use crate::views::{format_signed_percent, format_usd};

fn change_indicator(change: f64) -> &'static str {
    if change > 0.0 {
        "↑"
    } else if change < 0.0 {
        "↓"
    } else {
        ""
    }
}

fn change_cell(change: f64) -> Cell {
    let cell = Cell::new(format_signed_percent(change));
    if change > 0.0 {
        cell.fg(Color::Green)
    } else if change < 0.0 {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

pub fn render_budget(recommendations: &[BudgetRecommendation]) -> String {
    let current_total: f64 = recommendations.iter().map(|r| r.current_amount).sum();
    let recommended_total: f64 = recommendations.iter().map(|r| r.recommended_amount).sum();
    let total_change = if current_total > 0.0 {
        (recommended_total - current_total) / current_total * 100.0
    } else {
        0.0
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Category", "Current", "Recommended", "Change"]);

    for rec in recommendations {
        table.add_row(Row::from(vec![
            Cell::new(format!(
                "{} {}",
                rec.category,
                change_indicator(rec.percentage_change)
            )),
            Cell::new(format_usd(rec.current_amount)),
            Cell::new(format_usd(rec.recommended_amount)),
            change_cell(rec.percentage_change),
        ]));
    }
    table.add_row(Row::from(vec![
        Cell::new("Total"),
        Cell::new(format_usd(current_total)),
        Cell::new(format_usd(recommended_total)),
        change_cell(total_change),
    ]));

    format!(
        "Current: {}   Recommended: {}\n{}",
        format_usd(current_total),
        format_usd(recommended_total),
        table
    )
}
