use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::insight::normalize::FALLBACK_ICON;
use crate::insight::UserInsight;
use crate::views::format_usd;

/// Categories where heavy spending is worth calling out.
const DISCRETIONARY_CATEGORIES: [&str; 5] = [
    "Eating Out",
    "Entertainment",
    "Online Shopping",
    "Subscription Services",
    "Travel",
];

/// A discretionary category is flagged once it exceeds `warning_ratio` of
/// total expenses.
pub fn is_high_discretionary(
    name: &str,
    amount: f64,
    total_expenses: f64,
    warning_ratio: f64,
) -> bool {
    if total_expenses <= 0.0 {
        return false;
    }
    DISCRETIONARY_CATEGORIES.contains(&name) && amount / total_expenses > warning_ratio
}

pub fn render_expenses(insight: &UserInsight, warning_ratio: f64) -> String {
    let total_expenses = insight.total_expenses_value();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Category", "Amount", ""]);

    for expense in &insight.current_expenses {
        let flagged = is_high_discretionary(
            &expense.name,
            expense.amount,
            total_expenses,
            warning_ratio,
        );
        let warning_cell = if flagged {
            Cell::new("⚠ high").fg(Color::Yellow)
        } else {
            Cell::new("")
        };
        table.add_row(Row::from(vec![
            Cell::new(expense.icon.as_deref().unwrap_or(FALLBACK_ICON)),
            Cell::new(&expense.name),
            Cell::new(format_usd(expense.amount)),
            warning_cell,
        ]));
    }

    format!(
        "Monthly Income: {}   Total Expenses: {}\n{}",
        format_usd(insight.income),
        format_usd(total_expenses),
        table
    )
}

#[cfg(test)]
mod tests {
    use crate::insight::UserInsight;

    use super::{is_high_discretionary, render_expenses};

    #[test]
    fn only_discretionary_categories_above_the_threshold_are_flagged() {
        assert!(is_high_discretionary("Eating Out", 320.0, 3715.0, 0.05));
        assert!(!is_high_discretionary("Rent", 1500.0, 3715.0, 0.05));
        assert!(!is_high_discretionary("Eating Out", 100.0, 3715.0, 0.05));
        assert!(!is_high_discretionary("Eating Out", 320.0, 0.0, 0.05));
    }

    #[test]
    fn summary_line_carries_income_and_total() {
        let rendered = render_expenses(&UserInsight::sample("16"), 0.05);
        assert!(rendered.contains("Monthly Income: $5,000"));
        assert!(rendered.contains("Total Expenses: $3,715"));
        assert!(rendered.contains("Eating Out"));
        assert!(rendered.contains("⚠ high"));
    }
}
