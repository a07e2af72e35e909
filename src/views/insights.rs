use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::insight::{HealthLevel, RiskLevel, UserInsight};

pub fn risk_color(risk: RiskLevel) -> Color {
    match risk {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
        RiskLevel::VeryHigh => Color::DarkRed,
    }
}

pub fn health_color(level: HealthLevel) -> Color {
    match level {
        HealthLevel::Excellent => Color::Green,
        HealthLevel::Good => Color::DarkGreen,
        HealthLevel::Fair => Color::Yellow,
        HealthLevel::Poor => Color::Red,
        HealthLevel::Critical => Color::DarkRed,
    }
}

// Score bands follow the health-score gauge: 80/60/40 boundaries.
pub fn score_color(score: f64) -> Color {
    if score >= 80.0 {
        Color::Green
    } else if score >= 60.0 {
        Color::DarkGreen
    } else if score >= 40.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn render_insights(insight: &UserInsight) -> String {
    let behavior = &insight.behavior_insight;
    let financial = &insight.financial_insight;

    let mut behavior_table = Table::new();
    behavior_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    behavior_table.set_header(vec!["Behavior Insight", ""]);
    behavior_table.add_row(Row::from(vec![
        Cell::new("Type"),
        Cell::new(&behavior.behavior_type),
    ]));
    behavior_table.add_row(Row::from(vec![
        Cell::new("Risk Level"),
        Cell::new(behavior.risk_level.label()).fg(risk_color(behavior.risk_level)),
    ]));
    if !behavior.description.trim().is_empty() {
        behavior_table.add_row(Row::from(vec![
            Cell::new("Details"),
            Cell::new(&behavior.description),
        ]));
    }

    let mut financial_table = Table::new();
    financial_table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    financial_table.set_header(vec!["Financial Insight", ""]);
    financial_table.add_row(Row::from(vec![
        Cell::new("Health Score"),
        Cell::new(format!("{:.0}", financial.health_score)).fg(score_color(financial.health_score)),
    ]));
    financial_table.add_row(Row::from(vec![
        Cell::new("Health Level"),
        Cell::new(financial.health_level.label()).fg(health_color(financial.health_level)),
    ]));
    financial_table.add_row(Row::from(vec![
        Cell::new("Risk Level"),
        Cell::new(financial.risk_level.label()).fg(risk_color(financial.risk_level)),
    ]));
    if let Some(description) = &financial.description {
        financial_table.add_row(Row::from(vec![
            Cell::new("Details"),
            Cell::new(description),
        ]));
    }

    format!("{behavior_table}\n{financial_table}")
}

#[cfg(test)]
mod tests {
    use comfy_table::Color;

    use crate::insight::UserInsight;

    use super::{render_insights, score_color};

    #[test]
    fn score_bands_match_the_gauge() {
        assert_eq!(score_color(92.0), Color::Green);
        assert_eq!(score_color(62.0), Color::DarkGreen);
        assert_eq!(score_color(41.0), Color::Yellow);
        assert_eq!(score_color(-5.0), Color::Red);
    }

    #[test]
    fn both_cards_are_rendered() {
        let rendered = render_insights(&UserInsight::sample("16"));
        assert!(rendered.contains("Behavior Insight"));
        assert!(rendered.contains("Impulsive Spender"));
        assert!(rendered.contains("Financial Insight"));
        assert!(rendered.contains("62"));
    }
}
