//! Structured facts recovered from the free-text recommendation narrative.

pub mod extract;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    Increase,
    Decrease,
}

/// One per-category adjustment sentence, with the amounts already reformatted
/// for display.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryChange {
    pub category: String,
    pub from: String,
    pub to: String,
    pub percent: String,
    pub direction: ChangeDirection,
    pub reason: String,
}

/// Best-effort reconstruction of the advisory text. Every field carries a
/// textual default so a render never has to deal with missing data; a
/// narrative section that never matched simply keeps its sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedRecommendation {
    pub greeting: String,
    pub behavior_type: String,
    pub behavior_risk: String,
    pub health_level: String,
    pub health_score: String,
    pub income: String,
    pub total_expenses: String,
    pub recommended_budget: String,
    pub scaled_to_income: bool,
    pub changes: Vec<CategoryChange>,
    pub notes: Vec<String>,
    pub closing: String,
}

impl Default for ParsedRecommendation {
    fn default() -> Self {
        Self {
            greeting: String::new(),
            behavior_type: "Unknown".to_string(),
            behavior_risk: "Unknown".to_string(),
            health_level: "Unknown".to_string(),
            health_score: "0".to_string(),
            income: "$0".to_string(),
            total_expenses: "$0".to_string(),
            recommended_budget: "$0".to_string(),
            scaled_to_income: false,
            changes: Vec::new(),
            notes: Vec::new(),
            closing: String::new(),
        }
    }
}

impl ParsedRecommendation {
    /// Changes suggesting more spend, in narrative order. This split, not the
    /// raw list, drives the "Areas to Increase" section.
    pub fn increases(&self) -> Vec<&CategoryChange> {
        self.changes
            .iter()
            .filter(|change| change.direction == ChangeDirection::Increase)
            .collect()
    }

    /// Changes suggesting less spend, in narrative order.
    pub fn decreases(&self) -> Vec<&CategoryChange> {
        self.changes
            .iter()
            .filter(|change| change.direction == ChangeDirection::Decrease)
            .collect()
    }
}
