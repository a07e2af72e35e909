//! Reshapes the raw backend payload into the display model.
//!
//! This is a pure, total function over well-typed input: every backend label
//! maps onto the closed enums, every amount is rounded, and missing totals
//! are derived, so nothing here can fail.

use crate::client::RawUserInsight;
use crate::insight::{
    BehaviorInsight, BudgetRecommendation, ExpenseCategory, FinancialInsight, HealthLevel,
    RiskLevel, UserInsight,
};

pub const FALLBACK_ICON: &str = "💵";

/// Strips the backend's `" (USD)"` unit suffix from a category name.
pub fn clean_category_name(raw: &str) -> String {
    raw.replace(" (USD)", "").trim().to_string()
}

/// Fixed category→emoji table; categories outside it get [`FALLBACK_ICON`].
pub fn category_icon(name: &str) -> Option<&'static str> {
    Some(match name {
        "Rent" => "🏠",
        "Groceries" => "🛒",
        "Eating Out" => "🍽️",
        "Entertainment" => "🎬",
        "Subscription Services" => "📺",
        "Education" => "📚",
        "Online Shopping" => "🛍️",
        "Savings" => "💰",
        "Investments" => "📈",
        "Travel" => "✈️",
        "Fitness" => "💪",
        "Miscellaneous" => "📦",
        _ => return None,
    })
}

/// Currency amounts are displayed with 2 decimals.
pub fn round_currency(value: f64) -> f64 {
    round_to(value, 100.0)
}

/// Percentage changes are displayed with 1 decimal.
pub fn round_percent(value: f64) -> f64 {
    round_to(value, 10.0)
}

// Half-way amounts like 1500.005 sit a few ulps below the true decimal tie
// in binary, so nudge before rounding to keep them rounding up.
fn round_to(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    let nudge = scaled.abs().max(1.0) * f64::EPSILON * 4.0;
    let adjusted = scaled + nudge.copysign(scaled);
    adjusted.round() / scale
}

pub fn normalize_insight(raw: RawUserInsight) -> UserInsight {
    let mut current_expenses = Vec::with_capacity(raw.current_expenses.len());
    for (key, amount) in &raw.current_expenses {
        let name = clean_category_name(key);
        let icon = category_icon(&name).unwrap_or(FALLBACK_ICON).to_string();
        current_expenses.push(ExpenseCategory {
            amount: round_currency(amount.max(0.0)),
            name,
            icon: Some(icon),
        });
    }

    let category_sum: f64 = current_expenses.iter().map(|c| c.amount).sum();
    let total_expenses = raw
        .total_expenses
        .map(round_currency)
        .unwrap_or_else(|| round_currency(category_sum));
    // Degenerate fallback: a missing income signals incomplete backend data
    // but must never block rendering.
    let income = raw.income.map(round_currency).unwrap_or(total_expenses);

    let behavior_insight = BehaviorInsight {
        behavior_type: raw.behavior_insight.behavior_type,
        risk_level: RiskLevel::from_label(&raw.behavior_insight.behavior_risk_level),
        description: raw.behavior_insight.behavior_details,
    };

    let financial_insight = FinancialInsight {
        health_level: HealthLevel::from_label(&raw.financial_insight.financial_health),
        risk_level: RiskLevel::from_label(&raw.financial_insight.financial_risk_level),
        health_score: raw.financial_insight.health_score,
        description: raw
            .financial_insight
            .financial_details
            .filter(|details| !details.trim().is_empty()),
    };

    let budget_recommendations = raw
        .expense_changes
        .iter()
        .map(|(key, change)| BudgetRecommendation {
            category: clean_category_name(key),
            current_amount: round_currency(change.current),
            recommended_amount: round_currency(change.recommended),
            percentage_change: round_percent(change.change_percent),
        })
        .collect();

    UserInsight {
        user_id: raw.user_id.to_string(),
        income,
        total_expenses: Some(total_expenses),
        current_expenses,
        behavior_insight,
        financial_insight,
        budget_recommendations,
        recommendation_text: raw.insight_text,
    }
}
