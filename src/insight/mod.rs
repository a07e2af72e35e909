pub mod normalize;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative risk tier shared by behavioral and financial classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskLevel {
    /// Maps a free-form backend label onto the closed tier set. Total:
    /// unrecognized labels land on `Medium` rather than failing.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "low" => Self::Low,
            "medium" | "moderate" => Self::Medium,
            "high" => Self::High,
            "very high" | "critical" => Self::VeryHigh,
            _ => Self::Medium,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Poor,
    Fair,
    Good,
    Excellent,
    Critical,
}

impl HealthLevel {
    /// Total mapping from backend health labels; unknown labels fall back to
    /// `Fair`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "at risk" | "poor" => Self::Poor,
            "moderate" | "fair" => Self::Fair,
            "healthy" | "good" => Self::Good,
            "excellent" => Self::Excellent,
            _ => Self::Fair,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for HealthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One spending category as displayed on the expenses view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviorInsight {
    pub behavior_type: String,
    pub risk_level: RiskLevel,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialInsight {
    pub health_level: HealthLevel,
    pub risk_level: RiskLevel,
    pub health_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-category budget adjustment. `percentage_change` carries the backend's
/// `(recommended - current) / current * 100`, so its sign always matches the
/// direction of the amount delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    pub category: String,
    pub current_amount: f64,
    pub recommended_amount: f64,
    pub percentage_change: f64,
}

/// The whole analysis for one user. Built from a single backend response and
/// held as the only piece of session state; replaced wholesale on every
/// successful fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInsight {
    pub user_id: String,
    pub income: f64,
    pub total_expenses: Option<f64>,
    pub current_expenses: Vec<ExpenseCategory>,
    pub behavior_insight: BehaviorInsight,
    pub financial_insight: FinancialInsight,
    pub budget_recommendations: Vec<BudgetRecommendation>,
    pub recommendation_text: String,
}

impl UserInsight {
    /// Total expenses, summing the category amounts when the backend did not
    /// supply a total.
    pub fn total_expenses_value(&self) -> f64 {
        self.total_expenses
            .unwrap_or_else(|| self.current_expenses.iter().map(|c| c.amount).sum())
    }

    pub fn sample(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            income: 5000.0,
            total_expenses: Some(3715.0),
            current_expenses: vec![
                ExpenseCategory {
                    name: "Rent".to_string(),
                    amount: 1500.0,
                    icon: Some("🏠".to_string()),
                },
                ExpenseCategory {
                    name: "Groceries".to_string(),
                    amount: 640.0,
                    icon: Some("🛒".to_string()),
                },
                ExpenseCategory {
                    name: "Eating Out".to_string(),
                    amount: 320.0,
                    icon: Some("🍽️".to_string()),
                },
                ExpenseCategory {
                    name: "Savings".to_string(),
                    amount: 400.0,
                    icon: Some("💰".to_string()),
                },
            ],
            behavior_insight: BehaviorInsight {
                behavior_type: "Impulsive Spender".to_string(),
                risk_level: RiskLevel::Medium,
                description: "Frequent unplanned purchases across discretionary categories."
                    .to_string(),
            },
            financial_insight: FinancialInsight {
                health_level: HealthLevel::Fair,
                risk_level: RiskLevel::Medium,
                health_score: 62.0,
                description: None,
            },
            budget_recommendations: vec![BudgetRecommendation {
                category: "Eating Out".to_string(),
                current_amount: 320.0,
                recommended_amount: 200.0,
                percentage_change: -37.5,
            }],
            recommendation_text: String::new(),
        }
    }
}
