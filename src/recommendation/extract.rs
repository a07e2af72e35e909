//! Line-oriented extractor for the backend's advisory prose.
//!
//! The backend emits this one field as loosely templated natural language, so
//! the structured facts have to be scraped back out with pattern matching.
//! The extractor is total: any line that matches no known shape is skipped
//! (and logged, to surface template drift), and a section that never appears
//! leaves its default in place. Arbitrary input therefore always yields a
//! fully populated [`ParsedRecommendation`].

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::insight::normalize::clean_category_name;
use crate::recommendation::{CategoryChange, ChangeDirection, ParsedRecommendation};
use crate::views::format_usd;

const GREETING_PREFIX: &str = "Hello!";
const NOTE_PREFIX: &str = "* Note:";
const CLOSING_MARKER: &str = "These recommendations aim";
const SCALING_MARKER: &str = "adjusted to fit";

static BEHAVIOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Spending behavior: '([^']*)' \(Risk Level: ([^)]+)\)")
        .expect("invalid behavior pattern")
});

static HEALTH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Financial health: '([^']*)' \(Score: ([^)]+)\)").expect("invalid health pattern")
});

static INCOME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Total Income: \$([0-9][0-9,]*(?:\.[0-9]+)?)").expect("invalid income pattern"));

static EXPENSES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Total Expenses: \$([0-9][0-9,]*(?:\.[0-9]+)?)").expect("invalid expenses pattern")
});

static BUDGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Recommended Budget: \$([0-9][0-9,]*(?:\.[0-9]+)?)")
        .expect("invalid budget pattern")
});

static CHANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^- (?P<category>.+?): (?P<direction>increase|decrease) from (?P<from>[0-9][0-9,]*(?:\.[0-9]+)?) USD to (?P<to>[0-9][0-9,]*(?:\.[0-9]+)?) USD \((?P<percent>[+-]?[0-9]+(?:\.[0-9]+)?)%\) to (?P<reason>.+?)\.?$",
    )
    .expect("invalid category change pattern")
});

/// Recovers structured fields from the advisory text. Never fails; unmatched
/// sections keep their defaults.
pub fn parse_recommendation_text(text: &str) -> ParsedRecommendation {
    let mut parsed = ParsedRecommendation::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        classify_line(line, &mut parsed);
    }

    parsed
}

// Each line belongs to exactly one class, checked in a fixed priority order.
fn classify_line(line: &str, parsed: &mut ParsedRecommendation) {
    if line.starts_with(GREETING_PREFIX) {
        parsed.greeting = line.to_string();
    } else if let Some(caps) = BEHAVIOR_RE.captures(line) {
        parsed.behavior_type = caps[1].to_string();
        parsed.behavior_risk = caps[2].trim().to_string();
    } else if let Some(caps) = HEALTH_RE.captures(line) {
        parsed.health_level = caps[1].to_string();
        parsed.health_score = caps[2].trim().to_string();
    } else if let Some(caps) = INCOME_RE.captures(line) {
        parsed.income = reformat_dollars(&caps[1]);
    } else if let Some(caps) = EXPENSES_RE
        .captures(line)
        // "Recommended" on the same line means this is the budget summary,
        // not the expenses summary.
        .filter(|_| !line.contains("Recommended"))
    {
        parsed.total_expenses = reformat_dollars(&caps[1]);
    } else if let Some(caps) = BUDGET_RE.captures(line) {
        parsed.recommended_budget = reformat_dollars(&caps[1]);
    } else if line.contains('⚠') && line.contains(SCALING_MARKER) {
        parsed.scaled_to_income = true;
    } else if line.starts_with("- ")
        && (line.contains("increase from") || line.contains("decrease from"))
    {
        match CHANGE_RE.captures(line) {
            Some(caps) => parsed.changes.push(CategoryChange {
                category: clean_category_name(&caps["category"]),
                from: reformat_dollars(&caps["from"]),
                to: reformat_dollars(&caps["to"]),
                percent: format!("{}%", &caps["percent"]),
                direction: if &caps["direction"] == "increase" {
                    ChangeDirection::Increase
                } else {
                    ChangeDirection::Decrease
                },
                reason: caps["reason"].trim().to_string(),
            }),
            None => debug!(line, "category change line did not match the expected template"),
        }
    } else if let Some(rest) = line.strip_prefix(NOTE_PREFIX) {
        parsed.notes.push(rest.trim().to_string());
    } else if line.contains(CLOSING_MARKER) {
        parsed.closing = line.to_string();
    } else {
        debug!(line, "ignoring unrecognized recommendation line");
    }
}

fn reformat_dollars(raw: &str) -> String {
    match raw.replace(',', "").parse::<f64>() {
        Ok(value) => format_usd(value),
        Err(_) => format!("${raw}"),
    }
}
