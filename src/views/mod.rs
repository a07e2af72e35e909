//! Stateless renderers over the normalized display model.

pub mod budget;
pub mod expenses;
pub mod insights;
pub mod recommendations;

use std::sync::OnceLock;

use anyhow::Result;
use numfmt::{Formatter, Precision};
use serde::Serialize;

pub fn render_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Formats a dollar amount with thousands separators, dropping insignificant
/// fraction digits: `5000.0` → `"$5,000"`, `3715.5` → `"$3,715.5"`.
pub fn format_usd(value: f64) -> String {
    static USD_FMT: OnceLock<Formatter> = OnceLock::new();

    let usd_fmt = USD_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("invalid currency prefix")
            .precision(Precision::Decimals(2))
    });

    if value < 0.0 {
        return format!("-{}", format_usd(value.abs()));
    }
    // Zero is hardcoded as "0" by numfmt, so it never reaches the formatter.
    if value == 0.0 {
        return "$0".to_string();
    }
    let mut formatted = usd_fmt.fmt_string(value);
    // numfmt keeps a fraction part even for whole amounts ("$5,000.0").
    if formatted.contains('.') {
        while formatted.ends_with('0') {
            formatted.pop();
        }
        if formatted.ends_with('.') {
            formatted.pop();
        }
    }
    formatted
}

/// Budget-change column formatting: explicit sign, one decimal, em dash for
/// no change.
pub fn format_signed_percent(change: f64) -> String {
    if change > 0.0 {
        format!("+{change:.1}%")
    } else if change < 0.0 {
        format!("{change:.1}%")
    } else {
        "—".to_string()
    }
}
