//! HTTP access to the insight backend.
//!
//! One typed operation per backend route: `fetch_user_insight` for
//! `GET /user_insight/{user_id}` and `check_health` for the root probe.
//! Transport and status failures are folded into [`FetchError`] so callers
//! never see raw `reqwest` errors.

use std::collections::BTreeMap;
use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 12;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 6;

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("finesight/0.1")
        .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .build()
        .expect("failed to build HTTP client")
});

/// Failure modes of a backend fetch.
///
/// `NotFound` is an expected outcome (the user typed an unknown ID), not an
/// application error. The `Display` impl of each variant is the user-visible
/// banner text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("User ID {user_id} not found. Please check the User ID and try again.")]
    NotFound { user_id: String },
    #[error("The server ran into an error (HTTP {status}). Please try again later.")]
    Server { status: u16, detail: Option<String> },
    #[error("Unable to connect to the server. Please ensure the backend is running at {base_url}")]
    Network {
        base_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{message}")]
    Unknown { message: String },
}

/// Raw `/user_insight/{user_id}` payload, mirroring the backend field names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUserInsight {
    pub user_id: i64,
    pub current_expenses: BTreeMap<String, f64>,
    pub behavior_insight: RawBehaviorInsight,
    pub financial_insight: RawFinancialInsight,
    #[serde(default)]
    pub recommended_expenses: BTreeMap<String, f64>,
    #[serde(default)]
    pub expense_changes: BTreeMap<String, RawExpenseChange>,
    pub insight_text: String,
    #[serde(default)]
    pub income: Option<f64>,
    #[serde(default)]
    pub total_expenses: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawBehaviorInsight {
    pub behavior_type: String,
    pub behavior_risk_level: String,
    #[serde(default)]
    pub behavior_details: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFinancialInsight {
    pub financial_health: String,
    pub health_score: f64,
    pub financial_risk_level: String,
    #[serde(default)]
    pub financial_details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawExpenseChange {
    pub current: f64,
    pub recommended: f64,
    pub change_percent: f64,
    #[serde(default)]
    pub change_amount: f64,
}

pub async fn fetch_user_insight(
    base_url: &str,
    user_id: &str,
) -> Result<RawUserInsight, FetchError> {
    let url = format!("{}/user_insight/{user_id}", base_url.trim_end_matches('/'));
    debug!(%url, "requesting user insight");

    let response = HTTP_CLIENT
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|source| FetchError::Network {
            base_url: base_url.to_string(),
            source,
        })?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(FetchError::NotFound {
            user_id: user_id.to_string(),
        });
    }
    if status.is_server_error() {
        return Err(FetchError::Server {
            status: status.as_u16(),
            detail: read_error_detail(response).await,
        });
    }
    if !status.is_success() {
        let detail = read_error_detail(response)
            .await
            .unwrap_or_else(|| format!("request failed with HTTP {status}"));
        return Err(FetchError::Unknown { message: detail });
    }

    response
        .json::<RawUserInsight>()
        .await
        .map_err(|err| FetchError::Unknown {
            message: format!("unexpected response body: {err}"),
        })
}

/// The backend is healthy iff the root route answers with any 2xx.
pub async fn check_health(base_url: &str) -> bool {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    match HTTP_CLIENT
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .await
    {
        Ok(response) => response.status().is_success(),
        Err(err) => {
            debug!(%url, "health probe failed: {err}");
            false
        }
    }
}

// FastAPI error bodies carry a `detail` field.
async fn read_error_detail(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    let value: serde_json::Value = serde_json::from_str(&body).ok()?;
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn not_found_message_points_at_the_id() {
        let err = FetchError::NotFound {
            user_id: "42".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("42"));
        assert!(message.contains("check the User ID"));
    }

    #[test]
    fn server_error_message_is_generic() {
        let err = FetchError::Server {
            status: 503,
            detail: Some("database offline".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("503"));
        assert!(message.contains("try again later"));
    }

    #[test]
    fn unknown_error_passes_the_message_through() {
        let err = FetchError::Unknown {
            message: "request failed with HTTP 418 I'm a teapot".to_string(),
        };
        assert_eq!(err.to_string(), "request failed with HTTP 418 I'm a teapot");
    }
}
