//! End-to-end tests of the backend client against an in-process mock API.

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use finesight::client::{self, FetchError};
use finesight::insight::normalize::normalize_insight;
use finesight::recommendation::extract::parse_recommendation_text;

fn sample_payload() -> serde_json::Value {
    json!({
        "user_id": 16,
        "current_expenses": {
            "Rent (USD)": 1500.005,
            "Eating Out (USD)": 320.0,
            "Space Tourism (USD)": 42.0
        },
        "behavior_insight": {
            "behavior_type": "Impulsive",
            "behavior_risk_level": "moderate",
            "behavior_details": "Frequent unplanned purchases."
        },
        "financial_insight": {
            "financial_health": "At Risk",
            "health_score": 41.0,
            "financial_risk_level": "high",
            "financial_details": "Low savings buffer."
        },
        "recommended_expenses": {
            "Rent (USD)": 1500.0,
            "Eating Out (USD)": 200.0
        },
        "expense_changes": {
            "Eating Out (USD)": {
                "current": 320.0,
                "recommended": 200.0,
                "change_percent": -37.5,
                "change_amount": -120.0
            }
        },
        "insight_text": "Hello! Here's your personalized financial insight for next month:\n- Spending behavior: 'Impulsive' (Risk Level: Medium)\n- Eating Out (USD): decrease from 320.00 USD to 200.00 USD (-37.5%) to reduce discretionary spending.",
        "income": 5000.0
    })
}

async fn user_insight(Path(user_id): Path<String>) -> axum::response::Response {
    match user_id.as_str() {
        "16" => Json(sample_payload()).into_response(),
        "500" => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "database offline" })),
        )
            .into_response(),
        "teapot" => (
            StatusCode::IM_A_TEAPOT,
            Json(json!({ "detail": "short and stout" })),
        )
            .into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("User ID {user_id} not found in database") })),
        )
            .into_response(),
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/", get(|| async { Json(json!({ "message": "ok" })) }))
        .route("/user_insight/:user_id", get(user_insight));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock backend");
    let addr = listener.local_addr().expect("missing local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend died");
    });
    format!("http://{addr}")
}

/// A base URL on a port nothing listens on.
async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe socket");
    let addr = listener.local_addr().expect("missing local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn fetches_and_normalizes_a_known_user() {
    let base_url = spawn_backend().await;
    let raw = client::fetch_user_insight(&base_url, "16")
        .await
        .expect("fetch failed");
    assert_eq!(raw.user_id, 16);
    assert_eq!(raw.expense_changes.len(), 1);

    let insight = normalize_insight(raw);
    assert_eq!(insight.user_id, "16");
    assert_eq!(insight.income, 5000.0);

    let rent = insight
        .current_expenses
        .iter()
        .find(|c| c.name == "Rent")
        .expect("missing Rent");
    assert_eq!(rent.amount, 1500.01);
    assert_eq!(rent.icon.as_deref(), Some("🏠"));

    let parsed = parse_recommendation_text(&insight.recommendation_text);
    assert_eq!(parsed.behavior_type, "Impulsive");
    assert_eq!(parsed.decreases().len(), 1);
}

#[tokio::test]
async fn missing_users_map_to_not_found() {
    let base_url = spawn_backend().await;
    let err = client::fetch_user_insight(&base_url, "9999")
        .await
        .expect_err("expected a 404");
    match err {
        FetchError::NotFound { user_id } => assert_eq!(user_id, "9999"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_carry_the_backend_detail() {
    let base_url = spawn_backend().await;
    let err = client::fetch_user_insight(&base_url, "500")
        .await
        .expect_err("expected a 500");
    match err {
        FetchError::Server { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail.as_deref(), Some("database offline"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn other_statuses_map_to_unknown() {
    let base_url = spawn_backend().await;
    let err = client::fetch_user_insight(&base_url, "teapot")
        .await
        .expect_err("expected a 418");
    match err {
        FetchError::Unknown { message } => assert_eq!(message, "short and stout"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_names_the_base_url() {
    let base_url = dead_base_url().await;
    let err = client::fetch_user_insight(&base_url, "16")
        .await
        .expect_err("expected a network error");
    assert!(matches!(err, FetchError::Network { .. }));
    assert!(
        err.to_string().contains(&base_url),
        "message should name {base_url}: {err}"
    );
}

#[tokio::test]
async fn health_check_reflects_backend_reachability() {
    let base_url = spawn_backend().await;
    assert!(client::check_health(&base_url).await);

    let dead = dead_base_url().await;
    assert!(!client::check_health(&dead).await);
}
