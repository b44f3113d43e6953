//! Dashboard routes: summary cards and the chart series.
//!
//! Both endpoints load the owner's rows for the requested range and
//! aggregate in memory through `caixa_core`; nothing is precomputed or
//! cached server-side.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::error;

use crate::routes::respond::internal_error;
use crate::{AppState, middleware::AuthProfile};
use caixa_core::chart::{ChartEntry, ChartFilter, DateField, aggregate_daily};
use caixa_core::dashboard::{SummaryEntry, summarize};
use caixa_core::entry::EntryType;
use caixa_db::TransactionRepository;
use caixa_db::entities::transactions;

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(get_summary))
        .route("/dashboard/chart", get(get_chart))
}

/// Query parameters for the summary cards.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    /// Inclusive range start (due date).
    pub from: Option<NaiveDate>,
    /// Inclusive range end (due date).
    pub to: Option<NaiveDate>,
}

/// Query parameters for the chart series.
#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    /// Which date field buckets the series (`due_date` default).
    pub date_field: Option<String>,
    /// Inclusive range start.
    pub from: Option<NaiveDate>,
    /// Inclusive range end.
    pub to: Option<NaiveDate>,
    /// Only entries of this type.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Only entries in this category.
    pub category: Option<String>,
    /// Only entries whose description contains this.
    pub q: Option<String>,
}

/// GET /dashboard/summary - Income/expense totals and status counts.
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthProfile,
    Query(query): Query<SummaryQuery>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());
    let rows = match repo
        .list_range(auth.profile_id(), DateField::DueDate, query.from, query.to)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Failed to load entries for summary");
            return internal_error("An unexpected error occurred");
        }
    };

    let entries: Vec<SummaryEntry> = rows
        .into_iter()
        .map(|m| SummaryEntry {
            entry_type: m.entry_type.into(),
            amount: m.amount,
            status: m.status.into(),
            due_date: m.due_date,
        })
        .collect();

    let summary = summarize(&entries, Utc::now().date_naive());
    (StatusCode::OK, Json(json!({ "summary": summary }))).into_response()
}

/// GET /dashboard/chart - Daily income/expense series.
async fn get_chart(
    State(state): State<AppState>,
    auth: AuthProfile,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    let date_field = match query.date_field.as_deref() {
        None => DateField::default(),
        Some(raw) => match DateField::from_str(raw) {
            Ok(f) => f,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_filter",
                        "message": "date_field must be 'due_date' or 'created_at'"
                    })),
                )
                    .into_response();
            }
        },
    };

    let entry_type = match query.entry_type.as_deref() {
        None => None,
        Some(raw) => match EntryType::from_str(raw) {
            Ok(t) => Some(t),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "invalid_filter",
                        "message": "type must be 'income' or 'expense'"
                    })),
                )
                    .into_response();
            }
        },
    };

    // Load by date range only; the remaining filters run in memory with the
    // aggregation itself.
    let repo = TransactionRepository::new((*state.db).clone());
    let rows = match repo
        .list_range(auth.profile_id(), date_field, query.from, query.to)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            error!(error = %e, "Failed to load entries for chart");
            return internal_error("An unexpected error occurred");
        }
    };

    let entries: Vec<ChartEntry> = rows.into_iter().map(chart_entry).collect();
    let filter = ChartFilter {
        date_field,
        from: query.from,
        to: query.to,
        entry_type,
        category: query.category,
        description: query.q,
    };

    let series = aggregate_daily(&entries, &filter);
    (StatusCode::OK, Json(json!({ "series": series }))).into_response()
}

fn chart_entry(model: transactions::Model) -> ChartEntry {
    ChartEntry {
        entry_type: model.entry_type.into(),
        amount: model.amount,
        due_date: model.due_date,
        created_at: model.created_at.date_naive(),
        category: model.category,
        description: model.description,
    }
}

