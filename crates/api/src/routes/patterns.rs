//! Pattern routes: the saved description/category suggestions.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::error;
use uuid::Uuid;

use crate::routes::respond::{internal_error, not_found};
use crate::{AppState, middleware::AuthProfile};
use caixa_core::entry::EntryType;
use caixa_db::PatternRepository;
use caixa_db::entities::patterns;
use caixa_db::entities::sea_orm_active_enums::PatternField;

/// Creates the pattern routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patterns", get(list_patterns))
        .route("/patterns", post(create_pattern))
        .route("/patterns/{pattern_id}", delete(delete_pattern))
}

/// Query parameters for listing patterns.
#[derive(Debug, Deserialize)]
pub struct ListPatternsQuery {
    /// Restrict to one entry type.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
}

/// Request body for saving a pattern.
#[derive(Debug, Deserialize)]
pub struct CreatePatternRequest {
    /// Entry type the suggestion applies to.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Which field the suggestion fills.
    pub field: PatternField,
    /// Suggested text.
    pub value: String,
}

/// Response for a pattern.
#[derive(Debug, Serialize)]
pub struct PatternResponse {
    /// Pattern ID.
    pub id: Uuid,
    /// Entry type.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Field kind.
    pub field: PatternField,
    /// Suggested text.
    pub value: String,
}

impl From<patterns::Model> for PatternResponse {
    fn from(model: patterns::Model) -> Self {
        Self {
            id: model.id,
            entry_type: model.entry_type.into(),
            field: model.field,
            value: model.value,
        }
    }
}

/// GET /patterns - List the profile's saved patterns.
async fn list_patterns(
    State(state): State<AppState>,
    auth: AuthProfile,
    Query(query): Query<ListPatternsQuery>,
) -> impl IntoResponse {
    let entry_type = match query.entry_type.as_deref() {
        None => None,
        Some(raw) => match EntryType::from_str(raw) {
            Ok(t) => Some(t.into()),
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

    let repo = PatternRepository::new((*state.db).clone());
    match repo.list(auth.profile_id(), entry_type).await {
        Ok(rows) => {
            let data: Vec<PatternResponse> = rows.into_iter().map(PatternResponse::from).collect();
            (StatusCode::OK, Json(json!({ "data": data }))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list patterns");
            internal_error("An unexpected error occurred")
        }
    }
}

/// POST /patterns - Save a suggestion.
async fn create_pattern(
    State(state): State<AppState>,
    auth: AuthProfile,
    Json(payload): Json<CreatePatternRequest>,
) -> impl IntoResponse {
    let value = payload.value.trim();
    if value.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "value must not be empty"
            })),
        )
            .into_response();
    }

    let repo = PatternRepository::new((*state.db).clone());
    match repo
        .create(
            auth.profile_id(),
            payload.entry_type.into(),
            payload.field,
            value,
        )
        .await
    {
        Ok(row) => (
            StatusCode::CREATED,
            Json(json!({ "data": PatternResponse::from(row) })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create pattern");
            internal_error("An unexpected error occurred")
        }
    }
}

/// DELETE /patterns/{id} - Remove a suggestion.
async fn delete_pattern(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(pattern_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = PatternRepository::new((*state.db).clone());
    match repo.delete(auth.profile_id(), pattern_id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found("Pattern"),
        Err(e) => {
            error!(error = %e, "Failed to delete pattern");
            internal_error("An unexpected error occurred")
        }
    }
}

