//! Transaction routes: list, create (with installment expansion), update,
//! delete.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::routes::respond::{bad_request, internal_error, not_found};
use crate::{AppState, middleware::AuthProfile};
use caixa_core::chart::DateField;
use caixa_core::entry::{EntryStatus, EntryType, PaymentMethod, effective_status};
use caixa_db::TransactionRepository;
use caixa_db::entities::transactions;
use caixa_db::repositories::{CreateTransactionInput, TransactionError, TransactionFilter, UpdateTransactionInput};

/// Upper bound on installments for one entry (ten years of months).
const MAX_INSTALLMENTS: u32 = 120;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{transaction_id}", patch(update_transaction))
        .route("/transactions/{transaction_id}", delete(delete_transaction))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by effective status.
    pub status: Option<String>,
    /// Filter by entry type.
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    /// Filter by category (case-insensitive equality).
    pub category: Option<String>,
    /// Filter by description substring.
    pub q: Option<String>,
    /// Which date field the range applies to (`due_date` | `created_at`).
    pub date_field: Option<String>,
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<NaiveDate>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<NaiveDate>,
    /// Page number (1-indexed).
    pub page: Option<u64>,
    /// Page size (default: 50, max: 100).
    pub limit: Option<u64>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// Entry type.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Description.
    pub description: String,
    /// Amount (per installment; installments share it).
    pub amount: Decimal,
    /// Payment method (`lump_sum` default).
    pub payment_method: Option<String>,
    /// Number of installments (only meaningful for installment entries).
    pub installment_count: Option<u32>,
    /// Due date of the first (or only) installment.
    pub due_date: NaiveDate,
    /// Category label.
    pub category: String,
}

/// Request body for updating a transaction.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New status (`pending` or `paid`).
    pub status: Option<String>,
}

/// Response for a transaction row.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// Entry type.
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    /// Description.
    pub description: String,
    /// Amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: &'static str,
    /// Total installments in this set.
    pub installment_count: i32,
    /// 1-based index within the set.
    pub installment_number: i32,
    /// Due date.
    pub due_date: NaiveDate,
    /// Category.
    pub category: String,
    /// Effective status (overdue derived at read time).
    pub status: &'static str,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl TransactionResponse {
    fn from_model(model: transactions::Model, today: NaiveDate) -> Self {
        let stored: EntryStatus = model.status.into();
        let status = effective_status(stored, model.due_date, today);

        Self {
            id: model.id,
            entry_type: EntryType::from(model.entry_type).as_str(),
            description: model.description,
            amount: model.amount,
            payment_method: PaymentMethod::from(model.payment_method).as_str(),
            installment_count: model.installment_count,
            installment_number: model.installment_number,
            due_date: model.due_date,
            category: model.category,
            status: status.as_str(),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /transactions - List transactions with filters and pagination.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthProfile,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let filter = match build_filter(&query) {
        Ok(f) => f,
        Err(response) => return response,
    };

    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 100);
    let today = Utc::now().date_naive();

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list(auth.profile_id(), &filter, today, page, limit).await {
        Ok((rows, total)) => {
            let data: Vec<TransactionResponse> = rows
                .into_iter()
                .map(|m| TransactionResponse::from_model(m, today))
                .collect();
            (
                StatusCode::OK,
                Json(json!({
                    "data": data,
                    "meta": { "page": page, "limit": limit, "total": total }
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            internal_error("An unexpected error occurred")
        }
    }
}

/// POST /transactions - Create an entry, expanding installments.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthProfile,
    Json(payload): Json<CreateTransactionRequest>,
) -> impl IntoResponse {
    let Ok(entry_type) = EntryType::from_str(&payload.entry_type) else {
        return bad_request("invalid_type", "type must be 'income' or 'expense'");
    };

    let payment_method = match payload.payment_method.as_deref() {
        None => PaymentMethod::LumpSum,
        Some(raw) => match PaymentMethod::from_str(raw) {
            Ok(m) => m,
            Err(_) => {
                return bad_request(
                    "invalid_payment_method",
                    "payment_method must be 'lump_sum' or 'installment'",
                );
            }
        },
    };

    let description = payload.description.trim();
    if description.is_empty() {
        return bad_request("validation_error", "description must not be empty");
    }
    let category = payload.category.trim();
    if category.is_empty() {
        return bad_request("validation_error", "category must not be empty");
    }
    if payload.amount <= Decimal::ZERO {
        return bad_request("validation_error", "amount must be positive");
    }

    let installment_count = payload.installment_count.unwrap_or(1);
    if installment_count == 0 || installment_count > MAX_INSTALLMENTS {
        return bad_request(
            "validation_error",
            "installment_count must be between 1 and 120",
        );
    }

    let input = CreateTransactionInput {
        entry_type,
        description: description.to_string(),
        amount: payload.amount,
        payment_method,
        installment_count,
        due_date: payload.due_date,
        category: category.to_string(),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.create(auth.profile_id(), input).await {
        Ok(rows) => {
            info!(
                profile_id = %auth.profile_id(),
                count = rows.len(),
                "Created transaction rows"
            );
            let today = Utc::now().date_naive();
            let data: Vec<TransactionResponse> = rows
                .into_iter()
                .map(|m| TransactionResponse::from_model(m, today))
                .collect();
            (StatusCode::CREATED, Json(json!({ "data": data }))).into_response()
        }
        Err(TransactionError::Installment(e)) => {
            bad_request("invalid_installments", &e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            internal_error("An unexpected error occurred")
        }
    }
}

/// PATCH /transactions/{id} - Update an entry's editable fields.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(transaction_id): Path<Uuid>,
    Json(payload): Json<UpdateTransactionRequest>,
) -> impl IntoResponse {
    let status = match payload.status.as_deref() {
        None => None,
        Some(raw) => match EntryStatus::from_str(raw) {
            Ok(EntryStatus::Overdue) => {
                return bad_request(
                    "invalid_status",
                    "overdue is derived from the due date and cannot be set",
                );
            }
            Ok(s) => Some(s),
            Err(_) => {
                return bad_request("invalid_status", "status must be 'pending' or 'paid'");
            }
        },
    };

    if let Some(amount) = payload.amount
        && amount <= Decimal::ZERO
    {
        return bad_request("validation_error", "amount must be positive");
    }

    let input = UpdateTransactionInput {
        description: payload.description.map(|s| s.trim().to_string()),
        category: payload.category.map(|s| s.trim().to_string()),
        due_date: payload.due_date,
        amount: payload.amount,
        status,
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.update(auth.profile_id(), transaction_id, input).await {
        Ok(model) => {
            let today = Utc::now().date_naive();
            (
                StatusCode::OK,
                Json(json!({ "data": TransactionResponse::from_model(model, today) })),
            )
                .into_response()
        }
        Err(TransactionError::NotFound(_)) => not_found("Transaction"),
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            internal_error("An unexpected error occurred")
        }
    }
}

/// DELETE /transactions/{id} - Delete an entry.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthProfile,
    Path(transaction_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());
    match repo.delete(auth.profile_id(), transaction_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(TransactionError::NotFound(_)) => not_found("Transaction"),
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            internal_error("An unexpected error occurred")
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn build_filter(
    query: &ListTransactionsQuery,
) -> Result<TransactionFilter, axum::response::Response> {
    let status = match query.status.as_deref() {
        None => None,
        Some(raw) => Some(EntryStatus::from_str(raw).map_err(|_| {
            bad_request(
                "invalid_filter",
                "status must be 'pending', 'paid', or 'overdue'",
            )
        })?),
    };

    let entry_type = match query.entry_type.as_deref() {
        None => None,
        Some(raw) => Some(EntryType::from_str(raw).map_err(|_| {
            bad_request("invalid_filter", "type must be 'income' or 'expense'")
        })?),
    };

    let date_field = match query.date_field.as_deref() {
        None => DateField::default(),
        Some(raw) => DateField::from_str(raw).map_err(|_| {
            bad_request(
                "invalid_filter",
                "date_field must be 'due_date' or 'created_at'",
            )
        })?,
    };

    Ok(TransactionFilter {
        status,
        entry_type,
        category: query.category.clone(),
        description: query.q.clone(),
        date_field,
        from: query.from,
        to: query.to,
    })
}

