//! Profile routes: account info, company update, password management.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
};
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::routes::respond::{internal_error, not_found};
use crate::{AppState, middleware::AuthProfile};
use caixa_core::auth::{check_credentials, hash_password};
use caixa_db::{ProfileRepository, SessionRepository};
use caixa_shared::TaxId;
use caixa_shared::auth::{ChangePasswordRequest, ProfileInfo, UpdateProfileRequest};

/// Creates the profile routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile))
        .route("/profile", patch(update_profile))
        .route("/profile/password", put(change_password))
}

/// GET /profile - Account info for the authenticated profile.
async fn get_profile(State(state): State<AppState>, auth: AuthProfile) -> impl IntoResponse {
    let profile_repo = ProfileRepository::new((*state.db).clone());

    match profile_repo.find_by_id(auth.profile_id()).await {
        Ok(Some(p)) => (
            StatusCode::OK,
            Json(json!({
                "profile": ProfileInfo {
                    id: p.id,
                    tax_id: p.tax_id,
                    company_name: p.company_name,
                }
            })),
        )
            .into_response(),
        Ok(None) => not_found("Profile"),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            internal_error("An unexpected error occurred")
        }
    }
}

/// PATCH /profile - Update the company name.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthProfile,
    Json(payload): Json<UpdateProfileRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": e.to_string() })),
        )
            .into_response();
    }

    let profile_repo = ProfileRepository::new((*state.db).clone());
    match profile_repo
        .update_company_name(auth.profile_id(), payload.company_name.trim())
        .await
    {
        Ok(p) => (
            StatusCode::OK,
            Json(json!({
                "profile": ProfileInfo {
                    id: p.id,
                    tax_id: p.tax_id,
                    company_name: p.company_name,
                }
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to update company name");
            internal_error("An unexpected error occurred")
        }
    }
}

/// PUT /profile/password - Verify the current password, store a new one.
///
/// The verification goes through the same credential bridge as login, so a
/// profile still holding a legacy digest can change its password directly;
/// either way the stored representation afterwards is Argon2id. All live
/// sessions are revoked so old refresh tokens die with the old password.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthProfile,
    Json(payload): Json<ChangePasswordRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": e.to_string() })),
        )
            .into_response();
    }

    let profile_repo = ProfileRepository::new((*state.db).clone());
    let profile = match profile_repo.find_by_id(auth.profile_id()).await {
        Ok(Some(p)) => p,
        Ok(None) => return not_found("Profile"),
        Err(e) => {
            error!(error = %e, "Database error loading profile");
            return internal_error("An unexpected error occurred");
        }
    };

    // Stored tax-IDs are normalized digits; failing to parse one back means
    // the row is corrupt, not that the caller did anything wrong.
    let tax_id = match TaxId::parse(&profile.tax_id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, profile_id = %profile.id, "Stored tax-ID failed to parse");
            return internal_error("An unexpected error occurred");
        }
    };

    let check = match check_credentials(
        &profile.password_hash,
        &payload.current_password,
        &tax_id,
    ) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An unexpected error occurred");
        }
    };

    if !check.is_match() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_credentials",
                "message": "Incorrect tax-ID or password"
            })),
        )
            .into_response();
    }

    let new_hash = match hash_password(&payload.new_password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash new password");
            return internal_error("An unexpected error occurred");
        }
    };

    if let Err(e) = profile_repo
        .update_password_hash(profile.id, &new_hash)
        .await
    {
        error!(error = %e, "Failed to update password hash");
        return internal_error("An unexpected error occurred");
    }

    let session_repo = SessionRepository::new((*state.db).clone());
    match session_repo.revoke_all_for_profile(profile.id).await {
        Ok(revoked) => {
            info!(profile_id = %profile.id, revoked, "Password changed");
        }
        Err(e) => {
            // The password did change; failing to revoke is logged, not fatal.
            error!(error = %e, "Failed to revoke sessions after password change");
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "message": "Password updated" })),
    )
        .into_response()
}
