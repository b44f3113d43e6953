//! Authentication routes: register, login, token refresh, logout.
//!
//! Login verifies against whichever password representation the profile
//! currently holds and transparently upgrades legacy digests to Argon2id on
//! the first successful match.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::USER_AGENT},
    response::IntoResponse,
    routing::post,
};
use chrono::{Duration, Utc};
use serde_json::json;
use tracing::{error, info};
use validator::Validate;

use crate::AppState;
use crate::routes::respond::internal_error;
use caixa_core::auth::{CredentialCheck, check_credentials, hash_password};
use caixa_db::{ProfileRepository, SessionRepository, repositories::ProfileError};
use caixa_shared::TaxId;
use caixa_shared::auth::{
    LoginRequest, LoginResponse, LogoutRequest, ProfileInfo, RefreshRequest, RegisterRequest,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
}

/// POST /auth/register - Create a new company profile.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(e) = payload.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "validation_error", "message": e.to_string() })),
        )
            .into_response();
    }

    let Ok(tax_id) = TaxId::parse(&payload.tax_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_tax_id",
                "message": "The tax-ID is not a valid CNPJ or CPF"
            })),
        )
            .into_response();
    };

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return internal_error("An error occurred during registration");
        }
    };

    let profile_repo = ProfileRepository::new((*state.db).clone());
    let profile = match profile_repo
        .create(&tax_id, payload.company_name.trim(), &password_hash)
        .await
    {
        Ok(p) => p,
        Err(ProfileError::TaxIdTaken) => {
            // The one distinguished failure: duplicate registration.
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "tax_id_taken",
                    "message": "This tax-ID is already registered"
                })),
            )
                .into_response();
        }
        Err(ProfileError::Database(e)) => {
            error!(error = %e, "Failed to create profile");
            return internal_error("An error occurred during registration");
        }
    };

    info!(profile_id = %profile.id, "New profile registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "profile": ProfileInfo {
                id: profile.id,
                tax_id: profile.tax_id,
                company_name: profile.company_name,
            }
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate a profile and return tokens.
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let profile_repo = ProfileRepository::new((*state.db).clone());

    // An unparsable tax-ID cannot exist; report it exactly like a failed
    // lookup so callers cannot probe which identifiers are registered.
    let Ok(tax_id) = TaxId::parse(&payload.tax_id) else {
        return invalid_credentials();
    };

    let profile = match profile_repo.find_by_tax_id(&tax_id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            info!("Login attempt for unknown tax-ID");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error("An error occurred during login");
        }
    };

    let check = match check_credentials(&profile.password_hash, &payload.password, &tax_id) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error("An error occurred during login");
        }
    };

    match check {
        CredentialCheck::Match => {}
        CredentialCheck::MatchNeedsUpgrade => {
            // Transparent upgrade: rewrite the legacy digest as Argon2id.
            let strong = match hash_password(&payload.password) {
                Ok(h) => h,
                Err(e) => {
                    error!(error = %e, "Failed to hash password for upgrade");
                    return internal_error("An error occurred during login");
                }
            };
            if let Err(e) = profile_repo.update_password_hash(profile.id, &strong).await {
                error!(error = %e, "Failed to upgrade legacy password hash");
                return internal_error("An error occurred during login");
            }
            info!(profile_id = %profile.id, "Upgraded legacy password hash");
        }
        CredentialCheck::Mismatch => {
            info!(profile_id = %profile.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(profile.id, &profile.tax_id)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during login");
        }
    };

    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(profile.id, &profile.tax_id)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error("An error occurred during login");
        }
    };

    // Persist the session so the refresh token can be revoked.
    let session_repo = SessionRepository::new((*state.db).clone());
    let expires_at = Utc::now() + Duration::days(state.jwt_service.refresh_token_expires_days());
    let user_agent = headers.get(USER_AGENT).and_then(|h| h.to_str().ok());
    if let Err(e) = session_repo
        .create(profile.id, &refresh_token, expires_at, user_agent, None)
        .await
    {
        error!(error = %e, "Failed to create session");
        return internal_error("An error occurred during login");
    }

    info!(profile_id = %profile.id, "Profile logged in");

    let response = LoginResponse {
        profile: ProfileInfo {
            id: profile.id,
            tax_id: profile.tax_id,
            company_name: profile.company_name,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Refresh the access token using a refresh token.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(e) => {
            let (error, message) = match e {
                caixa_shared::JwtError::Expired => ("token_expired", "Refresh token has expired"),
                _ => ("invalid_token", "Invalid refresh token"),
            };
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": error, "message": message })),
            )
                .into_response();
        }
    };

    // The token must still map to a live session row.
    let session_repo = SessionRepository::new((*state.db).clone());
    match session_repo.find_live_by_token(&payload.refresh_token).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Refresh token has been revoked"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error("An error occurred during token refresh");
        }
    }

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.profile_id(), &claims.doc)
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error("An error occurred during token refresh");
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}

/// POST /auth/logout - Revoke a refresh token.
async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<LogoutRequest>,
) -> impl IntoResponse {
    let session_repo = SessionRepository::new((*state.db).clone());
    match session_repo.revoke_by_token(&payload.refresh_token).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!(error = %e, "Database error during logout");
            internal_error("An error occurred during logout")
        }
    }
}

/// Undifferentiated authentication failure: unknown tax-ID and wrong
/// password report the same thing.
fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Incorrect tax-ID or password"
        })),
    )
        .into_response()
}
