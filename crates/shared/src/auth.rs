//! Authentication request and response payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Tax-ID (CNPJ/CPF), punctuation allowed.
    #[validate(length(min = 11, max = 18))]
    pub tax_id: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Registration request payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Tax-ID (CNPJ/CPF), punctuation allowed.
    #[validate(length(min = 11, max = 18))]
    pub tax_id: String,
    /// Company name.
    #[validate(length(min = 2, max = 200))]
    pub company_name: String,
    /// Plaintext password.
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Refresh token request.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshRequest {
    /// The refresh token.
    pub refresh_token: String,
}

/// Logout request.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    /// The refresh token to invalidate.
    pub refresh_token: String,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password, verified before any update.
    #[validate(length(min = 1))]
    pub current_password: String,
    /// New password.
    #[validate(length(min = 6, max = 128))]
    pub new_password: String,
}

/// Company info update request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New company name.
    #[validate(length(min = 2, max = 200))]
    pub company_name: String,
}

/// Public profile fields returned by auth and profile endpoints.
///
/// This is the only shape in which profile data ever leaves the API;
/// the password hash never crosses this boundary.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileInfo {
    /// Profile ID.
    pub id: Uuid,
    /// Normalized tax-ID digits.
    pub tax_id: String,
    /// Company name.
    pub company_name: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Authenticated profile info.
    pub profile: ProfileInfo,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiration in seconds.
    pub expires_in: i64,
}
