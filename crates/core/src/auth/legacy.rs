//! Legacy-credential bridge.
//!
//! Profiles created before the Argon2id rollout store a weak digest:
//! lowercase-hex MD5 over the password concatenated with the normalized
//! tax-ID digits and a fixed application salt. `check_credentials` verifies
//! against whichever representation a profile currently holds; callers are
//! expected to rewrite the stored hash with [`super::hash_password`] whenever
//! a legacy match is reported, so the weak form disappears on first
//! successful login.

use md5::{Digest, Md5};

use caixa_shared::TaxId;

use super::password::{PasswordError, verify_password};

/// Static salt appended by the original password scheme. Changing this value
/// orphans every remaining legacy hash.
const LEGACY_SALT: &str = "@lvrcx#2019";

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialCheck {
    /// Password matches the stored Argon2id hash.
    Match,
    /// Password matches the legacy digest; the stored hash must be upgraded.
    MatchNeedsUpgrade,
    /// Password does not match.
    Mismatch,
}

impl CredentialCheck {
    /// Returns true for either kind of successful match.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match | Self::MatchNeedsUpgrade)
    }
}

/// Returns true if the stored hash is in the modern Argon2 PHC format.
#[must_use]
pub fn is_strong_hash(stored_hash: &str) -> bool {
    stored_hash.starts_with("$argon2")
}

/// Computes the legacy digest for a password and tax-ID.
#[must_use]
pub fn legacy_digest(password: &str, tax_id: &TaxId) -> String {
    let mut hasher = Md5::new();
    hasher.update(password.as_bytes());
    hasher.update(tax_id.as_digits().as_bytes());
    hasher.update(LEGACY_SALT.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies a password against whichever representation the stored hash is.
///
/// Strong hashes are verified with Argon2; anything else is treated as a
/// legacy digest and verified by recomputation. The caller cannot tell a
/// missing profile from a wrong password through this function alone, which
/// is what the login flow relies on.
///
/// # Errors
///
/// Returns `PasswordError` if a strong hash is malformed or Argon2
/// verification fails unexpectedly.
pub fn check_credentials(
    stored_hash: &str,
    password: &str,
    tax_id: &TaxId,
) -> Result<CredentialCheck, PasswordError> {
    if is_strong_hash(stored_hash) {
        return Ok(if verify_password(password, stored_hash)? {
            CredentialCheck::Match
        } else {
            CredentialCheck::Mismatch
        });
    }

    if legacy_digest(password, tax_id) == stored_hash {
        Ok(CredentialCheck::MatchNeedsUpgrade)
    } else {
        Ok(CredentialCheck::Mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;

    fn tax_id() -> TaxId {
        TaxId::parse("11.222.333/0001-81").unwrap()
    }

    #[test]
    fn test_legacy_digest_is_hex_md5() {
        let digest = legacy_digest("secret", &tax_id());
        assert_eq!(digest.len(), 32);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        // Deterministic
        assert_eq!(digest, legacy_digest("secret", &tax_id()));
    }

    #[test]
    fn test_legacy_digest_binds_tax_id() {
        let other = TaxId::parse("529.982.247-25").unwrap();
        assert_ne!(
            legacy_digest("secret", &tax_id()),
            legacy_digest("secret", &other)
        );
    }

    #[test]
    fn test_strong_hash_detection() {
        assert!(is_strong_hash("$argon2id$v=19$m=19456,t=2,p=1$abc$def"));
        assert!(!is_strong_hash(&legacy_digest("secret", &tax_id())));
    }

    #[test]
    fn test_check_against_legacy_hash() {
        let stored = legacy_digest("secret", &tax_id());

        let check = check_credentials(&stored, "secret", &tax_id()).unwrap();
        assert_eq!(check, CredentialCheck::MatchNeedsUpgrade);
        assert!(check.is_match());

        let check = check_credentials(&stored, "wrong", &tax_id()).unwrap();
        assert_eq!(check, CredentialCheck::Mismatch);
        assert!(!check.is_match());
    }

    #[test]
    fn test_check_against_strong_hash() {
        let stored = hash_password("secret").unwrap();

        assert_eq!(
            check_credentials(&stored, "secret", &tax_id()).unwrap(),
            CredentialCheck::Match
        );
        assert_eq!(
            check_credentials(&stored, "wrong", &tax_id()).unwrap(),
            CredentialCheck::Mismatch
        );
    }

    #[test]
    fn test_legacy_hash_with_wrong_tax_id_mismatches() {
        let other = TaxId::parse("529.982.247-25").unwrap();
        let stored = legacy_digest("secret", &tax_id());

        assert_eq!(
            check_credentials(&stored, "secret", &other).unwrap(),
            CredentialCheck::Mismatch
        );
    }
}
