//! Tax-ID (CNPJ/CPF) domain type.
//!
//! Brazilian registration numbers used as the login identifier. Values are
//! normalized to bare digits on construction and verified against the
//! official mod-11 check-digit algorithms.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a tax-ID.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxIdError {
    /// Contains characters other than digits and the usual punctuation.
    #[error("tax-ID contains invalid characters")]
    InvalidCharacters,

    /// Neither 11 (CPF) nor 14 (CNPJ) digits after normalization.
    #[error("tax-ID must have 11 (CPF) or 14 (CNPJ) digits, got {0}")]
    InvalidLength(usize),

    /// Check digits do not match.
    #[error("tax-ID check digits do not match")]
    InvalidCheckDigits,
}

/// Which kind of registration number a tax-ID is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxIdKind {
    /// Individual registration (11 digits).
    Cpf,
    /// Company registration (14 digits).
    Cnpj,
}

/// A validated, normalized CNPJ or CPF.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId {
    digits: String,
    kind: TaxIdKind,
}

impl TaxId {
    /// Parses a tax-ID from user input.
    ///
    /// Accepts bare digits or the usual punctuated forms
    /// (`529.982.247-25`, `11.222.333/0001-81`).
    ///
    /// # Errors
    ///
    /// Returns a `TaxIdError` if the input has invalid characters, the wrong
    /// number of digits, or failing check digits.
    pub fn parse(input: &str) -> Result<Self, TaxIdError> {
        let mut digits = String::with_capacity(14);
        for c in input.chars() {
            match c {
                '0'..='9' => digits.push(c),
                '.' | '-' | '/' | ' ' => {}
                _ => return Err(TaxIdError::InvalidCharacters),
            }
        }

        let kind = match digits.len() {
            11 => TaxIdKind::Cpf,
            14 => TaxIdKind::Cnpj,
            n => return Err(TaxIdError::InvalidLength(n)),
        };

        let values: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();

        // Sequences of a single repeated digit pass the mod-11 check but are
        // not valid registrations.
        if values.iter().all(|&d| d == values[0]) {
            return Err(TaxIdError::InvalidCheckDigits);
        }

        let valid = match kind {
            TaxIdKind::Cpf => {
                check_digit(&values[..9], &CPF_WEIGHTS_1) == values[9]
                    && check_digit(&values[..10], &CPF_WEIGHTS_2) == values[10]
            }
            TaxIdKind::Cnpj => {
                check_digit(&values[..12], &CNPJ_WEIGHTS_1) == values[12]
                    && check_digit(&values[..13], &CNPJ_WEIGHTS_2) == values[13]
            }
        };

        if !valid {
            return Err(TaxIdError::InvalidCheckDigits);
        }

        Ok(Self { digits, kind })
    }

    /// Returns the normalized digit string.
    #[must_use]
    pub fn as_digits(&self) -> &str {
        &self.digits
    }

    /// Returns whether this is a CPF or a CNPJ.
    #[must_use]
    pub const fn kind(&self) -> TaxIdKind {
        self.kind
    }

    /// Formats the tax-ID with standard punctuation.
    #[must_use]
    pub fn formatted(&self) -> String {
        let d = &self.digits;
        match self.kind {
            TaxIdKind::Cpf => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
            TaxIdKind::Cnpj => format!(
                "{}.{}.{}/{}-{}",
                &d[..2],
                &d[2..5],
                &d[5..8],
                &d[8..12],
                &d[12..]
            ),
        }
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

impl std::str::FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(value: TaxId) -> Self {
        value.digits
    }
}

const CPF_WEIGHTS_1: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const CPF_WEIGHTS_2: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Computes a mod-11 check digit over `digits` with the given weights.
fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 { 0 } else { 11 - remainder }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("529.982.247-25", TaxIdKind::Cpf, "52998224725")]
    #[case("52998224725", TaxIdKind::Cpf, "52998224725")]
    #[case("11.222.333/0001-81", TaxIdKind::Cnpj, "11222333000181")]
    #[case("11222333000181", TaxIdKind::Cnpj, "11222333000181")]
    fn test_parse_valid(#[case] input: &str, #[case] kind: TaxIdKind, #[case] digits: &str) {
        let tax_id = TaxId::parse(input).unwrap();
        assert_eq!(tax_id.kind(), kind);
        assert_eq!(tax_id.as_digits(), digits);
    }

    #[test]
    fn test_wrong_check_digit_rejected() {
        assert_eq!(
            TaxId::parse("529.982.247-26"),
            Err(TaxIdError::InvalidCheckDigits)
        );
        assert_eq!(
            TaxId::parse("11.222.333/0001-82"),
            Err(TaxIdError::InvalidCheckDigits)
        );
    }

    #[test]
    fn test_repeated_digits_rejected() {
        assert_eq!(
            TaxId::parse("111.111.111-11"),
            Err(TaxIdError::InvalidCheckDigits)
        );
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert_eq!(TaxId::parse("1234567"), Err(TaxIdError::InvalidLength(7)));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert_eq!(
            TaxId::parse("529a982247-25"),
            Err(TaxIdError::InvalidCharacters)
        );
    }

    #[test]
    fn test_formatted() {
        let cpf = TaxId::parse("52998224725").unwrap();
        assert_eq!(cpf.formatted(), "529.982.247-25");

        let cnpj = TaxId::parse("11222333000181").unwrap();
        assert_eq!(cnpj.formatted(), "11.222.333/0001-81");
    }

    #[test]
    fn test_display_is_digits() {
        let cnpj = TaxId::parse("11.222.333/0001-81").unwrap();
        assert_eq!(cnpj.to_string(), "11222333000181");
    }
}
