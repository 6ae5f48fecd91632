//! UK VAT registration number validation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a VAT registration number fails validation.
#[derive(Debug, Clone)]
pub struct VatNumberError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for VatNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid VAT number '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for VatNumberError {}

/// Country prefix of a UK VAT number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatPrefix {
    /// Great Britain.
    Gb,
    /// Northern Ireland, for trade in goods with the EU.
    Xi,
}

impl VatPrefix {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Gb => "GB",
            Self::Xi => "XI",
        }
    }
}

/// Format of a UK VAT number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatNumberKind {
    /// 9 digits with a modulus-97 check.
    Standard,
    /// 12 digits: a standard number plus a 3-digit branch identifier.
    Branch,
    /// `GD000`–`GD499`.
    GovernmentDepartment,
    /// `HA500`–`HA999`.
    HealthAuthority,
}

/// A validated UK VAT registration number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkVatNumber {
    pub prefix: VatPrefix,
    pub kind: VatNumberKind,
    /// Number without prefix or spaces, e.g. "980780684" or "GD123".
    pub number: String,
}

impl fmt::Display for UkVatNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix.code(), self.number)
    }
}

/// Validate a UK VAT registration number.
///
/// Spaces are ignored and the `GB`/`XI` prefix is optional (a missing
/// prefix means `GB`). Standard and branch numbers must pass HMRC's
/// modulus-97 check, in either the original or the 9755 series.
pub fn validate_vat_number(input: &str) -> Result<UkVatNumber, VatNumberError> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    let err = |reason: &str| VatNumberError {
        value: input.trim().into(),
        reason: reason.into(),
    };

    let (prefix, rest) = if let Some(rest) = compact.strip_prefix("GB") {
        (VatPrefix::Gb, rest)
    } else if let Some(rest) = compact.strip_prefix("XI") {
        (VatPrefix::Xi, rest)
    } else {
        (VatPrefix::Gb, compact.as_str())
    };

    if rest.is_empty() {
        return Err(err("empty"));
    }

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    let kind = if let Some(digits) = rest.strip_prefix("GD") {
        if digits.len() != 3 || !all_digits(digits) {
            return Err(err("government department numbers are GD followed by 3 digits"));
        }
        if digits > "499" {
            return Err(err("government department numbers range from GD000 to GD499"));
        }
        VatNumberKind::GovernmentDepartment
    } else if let Some(digits) = rest.strip_prefix("HA") {
        if digits.len() != 3 || !all_digits(digits) {
            return Err(err("health authority numbers are HA followed by 3 digits"));
        }
        if digits < "500" {
            return Err(err("health authority numbers range from HA500 to HA999"));
        }
        VatNumberKind::HealthAuthority
    } else {
        if !all_digits(rest) {
            return Err(err("must contain only digits"));
        }
        let kind = match rest.len() {
            9 => VatNumberKind::Standard,
            12 => VatNumberKind::Branch,
            _ => return Err(err("must be 9 digits, or 12 digits for a branch")),
        };
        if !mod97_check(&rest[..9]) {
            return Err(err("check digits do not match"));
        }
        kind
    };

    Ok(UkVatNumber {
        prefix,
        kind,
        number: rest.to_string(),
    })
}

/// HMRC check: weight the first seven digits 8..2, add the two check
/// digits, and the sum (or the sum + 55) must be divisible by 97.
fn mod97_check(digits: &str) -> bool {
    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.len() != 9 {
        return false;
    }
    let weighted: u32 = d[..7]
        .iter()
        .zip((2..=8).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let total = weighted + d[7] * 10 + d[8];
    total % 97 == 0 || (total + 55) % 97 == 0
}
