//! UK VAT registration threshold checks.
//!
//! From 1 April 2024:
//! - Registration is compulsory once taxable turnover for the last 12 months
//!   exceeds £90,000, or is expected to exceed £90,000 in the next 30 days alone
//! - A registered business may deregister if it expects taxable turnover
//!   for the next 12 months to be £88,000 or less
//!
//! All amounts are in pence.

use serde::{Deserialize, Serialize};

use crate::core::{Currency, Locale, format_minor_units};

/// Registration threshold in pence (£90,000).
pub const REGISTRATION_THRESHOLD: i64 = 9_000_000;

/// Deregistration threshold in pence (£88,000).
pub const DEREGISTRATION_THRESHOLD: i64 = 8_800_000;

/// Result of a VAT registration check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationStatus {
    /// Whether the business must register for VAT.
    pub must_register: bool,
    /// Taxable turnover over the last 12 months, in pence.
    pub rolling_turnover: i64,
    /// Expected taxable turnover over the next 30 days, in pence.
    pub expected_next_30_days: i64,
    /// If registration is required, the test that triggered it.
    pub reason: Option<String>,
}

/// Check whether a business must register for VAT.
///
/// # Arguments
/// - `rolling_turnover` — Taxable turnover for the last 12 months
/// - `expected_next_30_days` — Taxable turnover expected in the next 30 days alone
pub fn check_registration(rolling_turnover: i64, expected_next_30_days: i64) -> RegistrationStatus {
    let threshold = format_minor_units(REGISTRATION_THRESHOLD, Currency::Gbp, Locale::En);

    let reason = if rolling_turnover > REGISTRATION_THRESHOLD {
        Some(format!(
            "taxable turnover for the last 12 months {} exceeds {threshold}",
            format_minor_units(rolling_turnover, Currency::Gbp, Locale::En)
        ))
    } else if expected_next_30_days > REGISTRATION_THRESHOLD {
        Some(format!(
            "expected taxable turnover for the next 30 days {} exceeds {threshold}",
            format_minor_units(expected_next_30_days, Currency::Gbp, Locale::En)
        ))
    } else {
        None
    };

    RegistrationStatus {
        must_register: reason.is_some(),
        rolling_turnover,
        expected_next_30_days,
        reason,
    }
}

/// Whether a registered business may deregister given its expected taxable
/// turnover for the next 12 months.
pub fn may_deregister(expected_next_12_months: i64) -> bool {
    expected_next_12_months <= DEREGISTRATION_THRESHOLD
}
