//! UK VAT rate table.
//!
//! The table is fixed: HMRC's standard (20%), reduced (5%) and zero (0%)
//! rates, plus the two "no VAT charged" treatments, exempt supplies and
//! supplies outside the scope of UK VAT.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A named VAT rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VatRate {
    /// 20%.
    Standard,
    /// 5% (domestic fuel and power, children's car seats, ...).
    Reduced,
    /// 0%, still a taxable supply.
    Zero,
    /// 0%, exempt supply (insurance, finance, education, ...).
    Exempt,
    /// Not applicable: outside the scope of UK VAT.
    OutsideScope,
}

/// Every rate id accepted in input, in table order.
pub const VALID_VAT_RATE_IDS: [&str; 5] = ["standard", "reduced", "zero", "exempt", "outside-scope"];

static VAT_RATES: [(VatRate, Option<Decimal>); 5] = [
    (VatRate::Standard, Some(dec!(20))),
    (VatRate::Reduced, Some(dec!(5))),
    (VatRate::Zero, Some(dec!(0))),
    (VatRate::Exempt, Some(dec!(0))),
    (VatRate::OutsideScope, None),
];

impl VatRate {
    /// Kebab-case identifier used on the wire (e.g. "outside-scope").
    pub fn id(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Reduced => "reduced",
            Self::Zero => "zero",
            Self::Exempt => "exempt",
            Self::OutsideScope => "outside-scope",
        }
    }

    /// Parse a rate identifier. Matching is exact.
    pub fn from_id(id: &str) -> Option<Self> {
        VAT_RATES
            .iter()
            .map(|(rate, _)| *rate)
            .find(|rate| rate.id() == id)
    }

    /// Percentage for this rate, `None` when VAT is not applicable.
    pub fn percent(&self) -> Option<Decimal> {
        VAT_RATES
            .iter()
            .find(|(rate, _)| rate == self)
            .and_then(|(_, percent)| *percent)
    }

    /// Closest named rate for a raw percentage.
    ///
    /// This is not an inverse of [`VatRate::percent`]: 0 always maps to
    /// [`VatRate::Zero`] and any percentage without a named rate maps to
    /// [`VatRate::Standard`].
    pub fn from_percent(percent: Decimal) -> Self {
        if percent == dec!(20) {
            Self::Standard
        } else if percent == dec!(5) {
            Self::Reduced
        } else if percent.is_zero() {
            Self::Zero
        } else {
            Self::Standard
        }
    }

    /// English label for documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "Standard rate (20%)",
            Self::Reduced => "Reduced rate (5%)",
            Self::Zero => "Zero rate (0%)",
            Self::Exempt => "Exempt",
            Self::OutsideScope => "Outside the scope of VAT",
        }
    }

    /// Turkish label for documents.
    pub fn label_tr(&self) -> &'static str {
        match self {
            Self::Standard => "Standart oran (%20)",
            Self::Reduced => "İndirimli oran (%5)",
            Self::Zero => "Sıfır oran (%0)",
            Self::Exempt => "Muaf",
            Self::OutsideScope => "KDV kapsamı dışında",
        }
    }
}

impl std::fmt::Display for VatRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Check whether `id` is one of [`VALID_VAT_RATE_IDS`].
pub fn is_valid_vat_rate_id(id: &str) -> bool {
    VALID_VAT_RATE_IDS.contains(&id)
}
