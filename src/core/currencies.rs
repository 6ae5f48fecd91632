//! Invoice currencies and minor-unit formatting.
//!
//! The application invoices in pounds sterling by default and also accepts
//! euro, US dollar and Turkish lira.

use serde::{Deserialize, Serialize};

use super::error::Locale;

/// A supported ISO 4217 invoice currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Gbp,
    Eur,
    Usd,
    Try,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Self::Gbp, Self::Eur, Self::Usd, Self::Try];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Gbp => "GBP",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Try => "TRY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Gbp => "£",
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Try => "₺",
        }
    }

    /// Number of decimal places in the minor unit (pence, cents, kuruş).
    pub fn minor_units(&self) -> u32 {
        2
    }

    /// Parse an ISO 4217 code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Check whether `code` is an invoice currency this crate supports.
pub fn is_supported_currency_code(code: &str) -> bool {
    Currency::from_code(code).is_some()
}

/// Format an amount in minor units for display.
///
/// English puts the symbol first with `,` grouping (`£1,234.56`, `-£5.00`);
/// Turkish puts it last with `.` grouping and a decimal comma
/// (`1.234,56 ₺`).
pub fn format_minor_units(amount: i64, currency: Currency, locale: Locale) -> String {
    let scale = 10u64.pow(currency.minor_units());
    let abs = amount.unsigned_abs();
    let major = abs / scale;
    let minor = abs % scale;
    let sign = if amount < 0 { "-" } else { "" };
    let width = currency.minor_units() as usize;

    match locale {
        Locale::En => format!(
            "{sign}{}{}.{minor:0width$}",
            currency.symbol(),
            group_thousands(major, ',')
        ),
        Locale::Tr => format!(
            "{sign}{},{minor:0width$} {}",
            group_thousands(major, '.'),
            currency.symbol()
        ),
    }
}

fn group_thousands(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_symbols() {
        assert_eq!(Currency::Gbp.code(), "GBP");
        assert_eq!(Currency::Try.symbol(), "₺");
        assert_eq!(Currency::default(), Currency::Gbp);
    }

    #[test]
    fn parse_codes() {
        assert_eq!(Currency::from_code("GBP"), Some(Currency::Gbp));
        assert_eq!(Currency::from_code(" try "), Some(Currency::Try));
        assert_eq!(Currency::from_code("JPY"), None);
        assert!(is_supported_currency_code("eur"));
        assert!(!is_supported_currency_code(""));
    }

    #[test]
    fn english_format() {
        assert_eq!(format_minor_units(24000, Currency::Gbp, Locale::En), "£240.00");
        assert_eq!(format_minor_units(123_456, Currency::Gbp, Locale::En), "£1,234.56");
        assert_eq!(format_minor_units(5, Currency::Usd, Locale::En), "$0.05");
        assert_eq!(format_minor_units(-500, Currency::Eur, Locale::En), "-€5.00");
        assert_eq!(format_minor_units(100_000_000, Currency::Gbp, Locale::En), "£1,000,000.00");
    }

    #[test]
    fn turkish_format() {
        assert_eq!(format_minor_units(123_456, Currency::Try, Locale::Tr), "1.234,56 ₺");
        assert_eq!(format_minor_units(99, Currency::Gbp, Locale::Tr), "0,99 £");
        assert_eq!(format_minor_units(-100, Currency::Try, Locale::Tr), "-1,00 ₺");
    }

    #[test]
    fn extreme_amount_does_not_overflow() {
        let s = format_minor_units(i64::MIN, Currency::Gbp, Locale::En);
        assert!(s.starts_with("-£92,233,720,368,547,758.08"));
    }

    #[test]
    fn serde_uses_iso_codes() {
        assert_eq!(serde_json::to_string(&Currency::Try).unwrap(), "\"TRY\"");
        let c: Currency = serde_json::from_str("\"GBP\"").unwrap();
        assert_eq!(c, Currency::Gbp);
    }
}
