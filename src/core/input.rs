use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::error::DefterError;

/// A loosely-typed JSON scalar as it arrives in a request body.
///
/// Variant order matters for untagged deserialization: integers are tried
/// before floats, and anything that is neither a number nor a string lands
/// in `Other`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

impl RawScalar {
    /// Numeric value, parsing text leniently (see [`parse_decimal_prefix`]).
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Integer(n) => Some(Decimal::from(*n)),
            Self::Float(f) => Decimal::from_f64(*f),
            Self::Text(s) => parse_decimal_prefix(s),
            Self::Other(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for JSON numbers (not numeric strings).
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

impl From<i64> for RawScalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for RawScalar {
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for RawScalar {
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for RawScalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawScalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for RawScalar {
    fn from(value: Decimal) -> Self {
        Self::Text(value.normalize().to_string())
    }
}

/// An untrusted invoice line as submitted by a client.
///
/// Every field is optional and loosely typed. Run it through
/// [`crate::core::validate_line_item`] (or convert it into a
/// [`crate::core::ValidatedLineItem`]) before trusting the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawLineItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<RawScalar>,
    /// Decimal quantity, number or numeric string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<RawScalar>,
    /// Price per unit in minor currency units (pence).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<RawScalar>,
    /// Rate id ("standard", "reduced", ...) or explicit percentage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_rate: Option<RawScalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<RawScalar>,
}

impl RawLineItem {
    pub fn new(description: impl Into<String>, unit_price: i64) -> Self {
        Self {
            description: Some(RawScalar::Text(description.into())),
            unit_price: Some(RawScalar::Integer(unit_price)),
            ..Self::default()
        }
    }

    pub fn quantity(mut self, quantity: impl Into<RawScalar>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    pub fn vat_rate(mut self, rate: impl Into<RawScalar>) -> Self {
        self.vat_rate = Some(rate.into());
        self
    }

    pub fn sort_order(mut self, order: i64) -> Self {
        self.sort_order = Some(RawScalar::Integer(order));
        self
    }

    /// Description as text; non-string descriptions are rendered as JSON.
    pub(crate) fn description_text(&self) -> String {
        match &self.description {
            None => String::new(),
            Some(RawScalar::Text(s)) => s.clone(),
            Some(RawScalar::Integer(n)) => n.to_string(),
            Some(RawScalar::Float(f)) => f.to_string(),
            Some(RawScalar::Other(v)) => v.to_string(),
        }
    }
}

/// Decode a JSON array of line items, e.g. the `items` field of a request.
pub fn parse_line_items(json: &str) -> Result<Vec<RawLineItem>, DefterError> {
    Ok(serde_json::from_str(json)?)
}

/// Convert an untyped JSON value into line items.
///
/// Returns `None` if `value` is not an array. Elements that are not JSON
/// objects become empty items so that validation can report them per field.
pub fn line_items_from_value(value: &serde_json::Value) -> Option<Vec<RawLineItem>> {
    let array = value.as_array()?;
    Some(
        array
            .iter()
            .map(|element| {
                if element.is_object() {
                    serde_json::from_value(element.clone()).unwrap_or_default()
                } else {
                    RawLineItem::default()
                }
            })
            .collect(),
    )
}

/// Parse the longest numeric prefix of `text`, in the manner of a browser's
/// `parseFloat`: leading whitespace is skipped, trailing garbage is ignored
/// (`"2.5 hours"` → 2.5), and an exponent is honoured. Returns `None` when no
/// digits are found or the value does not fit a [`Decimal`].
pub fn parse_decimal_prefix(text: &str) -> Option<Decimal> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    let mantissa_end = end;
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let mantissa = s[..mantissa_end].trim_start_matches('+');
    let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa);
    let mantissa = if mantissa.starts_with('.') || mantissa.starts_with("-.") {
        mantissa.replacen('.', "0.", 1)
    } else {
        mantissa.to_string()
    };

    if end > mantissa_end {
        let exponent = &s[mantissa_end..end];
        Decimal::from_scientific(&format!("{mantissa}{exponent}")).ok()
    } else {
        mantissa.parse().ok()
    }
}
