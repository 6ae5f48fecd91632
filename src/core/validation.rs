use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::calculator::{explicit_sort_order, line_amounts, resolve_rate};
use super::error::{DefterError, ValidationError};
use super::input::{RawLineItem, RawScalar, line_items_from_value};
use super::rates::{VatRate, is_valid_vat_rate_id};
use super::totals::{InvoiceTotals, calculate_validated_totals};

/// Maximum number of line items on one invoice.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum description length, in UTF-16 code units.
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Limits applied by [`validate_line_items_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationLimits {
    pub max_items: usize,
    pub max_description_length: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_items: MAX_LINE_ITEMS,
            max_description_length: MAX_DESCRIPTION_LENGTH,
        }
    }
}

/// Outcome of validating a batch of line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{msg}")
    }
}

/// A line item that passed [`validate_line_item`].
///
/// Only obtainable through validation, so its values can be priced without
/// any coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedLineItem {
    pub(crate) description: String,
    pub(crate) quantity: Decimal,
    pub(crate) unit_price: i64,
    pub(crate) vat_rate: VatRate,
    pub(crate) vat_rate_percent: Option<Decimal>,
    pub(crate) sort_order: Option<i64>,
}

impl ValidatedLineItem {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit price in minor units; never negative.
    pub fn unit_price(&self) -> i64 {
        self.unit_price
    }

    pub fn vat_rate(&self) -> VatRate {
        self.vat_rate
    }

    pub fn vat_rate_percent(&self) -> Option<Decimal> {
        self.vat_rate_percent
    }

    pub fn sort_order(&self) -> Option<i64> {
        self.sort_order
    }
}

impl TryFrom<&RawLineItem> for ValidatedLineItem {
    type Error = Vec<ValidationError>;

    fn try_from(item: &RawLineItem) -> Result<Self, Self::Error> {
        let errors = validate_line_item(item);
        if !errors.is_empty() {
            return Err(errors);
        }

        let (vat_rate, vat_rate_percent) = resolve_rate(item.vat_rate.as_ref());
        Ok(Self {
            description: item.description_text(),
            quantity: item
                .quantity
                .as_ref()
                .and_then(RawScalar::as_decimal)
                .unwrap_or(Decimal::ONE),
            unit_price: item
                .unit_price
                .as_ref()
                .and_then(non_negative_integer)
                .unwrap_or_default(),
            vat_rate,
            vat_rate_percent,
            sort_order: explicit_sort_order(item.sort_order.as_ref()),
        })
    }
}

/// Validate one line item with the default limits.
///
/// Returns every problem found; an empty vector means the item is valid.
pub fn validate_line_item(item: &RawLineItem) -> Vec<ValidationError> {
    check_line_item(item, &ValidationLimits::default())
}

/// Validate a batch of line items with the default limits.
///
/// An empty batch or one larger than [`MAX_LINE_ITEMS`] is rejected with a
/// single `items` error and the items themselves are not inspected.
pub fn validate_line_items(items: &[RawLineItem]) -> ValidationReport {
    validate_line_items_with(items, &ValidationLimits::default())
}

/// Validate a batch of line items with custom limits.
pub fn validate_line_items_with(items: &[RawLineItem], limits: &ValidationLimits) -> ValidationReport {
    if items.is_empty() {
        return ValidationReport::from_errors(vec![ValidationError::new(
            "items",
            "At least one item is required",
            "En az bir kalem gereklidir",
        )]);
    }

    if items.len() > limits.max_items {
        return ValidationReport::from_errors(vec![ValidationError::new(
            "items",
            format!("Maximum {} items allowed", limits.max_items),
            format!("En fazla {} kalem eklenebilir", limits.max_items),
        )]);
    }

    let errors = items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| {
            let prefix = format!("items[{index}]");
            check_line_item(item, limits)
                .into_iter()
                .map(move |e| e.with_prefix(&prefix))
        })
        .collect::<Vec<_>>();

    if errors.is_empty() && invoice_total(items).is_none() {
        return ValidationReport::from_errors(vec![ValidationError::new(
            "items",
            "Invoice total is too large",
            "Fatura toplamı çok büyük",
        )]);
    }

    if !errors.is_empty() {
        tracing::debug!(errors = errors.len(), "line item validation failed");
    }
    ValidationReport::from_errors(errors)
}

/// Validate an untyped JSON value, rejecting anything that is not an array.
pub fn validate_line_items_value(items: &serde_json::Value) -> ValidationReport {
    match line_items_from_value(items) {
        Some(items) => validate_line_items(&items),
        None => ValidationReport::from_errors(vec![ValidationError::new(
            "items",
            "Items must be an array",
            "Kalemler bir dizi olmalıdır",
        )]),
    }
}

/// Validate a batch and convert it into typed line items.
pub fn validated_line_items(items: &[RawLineItem]) -> Result<Vec<ValidatedLineItem>, ValidationReport> {
    let report = validate_line_items(items);
    if !report.is_valid {
        return Err(report);
    }
    items
        .iter()
        .map(ValidatedLineItem::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(ValidationReport::from_errors)
}

/// Validate a batch and, if it is valid, calculate its totals.
pub fn validate_and_calculate(items: &[RawLineItem]) -> Result<InvoiceTotals, DefterError> {
    let items = validated_line_items(items).map_err(DefterError::Validation)?;
    Ok(calculate_validated_totals(&items))
}

fn check_line_item(item: &RawLineItem, limits: &ValidationLimits) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match item.description.as_ref().and_then(RawScalar::as_text) {
        Some(text) if !text.trim().is_empty() => {
            if text.encode_utf16().count() > limits.max_description_length {
                errors.push(ValidationError::new(
                    "description",
                    format!(
                        "Description must be at most {} characters",
                        limits.max_description_length
                    ),
                    format!(
                        "Açıklama en fazla {} karakter olabilir",
                        limits.max_description_length
                    ),
                ));
            }
        }
        _ => errors.push(ValidationError::new(
            "description",
            "Description is required",
            "Açıklama zorunludur",
        )),
    }

    if let Some(quantity) = &item.quantity {
        let positive = quantity
            .as_decimal()
            .is_some_and(|q| q > Decimal::ZERO);
        if !positive {
            errors.push(ValidationError::new(
                "quantity",
                "Quantity must be a positive number",
                "Miktar pozitif bir sayı olmalıdır",
            ));
        }
    }

    match &item.unit_price {
        None => errors.push(ValidationError::new(
            "unitPrice",
            "Unit price is required",
            "Birim fiyat zorunludur",
        )),
        Some(price) => {
            if non_negative_integer(price).is_none() {
                errors.push(ValidationError::new(
                    "unitPrice",
                    "Unit price must be a non-negative integer (in pence)",
                    "Birim fiyat negatif olmayan bir tam sayı olmalıdır (peni cinsinden)",
                ));
            }
        }
    }

    match &item.vat_rate {
        None => {}
        Some(RawScalar::Text(id)) => {
            if !is_valid_vat_rate_id(id) {
                errors.push(ValidationError::new(
                    "vatRate",
                    format!("Invalid VAT rate '{id}'"),
                    format!("Geçersiz KDV oranı '{id}'"),
                ));
            }
        }
        Some(rate @ (RawScalar::Integer(_) | RawScalar::Float(_))) => {
            let in_range = rate
                .as_decimal()
                .is_some_and(|p| p >= Decimal::ZERO && p <= dec!(100));
            if !in_range {
                errors.push(ValidationError::new(
                    "vatRate",
                    "VAT rate must be between 0 and 100",
                    "KDV oranı 0 ile 100 arasında olmalıdır",
                ));
            }
        }
        Some(RawScalar::Other(_)) => errors.push(ValidationError::new(
            "vatRate",
            "VAT rate must be a rate name or a percentage",
            "KDV oranı bir oran adı veya yüzde olmalıdır",
        )),
    }

    if errors.is_empty() && checked_line_total(item).is_none() {
        errors.push(ValidationError::new(
            "unitPrice",
            "Line total is too large",
            "Kalem toplamı çok büyük",
        ));
    }

    errors
}

/// Line total of an item whose fields are already known to be valid.
fn checked_line_total(item: &RawLineItem) -> Option<i64> {
    let quantity = item
        .quantity
        .as_ref()
        .and_then(RawScalar::as_decimal)
        .unwrap_or(Decimal::ONE);
    let unit_price = item.unit_price.as_ref().and_then(non_negative_integer)?;
    let (_, percent) = resolve_rate(item.vat_rate.as_ref());
    line_amounts(quantity, unit_price, percent).map(|(_, _, total)| total)
}

/// Sum of all line totals; amounts are non-negative once every item is valid.
fn invoice_total(items: &[RawLineItem]) -> Option<i64> {
    items
        .iter()
        .try_fold(0i64, |sum, item| sum.checked_add(checked_line_total(item)?))
}

/// Integral JSON number ≥ 0 (integral floats such as `100.0` included).
fn non_negative_integer(value: &RawScalar) -> Option<i64> {
    match value {
        RawScalar::Integer(n) if *n >= 0 => Some(*n),
        RawScalar::Float(f) if *f >= 0.0 && f.fract() == 0.0 => f.to_i64(),
        _ => None,
    }
}
