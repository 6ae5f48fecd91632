use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::input::{RawLineItem, RawScalar};
use super::rates::VatRate;
use super::validation::ValidatedLineItem;

/// A priced invoice line. All amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedLineItem {
    pub description: String,
    /// Quantity as a normalized decimal string ("2", "1.5").
    pub quantity: String,
    pub unit_price: i64,
    pub vat_rate_id: VatRate,
    /// `None` when VAT is not applicable (outside scope).
    pub vat_rate_percent: Option<Decimal>,
    /// round(quantity × unit_price).
    pub net_amount: i64,
    /// round(net_amount × percent / 100), 0 for zero/absent rates.
    pub vat_amount: i64,
    /// net_amount + vat_amount.
    pub line_total: i64,
    pub sort_order: i64,
}

/// Price a single untrusted line item.
///
/// Never fails: a missing or malformed quantity becomes 1, a malformed unit
/// price becomes 0 and an unrecognised VAT rate becomes the standard rate.
/// Validate first with [`crate::core::validate_line_item`] if those defaults
/// are not acceptable.
///
/// Amounts round half away from zero, so a negative midpoint moves down:
/// an unvalidated quantity of `-1.5` at 333 gives a net of -500, not -499.
/// Amounts that do not fit in `i64` price the whole line at 0.
pub fn calculate_line_item(item: &RawLineItem) -> CalculatedLineItem {
    let (rate, percent) = resolve_rate(item.vat_rate.as_ref());
    let quantity = resolve_quantity(item.quantity.as_ref());
    let unit_price = resolve_unit_price(item.unit_price.as_ref());
    let sort_order = explicit_sort_order(item.sort_order.as_ref()).unwrap_or(0);

    price_line(
        item.description_text(),
        quantity,
        unit_price,
        rate,
        percent,
        sort_order,
    )
}

/// Price a line item that has already passed validation.
pub fn calculate_validated_line_item(item: &ValidatedLineItem) -> CalculatedLineItem {
    price_line(
        item.description.clone(),
        item.quantity,
        item.unit_price,
        item.vat_rate,
        item.vat_rate_percent,
        item.sort_order.unwrap_or(0),
    )
}

pub(crate) fn price_line(
    description: String,
    quantity: Decimal,
    unit_price: i64,
    rate: VatRate,
    percent: Option<Decimal>,
    sort_order: i64,
) -> CalculatedLineItem {
    let (net_amount, vat_amount, line_total) = line_amounts(quantity, unit_price, percent)
        .unwrap_or_else(|| {
            tracing::debug!(%quantity, unit_price, "line amount overflow, using 0");
            (0, 0, 0)
        });

    CalculatedLineItem {
        description,
        quantity: quantity.normalize().to_string(),
        unit_price,
        vat_rate_id: rate,
        vat_rate_percent: percent,
        net_amount,
        vat_amount,
        line_total,
        sort_order,
    }
}

/// Net amount, VAT amount and line total, or `None` if any of them falls
/// outside the `i64` range.
pub(crate) fn line_amounts(
    quantity: Decimal,
    unit_price: i64,
    percent: Option<Decimal>,
) -> Option<(i64, i64, i64)> {
    let net = quantity
        .checked_mul(Decimal::from(unit_price))
        .and_then(round_minor)?;
    let vat = match percent {
        Some(p) if p > Decimal::ZERO => Decimal::from(net)
            .checked_mul(p)?
            .checked_div(dec!(100))
            .and_then(round_minor)?,
        _ => 0,
    };
    Some((net, vat, net.checked_add(vat)?))
}

/// Resolve a raw VAT rate to its named rate and percentage.
///
/// Known ids come from the rate table. Numbers in `[0, 100]` are used as the
/// percentage with the id approximated by [`VatRate::from_percent`].
/// Everything else falls back to the standard rate.
pub(crate) fn resolve_rate(raw: Option<&RawScalar>) -> (VatRate, Option<Decimal>) {
    match raw {
        None => {}
        Some(RawScalar::Text(id)) => {
            if let Some(rate) = VatRate::from_id(id) {
                return (rate, rate.percent());
            }
            tracing::debug!(id = %id, "unknown VAT rate id, using standard");
        }
        Some(scalar @ (RawScalar::Integer(_) | RawScalar::Float(_))) => {
            match scalar.as_decimal() {
                Some(p) if p >= Decimal::ZERO && p <= dec!(100) => {
                    let p = p.normalize();
                    return (VatRate::from_percent(p), Some(p));
                }
                _ => tracing::debug!(value = ?scalar, "VAT percentage out of range, using standard"),
            }
        }
        Some(other) => tracing::debug!(value = ?other, "unsupported VAT rate value, using standard"),
    }
    (VatRate::Standard, VatRate::Standard.percent())
}

fn resolve_quantity(raw: Option<&RawScalar>) -> Decimal {
    match raw.and_then(RawScalar::as_decimal) {
        Some(q) if !q.is_zero() => q,
        _ => {
            if let Some(value) = raw {
                tracing::debug!(?value, "unusable quantity, using 1");
            }
            Decimal::ONE
        }
    }
}

fn resolve_unit_price(raw: Option<&RawScalar>) -> i64 {
    match raw.and_then(RawScalar::as_decimal).and_then(round_minor) {
        Some(price) => price,
        None => {
            tracing::debug!(value = ?raw, "unusable unit price, using 0");
            0
        }
    }
}

/// Explicit integral sort order, if one was supplied.
pub(crate) fn explicit_sort_order(raw: Option<&RawScalar>) -> Option<i64> {
    match raw? {
        RawScalar::Integer(n) => Some(*n),
        RawScalar::Float(f) if f.fract() == 0.0 => f.to_i64(),
        _ => None,
    }
}

/// Round to a whole number of minor units, half away from zero.
fn round_minor(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
