use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calculator::{
    CalculatedLineItem, calculate_line_item, calculate_validated_line_item, explicit_sort_order,
};
use super::input::{RawLineItem, line_items_from_value};
use super::rates::VatRate;
use super::validation::ValidatedLineItem;

/// Invoice totals in minor currency units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    /// Sum of line net amounts.
    pub subtotal: i64,
    /// Sum of line VAT amounts.
    pub vat_amount: i64,
    /// subtotal + vat_amount.
    pub total_amount: i64,
    /// One entry per input item, in input order.
    pub calculated_items: Vec<CalculatedLineItem>,
    /// Per-rate subtotals, highest percentage first.
    pub vat_breakdown: Vec<VatBreakdownEntry>,
}

/// Net and VAT subtotal for one (rate id, percentage) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VatBreakdownEntry {
    pub vat_rate_id: VatRate,
    pub vat_rate_percent: Option<Decimal>,
    pub net_amount: i64,
    pub vat_amount: i64,
}

/// Calculate totals for untrusted line items.
///
/// Each item is priced with [`calculate_line_item`]; items without an
/// explicit integral `sortOrder` get their position in `items`. An empty
/// slice yields all-zero totals.
pub fn calculate_invoice_totals(items: &[RawLineItem]) -> InvoiceTotals {
    let lines = items.iter().enumerate().map(|(index, item)| {
        let mut line = calculate_line_item(item);
        line.sort_order = explicit_sort_order(item.sort_order.as_ref()).unwrap_or(index as i64);
        line
    });
    aggregate(lines)
}

/// Calculate totals for an untyped JSON value.
///
/// Anything other than an array yields all-zero totals.
pub fn calculate_invoice_totals_value(items: &serde_json::Value) -> InvoiceTotals {
    match line_items_from_value(items) {
        Some(items) => calculate_invoice_totals(&items),
        None => {
            tracing::debug!("line items are not an array, returning zero totals");
            InvoiceTotals::default()
        }
    }
}

/// Calculate totals for line items that have already passed validation.
pub fn calculate_validated_totals(items: &[ValidatedLineItem]) -> InvoiceTotals {
    let lines = items.iter().enumerate().map(|(index, item)| {
        let mut line = calculate_validated_line_item(item);
        line.sort_order = item.sort_order.unwrap_or(index as i64);
        line
    });
    aggregate(lines)
}

fn aggregate(lines: impl Iterator<Item = CalculatedLineItem>) -> InvoiceTotals {
    let mut subtotal: i64 = 0;
    let mut vat_amount: i64 = 0;
    let mut calculated_items = Vec::new();

    // Insertion-ordered groups keyed by (rate id, percentage).
    let mut vat_breakdown: Vec<VatBreakdownEntry> = Vec::new();
    let mut group_index: HashMap<(VatRate, Option<Decimal>), usize> = HashMap::new();

    for line in lines {
        subtotal = subtotal.saturating_add(line.net_amount);
        vat_amount = vat_amount.saturating_add(line.vat_amount);

        let key = (line.vat_rate_id, line.vat_rate_percent);
        let index = *group_index.entry(key).or_insert_with(|| {
            vat_breakdown.push(VatBreakdownEntry {
                vat_rate_id: line.vat_rate_id,
                vat_rate_percent: line.vat_rate_percent,
                net_amount: 0,
                vat_amount: 0,
            });
            vat_breakdown.len() - 1
        });
        let group = &mut vat_breakdown[index];
        group.net_amount = group.net_amount.saturating_add(line.net_amount);
        group.vat_amount = group.vat_amount.saturating_add(line.vat_amount);

        calculated_items.push(line);
    }

    // Stable: equal percentages keep first-seen order. Not-applicable sorts as 0.
    vat_breakdown.sort_by(|a, b| {
        b.vat_rate_percent
            .unwrap_or_default()
            .cmp(&a.vat_rate_percent.unwrap_or_default())
    });

    tracing::trace!(
        items = calculated_items.len(),
        subtotal,
        vat_amount,
        "calculated invoice totals"
    );

    InvoiceTotals {
        subtotal,
        vat_amount,
        total_amount: subtotal.saturating_add(vat_amount),
        calculated_items,
        vat_breakdown,
    }
}
