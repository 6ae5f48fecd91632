#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Must not panic on any JSON; only the report's own consistency is checked.
    let report = defter::core::validate_line_items_value(&value);
    assert_eq!(report.is_valid, report.errors.is_empty());

    let totals = defter::core::calculate_invoice_totals_value(&value);
    // Valid lines are non-negative, so an unsaturated total means no group saturated either.
    if report.is_valid && totals.total_amount < i64::MAX {
        let net: i128 = totals.vat_breakdown.iter().map(|b| b.net_amount as i128).sum();
        let vat: i128 = totals.vat_breakdown.iter().map(|b| b.vat_amount as i128).sum();
        assert_eq!(net, totals.subtotal as i128);
        assert_eq!(vat, totals.vat_amount as i128);
    }
});
