use defter::core::*;
use rust_decimal_macros::dec;
use serde_json::json;

fn consulting() -> RawLineItem {
    RawLineItem::new("Consulting", 10000)
        .quantity(2)
        .vat_rate("standard")
}

// --- Single line ---

#[test]
fn consulting_line() {
    let line = calculate_line_item(&consulting());
    assert_eq!(line.net_amount, 20000);
    assert_eq!(line.vat_amount, 4000);
    assert_eq!(line.line_total, 24000);
}

#[test]
fn consulting_invoice() {
    let totals = calculate_invoice_totals(&[consulting()]);
    assert_eq!(totals.subtotal, 20000);
    assert_eq!(totals.vat_amount, 4000);
    assert_eq!(totals.total_amount, 24000);
    assert_eq!(totals.calculated_items.len(), 1);
}

#[test]
fn zero_rate_never_charges_vat() {
    for price in [0, 1, 99, 10_000, 987_654_321] {
        let line = calculate_line_item(&RawLineItem::new("Books", price).quantity(3).vat_rate("zero"));
        assert_eq!(line.vat_amount, 0);
        assert_eq!(line.line_total, line.net_amount);
    }
}

// --- Mixed rates ---

#[test]
fn mixed_rate_invoice() {
    let totals = calculate_invoice_totals(&[
        RawLineItem::new("Web design", 45000).vat_rate("standard"),
        RawLineItem::new("Domestic energy", 12345).quantity("1.5").vat_rate("reduced"),
        RawLineItem::new("Printed books", 1299).quantity(4).vat_rate("zero"),
        RawLineItem::new("Training course", 30000).vat_rate("exempt"),
        RawLineItem::new("Grant", 50000).vat_rate("outside-scope"),
    ]);

    // 12345 × 1.5 = 18517.5 → 18518; 5% = 925.9 → 926
    let energy = &totals.calculated_items[1];
    assert_eq!(energy.net_amount, 18518);
    assert_eq!(energy.vat_amount, 926);

    assert_eq!(totals.subtotal, 45000 + 18518 + 5196 + 30000 + 50000);
    assert_eq!(totals.vat_amount, 9000 + 926);
    assert_eq!(totals.total_amount, totals.subtotal + totals.vat_amount);

    let breakdown: Vec<_> = totals
        .vat_breakdown
        .iter()
        .map(|b| (b.vat_rate_id, b.vat_rate_percent, b.net_amount, b.vat_amount))
        .collect();
    assert_eq!(
        breakdown,
        vec![
            (VatRate::Standard, Some(dec!(20)), 45000, 9000),
            (VatRate::Reduced, Some(dec!(5)), 18518, 926),
            (VatRate::Zero, Some(dec!(0)), 5196, 0),
            (VatRate::Exempt, Some(dec!(0)), 30000, 0),
            (VatRate::OutsideScope, None, 50000, 0),
        ]
    );
}

#[test]
fn per_line_rounding_is_summed() {
    // Each line rounds on its own: 3 × round(0.2 × 1) = 0, not round(0.6) = 1.
    let item = RawLineItem::new("Sticker", 1).vat_rate("standard");
    let totals = calculate_invoice_totals(&[item.clone(), item.clone(), item]);
    assert_eq!(totals.subtotal, 3);
    assert_eq!(totals.vat_amount, 0);
}

// --- Input handling ---

#[test]
fn request_body_round_trip() {
    let body = r#"[
        {"description": "Consulting", "quantity": 2, "unitPrice": 10000, "vatRate": "standard"},
        {"description": "Travel", "quantity": "1", "unitPrice": 4550, "vatRate": 0, "sortOrder": 9}
    ]"#;
    let items = parse_line_items(body).unwrap();
    assert!(validate_line_items(&items).is_valid);

    let totals = calculate_invoice_totals(&items);
    assert_eq!(totals.subtotal, 24550);
    assert_eq!(totals.vat_amount, 4000);
    assert_eq!(totals.calculated_items[1].vat_rate_id, VatRate::Zero);
    assert_eq!(totals.calculated_items[1].sort_order, 9);
    assert_eq!(totals.calculated_items[0].sort_order, 0);
}

#[test]
fn untyped_value_entry_points() {
    let value = json!([{"description": "Hosting", "unitPrice": 999}]);
    assert!(validate_line_items_value(&value).is_valid);
    assert_eq!(calculate_invoice_totals_value(&value).total_amount, 1199);

    let not_array = json!("items");
    assert!(!validate_line_items_value(&not_array).is_valid);
    assert_eq!(calculate_invoice_totals_value(&not_array), InvoiceTotals::default());
}

#[test]
fn calculation_is_idempotent_and_does_not_mutate_input() {
    let items = vec![
        consulting(),
        RawLineItem::new("Odd", 333).quantity("0.5").vat_rate(17.5),
    ];
    let before = items.clone();
    let first = calculate_invoice_totals(&items);
    let second = calculate_invoice_totals(&items);
    assert_eq!(first, second);
    assert_eq!(items, before);
}

#[test]
fn typed_path_matches_raw_path_for_valid_input() {
    let items = vec![
        consulting(),
        RawLineItem::new("Energy", 12345).quantity("1.5").vat_rate("reduced"),
        RawLineItem::new("Grant", 500).vat_rate("outside-scope").sort_order(4),
    ];
    let typed = validated_line_items(&items).unwrap();
    assert_eq!(calculate_validated_totals(&typed), calculate_invoice_totals(&items));
    assert_eq!(validate_and_calculate(&items).unwrap(), calculate_invoice_totals(&items));
}

#[test]
fn validate_and_calculate_rejects_bad_items() {
    let err = validate_and_calculate(&[RawLineItem::new("", 100)]).unwrap_err();
    assert!(err.to_string().contains("items[0].description"));
}

// --- Presentation helpers ---

#[test]
fn totals_in_both_languages() {
    let totals = calculate_invoice_totals(&[consulting()]);
    assert_eq!(
        format_minor_units(totals.total_amount, Currency::Gbp, Locale::En),
        "£240.00"
    );
    assert_eq!(
        format_minor_units(totals.total_amount, Currency::Gbp, Locale::Tr),
        "240,00 £"
    );
    let breakdown = &totals.vat_breakdown[0];
    assert_eq!(breakdown.vat_rate_id.label(), "Standard rate (20%)");
    assert_eq!(breakdown.vat_rate_id.label_tr(), "Standart oran (%20)");
}


// --- Snapshot ---

#[test]
fn totals_json_snapshot() {
    let totals = calculate_invoice_totals(&[consulting()]);
    insta::assert_json_snapshot!(totals, @r#"
    {
      "subtotal": 20000,
      "vatAmount": 4000,
      "totalAmount": 24000,
      "calculatedItems": [
        {
          "description": "Consulting",
          "quantity": "2",
          "unitPrice": 10000,
          "vatRateId": "standard",
          "vatRatePercent": "20",
          "netAmount": 20000,
          "vatAmount": 4000,
          "lineTotal": 24000,
          "sortOrder": 0
        }
      ],
      "vatBreakdown": [
        {
          "vatRateId": "standard",
          "vatRatePercent": "20",
          "netAmount": 20000,
          "vatAmount": 4000
        }
      ]
    }
    "#);
}
