use defter::core::*;

fn main() {
    let items = vec![
        RawLineItem::new("Website redesign", 150_000).vat_rate("standard"),
        RawLineItem::new("Hosting (monthly)", 1_999).quantity(12).vat_rate("standard"),
        RawLineItem::new("Printed brochures", 450).quantity(200).vat_rate("zero"),
        RawLineItem::new("Training day", 60_000).vat_rate("exempt"),
    ];

    let report = validate_line_items(&items);
    if !report.is_valid {
        for error in &report.errors {
            eprintln!("{error}");
        }
        std::process::exit(1);
    }

    let totals = calculate_invoice_totals(&items);
    let gbp = |amount| format_minor_units(amount, Currency::Gbp, Locale::En);

    for line in &totals.calculated_items {
        println!(
            "  {} x {} @ {} = {} (+ {} VAT, {})",
            line.quantity,
            line.description,
            gbp(line.unit_price),
            gbp(line.net_amount),
            gbp(line.vat_amount),
            line.vat_rate_id
        );
    }
    println!("---");
    for entry in &totals.vat_breakdown {
        println!(
            "  {:<28} net {:>12}  VAT {:>10}",
            entry.vat_rate_id.label(),
            gbp(entry.net_amount),
            gbp(entry.vat_amount)
        );
    }
    println!("---");
    println!("Subtotal: {}", gbp(totals.subtotal));
    println!("VAT:      {}", gbp(totals.vat_amount));
    println!("Total:    {}", gbp(totals.total_amount));
    println!(
        "Toplam:   {}",
        format_minor_units(totals.total_amount, Currency::Gbp, Locale::Tr)
    );
}
