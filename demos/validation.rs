use defter::core::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let locale = Locale::from_tag(&std::env::args().nth(1).unwrap_or_default());

    // A request body as an HTTP handler would receive it.
    let body = r#"[
        {"description": "Consulting", "quantity": "2", "unitPrice": 10000, "vatRate": "standard"},
        {"description": "", "unitPrice": 500},
        {"description": "Imported goods", "quantity": -1, "unitPrice": 12.5, "vatRate": "luxury"}
    ]"#;

    let items = match parse_line_items(body) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let report = validate_line_items(&items);
    println!("valid: {}", report.is_valid);
    for error in &report.errors {
        println!("  {}: {}", error.field, error.localized(locale));
    }

    // The calculator still prices everything, substituting defaults.
    // Run with RUST_LOG=defter=debug to see each substitution.
    let totals = calculate_invoice_totals(&items);
    println!(
        "lenient total: {}",
        format_minor_units(totals.total_amount, Currency::Gbp, locale)
    );

    match validate_and_calculate(&items) {
        Ok(totals) => println!("strict total: {}", totals.total_amount),
        Err(e) => println!("strict: {e}"),
    }
}
