//! # defter
//!
//! Invoice totals for UK small-business bookkeeping: line-item pricing, VAT
//! breakdown by rate, and bilingual (English/Turkish) validation of
//! untrusted line items.
//!
//! Amounts are `i64` minor currency units (pence); quantities and VAT
//! percentages are [`rust_decimal::Decimal`]. Nothing here touches floating
//! point currency, performs I/O, or holds global mutable state.
//!
//! ## Quick Start
//!
//! ```rust
//! use defter::core::*;
//!
//! let items = vec![
//!     RawLineItem::new("Consulting", 10000).quantity(2).vat_rate("standard"),
//!     RawLineItem::new("Children's car seat", 4999).vat_rate("reduced"),
//! ];
//!
//! let report = validate_line_items(&items);
//! assert!(report.is_valid);
//!
//! let totals = calculate_invoice_totals(&items);
//! assert_eq!(totals.subtotal, 24999);
//! assert_eq!(totals.vat_amount, 4250);
//! assert_eq!(totals.total_amount, 29249);
//! assert_eq!(format_minor_units(totals.total_amount, Currency::Gbp, Locale::En), "£292.49");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Line-item calculator, totals, validation, currencies |
//! | `vat` | UK VAT registration number checks and registration threshold |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "vat")]
pub mod vat;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
