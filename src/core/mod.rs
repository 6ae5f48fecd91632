//! Line-item pricing, invoice totals and line-item validation.
//!
//! All amounts are integers in minor currency units (pence). The calculator
//! accepts untrusted input and coerces bad values to safe defaults; the
//! validator reports the same problems as bilingual errors.

mod calculator;
pub mod currencies;
mod error;
mod input;
mod rates;
mod totals;
mod validation;

pub use calculator::*;
pub use currencies::{Currency, format_minor_units, is_supported_currency_code};
pub use error::*;
pub use input::*;
pub use rates::*;
pub use totals::*;
pub use validation::*;
