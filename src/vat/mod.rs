//! UK VAT registration numbers and registration thresholds.
//!
//! # Example
//!
//! ```
//! use defter::vat::*;
//!
//! let number = validate_vat_number("GB 980 7806 84").unwrap();
//! assert_eq!(number.to_string(), "GB980780684");
//!
//! // £95,000 turnover over the last 12 months
//! let status = check_registration(9_500_000, 0);
//! assert!(status.must_register);
//! ```

mod number;
mod registration;

pub use number::{UkVatNumber, VatNumberError, VatNumberKind, VatPrefix, validate_vat_number};
pub use registration::{
    DEREGISTRATION_THRESHOLD, REGISTRATION_THRESHOLD, RegistrationStatus, check_registration,
    may_deregister,
};
