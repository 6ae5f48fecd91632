#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        if let Ok(number) = defter::vat::validate_vat_number(s) {
            let again = defter::vat::validate_vat_number(&number.to_string()).unwrap();
            assert_eq!(again, number);
        }
    }
});
