use defter::vat::*;

fn main() {
    for input in ["GB 980 7806 84", "GB123456789", "XI434031494", "GD123", "HA123"] {
        match validate_vat_number(input) {
            Ok(number) => println!("{input:<16} ok    {number} ({:?})", number.kind),
            Err(e) => println!("{input:<16} error {e}"),
        }
    }

    // Turnover in pence
    for (rolling, next_30) in [(4_500_000, 300_000), (9_150_000, 0), (2_000_000, 9_500_000)] {
        let status = check_registration(rolling, next_30);
        match status.reason {
            Some(reason) => println!("must register: {reason}"),
            None => println!("no need to register"),
        }
    }
}
