use ledger_core::currency::{from_cents, to_cents};
use ledger_core::errors::LedgerError;
use proptest::prelude::*;

#[test]
fn reference_literals_parse_exactly() {
    assert_eq!(to_cents("$0.00").unwrap(), 0);
    assert_eq!(to_cents("$0.01").unwrap(), 1);
    assert_eq!(to_cents("$1,999.99").unwrap(), 199_999);
    assert_eq!(to_cents("($45.50)").unwrap(), -4_550);
}

#[test]
fn minus_signs_are_never_accepted() {
    assert!(matches!(to_cents("-$45.50"), Err(LedgerError::Format(_))));
    assert!(matches!(to_cents("$-45.50"), Err(LedgerError::Format(_))));
}

#[test]
fn grouping_is_mandatory_above_three_digits() {
    assert!(matches!(to_cents("$1000.00"), Err(LedgerError::Format(_))));
    assert_eq!(to_cents("$1,000.00").unwrap(), 100_000);
}

proptest! {
    #[test]
    fn display_round_trips_for_non_negative_cents(n in 0i64..=10_000_000) {
        prop_assert_eq!(to_cents(&from_cents(n)).unwrap(), n);
    }

    #[test]
    fn display_round_trips_for_negative_cents(n in -10_000_000i64..0) {
        prop_assert_eq!(to_cents(&from_cents(n)).unwrap(), n);
    }
}
