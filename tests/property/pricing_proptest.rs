//! Property-based tests for subscription pricing
//!
//! Uses proptest to generate durations and verify the pricing invariants

use proptest::prelude::*;
use remotedesk::shared::pricing::{
    discount_percent, quote, quote_days, DurationSelection, MAX_DAYS, MIN_DAYS, UNIT_PRICE,
};
use rust_decimal::Decimal;

proptest! {
    #[test]
    fn test_base_is_days_times_unit_price(days in MIN_DAYS..=MAX_DAYS) {
        let price = quote_days(days).unwrap();
        prop_assert_eq!(price.base_amount, Decimal::from(days) * UNIT_PRICE);
    }

    #[test]
    fn test_total_never_exceeds_base(days in MIN_DAYS..=MAX_DAYS) {
        let price = quote_days(days).unwrap();
        prop_assert!(price.total_amount <= price.base_amount);
        prop_assert!(price.total_amount > Decimal::ZERO);
        prop_assert_eq!(price.total_amount.scale(), 2);
    }

    #[test]
    fn test_discount_is_monotonic(a in MIN_DAYS..=MAX_DAYS, b in MIN_DAYS..=MAX_DAYS) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(discount_percent(short) <= discount_percent(long));
    }

    #[test]
    fn test_longer_plans_cost_more(days in MIN_DAYS..MAX_DAYS) {
        let this = quote_days(days).unwrap();
        let next = quote_days(days + 1).unwrap();
        // Crossing a tier boundary may lower the total, but only at a boundary.
        if discount_percent(days) == discount_percent(days + 1) {
            prop_assert!(next.total_amount > this.total_amount);
        }
    }

    #[test]
    fn test_out_of_range_rejected(days in (MAX_DAYS + 1)..u32::MAX) {
        prop_assert!(DurationSelection::new(days).is_err());
        prop_assert!(quote_days(days).is_err());
    }

    #[test]
    fn test_clamped_matches_new_in_range(days in any::<i64>()) {
        let clamped = DurationSelection::clamped(days);
        prop_assert!((MIN_DAYS..=MAX_DAYS).contains(&clamped.days()));
        if (i64::from(MIN_DAYS)..=i64::from(MAX_DAYS)).contains(&days) {
            prop_assert_eq!(clamped, DurationSelection::new(days as u32).unwrap());
        }
    }

    #[test]
    fn test_quote_is_pure(days in MIN_DAYS..=MAX_DAYS) {
        let selection = DurationSelection::new(days).unwrap();
        prop_assert_eq!(quote(selection), quote(selection));
    }
}

#[test]
fn test_zero_days_rejected() {
    assert!(DurationSelection::new(0).is_err());
}
