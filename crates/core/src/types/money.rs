//! Price and discount arithmetic.
//!
//! The backend stores a product's selling `price` together with a percentage
//! `discount`. The storefront shows the pre-discount price struck through, and
//! the admin product form goes the other way: from an original price and a
//! discount to the selling price. All amounts use decimal arithmetic and are
//! rounded to cents.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for displayed amounts.
const CENTS: u32 = 2;

fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}

/// Selling price after applying a percentage discount.
///
/// `price = original × (1 − discount / 100)`
///
/// Returns `None` if the discount is outside `0..=100`.
///
/// ```
/// use rust_decimal::Decimal;
/// use shopfront_core::discounted_price;
///
/// let price = discounted_price(Decimal::from(100), Decimal::from(20));
/// assert_eq!(price, Some(Decimal::from(80)));
/// ```
#[must_use]
pub fn discounted_price(original: Decimal, discount_percent: Decimal) -> Option<Decimal> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return None;
    }
    let factor = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;
    Some(round_cents(original * factor))
}

/// Pre-discount price recovered from a selling price and its discount.
///
/// `original = price / (1 − discount / 100)`
///
/// Returns `None` if the discount is outside `0..100`; a 100% discount has no
/// recoverable original price.
#[must_use]
pub fn original_price(price: Decimal, discount_percent: Decimal) -> Option<Decimal> {
    if discount_percent < Decimal::ZERO || discount_percent >= Decimal::ONE_HUNDRED {
        return None;
    }
    let factor = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;
    price.checked_div(factor).map(round_cents)
}

/// Percentage discount implied by an original and a selling price.
///
/// Returns `None` when the original price is not positive or the selling
/// price exceeds it.
#[must_use]
pub fn discount_percent(original: Decimal, price: Decimal) -> Option<Decimal> {
    if original <= Decimal::ZERO || price > original || price < Decimal::ZERO {
        return None;
    }
    let ratio = (original - price) / original;
    Some(round_cents(ratio * Decimal::ONE_HUNDRED))
}

/// Format an amount for display, e.g. `$12.50`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_original_price_from_discount() {
        assert_eq!(original_price(dec("80"), dec("20")), Some(dec("100.00")));
        assert_eq!(original_price(dec("100"), dec("25")), Some(dec("133.33")));
    }

    #[test]
    fn test_original_price_without_discount() {
        assert_eq!(original_price(dec("19.99"), Decimal::ZERO), Some(dec("19.99")));
    }

    #[test]
    fn test_original_price_rejects_full_discount() {
        assert_eq!(original_price(dec("10"), dec("100")), None);
        assert_eq!(original_price(dec("10"), dec("-5")), None);
    }

    #[test]
    fn test_discounted_price() {
        assert_eq!(discounted_price(dec("133.33"), dec("25")), Some(dec("100.00")));
        assert_eq!(discounted_price(dec("50"), dec("100")), Some(dec("0.00")));
        assert_eq!(discounted_price(dec("50"), dec("101")), None);
    }

    #[test]
    fn test_discount_recovers_price() {
        for (price, discount) in [("49.99", "10"), ("12.00", "33"), ("7.25", "50")] {
            let original = original_price(dec(price), dec(discount)).unwrap();
            let recovered = discounted_price(original, dec(discount)).unwrap();
            assert!((recovered - dec(price)).abs() <= dec("0.01"));
        }
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(dec("100"), dec("80")), Some(dec("20.00")));
        assert_eq!(discount_percent(dec("0"), dec("0")), None);
        assert_eq!(discount_percent(dec("10"), dec("12")), None);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec("12.5")), "$12.50");
        assert_eq!(format_price(dec("0")), "$0.00");
        assert_eq!(format_price(dec("1234.567")), "$1234.57");
        assert_eq!(format_price(dec("-3")), "-$3.00");
    }
}
