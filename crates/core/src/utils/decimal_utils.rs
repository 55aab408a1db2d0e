use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `(value / base - 1) * 100`, or zero when `base` is zero. Saturates at the
/// `Decimal` bounds.
pub fn percent_change(base: Decimal, value: Decimal) -> Decimal {
    match value.checked_div(base) {
        Some(ratio) => ratio.saturating_sub(Decimal::ONE).saturating_mul(dec!(100)),
        None => Decimal::ZERO,
    }
}
