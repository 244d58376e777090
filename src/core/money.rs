use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Balances with a magnitude at or below one cent are treated as settled
/// throughout the system — both display and optimization use this tolerance.
pub const SETTLED_EPSILON: Decimal = dec!(0.01);

/// Round an amount to whole cents, halves away from zero.
///
/// Balance calculation rounds once, after all expenses are folded, so
/// rounding error does not compound across many small expenses.
///
/// # Examples
///
/// ```
/// use splitledger::core::money::round_to_cents;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_to_cents(dec!(3.333)), dec!(3.33));
/// assert_eq!(round_to_cents(dec!(0.015)), dec!(0.02));
/// assert_eq!(round_to_cents(dec!(-0.015)), dec!(-0.02));
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Whether an amount is within the settled tolerance of zero.
pub fn is_settled(amount: Decimal) -> bool {
    amount.abs() <= SETTLED_EPSILON
}

/// Render an amount as a dollar string with exactly two decimal digits.
///
/// Negative amounts render with the sign between the symbol and the digits:
/// `"$-10.50"`.
///
/// # Examples
///
/// ```
/// use splitledger::core::money::format_currency;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(10.5)), "$10.50");
/// assert_eq!(format_currency(dec!(-10.5)), "$-10.50");
/// assert_eq!(format_currency(Decimal::ZERO), "$0.00");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let mut cents = round_to_cents(amount);
    if cents.is_zero() {
        // Avoid "$-0.00" for sub-cent negative noise.
        cents.set_sign_positive(true);
    }
    cents.rescale(2);
    format!("${}", cents)
}
