//! Money helpers with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount in the ledger is a `rust_decimal::Decimal` held at two decimal places.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places stored for every amount.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount a `NUMERIC(15,2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, MONEY_SCALE);

/// Rounds an amount to the ledger precision (half away from zero).
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `part / whole * 100` rounded to two places.
///
/// Zero when `whole` is zero or the ratio does not fit a `Decimal`.
#[must_use]
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ZERO, |pct| pct.round_dp(MONEY_SCALE))
}

/// Returns the percentage change from `base` to `current`, or zero when `base` is zero.
///
/// The base is taken by absolute value so a change between two negative
/// figures keeps a meaningful sign.
#[must_use]
pub fn growth_rate(base: Decimal, current: Decimal) -> Decimal {
    current
        .checked_sub(base)
        .map_or(Decimal::ZERO, |change| percentage_of(change, base.abs()))
}

/// Formats an amount for display with a currency symbol, e.g. `KSH 1,250.50`.
#[must_use]
pub fn format_amount(symbol: &str, amount: Decimal) -> String {
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if symbol.is_empty() {
        format!("{sign}{grouped}.{fraction}")
    } else {
        format!("{symbol} {sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_away_from_zero() {
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(-10.005)), dec!(-10.01));
    }

    #[test]
    fn test_percentage_of() {
        assert_eq!(percentage_of(dec!(400), dec!(1000)), dec!(40.00));
        assert_eq!(percentage_of(dec!(1), dec!(3)), dec!(33.33));
    }

    #[test]
    fn test_percentage_of_zero_whole() {
        assert_eq!(percentage_of(dec!(500), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_percentage_of_overflow_is_zero() {
        assert_eq!(percentage_of(Decimal::MAX, dec!(0.01)), Decimal::ZERO);
        assert_eq!(growth_rate(Decimal::MIN, Decimal::MAX), Decimal::ZERO);
    }

    #[test]
    fn test_max_amount_matches_column() {
        assert_eq!(MAX_AMOUNT, dec!(9999999999999.99));
    }

    #[test]
    fn test_growth_rate() {
        assert_eq!(growth_rate(dec!(100), dec!(150)), dec!(50.00));
        assert_eq!(growth_rate(dec!(200), dec!(100)), dec!(-50.00));
        assert_eq!(growth_rate(dec!(-100), dec!(-50)), dec!(50.00));
        assert_eq!(growth_rate(Decimal::ZERO, dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("KSH", dec!(1250.5)), "KSH 1,250.50");
        assert_eq!(format_amount("KSH", dec!(999)), "KSH 999.00");
        assert_eq!(format_amount("", dec!(1234567.891)), "1,234,567.89");
        assert_eq!(format_amount("$", dec!(-42)), "$ -42.00");
    }
}
