//! Percentages
//!
//! Discount rates are stored as [`Percentage`] fractions (`0.1` for 10%).
//! Coupons and admin input speak in percent points (`10` for 10%); these
//! helpers convert between the two.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors converting percent points into a fraction.
#[derive(Debug, Error, PartialEq)]
pub enum PercentageError {
    /// Percent points must be zero or greater.
    #[error("invalid percentage: {0} is negative; percentages must be zero or greater")]
    Negative(Decimal),
}

/// Converts percent points into a fractional [`Percentage`], so `10` becomes `0.1`
/// and `100` becomes `1`.
///
/// # Errors
///
/// Returns [`PercentageError::Negative`] if `points` is below zero.
pub fn from_percentage(points: Decimal) -> Result<Percentage, PercentageError> {
    if is_negative_number(points) {
        return Err(PercentageError::Negative(points));
    }

    Ok(Percentage::from(points / Decimal::ONE_HUNDRED))
}

/// Returns true if `value` is strictly below zero.
pub fn is_negative_number(value: Decimal) -> bool {
    value < Decimal::ZERO
}

/// The fractional value of a percentage (`0.25` for 25%).
pub fn fraction(percentage: Percentage) -> Decimal {
    // `decimal_percentage` doesn't expose the inner Decimal directly
    percentage * Decimal::ONE
}

/// Converts a fractional percentage to percent points for display.
pub fn percent_points(percentage: Percentage) -> Decimal {
    fraction(percentage)
        .checked_mul(Decimal::ONE_HUNDRED)
        .unwrap_or(Decimal::MAX)
        .round_dp(2)
        .normalize()
}
