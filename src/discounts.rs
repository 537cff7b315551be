//! Discounts
//!
//! Per-product quantity discounts: buying at least `quantity` units of a
//! product discounts the whole line by `rate`. When several discounts are met
//! only the largest rate applies.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{cart::CartItem, percentages::fraction};

/// Errors specific to discount construction.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Rates are fractions in `[0, 1)`.
    #[error("discount rate must be at least 0 and below 1, got {0}")]
    RateOutOfRange(Decimal),
}

/// A quantity threshold paired with the rate it unlocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityDiscount {
    quantity: u32,
    rate: Percentage,
}

impl QuantityDiscount {
    /// Creates a new quantity discount.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::RateOutOfRange`] unless `0 <= rate < 1`.
    pub fn new(quantity: u32, rate: Percentage) -> Result<Self, DiscountError> {
        let value = fraction(rate);

        if value < Decimal::ZERO || value >= Decimal::ONE {
            return Err(DiscountError::RateOutOfRange(value));
        }

        Ok(Self { quantity, rate })
    }

    /// Minimum quantity required for the discount to apply
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Discount rate
    pub fn rate(&self) -> Percentage {
        self.rate
    }

    /// Whether buying `quantity` units meets the threshold.
    pub fn applies_to(&self, quantity: u32) -> bool {
        self.quantity <= quantity
    }
}

/// Returns the largest discount rate the cart item qualifies for, or zero.
pub fn get_max_applicable_discount(item: &CartItem<'_>) -> Percentage {
    max_applicable_rate(&item.product().discounts, item.quantity())
}

/// Returns the largest rate among `discounts` whose threshold is met by `quantity`.
///
/// Thresholds above `quantity` are never considered. Returns zero when nothing applies.
pub fn max_applicable_rate(discounts: &[QuantityDiscount], quantity: u32) -> Percentage {
    discounts
        .iter()
        .filter(|discount| discount.applies_to(quantity))
        .map(QuantityDiscount::rate)
        .max_by(|a, b| fraction(*a).cmp(&fraction(*b)))
        .unwrap_or_else(|| Percentage::from(Decimal::ZERO))
}

/// Calculate the discount amount in minor units for a percentage of a minor unit amount.
///
/// Rounds half away from zero and saturates at the `i64` bounds.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> i64 {
    let applied = fraction(percent).checked_mul(Decimal::from(minor));

    let Some(applied) = applied else {
        return saturated(fraction(percent).is_sign_negative() != minor.is_negative());
    };

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_else(|| saturated(applied.is_sign_negative()))
}

fn saturated(negative: bool) -> i64 {
    if negative { i64::MIN } else { i64::MAX }
}
