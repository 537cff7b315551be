//! Coupons

use std::fmt;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};

use crate::{
    discounts::percent_of_minor,
    percentages::percent_points,
};

/// How a coupon reduces the cart total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CouponDiscount<'a> {
    /// Take a fixed amount off the total (e.g. "₩5,000 off").
    Amount(Money<'a, Currency>),

    /// Take a percentage of the item-discounted total (e.g. "10% off").
    Percentage(Percentage),
}

/// A cart-wide coupon. At most one is applied to a cart.
#[derive(Debug, Clone, PartialEq)]
pub struct Coupon<'a> {
    /// Display name
    pub name: String,

    /// Code entered by shoppers, unique within a catalog
    pub code: String,

    /// Discount granted
    pub discount: CouponDiscount<'a>,
}

impl<'a> Coupon<'a> {
    /// Creates a new coupon.
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        discount: CouponDiscount<'a>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            discount,
        }
    }

    /// Currency of an amount coupon; percentage coupons have none.
    pub fn currency(&self) -> Option<&'a Currency> {
        match self.discount {
            CouponDiscount::Amount(amount) => Some(amount.currency()),
            CouponDiscount::Percentage(_) => None,
        }
    }

    /// Amount in minor units this coupon takes off `subtotal_minor`.
    ///
    /// The result never exceeds the subtotal, so applying a coupon cannot
    /// push a total below zero.
    pub fn discount_minor(&self, subtotal_minor: i64) -> i64 {
        let discount = match self.discount {
            CouponDiscount::Amount(amount) => amount.to_minor_units(),
            CouponDiscount::Percentage(percent) => percent_of_minor(percent, subtotal_minor),
        };

        discount.clamp(0, subtotal_minor.max(0))
    }
}

impl fmt::Display for Coupon<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.discount {
            CouponDiscount::Amount(amount) => {
                write!(f, "{} ({}): {amount} off", self.name, self.code)
            }
            CouponDiscount::Percentage(percent) => write!(
                f,
                "{} ({}): {}% off",
                self.name,
                self.code,
                percent_points(percent)
            ),
        }
    }
}
