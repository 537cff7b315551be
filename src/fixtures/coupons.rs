//! Coupon Fixtures

use rustc_hash::FxHashMap;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponDiscount},
    fixtures::{
        FixtureError,
        products::{parse_percentage, parse_price},
    },
};

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Map of coupon code -> coupon fixture
    pub coupons: FxHashMap<String, CouponFixture>,
}

/// Coupon fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouponFixture {
    /// Fixed amount off the cart total
    Amount {
        /// Coupon name
        name: String,

        /// Amount (e.g., "5000 KRW")
        value: String,
    },

    /// Percentage off the cart total
    Percentage {
        /// Coupon name
        name: String,

        /// Rate (e.g., "10%" or "0.1")
        value: String,
    },
}

impl CouponFixture {
    /// Convert into a [`Coupon`] with the given code
    ///
    /// # Errors
    ///
    /// Returns an error if the amount or rate cannot be parsed.
    pub fn try_into_coupon(self, code: String) -> Result<Coupon<'static>, FixtureError> {
        match self {
            CouponFixture::Amount { name, value } => {
                let (minor_units, currency) = parse_price(&value)?;

                if minor_units <= 0 {
                    return Err(FixtureError::InvalidPrice(value));
                }

                Ok(Coupon::new(
                    name,
                    code,
                    CouponDiscount::Amount(Money::from_minor(minor_units, currency)),
                ))
            }
            CouponFixture::Percentage { name, value } => {
                let rate = parse_percentage(&value)?;

                Ok(Coupon::new(name, code, CouponDiscount::Percentage(rate)))
            }
        }
    }
}
