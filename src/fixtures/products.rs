//! Product Fixtures

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, KRW, USD},
};
use serde::Deserialize;

use crate::{
    discounts::QuantityDiscount,
    fixtures::FixtureError,
    percentages::{from_percentage, is_negative_number},
    products::{Product, Stock},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in catalog order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product identifier
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "10000 KRW")
    pub price: String,

    /// Units in stock; omitted when stock isn't tracked
    #[serde(default)]
    pub stock: Option<u32>,

    /// Quantity discounts
    #[serde(default)]
    pub discounts: Vec<DiscountFixture>,
}

/// Quantity discount fixture
#[derive(Debug, Deserialize)]
pub struct DiscountFixture {
    /// Minimum quantity
    pub quantity: u32,

    /// Rate (e.g., "10%" or "0.1")
    pub rate: String,
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let discounts = fixture
            .discounts
            .iter()
            .map(|discount| {
                let rate = parse_percentage(&discount.rate)?;

                QuantityDiscount::new(discount.quantity, rate)
                    .map_err(|err| FixtureError::InvalidPercentage(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let stock = fixture.stock.map_or(Stock::Unlimited, Stock::Limited);

        Ok(
            Product::new(fixture.id, fixture.name, Money::from_minor(minor_units, currency))
                .with_stock(stock)
                .with_discounts(discounts),
        )
    }
}

/// Parse price string (e.g., "10000 KRW" or "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal or has more decimal places
/// than the currency's minor unit, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "KRW" => KRW,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    if amount.normalize().scale() > currency.exponent {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse percentage string (e.g., "15%" or "0.15") into a `Percentage`
///
/// Accepts two formats:
/// - Percentage format: "15%" for 15%
/// - Decimal format: "0.15" for 15%
///
/// # Errors
///
/// Returns an error if the string cannot be parsed or the value is negative.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let trimmed = s.trim();

    if let Some(points) = trimmed.strip_suffix('%') {
        let points = points
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

        return from_percentage(points)
            .map_err(|err| FixtureError::InvalidPercentage(err.to_string()));
    }

    let value = trimmed
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))?;

    if is_negative_number(value) {
        return Err(FixtureError::InvalidPercentage(s.to_string()));
    }

    Ok(Percentage::from(value))
}
