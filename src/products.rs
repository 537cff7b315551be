//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

use crate::discounts::QuantityDiscount;

/// Product identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a new product identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// How many units of a product may be sold.
///
/// `Limited(0)` means the product is out of stock. Products whose stock is
/// not tracked at all are `Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stock {
    /// A tracked number of units.
    Limited(u32),

    /// Stock is not tracked; any quantity may be sold.
    #[default]
    Unlimited,
}

impl Stock {
    /// Caps a requested quantity at the available stock.
    pub fn cap(self, quantity: u32) -> u32 {
        match self {
            Stock::Limited(available) => quantity.min(available),
            Stock::Unlimited => quantity,
        }
    }

    /// Stock left after `quantity` units have been taken.
    pub fn less(self, quantity: u32) -> Stock {
        match self {
            Stock::Limited(available) => Stock::Limited(available.saturating_sub(quantity)),
            Stock::Unlimited => Stock::Unlimited,
        }
    }

    /// Whether no further units can be taken.
    pub fn is_sold_out(self) -> bool {
        matches!(self, Stock::Limited(0))
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stock::Limited(available) => write!(f, "{available}"),
            Stock::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product identifier, unique within a catalog
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Unit price
    pub price: Money<'a, Currency>,

    /// Available stock
    pub stock: Stock,

    /// Quantity discounts, in the order they were added
    pub discounts: Vec<QuantityDiscount>,
}

impl<'a> Product<'a> {
    /// Creates a product with unlimited stock and no discounts.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock: Stock::Unlimited,
            discounts: Vec::new(),
        }
    }

    /// Sets the product stock.
    #[must_use]
    pub fn with_stock(mut self, stock: Stock) -> Self {
        self.stock = stock;
        self
    }

    /// Appends quantity discounts.
    #[must_use]
    pub fn with_discounts(mut self, discounts: impl IntoIterator<Item = QuantityDiscount>) -> Self {
        self.discounts.extend(discounts);
        self
    }
}
