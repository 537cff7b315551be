//! Cart
//!
//! Carts are immutable values: every operation here returns a new [`Cart`]
//! and leaves its input untouched.

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId, Stock};

/// Errors related to cart construction or updates.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A quantity was negative or not a number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// More units were requested than the product has in stock.
    #[error("{requested} units of {product} requested, {available} in stock")]
    ExceedsStock {
        /// Product being added
        product: ProductId,
        /// Units requested
        requested: u32,
        /// Units in stock
        available: u32,
    },

    /// A price or coupon amount is in a different currency to the cart.
    #[error("{actual} does not match cart currency {expected}")]
    CurrencyMismatch {
        /// Cart currency code
        expected: &'static str,
        /// Offending currency code
        actual: &'static str,
    },
}

/// A product snapshot and the number of units in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem<'a> {
    product: Product<'a>,
    quantity: u32,
}

impl<'a> CartItem<'a> {
    /// Creates a cart item with a quantity of one.
    pub fn new(product: Product<'a>) -> Self {
        Self::with_quantity(product, 1)
    }

    /// Creates a cart item with the given quantity.
    ///
    /// The item can be priced on its own; [`Cart::with_items`] checks the
    /// quantity against stock before it goes into a cart.
    pub fn with_quantity(product: Product<'a>, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product as it was when it was added to the cart
    pub fn product(&self) -> &Product<'a> {
        &self.product
    }

    /// Number of units
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Cart
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<'a> {
    items: Vec<CartItem<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Create a new, empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Create a new cart with the given items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if any item is priced in another currency,
    /// [`CartError::InvalidQuantity`] for an item with no units, and
    /// [`CartError::ExceedsStock`] for an item with more units than its stock.
    pub fn with_items(
        items: impl Into<Vec<CartItem<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let items = items.into();

        items.iter().try_for_each(|item| {
            ensure_currency(item.product.price.currency(), currency)?;
            ensure_quantity(item)
        })?;

        Ok(Cart { items, currency })
    }

    /// Items in the order they were first added.
    pub fn items(&self) -> &[CartItem<'a>] {
        &self.items
    }

    /// Find the item for a product.
    pub fn item(&self, product_id: &ProductId) -> Option<&CartItem<'a>> {
        self.items
            .iter()
            .find(|item| &item.product.id == product_id)
    }

    /// Units of a product in the cart, zero if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.item(product_id).map_or(0, CartItem::quantity)
    }

    /// Get the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    fn with_new_items(&self, items: Vec<CartItem<'a>>) -> Self {
        Cart {
            items,
            currency: self.currency,
        }
    }
}

/// Check that `actual` is the cart currency.
///
/// # Errors
///
/// Returns [`CartError::CurrencyMismatch`] when the currencies differ.
pub fn ensure_currency(actual: &Currency, expected: &'static Currency) -> Result<(), CartError> {
    if actual == expected {
        Ok(())
    } else {
        Err(CartError::CurrencyMismatch {
            expected: expected.iso_alpha_code,
            actual: actual.iso_alpha_code,
        })
    }
}

fn ensure_quantity(item: &CartItem<'_>) -> Result<(), CartError> {
    if item.quantity == 0 {
        return Err(CartError::InvalidQuantity(item.quantity.to_string()));
    }

    match item.product.stock {
        Stock::Limited(available) if item.quantity > available => Err(CartError::ExceedsStock {
            product: item.product.id.clone(),
            requested: item.quantity,
            available,
        }),
        _ => Ok(()),
    }
}

/// Adds one unit of `product` to the cart.
///
/// An existing item goes through [`update_cart_item_quantity`] with its quantity
/// plus one, so stock limits still apply. Otherwise the product is appended
/// with a quantity of one, unless it is sold out.
///
/// # Errors
///
/// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
pub fn add_or_update_product_in_cart<'a>(
    cart: &Cart<'a>,
    product: &Product<'a>,
) -> Result<Cart<'a>, CartError> {
    ensure_currency(product.price.currency(), cart.currency)?;

    if let Some(existing) = cart.item(&product.id) {
        return Ok(update_cart_item_quantity(
            cart,
            &product.id,
            i64::from(existing.quantity).saturating_add(1),
        ));
    }

    if product.stock.is_sold_out() {
        return Ok(cart.clone());
    }

    let mut items = cart.items.clone();
    items.push(CartItem::new(product.clone()));

    Ok(cart.with_new_items(items))
}

/// Sets the quantity of a product's cart item.
///
/// The new quantity is capped at the product's stock. A request of zero or
/// less, or one capped to zero, removes the item. Other items are unchanged.
pub fn update_cart_item_quantity<'a>(
    cart: &Cart<'a>,
    product_id: &ProductId,
    new_quantity: i64,
) -> Cart<'a> {
    let items = cart
        .items
        .iter()
        .filter_map(|item| {
            if &item.product.id == product_id {
                with_updated_quantity(item, new_quantity)
            } else {
                Some(item.clone())
            }
        })
        .collect();

    cart.with_new_items(items)
}

fn with_updated_quantity<'a>(item: &CartItem<'a>, new_quantity: i64) -> Option<CartItem<'a>> {
    let requested = u32::try_from(new_quantity.max(0)).unwrap_or(u32::MAX);
    let quantity = item.product.stock.cap(requested);

    (quantity > 0).then(|| CartItem::with_quantity(item.product.clone(), quantity))
}

/// Removes a product's item from the cart. Unknown products are ignored.
pub fn remove_from_cart<'a>(cart: &Cart<'a>, product_id: &ProductId) -> Cart<'a> {
    let items = cart
        .items
        .iter()
        .filter(|item| &item.product.id != product_id)
        .cloned()
        .collect();

    cart.with_new_items(items)
}

/// Stock of `product` that is not already in the cart.
pub fn remaining_stock(product: &Product<'_>, cart: &Cart<'_>) -> Stock {
    product.stock.less(cart.quantity_of(&product.id))
}
