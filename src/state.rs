//! Cart state
//!
//! [`CartState`] holds the cart a shopper is building and the coupon they
//! picked. It validates input at the boundary and then swaps in whatever
//! the pure cart transforms return.

use rusty_money::iso::Currency;
use tracing::{debug, warn};

use crate::{
    cart::{
        Cart, CartError, add_or_update_product_in_cart, ensure_currency, remaining_stock,
        remove_from_cart, update_cart_item_quantity,
    },
    coupons::Coupon,
    pricing::{CartTotal, calculate_cart_total},
    products::{Product, ProductId},
};

/// A shopper's cart and selected coupon.
#[derive(Debug, Clone)]
pub struct CartState<'a> {
    cart: Cart<'a>,
    selected_coupon: Option<Coupon<'a>>,
}

impl<'a> CartState<'a> {
    /// Creates an empty cart state.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            cart: Cart::new(currency),
            selected_coupon: None,
        }
    }

    /// Current cart snapshot
    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    /// Coupon applied to the cart, if any
    pub fn selected_coupon(&self) -> Option<&Coupon<'a>> {
        self.selected_coupon.as_ref()
    }

    /// Adds one unit of `product`.
    ///
    /// Sold out products are left out of the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_to_cart(&mut self, product: &Product<'a>) -> Result<(), CartError> {
        ensure_currency(product.price.currency(), self.cart.currency())?;

        if remaining_stock(product, &self.cart).is_sold_out() {
            warn!(product_id = %product.id, "product is sold out, not adding to cart");

            return Ok(());
        }

        self.cart = add_or_update_product_in_cart(&self.cart, product)?;

        debug!(
            product_id = %product.id,
            quantity = self.cart.quantity_of(&product.id),
            "added product to cart"
        );

        Ok(())
    }

    /// Removes a product from the cart. Unknown products are ignored.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        self.cart = remove_from_cart(&self.cart, product_id);

        debug!(product_id = %product_id, "removed product from cart");
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// Zero removes the item; quantities above stock are capped.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `quantity` is negative.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), CartError> {
        if quantity < 0 {
            return Err(CartError::InvalidQuantity(quantity.to_string()));
        }

        self.cart = update_cart_item_quantity(&self.cart, product_id, quantity);

        debug!(
            product_id = %product_id,
            requested = quantity,
            quantity = self.cart.quantity_of(product_id),
            "updated cart quantity"
        );

        Ok(())
    }

    /// Parses `input` as a quantity and applies it with [`CartState::update_quantity`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] if `input` is not a whole number or is negative.
    pub fn update_quantity_from_str(
        &mut self,
        product_id: &ProductId,
        input: &str,
    ) -> Result<(), CartError> {
        let quantity = input
            .trim()
            .parse::<i64>()
            .map_err(|_err| CartError::InvalidQuantity(input.to_string()))?;

        self.update_quantity(product_id, quantity)
    }

    /// Selects a coupon, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] for an amount coupon in another currency.
    pub fn apply_coupon(&mut self, coupon: Coupon<'a>) -> Result<(), CartError> {
        if let Some(currency) = coupon.currency() {
            ensure_currency(currency, self.cart.currency())?;
        }

        debug!(code = %coupon.code, "applied coupon");

        self.selected_coupon = Some(coupon);

        Ok(())
    }

    /// Removes the selected coupon.
    pub fn clear_coupon(&mut self) {
        self.selected_coupon = None;
    }

    /// Totals for the current cart and coupon.
    pub fn calculate_total(&self) -> CartTotal<'a> {
        calculate_cart_total(&self.cart, self.selected_coupon.as_ref())
    }
}
