//! Pricing
//!
//! Cart arithmetic is carried out in minor units and converted back to
//! [`Money`] in the cart currency at the end.

use rusty_money::{Money, iso::Currency};

use crate::{
    cart::{Cart, CartItem},
    coupons::Coupon,
    discounts::{get_max_applicable_discount, percent_of_minor},
};

/// Pricing outcome for a cart.
///
/// `total_discount` is always `total_before_discount - total_after_discount`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotal<'a> {
    /// Sum of unit price times quantity, before any discount
    pub total_before_discount: Money<'a, Currency>,

    /// Amount payable after quantity discounts and the coupon
    pub total_after_discount: Money<'a, Currency>,

    /// Everything taken off
    pub total_discount: Money<'a, Currency>,
}

impl<'a> CartTotal<'a> {
    fn from_minor(before: i64, after: i64, currency: &'a Currency) -> Self {
        Self {
            total_before_discount: Money::from_minor(before, currency),
            total_after_discount: Money::from_minor(after, currency),
            total_discount: Money::from_minor(before.saturating_sub(after), currency),
        }
    }
}

/// The all-zero total, which is also the total of an empty cart.
pub fn default_cart_total(currency: &Currency) -> CartTotal<'_> {
    CartTotal::from_minor(0, 0, currency)
}

/// Line total for one cart item with its best quantity discount applied.
pub fn calculate_item_total<'a>(item: &CartItem<'a>) -> Money<'a, Currency> {
    Money::from_minor(item_total_minor(item), item.product().price.currency())
}

/// Calculates the before/after/discount totals for a cart and an optional coupon.
///
/// Quantity discounts are applied per item first; a percentage coupon is then
/// taken from the item-discounted total. An amount coupon in another currency
/// takes nothing off.
pub fn calculate_cart_total<'a>(
    cart: &Cart<'a>,
    selected_coupon: Option<&Coupon<'a>>,
) -> CartTotal<'a> {
    let before = sum_minor(cart.items(), line_subtotal_minor);
    let after_items = sum_minor(cart.items(), item_total_minor);

    let coupon_discount = selected_coupon
        .filter(|coupon| {
            coupon
                .currency()
                .is_none_or(|currency| currency == cart.currency())
        })
        .map_or(0, |coupon| coupon.discount_minor(after_items));

    CartTotal::from_minor(
        before,
        after_items.saturating_sub(coupon_discount),
        cart.currency(),
    )
}

fn line_subtotal_minor(item: &CartItem<'_>) -> i64 {
    item.product()
        .price
        .to_minor_units()
        .saturating_mul(i64::from(item.quantity()))
}

fn item_total_minor(item: &CartItem<'_>) -> i64 {
    let subtotal = line_subtotal_minor(item);
    let discount = percent_of_minor(get_max_applicable_discount(item), subtotal);

    subtotal.saturating_sub(discount)
}

fn sum_minor(items: &[CartItem<'_>], amount: impl Fn(&CartItem<'_>) -> i64) -> i64 {
    items
        .iter()
        .fold(0i64, |total, item| total.saturating_add(amount(item)))
}
