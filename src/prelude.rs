//! Shopfront prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Cart, CartError, CartItem, add_or_update_product_in_cart, remaining_stock,
        remove_from_cart, update_cart_item_quantity,
    },
    catalog::{Catalog, CatalogError, ProductEditor},
    coupons::{Coupon, CouponDiscount},
    discounts::{DiscountError, QuantityDiscount, get_max_applicable_discount},
    fixtures::{Fixture, FixtureError},
    percentages::{PercentageError, from_percentage, is_negative_number},
    pricing::{CartTotal, calculate_cart_total, calculate_item_total, default_cart_total},
    products::{Product, ProductId, Stock},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    state::CartState,
};
