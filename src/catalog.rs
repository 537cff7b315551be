//! Catalog
//!
//! Products and coupons managed from the admin page. Products are replaced
//! by id rather than edited in place, so carts holding an older snapshot are
//! unaffected.

use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    coupons::Coupon,
    discounts::QuantityDiscount,
    products::{Product, ProductId, Stock},
};

/// Errors raised by catalog edits.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product with this id already exists.
    #[error("product {0} already exists")]
    DuplicateProduct(ProductId),

    /// No product with this id exists.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// A coupon with this code already exists.
    #[error("coupon {0} already exists")]
    DuplicateCoupon(String),

    /// No discount at this position on the product.
    #[error("product {product} has no discount at index {index}")]
    DiscountNotFound {
        /// Product being edited
        product: ProductId,
        /// Requested position
        index: usize,
    },

    /// Prices must be above zero.
    #[error("price of product {0} must be greater than zero")]
    InvalidPrice(ProductId),

    /// A price or coupon amount is in a different currency to the catalog.
    #[error("{actual} does not match catalog currency {expected}")]
    CurrencyMismatch {
        /// Catalog currency code
        expected: &'static str,
        /// Offending currency code
        actual: &'static str,
    },
}

/// Products and coupons on sale, in a single currency.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    currency: &'static Currency,
    products: Vec<Product<'a>>,
    coupons: Vec<Coupon<'a>>,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            products: Vec::new(),
            coupons: Vec::new(),
        }
    }

    /// Catalog currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Products in the order they were added
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Coupons in the order they were added
    pub fn coupons(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// Find a product by id.
    pub fn product(&self, id: &ProductId) -> Option<&Product<'a>> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Find a coupon by code.
    pub fn coupon(&self, code: &str) -> Option<&Coupon<'a>> {
        self.coupons.iter().find(|coupon| coupon.code == code)
    }

    /// Adds a new product.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken, or the price is not a positive
    /// amount in the catalog currency.
    pub fn add_product(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        if self.product(&product.id).is_some() {
            return Err(CatalogError::DuplicateProduct(product.id));
        }

        self.validate_price(&product.id, &product.price)?;

        info!(product_id = %product.id, name = %product.name, "added product");

        self.products.push(product);

        Ok(())
    }

    /// Replaces the product with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if no product has this id, or the price is not a
    /// positive amount in the catalog currency.
    pub fn update_product(&mut self, product: Product<'a>) -> Result<(), CatalogError> {
        self.validate_price(&product.id, &product.price)?;

        let slot = self
            .products
            .iter_mut()
            .find(|existing| existing.id == product.id)
            .ok_or_else(|| CatalogError::ProductNotFound(product.id.clone()))?;

        debug!(product_id = %product.id, "updated product");

        *slot = product;

        Ok(())
    }

    /// Appends a quantity discount to a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for an unknown id.
    pub fn add_discount(
        &mut self,
        id: &ProductId,
        discount: QuantityDiscount,
    ) -> Result<&Product<'a>, CatalogError> {
        self.replace_with(id, |mut product| {
            product.discounts.push(discount);
            Ok(product)
        })
    }

    /// Removes the discount at `index` from a product.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown id or an index past the end of the discounts.
    pub fn remove_discount(
        &mut self,
        id: &ProductId,
        index: usize,
    ) -> Result<&Product<'a>, CatalogError> {
        self.replace_with(id, |mut product| {
            if index >= product.discounts.len() {
                return Err(CatalogError::DiscountNotFound {
                    product: product.id,
                    index,
                });
            }

            product.discounts.remove(index);

            Ok(product)
        })
    }

    /// Sets the stock of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] for an unknown id.
    pub fn update_stock(
        &mut self,
        id: &ProductId,
        stock: Stock,
    ) -> Result<&Product<'a>, CatalogError> {
        self.replace_with(id, |product| Ok(product.with_stock(stock)))
    }

    /// Adds a new coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or an amount coupon is in another currency.
    pub fn add_coupon(&mut self, coupon: Coupon<'a>) -> Result<(), CatalogError> {
        if self.coupon(&coupon.code).is_some() {
            return Err(CatalogError::DuplicateCoupon(coupon.code));
        }

        if let Some(currency) = coupon.currency() {
            self.ensure_currency(currency)?;
        }

        info!(code = %coupon.code, "added coupon");

        self.coupons.push(coupon);

        Ok(())
    }

    fn replace_with(
        &mut self,
        id: &ProductId,
        edit: impl FnOnce(Product<'a>) -> Result<Product<'a>, CatalogError>,
    ) -> Result<&Product<'a>, CatalogError> {
        let slot = self
            .products
            .iter_mut()
            .find(|product| &product.id == id)
            .ok_or_else(|| CatalogError::ProductNotFound(id.clone()))?;

        *slot = edit(slot.clone())?;

        debug!(product_id = %id, "replaced product");

        Ok(&*slot)
    }

    fn validate_price(
        &self,
        id: &ProductId,
        price: &Money<'a, Currency>,
    ) -> Result<(), CatalogError> {
        self.ensure_currency(price.currency())?;

        if price.to_minor_units() <= 0 {
            return Err(CatalogError::InvalidPrice(id.clone()));
        }

        Ok(())
    }

    fn ensure_currency(&self, currency: &Currency) -> Result<(), CatalogError> {
        if currency == self.currency {
            Ok(())
        } else {
            Err(CatalogError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: currency.iso_alpha_code,
            })
        }
    }
}

/// An edit session over a single product.
///
/// Changes stay on the session's snapshot until [`ProductEditor::complete`]
/// writes it back to the catalog.
#[derive(Debug, Clone)]
pub struct ProductEditor<'a> {
    editing: Product<'a>,
}

impl<'a> ProductEditor<'a> {
    /// Starts editing a copy of `product`.
    pub fn begin(product: &Product<'a>) -> Self {
        Self {
            editing: product.clone(),
        }
    }

    /// The product as edited so far
    pub fn product(&self) -> &Product<'a> {
        &self.editing
    }

    /// Renames the product.
    pub fn update_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.editing.name = name.into();
        self
    }

    /// Changes the unit price.
    pub fn update_price(&mut self, price: Money<'a, Currency>) -> &mut Self {
        self.editing.price = price;
        self
    }

    /// Changes the stock.
    pub fn update_stock(&mut self, stock: Stock) -> &mut Self {
        self.editing.stock = stock;
        self
    }

    /// Appends a quantity discount.
    pub fn add_discount(&mut self, discount: QuantityDiscount) -> &mut Self {
        self.editing.discounts.push(discount);
        self
    }

    /// Removes the discount at `index`, if present.
    pub fn remove_discount(&mut self, index: usize) -> &mut Self {
        if index < self.editing.discounts.len() {
            self.editing.discounts.remove(index);
        }
        self
    }

    /// Writes the edited product back to the catalog.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Catalog::update_product`].
    pub fn complete(self, catalog: &mut Catalog<'a>) -> Result<(), CatalogError> {
        catalog.update_product(self.editing)
    }
}

#[cfg(test)]
mod tests {
    use decimal_percentage::Percentage;
    use rust_decimal::Decimal;
    use rusty_money::iso::{KRW, USD};
    use testresult::TestResult;

    use crate::{coupons::CouponDiscount, percentages::from_percentage};

    use super::*;

    fn krw(amount: i64) -> Money<'static, Currency> {
        Money::from_minor(amount, KRW)
    }

    fn discount(quantity: u32, percent: i64) -> TestResult<QuantityDiscount> {
        Ok(QuantityDiscount::new(
            quantity,
            Percentage::from(Decimal::new(percent, 2)),
        )?)
    }

    fn catalog() -> TestResult<Catalog<'static>> {
        let mut catalog = Catalog::new(KRW);

        for (n, price) in [(1, 10_000), (2, 20_000), (3, 30_000)] {
            catalog.add_product(
                Product::new(format!("p{n}"), format!("Product {n}"), krw(price))
                    .with_stock(Stock::Limited(20))
                    .with_discounts([discount(10, i64::from(n) * 5 + 5)?]),
            )?;
        }

        Ok(catalog)
    }

    #[test]
    fn add_product_appends() -> TestResult {
        let mut catalog = catalog()?;

        catalog.add_product(
            Product::new("p4", "Product 4", krw(15_000)).with_stock(Stock::Limited(30)),
        )?;

        let added = catalog.product(&ProductId::new("p4"));

        assert_eq!(catalog.products().len(), 4);
        assert_eq!(added.map(|p| p.stock), Some(Stock::Limited(30)));

        Ok(())
    }

    #[test]
    fn add_product_rejects_duplicate_id() -> TestResult {
        let mut catalog = catalog()?;

        let result = catalog.add_product(Product::new("p1", "Again", krw(1)));

        assert_eq!(
            result,
            Err(CatalogError::DuplicateProduct(ProductId::new("p1")))
        );

        Ok(())
    }

    #[test]
    fn add_product_rejects_bad_prices() {
        let mut catalog = Catalog::new(KRW);

        assert_eq!(
            catalog.add_product(Product::new("free", "Free", krw(0))),
            Err(CatalogError::InvalidPrice(ProductId::new("free")))
        );

        assert!(matches!(
            catalog.add_product(Product::new("usd", "Dollars", Money::from_minor(100, USD))),
            Err(CatalogError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn update_product_replaces_by_id() -> TestResult {
        let mut catalog = catalog()?;
        let id = ProductId::new("p1");

        let mut edited = catalog.product(&id).cloned().ok_or("missing p1")?;
        edited.name = "Edited product 1".to_string();

        catalog.update_product(edited)?;

        assert_eq!(
            catalog.product(&id).map(|p| p.name.as_str()),
            Some("Edited product 1")
        );
        assert_eq!(catalog.products().len(), 3);

        Ok(())
    }

    #[test]
    fn update_unknown_product_errors() -> TestResult {
        let mut catalog = catalog()?;

        let result = catalog.update_product(Product::new("nope", "Nope", krw(1)));

        assert_eq!(
            result,
            Err(CatalogError::ProductNotFound(ProductId::new("nope")))
        );

        Ok(())
    }

    #[test]
    fn add_and_remove_discounts() -> TestResult {
        let mut catalog = catalog()?;
        let id = ProductId::new("p1");

        let updated = catalog.add_discount(&id, discount(5, 5)?)?;

        assert_eq!(updated.discounts.len(), 2);

        let updated = catalog.remove_discount(&id, 0)?;

        assert_eq!(updated.discounts, vec![discount(5, 5)?]);

        let updated = catalog.remove_discount(&id, 0)?;

        assert!(updated.discounts.is_empty());

        assert_eq!(
            catalog.remove_discount(&id, 0).map(|_| ()),
            Err(CatalogError::DiscountNotFound {
                product: id,
                index: 0
            })
        );

        Ok(())
    }

    #[test]
    fn update_stock_replaces_stock() -> TestResult {
        let mut catalog = catalog()?;
        let id = ProductId::new("p2");

        let updated = catalog.update_stock(&id, Stock::Limited(25))?;

        assert_eq!(updated.stock, Stock::Limited(25));

        Ok(())
    }

    #[test]
    fn add_coupon_rejects_duplicate_codes() -> TestResult {
        let mut catalog = catalog()?;
        let coupon = Coupon::new(
            "New coupon",
            "NEW10",
            CouponDiscount::Percentage(from_percentage(Decimal::from(10))?),
        );

        catalog.add_coupon(coupon.clone())?;

        assert_eq!(
            catalog.add_coupon(coupon),
            Err(CatalogError::DuplicateCoupon("NEW10".to_string()))
        );
        assert_eq!(catalog.coupons().len(), 1);
        assert!(catalog.coupon("NEW10").is_some());

        Ok(())
    }

    #[test]
    fn editor_writes_back_on_complete() -> TestResult {
        let mut catalog = catalog()?;
        let id = ProductId::new("p1");
        let original = catalog.product(&id).cloned().ok_or("missing p1")?;

        let mut editor = ProductEditor::begin(&original);

        editor
            .update_name("Edited product 1")
            .update_price(krw(12_000))
            .update_stock(Stock::Limited(25));

        assert_eq!(catalog.product(&id), Some(&original));

        editor.complete(&mut catalog)?;

        let edited = catalog.product(&id).ok_or("missing p1")?;

        assert_eq!(edited.name, "Edited product 1");
        assert_eq!(edited.price, krw(12_000));
        assert_eq!(edited.stock, Stock::Limited(25));

        Ok(())
    }

    #[test]
    fn editor_discount_edits_ignore_bad_index() -> TestResult {
        let catalog = catalog()?;
        let original = catalog.product(&ProductId::new("p1")).ok_or("missing p1")?;
        let mut editor = ProductEditor::begin(original);

        editor.remove_discount(7).add_discount(discount(5, 5)?);

        assert_eq!(editor.product().discounts.len(), 2);

        editor.remove_discount(0);

        assert_eq!(editor.product().discounts, vec![discount(5, 5)?]);

        Ok(())
    }
}
