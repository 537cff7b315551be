//! Fixtures
//!
//! YAML fixture sets describing a catalog. A set named `demo` is read from
//! `products/demo.yml` and `coupons/demo.yml` under the base path.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::CartError,
    catalog::{Catalog, CatalogError},
    coupons::Coupon,
    fixtures::{coupons::CouponsFixture, products::ProductsFixture},
    products::{Product, ProductId},
    state::CartState,
};

pub mod coupons;
pub mod products;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon not found
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// The same product id appears twice
    #[error("Duplicate product: {0}")]
    DuplicateProduct(String),

    /// Currency mismatch between products and coupons
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products or amount coupons loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected a fixture entry
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart rejected a fixture entry
    #[error("Failed to fill cart: {0}")]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Products in file order
    products: Vec<Product<'a>>,

    /// Product id -> position in `products`
    product_index: FxHashMap<ProductId, usize>,

    /// Coupons ordered by code
    coupons: Vec<Coupon<'a>>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: Vec::new(),
            product_index: FxHashMap::default(),
            coupons: Vec::new(),
            currency: None,
        }
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a product id is
    /// repeated, or prices use more than one currency.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: ProductsFixture = serde_norway::from_str(&contents)?;

        for product_fixture in fixture.products {
            let product: Product<'static> = product_fixture.try_into()?;

            self.check_currency(product.price.currency())?;

            if self.product_index.contains_key(&product.id) {
                return Err(FixtureError::DuplicateProduct(product.id.to_string()));
            }

            self.product_index
                .insert(product.id.clone(), self.products.len());

            self.products.push(product);
        }

        debug!(
            path = %file_path.display(),
            products = self.products.len(),
            "loaded product fixtures"
        );

        Ok(self)
    }

    /// Load coupons from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or an amount
    /// coupon is in a different currency to the products.
    pub fn load_coupons(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("coupons").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: CouponsFixture = serde_norway::from_str(&contents)?;

        let mut coupons = fixture
            .coupons
            .into_iter()
            .map(|(code, coupon_fixture)| coupon_fixture.try_into_coupon(code))
            .collect::<Result<Vec<_>, _>>()?;

        coupons.sort_by(|a, b| a.code.cmp(&b.code));

        for coupon in coupons {
            if let Some(currency) = coupon.currency() {
                self.check_currency(currency)?;
            }

            self.coupons.push(coupon);
        }

        debug!(
            path = %file_path.display(),
            coupons = self.coupons.len(),
            "loaded coupon fixtures"
        );

        Ok(self)
    }

    /// Load a complete fixture set (products and coupons with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_products(name)?.load_coupons(name)?;

        Ok(fixture)
    }

    /// Get a product by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, id: &str) -> Result<&Product<'a>, FixtureError> {
        self.product_index
            .get(&ProductId::new(id))
            .and_then(|index| self.products.get(*index))
            .ok_or_else(|| FixtureError::ProductNotFound(id.to_string()))
    }

    /// Get a coupon by its code
    ///
    /// # Errors
    ///
    /// Returns an error if the coupon is not found.
    pub fn coupon(&self, code: &str) -> Result<&Coupon<'a>, FixtureError> {
        self.coupons
            .iter()
            .find(|coupon| coupon.code == code)
            .ok_or_else(|| FixtureError::CouponNotFound(code.to_string()))
    }

    /// Get all products
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Get all coupons
    pub fn coupons(&self) -> &[Coupon<'a>] {
        &self.coupons
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if nothing priced has been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }

    /// Build a catalog from the loaded products and coupons
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown or the catalog rejects an entry.
    pub fn catalog(&self) -> Result<Catalog<'a>, FixtureError> {
        let mut catalog = Catalog::new(self.currency()?);

        for product in &self.products {
            catalog.add_product(product.clone())?;
        }

        for coupon in &self.coupons {
            catalog.add_coupon(coupon.clone())?;
        }

        Ok(catalog)
    }

    /// Create an empty cart state in the fixture currency
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown.
    pub fn cart_state(&self) -> Result<CartState<'a>, FixtureError> {
        Ok(CartState::new(self.currency()?))
    }

    /// Create a cart state holding `quantity` units of each listed product
    ///
    /// Quantities are capped at the product's stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown, a product id is not in the
    /// fixture, or the cart rejects a quantity.
    pub fn cart_with<'q>(
        &self,
        quantities: impl IntoIterator<Item = (&'q str, u32)>,
    ) -> Result<CartState<'a>, FixtureError> {
        let mut state = self.cart_state()?;

        for (id, quantity) in quantities {
            let product = self.product(id)?;

            state.add_to_cart(product)?;
            state.update_quantity(&product.id, i64::from(quantity))?;
        }

        Ok(state)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);
                Ok(())
            }
        }
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use rusty_money::{Money, iso::KRW};
    use testresult::TestResult;

    use crate::products::Stock;

    use super::*;

    fn write_fixture(base: &Path, category: &str, name: &str, contents: &str) -> TestResult {
        let dir = base.join(category);

        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{name}.yml")), contents)?;

        Ok(())
    }

    #[test]
    fn fixture_loads_products_and_coupons() -> TestResult {
        let mut fixture = Fixture::new();

        fixture.load_products("demo")?.load_coupons("demo")?;

        assert_eq!(fixture.products().len(), 3);
        assert_eq!(fixture.coupons().len(), 2);

        let p1 = fixture.product("p1")?;

        assert_eq!(p1.name, "상품1");
        assert_eq!(p1.price, Money::from_minor(10_000, KRW));
        assert_eq!(p1.stock, Stock::Limited(20));
        assert_eq!(p1.discounts.len(), 1);

        assert_eq!(fixture.currency()?, KRW);

        Ok(())
    }

    #[test]
    fn fixture_keeps_product_file_order() -> TestResult {
        let fixture = Fixture::from_set("demo")?;

        let ids: Vec<&str> = fixture
            .products()
            .iter()
            .map(|product| product.id.as_str())
            .collect();

        assert_eq!(ids, ["p1", "p2", "p3"]);

        Ok(())
    }

    #[test]
    fn fixture_catalog_contains_everything_loaded() -> TestResult {
        let fixture = Fixture::from_set("demo")?;
        let catalog = fixture.catalog()?;

        assert_eq!(catalog.currency(), KRW);
        assert_eq!(catalog.products().len(), 3);
        assert!(catalog.coupon("AMOUNT5000").is_some());
        assert!(catalog.coupon("PERCENT10").is_some());

        Ok(())
    }

    #[test]
    fn fixture_product_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.product("nonexistent");

        assert!(matches!(result, Err(FixtureError::ProductNotFound(_))));
    }

    #[test]
    fn fixture_coupon_not_found_returns_error() {
        let fixture = Fixture::new();
        let result = fixture.coupon("MISSING");

        assert!(matches!(result, Err(FixtureError::CouponNotFound(_))));
    }

    #[test]
    fn fixture_no_currency_returns_error() {
        let fixture = Fixture::new();

        assert!(matches!(fixture.currency(), Err(FixtureError::NoCurrency)));
        assert!(matches!(fixture.catalog(), Err(FixtureError::NoCurrency)));
    }

    #[test]
    fn fixture_missing_file_returns_io_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("missing");

        assert!(matches!(result, Err(FixtureError::Io(_))));

        Ok(())
    }

    #[test]
    fn fixture_load_products_rejects_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "usd_set",
            "products:\n  - id: apple\n    name: Apple\n    price: 1.00 USD\n",
        )?;

        write_fixture(
            dir.path(),
            "products",
            "krw_set",
            "products:\n  - id: banana\n    name: Banana\n    price: 1000 KRW\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("usd_set")?;

        let result = fixture.load_products("krw_set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_load_coupons_rejects_currency_mismatch() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "set",
            "products:\n  - id: apple\n    name: Apple\n    price: 1000 KRW\n",
        )?;

        write_fixture(
            dir.path(),
            "coupons",
            "set",
            "coupons:\n  DOLLAR:\n    type: amount\n    name: Dollar off\n    value: 1.00 USD\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("set")?;

        let result = fixture.load_coupons("set");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn fixture_rejects_duplicate_product_ids() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "dupes",
            "products:\n  - id: apple\n    name: Apple\n    price: 1000 KRW\n  - id: apple\n    name: Green Apple\n    price: 1200 KRW\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        let result = fixture.load_products("dupes");

        assert!(matches!(result, Err(FixtureError::DuplicateProduct(id)) if id == "apple"));

        Ok(())
    }

    #[test]
    fn fixture_catalog_rejects_zero_price() -> TestResult {
        let dir = tempfile::tempdir()?;

        write_fixture(
            dir.path(),
            "products",
            "free",
            "products:\n  - id: sample\n    name: Sample\n    price: 0 KRW\n",
        )?;

        let mut fixture = Fixture::with_base_path(dir.path());

        fixture.load_products("free")?;

        assert!(matches!(
            fixture.catalog(),
            Err(FixtureError::Catalog(CatalogError::InvalidPrice(_)))
        ));

        Ok(())
    }

    #[test]
    fn fixture_cart_with_fills_quantities() -> TestResult {
        let fixture = Fixture::from_set("demo")?;
        let state = fixture.cart_with([("p1", 20), ("p2", 10), ("p3", 30)])?;

        assert_eq!(state.cart().len(), 3);
        assert_eq!(state.cart().quantity_of(&ProductId::new("p1")), 20);
        assert_eq!(state.cart().quantity_of(&ProductId::new("p3")), 20);

        Ok(())
    }

    #[test]
    fn fixture_cart_with_unknown_product_returns_error() -> TestResult {
        let fixture = Fixture::from_set("demo")?;
        let result = fixture.cart_with([("p9", 1)]);

        assert!(matches!(result, Err(FixtureError::ProductNotFound(id)) if id == "p9"));

        Ok(())
    }

    #[test]
    fn fixture_cart_state_starts_empty() -> TestResult {
        let fixture = Fixture::from_set("demo")?;
        let state = fixture.cart_state()?;

        assert!(state.cart().is_empty());
        assert_eq!(state.cart().currency(), KRW);

        Ok(())
    }
}
