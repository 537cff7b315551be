//! Cart Example
//!
//! Fills a cart from a fixture set and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Use `-q PRODUCT=N` to set a product quantity (repeatable; defaults to one of each product)
//! Use `-c` to apply a coupon by code
//!
//! Set `RUST_LOG=debug` to see cart edits as they happen.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use shopfront::{fixtures::Fixture, receipt::Receipt, utils::CartArgs};

/// Cart Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CartArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().compact().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init()?;

    let fixture = Fixture::from_set(&args.fixture)?;

    let quantities: Vec<(&str, u32)> = if args.quantities.is_empty() {
        fixture
            .products()
            .iter()
            .map(|product| (product.id.as_str(), 1))
            .collect()
    } else {
        args.quantities().collect()
    };

    let mut state = fixture.cart_with(quantities)?;

    if let Some(code) = args.coupon.as_deref() {
        state.apply_coupon(fixture.coupon(code)?.clone())?;
    }

    let total = state.calculate_total();

    info!(
        items = state.cart().len(),
        total = %total.total_after_discount,
        "priced cart"
    );

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    Receipt::new(state.cart(), state.selected_coupon()).write_to(&mut handle)?;

    if state.selected_coupon().is_none() {
        println!("Available coupons:");

        for coupon in fixture.coupons() {
            println!("  {coupon}");
        }
    }

    Ok(())
}
