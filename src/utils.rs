//! Utils

use clap::Parser;

/// Arguments for the cart demo
#[derive(Debug, Parser)]
pub struct CartArgs {
    /// Fixture set to load products & coupons from
    #[clap(short, long, default_value = "demo")]
    pub fixture: String,

    /// Coupon code to apply
    #[clap(short, long)]
    pub coupon: Option<String>,

    /// Quantity of a product, as `PRODUCT=N`; may be repeated
    #[clap(short, long = "quantity", value_parser = parse_quantity)]
    pub quantities: Vec<(String, u32)>,
}

impl CartArgs {
    /// Requested quantities as `(product id, quantity)` pairs
    pub fn quantities(&self) -> impl Iterator<Item = (&str, u32)> {
        self.quantities
            .iter()
            .map(|(id, quantity)| (id.as_str(), *quantity))
    }
}

/// Parse a `PRODUCT=N` argument.
///
/// # Errors
///
/// Returns a message if there is no `=`, the product id is empty, or the
/// quantity is not a whole number.
pub fn parse_quantity(s: &str) -> Result<(String, u32), String> {
    let (id, quantity) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT=N, got: {s}"))?;

    let id = id.trim();

    if id.is_empty() {
        return Err(format!("missing product id in: {s}"));
    }

    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|err| format!("invalid quantity in {s}: {err}"))?;

    Ok((id.to_string(), quantity))
}
