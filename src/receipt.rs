//! Receipt
//!
//! Renders a cart as a table of lines followed by a totals summary.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::{Cart, CartItem},
    coupons::Coupon,
    discounts::get_max_applicable_discount,
    percentages::{fraction, percent_points},
    pricing::{CartTotal, calculate_cart_total, calculate_item_total},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// One cart line as printed on the receipt.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine<'a> {
    /// Product name
    pub name: String,

    /// Units bought
    pub quantity: u32,

    /// Price of a single unit
    pub unit_price: Money<'a, Currency>,

    /// Quantity discount applied to the line
    pub rate: Percentage,

    /// Line total after the quantity discount
    pub total: Money<'a, Currency>,
}

impl<'a> ReceiptLine<'a> {
    fn from_item(item: &CartItem<'a>) -> Self {
        let product = item.product();

        Self {
            name: product.name.clone(),
            quantity: item.quantity(),
            unit_price: product.price,
            rate: get_max_applicable_discount(item),
            total: calculate_item_total(item),
        }
    }

    fn subtotal(&self) -> Money<'a, Currency> {
        Money::from_minor(
            self.unit_price
                .to_minor_units()
                .saturating_mul(i64::from(self.quantity)),
            self.unit_price.currency(),
        )
    }
}

/// Priced snapshot of a cart, ready to print.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    lines: SmallVec<[ReceiptLine<'a>; 8]>,
    coupon: Option<String>,
    totals: CartTotal<'a>,
}

impl<'a> Receipt<'a> {
    /// Prices `cart` with the optional coupon.
    #[must_use]
    pub fn new(cart: &Cart<'a>, coupon: Option<&Coupon<'a>>) -> Self {
        Self {
            lines: cart.items().iter().map(ReceiptLine::from_item).collect(),
            coupon: coupon.map(ToString::to_string),
            totals: calculate_cart_total(cart, coupon),
        }
    }

    /// Lines in cart order
    pub fn lines(&self) -> &[ReceiptLine<'a>] {
        &self.lines
    }

    /// Description of the applied coupon, if any
    pub fn coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }

    /// Before/after/discount totals
    pub fn totals(&self) -> CartTotal<'a> {
        self.totals
    }

    /// Total cost before any discounts
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.totals.total_before_discount
    }

    /// Amount payable
    pub fn total(&self) -> Money<'a, Currency> {
        self.totals.total_after_discount
    }

    /// Amount saved through quantity discounts and the coupon
    pub fn savings(&self) -> Money<'a, Currency> {
        self.totals.total_discount
    }

    /// Savings relative to the subtotal
    pub fn savings_percent(&self) -> Percentage {
        let subtotal = self.subtotal().to_minor_units();

        if subtotal == 0 {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(Decimal::from(self.savings().to_minor_units()) / Decimal::from(subtotal))
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Qty", "Unit Price", "Subtotal", "Discount", "Total"]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                line.name.clone(),
                line.quantity.to_string(),
                line.unit_price.to_string(),
                line.subtotal().to_string(),
                rate_cell(line.rate),
                line.total.to_string(),
            ]);
        }

        write_receipt_table(&mut out, builder)?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let savings = format!(
            "({:.2}%) {}",
            percent_points(self.savings_percent()),
            self.savings()
        );

        let coupon = self.coupon.as_deref().unwrap_or("-");
        let subtotal = self.subtotal().to_string();
        let total = self.total().to_string();

        let rows = [
            ("Subtotal:", subtotal.as_str()),
            ("Coupon:", coupon),
            ("Savings:", savings.as_str()),
            ("Total:", total.as_str()),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

        let value_width = rows
            .iter()
            .map(|(_, value)| value.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in rows {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")
                .map_err(|_err| ReceiptError::IO)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(2..7), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

/// Discount column text; blank when no quantity discount applies.
fn rate_cell(rate: Percentage) -> String {
    if fraction(rate).is_zero() {
        String::new()
    } else {
        format!("-{}%", percent_points(rate))
    }
}
