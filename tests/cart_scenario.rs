//! Integration test for the `demo` fixture set.
//!
//! Three products at ₩10,000 / ₩20,000 / ₩30,000, each with 20 units in stock
//! and 10% / 15% / 20% off from 10 units.
//!
//! With 20 x p1, 10 x p2 and 10 x p3 in the cart:
//!
//! - p1: ₩200,000 -> ₩180,000
//! - p2: ₩200,000 -> ₩170,000
//! - p3: ₩300,000 -> ₩240,000
//!
//! Before discounts ₩700,000, after ₩590,000. A 10% coupon takes a further
//! ₩59,000 off, a ₩5,000 coupon takes ₩5,000.

use rusty_money::{Money, iso::KRW};
use testresult::TestResult;

use shopfront::{
    cart::remaining_stock,
    fixtures::Fixture,
    products::{ProductId, Stock},
    receipt::Receipt,
    state::CartState,
};

fn krw(amount: i64) -> Money<'static, rusty_money::iso::Currency> {
    Money::from_minor(amount, KRW)
}

fn scenario_cart(fixture: &Fixture<'static>) -> TestResult<CartState<'static>> {
    Ok(fixture.cart_with([("p1", 20), ("p2", 10), ("p3", 10)])?)
}

#[test]
fn scenario_totals_without_coupon() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let state = scenario_cart(&fixture)?;

    let total = state.calculate_total();

    assert_eq!(total.total_before_discount, krw(700_000));
    assert_eq!(total.total_after_discount, krw(590_000));
    assert_eq!(total.total_discount, krw(110_000));

    Ok(())
}

#[test]
fn scenario_totals_with_percentage_coupon() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let mut state = scenario_cart(&fixture)?;

    state.apply_coupon(fixture.coupon("PERCENT10")?.clone())?;

    let total = state.calculate_total();

    assert_eq!(total.total_before_discount, krw(700_000));
    assert_eq!(total.total_after_discount, krw(531_000));
    assert_eq!(total.total_discount, krw(169_000));

    Ok(())
}

#[test]
fn scenario_totals_with_amount_coupon() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let mut state = scenario_cart(&fixture)?;

    state.apply_coupon(fixture.coupon("AMOUNT5000")?.clone())?;

    let total = state.calculate_total();

    assert_eq!(total.total_after_discount, krw(585_000));
    assert_eq!(total.total_discount, krw(115_000));

    Ok(())
}

#[test]
fn adding_one_at_a_time_stops_at_stock() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let p1 = fixture.product("p1")?;
    let mut state = fixture.cart_state()?;

    for _ in 0..25 {
        state.add_to_cart(p1)?;
    }

    assert_eq!(state.cart().quantity_of(&p1.id), 20);
    assert_eq!(remaining_stock(p1, state.cart()), Stock::Limited(0));

    let total = state.calculate_total();

    assert_eq!(total.total_after_discount, krw(180_000));

    Ok(())
}

#[test]
fn quantity_edits_move_discount_thresholds() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let p2 = ProductId::new("p2");
    let mut state = fixture.cart_with([("p2", 9)])?;

    assert_eq!(state.calculate_total().total_after_discount, krw(180_000));

    state.update_quantity(&p2, 10)?;

    assert_eq!(state.calculate_total().total_after_discount, krw(170_000));

    state.update_quantity(&p2, 0)?;

    assert!(state.cart().is_empty());
    assert_eq!(state.calculate_total().total_after_discount, krw(0));

    Ok(())
}

#[test]
fn switching_coupons_replaces_the_previous_one() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let mut state = scenario_cart(&fixture)?;

    state.apply_coupon(fixture.coupon("PERCENT10")?.clone())?;
    state.apply_coupon(fixture.coupon("AMOUNT5000")?.clone())?;

    assert_eq!(
        state.selected_coupon().map(|coupon| coupon.code.as_str()),
        Some("AMOUNT5000")
    );
    assert_eq!(state.calculate_total().total_after_discount, krw(585_000));

    Ok(())
}

#[test]
fn receipt_renders_scenario() -> TestResult {
    let fixture = Fixture::from_set("demo")?;
    let mut state = scenario_cart(&fixture)?;

    state.apply_coupon(fixture.coupon("PERCENT10")?.clone())?;

    let receipt = Receipt::new(state.cart(), state.selected_coupon());

    assert_eq!(receipt.lines().len(), 3);
    assert_eq!(receipt.total(), krw(531_000));

    let mut out = Vec::new();

    receipt.write_to(&mut out)?;

    let output = String::from_utf8(out)?;

    assert!(output.contains("상품1"));
    assert!(output.contains("-15%"));
    assert!(output.contains("PERCENT10"));

    Ok(())
}
