//! End-to-end checkout scenarios against the pure core.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use voltcart::prelude::*;

fn product(id: &str, price: u64) -> CartProduct {
    CartProduct {
        id: ItemId::from(id),
        name: format!("Product {id}"),
        seller_name: "SunGrid".to_string(),
        unit_price: Price::new(price),
        original_price: None,
        image_ref: format!("{id}.png"),
        in_stock: true,
        stock_count: 50,
    }
}

fn scenario_cart() -> Cart {
    let mut cart = Cart::new();

    cart.add_item(product("1", 100_00), 2);
    cart.add_item(product("2", 50_00), 1);

    cart
}

fn address() -> AddressRecord {
    AddressRecord {
        full_name: "Amina Odhiambo".to_string(),
        street: "12 Ngong Road".to_string(),
        city: "Nairobi".to_string(),
        state: "Nairobi".to_string(),
        zip_code: "00100".to_string(),
        phone: "0712345678".to_string(),
        is_default: true,
    }
}

fn created_order(new_order: &NewOrder) -> Result<Order, serde_json::Error> {
    let mut body = serde_json::to_value(new_order)?;

    body["_id"] = "ord-1".into();
    body["price"] = 270.0.into();
    body["status"] = "Pending".into();

    serde_json::from_value(body)
}

#[test]
fn adding_twice_yields_one_line_with_summed_quantity() {
    let mut cart = Cart::new();

    cart.add_item(product("x", 12_50), 3);
    cart.add_item(product("x", 12_50), 4);

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items().first().map(|item| item.quantity), Some(7));
}

#[test]
fn cart_summary_scenario_totals_295() -> TestResult {
    let flow = CheckoutFlow::new();

    let totals = flow.totals(&scenario_cart(), USD, &PricingRules::default())?;

    assert_eq!(totals.subtotal, Money::from_minor(250_00, USD));
    assert_eq!(totals.shipping, Money::from_minor(25_00, USD));
    assert_eq!(totals.tax, Money::from_minor(20_00, USD));
    assert_eq!(totals.discount, Money::from_minor(0, USD));
    assert_eq!(totals.total, Money::from_minor(295_00, USD));

    Ok(())
}

#[test]
fn promo_resubmission_replaces_rather_than_accumulates() -> TestResult {
    let cart = scenario_cart();
    let catalogue = PromoCatalogue::default();
    let subtotal = cart.subtotal(USD)?;
    let mut flow = CheckoutFlow::new();

    let first = catalogue.apply("SAVE10", &subtotal)?;
    assert_eq!(first.discount, Money::from_minor(25_00, USD));
    assert!(first.message().contains("applied"));
    flow.set_promo(Some(first));

    flow.set_promo(Some(catalogue.apply("save10", &subtotal)?));
    let totals = flow.totals(&cart, USD, &PricingRules::default())?;
    assert_eq!(totals.discount, Money::from_minor(25_00, USD));

    flow.set_promo(Some(catalogue.apply("BOGUS", &subtotal)?));
    let totals = flow.totals(&cart, USD, &PricingRules::default())?;
    assert_eq!(totals.discount, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn full_checkout_produces_confirmation_snapshot() -> TestResult {
    let mut cart = scenario_cart();
    let rules = PricingRules::default();
    let mut flow = CheckoutFlow::new();

    let promo = PromoCatalogue::default().apply("SAVE10", &cart.subtotal(USD)?)?;
    flow.set_promo(Some(promo));

    flow.next(&cart)?;
    flow.select_address(address());
    flow.select_delivery(DeliveryOption::Standard);
    flow.next(&cart)?;

    cart.set_quantity_clamped(&ItemId::from("2"), 0);
    cart.add_item(product("2", 50_00), 1);

    flow.select_payment(PaymentSelection::new(PaymentMethod::ApplePay));

    let totals = flow.totals(&cart, USD, &rules)?;
    assert_eq!(totals.shipping, Money::from_minor(0, USD));
    assert_eq!(totals.total, Money::from_minor(245_00, USD));

    let new_order = NewOrder::for_checkout(
        &cart,
        &totals,
        PaymentMethod::ApplePay,
        UserId::from("buyer-1"),
    );

    assert_eq!(new_order.price, Decimal::new(245_00, 2));
    assert_eq!(new_order.payment_method, "Apple Pay");
    assert_eq!(new_order.quantity, 3);
    assert_eq!(new_order.product_name, "Product 1 + 1 more");
    assert_eq!(new_order.product_id, None);
    assert_eq!(new_order.unit_price, None);

    flow.record_payment(created_order(&new_order)?)?;
    assert_eq!(flow.step(), CheckoutStep::Review);

    let confirmation = flow.place_order(&cart, USD, &rules)?;

    assert_eq!(confirmation.items.len(), 2);
    assert_eq!(confirmation.payment_method, PaymentMethod::ApplePay);
    assert_eq!(confirmation.order.id, OrderId::from("ord-1"));
    assert_eq!(confirmation.totals, totals);
    assert!(flow.payment().is_none());

    Ok(())
}

#[test]
fn single_product_order_keeps_pre_tax_unit_price() -> TestResult {
    let mut cart = Cart::new();
    cart.add_item(product("1", 100_00), 2);

    let totals = CheckoutFlow::new().totals(&cart, USD, &PricingRules::default())?;

    let new_order =
        NewOrder::for_checkout(&cart, &totals, PaymentMethod::Mpesa, UserId::from("buyer-1"));

    assert_eq!(new_order.product_id.as_deref(), Some("1"));
    assert_eq!(new_order.unit_price, Some(Decimal::new(100_00, 2)));
    assert_eq!(new_order.price, *totals.total.amount());
    assert!(new_order.price > Decimal::new(200_00, 2));

    let order = created_order(&new_order)?;

    assert_eq!(order.product_id, new_order.product_id);
    assert_eq!(order.unit_price, new_order.unit_price);

    Ok(())
}

#[test]
fn short_mobile_money_pin_fails_validation() {
    let selection = PaymentSelection::mobile_money(
        PaymentMethod::Mpesa,
        MobileMoneyDetails {
            mobile_number: "0712345678".to_string(),
            pin: "12".to_string(),
        },
    );

    assert_eq!(selection.validate(), Err(PaymentFailure::PinTooShort));
}
