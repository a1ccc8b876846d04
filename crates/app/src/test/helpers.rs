//! Test Helpers

use rust_decimal::Decimal;
use voltcart::{
    items::{CartProduct, ItemId},
    orders::{Order, OrderId, OrderStatus, PaymentStatus},
    prices::Price,
    users::UserId,
};

pub(crate) fn product(id: &str, unit_minor: u64) -> CartProduct {
    CartProduct {
        id: ItemId::from(id),
        name: format!("Product {id}"),
        seller_name: "Sunrise Solar".to_string(),
        unit_price: Price::new(unit_minor),
        original_price: None,
        image_ref: format!("/images/{id}.png"),
        in_stock: true,
        stock_count: 10,
    }
}

pub(crate) fn order_fixture(id: &str, status: OrderStatus) -> Order {
    Order {
        id: OrderId::from(id),
        order_number: Some(format!("ORD-{id}")),
        product_id: Some("panel-400w".to_string()),
        product_name: "400W Mono Panel".to_string(),
        product_image: Some("/images/panel-400w.png".to_string()),
        price: Decimal::new(295_00, 2),
        unit_price: Some(Decimal::new(250_00, 2)),
        quantity: 1,
        status,
        payment_status: Some(PaymentStatus::Pending),
        payment_method: "M-Pesa".to_string(),
        user_id: Some(UserId::from("buyer-1")),
        seller_id: Some(UserId::from("seller-1")),
        tracking_number: None,
        carrier: None,
        notes: None,
        cancel_reason: None,
        refund_reason: None,
        refund_amount: None,
        refund_method: None,
        order_date: None,
        delivery_date: None,
        delivered_at: None,
        created_at: None,
        updated_at: None,
    }
}
