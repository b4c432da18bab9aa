mod common;

use common::{product_json, Harness};
use serde_json::json;
use storefront_sdk::storefront_auth::Role;
use storefront_sdk::storefront_commerce::prelude::*;
use storefront_sdk::storefront_data::Method;

fn cart_json() -> serde_json::Value {
    json!({
        "items": [
            {"_id": "l1", "quantity": 2, "size": "md", "colour": "black",
             "product": product_json("p1", "Hat", 8)},
            {"_id": "l2", "quantity": 1, "size": "sm",
             "product": product_json("p2", "Mug", 50)}
        ],
        "totalItems": 3,
        "totalAmount": 59.97
    })
}

#[tokio::test]
async fn test_cart_requires_login() {
    let h = Harness::new();
    let err = h.shop.cart.get_cart().await.unwrap_err();
    assert!(err.requires_login());
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn test_quick_add_uses_first_options() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport
        .respond(Method::Post, "/cart", 200, json!({"message": "added"}));

    let product: Product = serde_json::from_value(product_json("p1", "Hat", 8)).unwrap();
    h.shop
        .products
        .add_to_cart(&AddToCartRequest::for_product(&product))
        .await
        .unwrap();

    let request = h.transport.last();
    assert_eq!(request.header_value("Authorization"), Some("Bearer token-user"));
    assert_eq!(
        request.request_body().as_json(),
        Some(json!({"productId": "p1", "quantity": 1, "size": "sm", "colour": "black"}))
    );
}

#[tokio::test]
async fn test_update_quantity() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport.respond(Method::Get, "/cart", 200, cart_json());
    h.transport
        .respond(Method::Put, "/cart/l1", 200, json!({"message": "updated"}));

    let err = h
        .shop
        .cart
        .update_quantity(&CartItemId::new("l1"), 0)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        storefront_sdk::StorefrontError::Commerce(CommerceError::InvalidQuantity(0))
    ));
    assert!(h.transport.requests().is_empty());

    let cart = h
        .shop
        .cart
        .update_quantity(&CartItemId::new("l1"), 4)
        .await
        .unwrap();
    assert_eq!(cart.total_items, 3);
    let requests = h.transport.requests();
    assert_eq!(requests[0].request_body().as_json(), Some(json!({"quantity": 4})));
    assert_eq!(h.transport.count(Method::Get, "/cart"), 1);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport.respond(Method::Get, "/cart", 200, cart_json());
    h.transport
        .respond(Method::Delete, "/cart/l2", 200, json!({}));
    h.transport.respond(Method::Delete, "/cart", 200, json!({}));

    h.shop
        .cart
        .remove_item(&CartItemId::new("l2"))
        .await
        .unwrap();
    assert_eq!(h.transport.count(Method::Delete, "/cart/l2"), 1);

    let cleared = h.shop.cart.clear().await.unwrap();
    assert!(cleared.is_empty());
    assert_eq!(cleared.total_amount, 0.0);
}

#[tokio::test]
async fn test_checkout_posts_demo_order() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport.respond(Method::Get, "/cart", 200, cart_json());
    h.transport
        .respond(Method::Post, "/checkout", 201, json!({"order": {"_id": "o-42"}}));

    let confirmation = h.shop.checkout.place_order().await.unwrap();
    assert_eq!(confirmation.order_id.as_ref().map(|id| id.as_str()), Some("o-42"));
    assert_eq!(confirmation.item_count, 3);
    assert_eq!(confirmation.status, OrderStatus::Confirmed);

    let body = h.transport.last().request_body().as_json().unwrap();
    assert_eq!(body["paymentMethod"], "demo");
    assert_eq!(body["status"], "confirmed");
    assert_eq!(body["totalAmount"], 59.97);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_checkout_empty_cart() {
    let h = Harness::new();
    h.login_as(Role::User);
    h.transport.respond(
        Method::Get,
        "/cart",
        200,
        json!({"items": [], "totalItems": 0, "totalAmount": 0}),
    );

    let err = h.shop.checkout.place_order().await.unwrap_err();
    assert!(err.is_empty_cart());
    assert_eq!(h.transport.count(Method::Post, "/checkout"), 0);
}

#[tokio::test]
async fn test_checkout_requires_login() {
    let h = Harness::new();
    let err = h.shop.checkout.place_order().await.unwrap_err();
    assert!(err.requires_login());
}

#[test]
fn test_mirror_round_trip_through_storage() {
    let h = Harness::new();
    let mut mirror = h.shop.cart_mirror();
    mirror
        .add_to_cart(CartItem::new("i1", "p1", "md", "default", 1).unwrap())
        .unwrap();
    mirror.remove_from_cart(&CartItemId::new("i1")).unwrap();

    let restored = h.shop.cart_mirror();
    assert!(restored.is_empty());
    assert_eq!(restored.count(), 0);
}
