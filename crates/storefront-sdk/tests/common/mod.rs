#![allow(dead_code)]

use serde_json::{json, Value};
use storefront_cache::MemoryStore;
use storefront_data::{ApiConfig, RetryPolicy};
use storefront_sdk::Storefront;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USER_ID: &str = "u1";

pub fn product(id: &str, price: i64) -> Value {
    json!({
        "_id": id,
        "name": format!("Product {}", id),
        "price": price,
        "stock": 10,
        "category": "apparel",
        "images": [format!("{}.jpg", id)]
    })
}

pub fn cart_line(id: &str, price: i64, quantity: u32) -> Value {
    json!({"product": product(id, price), "quantity": quantity})
}

pub fn address(id: &str, is_default: bool) -> Value {
    json!({
        "_id": id,
        "type": "home",
        "name": "Asha Rao",
        "phone": "9876543210",
        "addressLine1": "12 MG Road",
        "city": "Bengaluru",
        "state": "Karnataka",
        "pincode": "560001",
        "isDefault": is_default
    })
}

pub fn order(id: &str, order_number: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "orderId": order_number,
        "items": [{"productId": "p1", "name": "Product p1", "price": 499, "quantity": 2}],
        "deliveryAddress": address("a1", true),
        "payment": {"method": "cod", "status": "pending"},
        "pricing": {"subtotal": 998, "discount": 0, "deliveryCharge": 50, "total": 1048},
        "status": status
    })
}

pub fn return_request(id: &str, status: &str) -> Value {
    json!({
        "returnId": id,
        "orderId": "ORD-1001",
        "status": status,
        "items": [],
        "returnReasonText": "Damaged Product",
        "refundMethod": "original_payment",
        "refundAmount": 499
    })
}

pub fn storefront(server: &MockServer) -> Storefront {
    let config = ApiConfig::new(format!("{}/api", server.uri()))
        .unwrap()
        .with_retry(RetryPolicy::none());
    Storefront::new(&config, MemoryStore::new()).unwrap()
}

/// Sign in as [`USER_ID`] with `cart` as the server-side cart.
pub async fn signed_in(server: &MockServer, cart: Value) -> Storefront {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-1",
            "user": {"_id": USER_ID, "name": "Asha Rao", "email": "asha@example.in"}
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/cart"))
        .and(query_param("userId", USER_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": cart})))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/wishlist"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(server)
        .await;

    let mut store = storefront(server);
    store
        .login(storefront_auth::Credentials::new("asha@example.in", "secret1"))
        .await
        .unwrap();
    store
}
