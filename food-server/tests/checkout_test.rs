//! 结账集成测试
//!
//! Transactional checkout over HTTP, including idempotent retries and
//! concurrent submissions of the same cart.

mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

fn cart(request_id: &str, lines: &[(i64, i64)]) -> Value {
    json!({
        "requestId": request_id,
        "deliveryMode": "Pickup",
        "paymentMode": "Cash",
        "items": lines
            .iter()
            .map(|(id, qty)| json!({ "menuItemId": id, "quantity": qty }))
            .collect::<Vec<_>>(),
    })
}

async fn count(app: &axum::Router, uri: &str) -> usize {
    let (_, body) = get(app, uri).await;
    body.as_array().unwrap().len()
}

#[tokio::test]
async fn checkout_creates_order_payment_and_receipt() {
    let app = app().await;
    let burger = menu_item(&app, "Burger", 9.99).await;
    let cola = menu_item(&app, "Cola", 2.5).await;

    let (status, body) = post(&app, "/api/checkout", cart("cart-1", &[(burger, 3), (cola, 2)])).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["replayed"], false);
    assert_eq!(body["order"]["subtotal"], 34.97);
    assert_eq!(body["order"]["finalAmount"], 34.97);
    assert_eq!(body["order"]["status"], "Order Received");
    assert_eq!(body["order"]["paymentStatus"], "Pending");
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["payment"]["amountPaid"], 34.97);
    assert_eq!(body["receipt"]["orderId"], body["order"]["id"]);

    let order_id = body["order"]["id"].as_i64().unwrap();
    let (_, detail) = get(&app, &format!("/api/orders/detail?id={order_id}")).await;
    assert_eq!(detail["payments"].as_array().unwrap().len(), 1);
    assert_eq!(detail["receipts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn retry_with_same_request_id_is_replayed() {
    let app = app().await;
    let burger = menu_item(&app, "Burger", 5.0).await;

    let (status, first) = post(&app, "/api/checkout", cart("cart-2", &[(burger, 1)])).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, second) = post(&app, "/api/checkout", cart("cart-2", &[(burger, 1)])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["replayed"], true);
    assert_eq!(second["order"]["id"], first["order"]["id"]);
    assert_eq!(second["payment"]["transactionId"], first["payment"]["transactionId"]);

    assert_eq!(count(&app, "/api/orders").await, 1);
    assert_eq!(count(&app, "/api/payments").await, 1);
}

#[tokio::test]
async fn failed_checkout_leaves_no_trace() {
    let app = app().await;
    let burger = menu_item(&app, "Burger", 5.0).await;
    let soup = menu_item(&app, "Soup", 4.0).await;
    let (status, _) = put(&app, &format!("/api/menu-items?id={soup}"), json!({ "available": false })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/api/checkout", cart("cart-3", &[(burger, 1), (soup, 1)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MENU_ITEM_UNAVAILABLE");
    assert_eq!(body["details"]["menuItemId"], soup);

    let (status, body) = post(&app, "/api/checkout", cart("cart-4", &[(burger, 1), (777, 1)])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MENU_ITEM_NOT_FOUND");

    for uri in ["/api/orders", "/api/order-items", "/api/payments", "/api/receipts"] {
        assert_eq!(count(&app, uri).await, 0, "{uri}");
    }
}

#[tokio::test]
async fn cart_validation() {
    let app = app().await;

    let (status, body) = post(&app, "/api/checkout", cart("cart-5", &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_CART");

    let (_, body) = post(&app, "/api/checkout", cart("cart-6", &[(1, 0)])).await;
    assert_eq!(body["code"], "INVALID_QUANTITY");
    assert_eq!(body["details"]["field"], "items[0].quantity");

    let mut bad_mode = cart("cart-7", &[(1, 1)]);
    bad_mode["deliveryMode"] = json!("Drone");
    let (_, body) = post(&app, "/api/checkout", bad_mode).await;
    assert_eq!(body["code"], "INVALID_DELIVERY_MODE");

    let oversized = cart("cart-8", &[(1, 1), (1, 1_000_000_000)]);
    let (status, body) = post(&app, "/api/checkout", oversized).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUANTITY");
    assert_eq!(body["details"]["field"], "items[1].quantity");
}

#[tokio::test]
async fn largest_allowed_cart_is_priced_exactly() {
    let app = app().await;
    let caviar = menu_item(&app, "Caviar", 1_000_000.0).await;

    let (status, body) = post(&app, "/api/checkout", cart("cart-big", &[(caviar, 9999)])).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["order"]["subtotal"], 9_999_000_000.0);
    assert_eq!(body["payment"]["amountPaid"], 9_999_000_000.0);

    let (status, body) = post(&app, "/api/checkout", cart("cart-too-big", &[(caviar, 10_000)])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_QUANTITY");
    assert_eq!(count(&app, "/api/orders").await, 1);
}

#[tokio::test]
async fn offer_discount_is_applied() {
    let app = app().await;
    let pizza = menu_item(&app, "Pizza", 12.5).await;
    let offer = create(
        &app,
        "/api/offers",
        json!({
            "title": "Lunch",
            "discountPercent": 15,
            "validFrom": "2000-01-01T00:00:00Z",
            "validUntil": "2999-01-01T00:00:00Z"
        }),
    )
    .await;

    let mut body = cart("cart-8", &[(pizza, 3)]);
    body["offerId"] = json!(offer);
    body["paymentMode"] = json!("Card");
    let (status, result) = post(&app, "/api/checkout", body).await;
    assert_eq!(status, StatusCode::CREATED, "{result}");
    // 37.50 * 15% = 5.625 -> 5.63 off
    assert_eq!(result["order"]["discount"], 5.63);
    assert_eq!(result["order"]["finalAmount"], 31.87);
    assert_eq!(result["order"]["paymentStatus"], "Completed");

    let mut body = cart("cart-9", &[(pizza, 1)]);
    body["offerId"] = json!(4040);
    let (status, result) = post(&app, "/api/checkout", body).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(result["code"], "OFFER_NOT_FOUND");
}

#[tokio::test]
async fn concurrent_duplicate_submissions_create_one_order() {
    let dir = tempfile::tempdir().unwrap();
    let app = file_app(&dir).await;
    let burger = menu_item(&app, "Burger", 8.0).await;

    let submissions = (0..4).map(|_| post(&app, "/api/checkout", cart("cart-race", &[(burger, 2)])));
    let results = futures::future::join_all(submissions).await;

    let created = results.iter().filter(|(s, _)| *s == StatusCode::CREATED).count();
    let replayed = results.iter().filter(|(s, _)| *s == StatusCode::OK).count();
    assert_eq!(created, 1, "{results:?}");
    assert_eq!(replayed, 3, "{results:?}");

    let order_ids: Vec<_> = results.iter().map(|(_, b)| b["order"]["id"].clone()).collect();
    assert!(order_ids.iter().all(|id| *id == order_ids[0]));
    assert_eq!(count(&app, "/api/orders").await, 1);
    assert_eq!(count(&app, "/api/payments").await, 1);
}
