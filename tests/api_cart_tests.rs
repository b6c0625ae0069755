//! 购物车 API 集成测试

use axum::http::StatusCode;

mod common;
use common::{create_test_app, register_and_login, seed_grocery, send_json};

#[tokio::test]
async fn test_cart_flow_add_view_remove() {
    let (state, app) = create_test_app();
    let apple = seed_grocery(&state, "apple", 600.0, 50).await;
    let token = register_and_login(&state, "alice", "secret1", None).await;

    // 加购
    let (status, body) = send_json(
        &app,
        "POST",
        &format!("/api/cart/add?productId={}&quantity=3", apple),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item added to cart successfully");

    // 查看：总价 = 单价 × 数量
    let (status, body) = send_json(&app, "GET", "/api/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(items[0]["total_price"], 1800.0);

    // 移除
    let item_id = items[0]["id"].as_i64().unwrap();
    let (status, body) = send_json(
        &app,
        "DELETE",
        &format!("/api/cart/remove/{}", item_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Item removed from cart");

    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_add_unknown_product() {
    let (state, app) = create_test_app();
    let token = register_and_login(&state, "alice", "secret1", None).await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/cart/add?productId=999&quantity=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_checkout_reduces_stock_and_clears_cart() {
    let (state, app) = create_test_app();
    let apple = seed_grocery(&state, "apple", 600.0, 50).await;
    let token = register_and_login(&state, "alice", "secret1", None).await;

    send_json(
        &app,
        "POST",
        &format!("/api/cart/add?productId={}&quantity=20", apple),
        Some(&token),
        None,
    )
    .await;

    let (status, body) =
        send_json(&app, "POST", "/api/cart/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order placed successfully");

    // 库存扣减可经公开详情接口观察
    let (_, body) = send_json(&app, "GET", &format!("/api/groceries/{}", apple), None, None).await;
    assert_eq!(body["quantity"], 30);

    // 购物车已清空
    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&token), None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_empty_cart_fails() {
    let (state, app) = create_test_app();
    let token = register_and_login(&state, "alice", "secret1", None).await;

    let (status, body) =
        send_json(&app, "POST", "/api/cart/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Checkout failed");
}

#[tokio::test]
async fn test_checkout_insufficient_stock() {
    let (state, app) = create_test_app();
    let apple = seed_grocery(&state, "apple", 600.0, 5).await;
    let token = register_and_login(&state, "alice", "secret1", None).await;

    send_json(
        &app,
        "POST",
        &format!("/api/cart/add?productId={}&quantity=10", apple),
        Some(&token),
        None,
    )
    .await;

    let (status, body) =
        send_json(&app, "POST", "/api/cart/checkout", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Insufficient stock for product: apple");
}

#[tokio::test]
async fn test_cannot_remove_another_users_item() {
    let (state, app) = create_test_app();
    let apple = seed_grocery(&state, "apple", 600.0, 50).await;
    let alice = register_and_login(&state, "alice", "secret1", None).await;
    let bob = register_and_login(&state, "bob", "secret2", None).await;

    send_json(
        &app,
        "POST",
        &format!("/api/cart/add?productId={}&quantity=1", apple),
        Some(&alice),
        None,
    )
    .await;

    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&alice), None).await;
    let item_id = body.as_array().unwrap()[0]["id"].as_i64().unwrap();

    // 其他用户删除该条目：404，条目保留
    let (status, _) = send_json(
        &app,
        "DELETE",
        &format!("/api/cart/remove/{}", item_id),
        Some(&bob),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&alice), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_carts_are_isolated_per_user() {
    let (state, app) = create_test_app();
    let apple = seed_grocery(&state, "apple", 600.0, 50).await;
    let alice = register_and_login(&state, "alice", "secret1", None).await;
    let bob = register_and_login(&state, "bob", "secret2", None).await;

    send_json(
        &app,
        "POST",
        &format!("/api/cart/add?productId={}&quantity=1", apple),
        Some(&alice),
        None,
    )
    .await;

    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&bob), None).await;
    assert!(body.as_array().unwrap().is_empty());

    let (_, body) = send_json(&app, "GET", "/api/cart", Some(&alice), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}
