mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::auth_header_for;
use serde_json::{json, Value};

fn checkout_body() -> Value {
    json!({
        "name": "Guest One",
        "phone": "0123456789",
        "location": "Table 5",
        "payment_method": "cash",
        "special_instructions": "no onions"
    })
}

#[actix_rt::test]
async fn cart_add_update_remove() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    // Body is optional; quantity defaults to one.
    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[1]))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Garlic Bread added to cart!");
    assert_eq!(body["subtotal"], 120.0);
    assert_eq!(body["delivery_charge"], 50.0);
    assert_eq!(body["total"], 170.0);
    let cart_id = body["items"][0]["cart_id"].as_i64().expect("cart id");

    let req = test::TestRequest::post()
        .uri(&format!("/cart/update/{cart_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 2 }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Cart updated");
    assert_eq!(body["subtotal"], 240.0);
    assert_eq!(body["delivery_charge"], 0.0);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/remove/{cart_id}"))
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cart_count"], 0);
}

#[actix_rt::test]
async fn cart_rejects_unavailable_food_and_bad_quantity() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[2]))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 100 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Quantity cannot be more than 99");

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "special_instructions": "x".repeat(300) }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let cart_id = body["items"][0]["cart_id"].as_i64().expect("cart id");

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "special_instructions": "y".repeat(300) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/update/{cart_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 2147483647 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/cart/add/9999")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn checkout_and_view_order() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .set_json(json!({ "quantity": 2, "special_instructions": "extra cheese" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(auth.clone())
        .set_json(checkout_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order placed successfully!");
    assert_eq!(body["total_amount"], 598.0);
    let order_id = body["order_id"].as_i64().expect("order id");

    let req = test::TestRequest::get()
        .uri("/orders")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["orders"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{order_id}"))
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["details"]["items"][0]["special_instructions"], "extra cheese");
    assert_eq!(body["details"]["order"]["location"], "Table 5");

    let req = test::TestRequest::get()
        .uri("/cart")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["cart_count"], 0);
}

#[actix_rt::test]
async fn cart_view_suggests_available_foods() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::get()
        .uri("/cart")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let suggested = body["recommended_foods"].as_array().expect("recommended foods");
    assert!(suggested.len() <= 4);
    let ids: Vec<i64> = suggested.iter().filter_map(|f| f["food_id"].as_i64()).collect();
    assert_eq!(ids, vec![i64::from(fixtures.food_ids[0]), i64::from(fixtures.food_ids[1])]);
    assert!(suggested.iter().all(|f| f["is_available"] == true));

    // Cart mutations answer without suggestions.
    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body.get("recommended_foods").is_none());
}

#[actix_rt::test]
async fn checkout_needs_items_and_a_table() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(auth.clone())
        .set_json(checkout_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Your cart is empty!");

    let mut no_table = checkout_body();
    no_table["location"] = json!("  ");
    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(auth.clone())
        .set_json(no_table)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(auth)
        .insert_header((header::CONTENT_TYPE, "text/plain"))
        .set_payload("name=Guest")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn orders_are_private_to_their_owner() {
    let (app, fixtures, db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(auth.clone())
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(auth.clone())
        .set_json(checkout_body())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = body["order_id"].as_i64().expect("order id");

    let pool = tableside::test_utils::build_test_pool(&db_url);
    let other = {
        let mut conn = tableside::db::DbConnection::new(&pool).expect("db connection");
        tableside::test_utils::insert_user(conn.connection(), "Other Guest", "other@example.com", false)
            .expect("other user")
    };

    let req = test::TestRequest::get()
        .uri(&format!("/orders/{order_id}"))
        .insert_header(auth_header_for(other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/orders/{order_id}/cancel"))
        .insert_header(auth_header_for(other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Staff may read any order.
    let req = test::TestRequest::get()
        .uri(&format!("/orders/{order_id}"))
        .insert_header(auth_header_for(fixtures.admin_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&format!("/orders/{order_id}/cancel"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order cancelled successfully");
}

#[actix_rt::test]
async fn service_requests_by_guest() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.user_id);

    let req = test::TestRequest::post()
        .uri("/services")
        .insert_header(auth.clone())
        .set_json(json!({ "service_type": "water", "description": "sparkling please" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["request"]["status"], "pending");

    let req = test::TestRequest::post()
        .uri("/services")
        .insert_header(auth.clone())
        .set_json(json!({ "service_type": "laundry" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid service type");

    let req = test::TestRequest::get()
        .uri("/services")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["requests"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["requests"][0]["service_type"], "water");
}
