mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::auth_header_for;
use serde_json::{json, Value};

#[actix_rt::test]
async fn guests_are_kept_out_of_the_back_office() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/admin/dashboard")
        .insert_header(auth_header_for(fixtures.user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get().uri("/admin/dashboard").to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(r) => r.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn food_crud() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::post()
        .uri("/admin/foods")
        .insert_header(auth.clone())
        .set_json(json!({
            "name": "Tiramisu",
            "category": "Desserts",
            "price": 180.0,
            "description": "Coffee soaked sponge with mascarpone"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["food"]["image"], "default-food.jpg");
    assert_eq!(body["food"]["is_available"], true);
    let food_id = body["food"]["food_id"].as_i64().expect("food id");

    let req = test::TestRequest::post()
        .uri("/admin/foods")
        .insert_header(auth.clone())
        .set_json(json!({
            "name": "Tiny",
            "category": "Desserts",
            "price": 10.0,
            "description": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/foods/{food_id}"))
        .insert_header(auth.clone())
        .set_json(json!({ "price": 200.0, "is_available": false }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["food"]["price"], 200.0);
    assert_eq!(body["food"]["is_available"], false);

    let req = test::TestRequest::get()
        .uri("/admin/foods")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["foods"].as_array().map(Vec::len), Some(4));

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/foods/{food_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/foods/{food_id}"))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn order_status_and_kitchen_display() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let guest = auth_header_for(fixtures.user_id);
    let admin = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::post()
        .uri(&format!("/cart/add/{}", fixtures.food_ids[0]))
        .insert_header(guest.clone())
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri("/orders/checkout")
        .insert_header(guest)
        .set_json(json!({
            "name": "Guest One",
            "phone": "0123456789",
            "location": "Table 2",
            "payment_method": "card"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = body["order_id"].as_i64().expect("order id");

    let req = test::TestRequest::post()
        .uri(&format!("/admin/orders/{order_id}/status"))
        .insert_header(admin.clone())
        .set_json(json!({ "status": "teleported" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/orders/{order_id}/status"))
        .insert_header(admin.clone())
        .set_json(json!({ "status": "preparing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/admin/kds/orders")
        .insert_header(admin.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["orders"][0]["location"], "Table 2");
    assert_eq!(body["orders"][0]["status"], "preparing");

    let req = test::TestRequest::post()
        .uri(&format!("/admin/orders/{order_id}/status"))
        .insert_header(admin.clone())
        .set_json(json!({ "status": "pending" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/admin/orders?status=preparing")
        .insert_header(admin.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["orders"][0]["customer_name"], "Guest One");

    let req = test::TestRequest::get()
        .uri(&format!("/admin/orders/{order_id}/receipt"))
        .insert_header(admin)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["details"]["customer_email"], "guest@example.com");
}

#[actix_rt::test]
async fn user_management_guards_the_acting_admin() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::put()
        .uri(&format!("/admin/users/{}", fixtures.admin_id))
        .insert_header(auth.clone())
        .set_json(json!({ "name": "Admin", "email": "admin@example.com", "is_admin": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["is_admin"], true);
    assert_eq!(body["message"], "You cannot remove your own admin privileges.");

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/users/{}", fixtures.admin_id))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/admin/users?q=guest")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["users"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/users/{}", fixtures.user_id))
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The deleted guest's token no longer resolves.
    let req = test::TestRequest::get()
        .uri("/cart")
        .insert_header(auth_header_for(fixtures.user_id))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(r) => r.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn coupons_create_list_and_purge() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let auth = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::post()
        .uri("/admin/coupons")
        .insert_header(auth.clone())
        .set_json(json!({
            "code": "summer20",
            "discount_type": "percentage",
            "value": 20.0,
            "valid_to": "2099-12-31"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["coupon"]["code"], "SUMMER20");
    assert_eq!(body["coupon"]["usage_limit"], 100);
    let coupon_id = body["coupon"]["coupon_id"].as_i64().expect("coupon id");

    let req = test::TestRequest::post()
        .uri("/admin/coupons")
        .insert_header(auth.clone())
        .set_json(json!({
            "code": "SUMMER20",
            "discount_type": "fixed",
            "value": 50.0,
            "valid_to": "2099-12-31"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/home").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["active_coupon"]["code"], "SUMMER20");

    let req = test::TestRequest::post()
        .uri("/admin/coupons/delete-expired")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deleted"], 0);

    let req = test::TestRequest::delete()
        .uri(&format!("/admin/coupons/{coupon_id}"))
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/admin/coupons")
        .insert_header(auth)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["coupons"], json!([]));
}

#[actix_rt::test]
async fn service_desk_and_notifications() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let admin = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::post()
        .uri("/services")
        .insert_header(auth_header_for(fixtures.user_id))
        .set_json(json!({ "service_type": "cleaning" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let request_id = body["request"]["request_id"].as_i64().expect("request id");

    let req = test::TestRequest::get()
        .uri("/admin/notifications")
        .insert_header(admin.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["services"], 1);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/services/{request_id}/status"))
        .insert_header(admin.clone())
        .set_json(json!({ "status": "done" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/admin/services/{request_id}/status"))
        .insert_header(admin.clone())
        .set_json(json!({ "status": "completed" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/admin/services?status=completed")
        .insert_header(admin.clone())
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["requests"][0]["user_name"], "Guest One");

    let req = test::TestRequest::get()
        .uri("/admin/notifications")
        .insert_header(admin)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["services"], 0);
}

#[actix_rt::test]
async fn dashboard_and_csv_exports() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let admin = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::get()
        .uri("/admin/dashboard?start_date=2024-03-01&end_date=2024-03-07")
        .insert_header(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["start_date"], "2024-03-01");
    assert_eq!(body["daily_sales"].as_array().map(Vec::len), Some(7));
    assert_eq!(body["totals"]["total_users"], 2);
    assert_eq!(body["status_distribution"].as_array().map(Vec::len), Some(5));

    let req = test::TestRequest::get()
        .uri("/admin/export-sales?start_date=2024-03-01&end_date=2024-03-07")
        .insert_header(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("content disposition");
    assert!(disposition.contains("sales_report_2024-03-01_2024-03-07.csv"));
    let csv = test::read_body(resp).await;
    assert!(csv.starts_with(b"Order ID,Date,Customer"));

    let req = test::TestRequest::post()
        .uri("/subscribe")
        .set_json(json!({ "email": "fan@example.com" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/admin/newsletter/export")
        .insert_header(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/csv")
    );
    let csv = test::read_body(resp).await;
    assert!(std::str::from_utf8(&csv).expect("utf8").contains("fan@example.com"));

    let req = test::TestRequest::get()
        .uri("/admin/newsletter")
        .insert_header(admin)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["subscribers"][0]["email"], "fan@example.com");
}

#[actix_rt::test]
async fn dashboard_survives_extreme_date_ranges() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;
    let admin = auth_header_for(fixtures.admin_id);

    let req = test::TestRequest::get()
        .uri("/admin/dashboard?start_date=0001-01-01&end_date=9999-12-31")
        .insert_header(admin.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["daily_sales"].as_array().map(Vec::len), Some(366));
    assert_eq!(body["end_date"], "9999-12-31");

    let req = test::TestRequest::get()
        .uri("/admin/export-sales?start_date=%2B262142-12-20&end_date=%2B262142-12-31")
        .insert_header(admin)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
