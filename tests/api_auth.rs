mod common;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use common::auth_header_for;
use serde_json::{json, Value};
use tableside::test_utils::{TEST_ADMIN_EMAIL, TEST_PASSWORD, TEST_USER_EMAIL};

#[actix_rt::test]
async fn register_then_login() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "New Diner",
            "email": "New.Diner@Example.com",
            "phone": "0987654321",
            "password": "hunter22",
            "confirm_password": "hunter22"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": "new.diner@example.com", "password": "hunter22" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["redirect"], "/");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["user"].get("password_hash").is_none());
}

#[actix_rt::test]
async fn register_rejects_bad_forms_and_duplicates() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Mismatch",
            "email": "mismatch@example.com",
            "phone": "0987654321",
            "password": "hunter22",
            "confirm_password": "hunter23"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Passwords must match");

    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({
            "name": "Copy Cat",
            "email": TEST_USER_EMAIL,
            "phone": "0987654321",
            "password": "hunter22",
            "confirm_password": "hunter22"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Email already registered!");
}

#[actix_rt::test]
async fn admin_login_redirects_to_back_office() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({ "email": TEST_ADMIN_EMAIL, "password": TEST_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["redirect"], "/admin");
    assert_eq!(body["user"]["is_admin"], true);
}

#[actix_rt::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    for (email, password) in [
        (TEST_USER_EMAIL, "not-the-password"),
        ("ghost@example.com", TEST_PASSWORD),
    ] {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({ "email": email, "password": password }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid email or password!");
    }
}

#[actix_rt::test]
async fn protected_routes_need_a_valid_token() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get().uri("/cart").to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(r) => r.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/cart")
        .insert_header((header::AUTHORIZATION, "Bearer not-a-token"))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(r) => r.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/cart")
        .insert_header(auth_header_for(fixtures.user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn stale_token_does_not_block_public_pages() {
    let (app, _fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/home")
        .insert_header(auth_header_for(9999))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(auth_header_for(9999))
        .to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(r) => r.status(),
        Err(e) => e.as_response_error().status_code(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn profile_read_and_update() {
    let (app, fixtures, _db_url) = common::setup_api_app().await;

    let req = test::TestRequest::get()
        .uri("/users/profile")
        .insert_header(auth_header_for(fixtures.user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["user"]["email"], TEST_USER_EMAIL);
    assert_eq!(body["stats"]["total_orders"], 0);

    let req = test::TestRequest::put()
        .uri("/users/profile")
        .insert_header(auth_header_for(fixtures.user_id))
        .set_json(json!({ "name": "Guest Renamed", "phone": "0123456789", "location": "Table 12" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Profile updated successfully!");
    assert_eq!(body["user"]["location"], "Table 12");

    let req = test::TestRequest::post()
        .uri("/auth/logout")
        .insert_header(auth_header_for(fixtures.user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
