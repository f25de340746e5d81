mod common;

use chrono::Utc;
use tableside::auth::password::verify_password;
use tableside::config::PricingConfig;
use tableside::db::{
    CartOperations, OrderOperations, RepositoryError, ServiceOperations, UserOperations,
};
use tableside::enums::users::CheckoutRequest;
use tableside::models::common::{PaymentMethod, ServiceType};
use tableside::models::user::{AdminUserChanges, NewUser, ProfileChanges};
use tableside::test_utils::{TEST_PASSWORD, TEST_USER_EMAIL};

fn changes_for(name: &str, email: &str, is_admin: bool) -> AdminUserChanges {
    AdminUserChanges {
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        location: None,
        is_admin,
    }
}

#[actix_rt::test]
async fn duplicate_email_is_a_conflict() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let result = user_ops.create_user(NewUser {
        name: "Someone Else".to_string(),
        email: TEST_USER_EMAIL.to_string(),
        password_hash: "x".to_string(),
        phone: None,
        location: None,
        is_admin: false,
    });
    assert!(matches!(result, Err(RepositoryError::Conflict(msg)) if msg == "Email already registered!"));
}

#[actix_rt::test]
async fn fixture_password_verifies() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let user = user_ops.get_user_by_email(TEST_USER_EMAIL).expect("user");
    assert!(verify_password(TEST_PASSWORD, &user.password_hash));
    assert!(!verify_password("wrong-password", &user.password_hash));
}

#[actix_rt::test]
async fn profile_reports_order_stats() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());
    let cart_ops = CartOperations::new(pool.clone());
    let order_ops = OrderOperations::new(pool.clone());

    cart_ops
        .add_to_cart(fixtures.user_id, fixtures.food_ids[0], 1, None)
        .expect("add");
    order_ops
        .checkout(
            fixtures.user_id,
            &CheckoutRequest {
                name: "Guest One".to_string(),
                phone: "0123456789".to_string(),
                location: "Table 3".to_string(),
                payment_method: PaymentMethod::Card,
                special_instructions: None,
                coupon_code: None,
            },
            &PricingConfig::default(),
            Utc::now(),
        )
        .expect("checkout");

    let (user, stats, orders) = user_ops.get_profile(fixtures.user_id).expect("profile");
    assert_eq!(user.location.as_deref(), Some("Table 3"));
    assert_eq!(stats.total_orders, 1);
    assert_eq!(stats.total_spent, 299.0);
    assert_eq!(orders.len(), 1);

    let updated = user_ops
        .update_profile(
            fixtures.user_id,
            ProfileChanges {
                name: "Guest Renamed".to_string(),
                phone: None,
                location: Some("Table 9".to_string()),
            },
        )
        .expect("update");
    assert_eq!(updated.name, "Guest Renamed");
    assert_eq!(updated.phone, None);
}

#[actix_rt::test]
async fn admin_cannot_demote_themselves() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let (user, warning) = user_ops
        .admin_update_user(
            fixtures.admin_id,
            fixtures.admin_id,
            changes_for("Head Admin", "admin@example.com", false),
        )
        .expect("update self");
    assert!(user.is_admin);
    assert_eq!(user.name, "Head Admin");
    assert_eq!(
        warning.as_deref(),
        Some("You cannot remove your own admin privileges.")
    );

    let (promoted, warning) = user_ops
        .admin_update_user(
            fixtures.admin_id,
            fixtures.user_id,
            changes_for("Guest One", TEST_USER_EMAIL, true),
        )
        .expect("promote");
    assert!(promoted.is_admin);
    assert!(warning.is_none());
}

#[actix_rt::test]
async fn admin_edit_rejects_taken_email() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    let result = user_ops.admin_update_user(
        fixtures.admin_id,
        fixtures.user_id,
        changes_for("Guest One", "admin@example.com", false),
    );
    assert!(matches!(result, Err(RepositoryError::Conflict(_))));

    let missing = user_ops.admin_update_user(
        fixtures.admin_id,
        9999,
        changes_for("Nobody", "nobody@example.com", false),
    );
    assert!(matches!(missing, Err(RepositoryError::NotFound(_))));
}

#[actix_rt::test]
async fn deleting_a_user_removes_their_rows() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());
    let cart_ops = CartOperations::new(pool.clone());
    let service_ops = ServiceOperations::new(pool.clone());

    cart_ops
        .add_to_cart(fixtures.user_id, fixtures.food_ids[0], 1, None)
        .expect("add");
    service_ops
        .create_request(fixtures.user_id, ServiceType::Water, None)
        .expect("request");

    let own = user_ops.delete_user(fixtures.admin_id, fixtures.admin_id);
    assert!(matches!(own, Err(RepositoryError::ValidationError(_))));

    user_ops
        .delete_user(fixtures.admin_id, fixtures.user_id)
        .expect("delete");
    assert!(matches!(
        user_ops.get_user(fixtures.user_id),
        Err(RepositoryError::NotFound(_))
    ));
    assert_eq!(cart_ops.cart_count(fixtures.user_id).expect("count"), 0);
    assert!(service_ops.list_requests(None).expect("requests").is_empty());
}

#[actix_rt::test]
async fn list_users_searches_name_and_email() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let user_ops = UserOperations::new(pool.clone());

    assert_eq!(user_ops.list_users(None).expect("all").len(), 2);
    let hits = user_ops.list_users(Some("GUEST")).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].email, TEST_USER_EMAIL);
}
