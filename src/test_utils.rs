use crate::auth::password::hash_password;
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, DbPool, RepositoryError};
use crate::models::admin::{DiscountType, NewCoupon, NewFood, DEFAULT_FOOD_IMAGE};
use crate::models::user::NewUser;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::PgConnection;
use std::sync::Once;

// Fixture strategy:
// - One guest, one admin, two available foods and one that is off the menu.
// - Both accounts share TEST_PASSWORD so login tests can authenticate.
pub const TEST_PASSWORD: &str = "secret123";
pub const TEST_USER_EMAIL: &str = "guest@example.com";
pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";
const TEST_SESSION_SECRET: &str = "test-session-secret";
static TEST_THREADS_GUARD: Once = Once::new();

fn ensure_single_threaded_tests() {
    TEST_THREADS_GUARD.call_once(|| {
        let threads = test_threads_from_args().or_else(|| std::env::var("RUST_TEST_THREADS").ok());
        if threads.as_deref() != Some("1") {
            panic!(
                "Tests must run with --test-threads=1 or RUST_TEST_THREADS=1 because init_test_env mutates environment variables."
            );
        }
    });
}

fn test_threads_from_args() -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == "--test-threads" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--test-threads=") {
            return Some(value.to_string());
        }
    }
    None
}

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    ensure_single_threaded_tests();
    set_env_if_unset("SESSION_JWT_SECRET", TEST_SESSION_SECRET);
    set_env_if_unset("SESSION_JWT_ISSUER", "tableside");
    set_env_if_unset("SESSION_JWT_AUDIENCE", "guests");
}

pub fn build_test_pool(database_url: &str) -> DbPool {
    let pool = establish_connection_pool(database_url).expect("Unable to build pool");
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE cart_items, order_items, orders, service_requests, coupons, \
         newsletter, foods, users RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub user_id: i32,
    pub admin_id: i32,
    /// Two available foods followed by one that is off the menu.
    pub food_ids: Vec<i32>,
}

pub fn seed_basic_fixtures(pool: &DbPool) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let user_id = insert_user(conn.connection(), "Guest One", TEST_USER_EMAIL, false)?;
    let admin_id = insert_user(conn.connection(), "Admin", TEST_ADMIN_EMAIL, true)?;
    let pizza = insert_food(conn.connection(), "Margherita Pizza", "Pizza", 299.0, true)?;
    let bread = insert_food(conn.connection(), "Garlic Bread", "Sides", 120.0, true)?;
    let soup = insert_food(conn.connection(), "Seasonal Soup", "Soups", 150.0, false)?;

    Ok(TestFixtures {
        user_id,
        admin_id,
        food_ids: vec![pizza, bread, soup],
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
    is_admin_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    let hash = hash_password(TEST_PASSWORD)
        .map_err(|e| RepositoryError::WorkerError(e.to_string()))?;
    diesel::insert_into(users)
        .values(&NewUser {
            name: name_val.to_string(),
            email: email_val.to_string(),
            password_hash: hash,
            phone: Some("0123456789".to_string()),
            location: None,
            is_admin: is_admin_val,
        })
        .returning(user_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_food(
    conn: &mut PgConnection,
    name_val: &str,
    category_val: &str,
    price_val: f64,
    is_available_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::foods::dsl::*;

    diesel::insert_into(foods)
        .values(&NewFood {
            name: name_val.to_string(),
            category: category_val.to_string(),
            price: price_val,
            description: Some(format!("{name_val} made fresh to order")),
            image: DEFAULT_FOOD_IMAGE.to_string(),
            is_available: is_available_val,
        })
        .returning(food_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_coupon(
    conn: &mut PgConnection,
    code_val: &str,
    discount_type_val: DiscountType,
    value_val: f64,
    window: (DateTime<Utc>, DateTime<Utc>),
    usage_limit_val: i32,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::coupons::dsl::*;

    diesel::insert_into(coupons)
        .values(&NewCoupon {
            code: code_val.to_string(),
            discount_type: discount_type_val,
            value: value_val,
            valid_from: window.0,
            valid_to: window.1,
            active: true,
            usage_limit: usage_limit_val,
        })
        .returning(coupon_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}
