#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod enums;
pub mod models;
pub mod services;
pub mod test_utils;
pub mod traits;
pub mod validators;

use crate::auth::SessionConfig;
use crate::config::PricingConfig;
use crate::db::{
    AnalyticsOperations, CartOperations, CouponOperations, DbPool, FoodOperations,
    NewsletterOperations, OrderOperations, ServiceOperations, UserOperations,
};

#[derive(Clone)]
pub struct AppState {
    pub user_ops: UserOperations,
    pub cart_ops: CartOperations,
    pub food_ops: FoodOperations,
    pub order_ops: OrderOperations,
    pub service_ops: ServiceOperations,
    pub coupon_ops: CouponOperations,
    pub newsletter_ops: NewsletterOperations,
    pub analytics_ops: AnalyticsOperations,
    pub session: SessionConfig,
    pub pricing: PricingConfig,
}

impl AppState {
    /// Expects a pool whose migrations have already been applied.
    pub fn new(pool: DbPool, session: SessionConfig, pricing: PricingConfig) -> Self {
        AppState {
            user_ops: UserOperations::new(pool.clone()),
            cart_ops: CartOperations::new(pool.clone()),
            food_ops: FoodOperations::new(pool.clone()),
            order_ops: OrderOperations::new(pool.clone()),
            service_ops: ServiceOperations::new(pool.clone()),
            coupon_ops: CouponOperations::new(pool.clone()),
            newsletter_ops: NewsletterOperations::new(pool.clone()),
            analytics_ops: AnalyticsOperations::new(pool),
            session,
            pricing,
        }
    }
}
