pub mod analytics;
pub mod coupon;
pub mod menu;
pub mod newsletter;
