use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_FOOD_IMAGE: &str = "default-food.jpg";

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::foods)]
#[diesel(primary_key(food_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Food {
    pub food_id: i32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Clone, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::foods)]
pub struct NewFood {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub description: Option<String>,
    #[serde(default = "default_food_image")]
    pub image: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::foods)]
pub struct UpdateFood {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::DiscountType"]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::coupons)]
#[diesel(primary_key(coupon_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Coupon {
    pub coupon_id: i32,
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
    pub usage_limit: i32,
    pub used_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Coupon {
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.valid_from <= now
            && self.valid_to >= now
            && self.used_count < self.usage_limit
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::db::schema::coupons)]
pub struct NewCoupon {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub active: bool,
    pub usage_limit: i32,
}

#[derive(Queryable, Selectable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::newsletter)]
#[diesel(primary_key(subscriber_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Subscriber {
    pub subscriber_id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

fn default_food_image() -> String {
    DEFAULT_FOOD_IMAGE.to_string()
}

fn default_true() -> bool {
    true
}
