use crate::models::admin::{Coupon, DiscountType, Food, NewCoupon, NewFood, Subscriber, UpdateFood};
use crate::models::common::{Order, OrderStatus};
use crate::models::user::UserSummary;
use crate::services::sales::day_start;
use crate::traits::{first_error, Validate};
use crate::validators;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn check_description(value: Option<&str>) -> Result<(), String> {
    match value {
        Some(d) => validators::required_length("Description", d, 10, 500),
        None => Err("Description is required".to_string()),
    }
}

impl Validate for NewFood {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Food Name", &self.name, 2, 100),
            validators::required_length("Category", &self.category, 1, 50),
            validators::at_least("Price", self.price, 0.0),
            check_description(self.description.as_deref()),
            validators::max_length("Image", Some(&self.image), 200),
        ])
    }
}

impl Validate for UpdateFood {
    fn validate(&self) -> Result<(), String> {
        first_error([
            self.name
                .as_deref()
                .map_or(Ok(()), |n| validators::required_length("Food Name", n, 2, 100)),
            self.category
                .as_deref()
                .map_or(Ok(()), |c| validators::required_length("Category", c, 1, 50)),
            self.price
                .map_or(Ok(()), |p| validators::at_least("Price", p, 0.0)),
            self.description
                .as_deref()
                .map_or(Ok(()), |d| check_description(Some(d))),
            validators::max_length("Image", self.image.as_deref(), 200),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct FoodResponse {
    pub success: bool,
    pub message: Option<String>,
    pub food: Option<Food>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct FoodListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub foods: Vec<Food>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct CouponRequest {
    pub code: String,
    pub discount_type: DiscountType,
    pub value: f64,
    /// `YYYY-MM-DD`; defaults to now
    pub valid_from: Option<String>,
    /// `YYYY-MM-DD`; the coupon stays valid until the end of that day (UTC)
    pub valid_to: String,
    pub usage_limit: Option<i32>,
    pub active: Option<bool>,
}

fn parse_date(label: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .filter(|d| d.succ_opt().is_some())
        .ok_or_else(|| format!("{label} must be a date in YYYY-MM-DD format"))
}

impl Validate for CouponRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Coupon Code", self.code.trim(), 3, 20),
            validators::at_least("Discount Value", self.value, 0.0),
            if self.discount_type == DiscountType::Percentage && self.value > 100.0 {
                Err("Percentage discount cannot exceed 100".to_string())
            } else {
                Ok(())
            },
            parse_date("Valid Until", &self.valid_to).map(|_| ()),
            self.valid_from
                .as_deref()
                .map_or(Ok(()), |d| parse_date("Valid From", d).map(|_| ())),
            match self.usage_limit {
                Some(limit) if limit < 1 => Err("Usage Limit must be at least 1".to_string()),
                _ => Ok(()),
            },
        ])
    }
}

impl CouponRequest {
    /// Normalises the code to upper case and expands dates to a UTC window.
    pub fn into_new_coupon(self, now: DateTime<Utc>) -> Result<NewCoupon, String> {
        self.validate()?;
        let until = parse_date("Valid Until", &self.valid_to)?;
        let valid_to = until
            .succ_opt()
            .map(day_start)
            .ok_or_else(|| "Valid Until is out of range".to_string())?
            - Duration::seconds(1);
        let valid_from = match self.valid_from.as_deref() {
            Some(d) => day_start(parse_date("Valid From", d)?),
            None => now,
        };
        if valid_from > valid_to {
            return Err("Valid From must not be after Valid Until".to_string());
        }
        Ok(NewCoupon {
            code: self.code.trim().to_uppercase(),
            discount_type: self.discount_type,
            value: self.value,
            valid_from,
            valid_to,
            active: self.active.unwrap_or(true),
            usage_limit: self.usage_limit.unwrap_or(100),
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CouponResponse {
    pub success: bool,
    pub message: Option<String>,
    pub coupon: Option<Coupon>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CouponListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub coupons: Vec<Coupon>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct DeleteCountResponse {
    pub success: bool,
    pub message: Option<String>,
    pub deleted: usize,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct SubscriberListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub subscribers: Vec<Subscriber>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UserListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub users: Vec<UserSummary>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct UserResponse {
    pub success: bool,
    pub message: Option<String>,
    pub user: Option<UserSummary>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct AdminUserUpdateRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl Validate for AdminUserUpdateRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Full Name", &self.name, 2, 100),
            validators::email(&self.email),
            match self.phone.as_deref() {
                Some(p) if !p.trim().is_empty() => validators::phone(p),
                _ => Ok(()),
            },
            validators::max_length("Table Number", self.location.as_deref(), 100),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OrderWithCustomer {
    pub order: Order,
    pub customer_name: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct AdminOrderListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub orders: Vec<OrderWithCustomer>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct NotificationsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub services: i64,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
pub struct DateRangeQuery {
    /// `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`
    pub end_date: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardTotals {
    pub total_users: i64,
    pub total_orders: i64,
    pub total_foods: i64,
    pub pending_orders: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct DailySales {
    pub date: NaiveDate,
    pub label: String,
    pub total: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct StatusSlice {
    pub status: OrderStatus,
    pub label: String,
    pub color: String,
    pub count: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct DashboardResponse {
    pub success: bool,
    pub message: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: DashboardTotals,
    pub daily_sales: Vec<DailySales>,
    pub status_distribution: Vec<StatusSlice>,
    pub recent_orders: Vec<OrderWithCustomer>,
}
