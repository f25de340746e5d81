use crate::models::admin::{Coupon, Food};
use crate::models::common::{Order, OrderStatus, ServiceStatus, ServiceType};
use crate::traits::{first_error, Validate};
use crate::validators;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct GeneralResponse {
    pub success: bool,
    pub message: Option<String>,
}

impl GeneralResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct HomeResponse {
    pub success: bool,
    pub message: Option<String>,
    pub featured_foods: Vec<Food>,
    pub categories: Vec<String>,
    pub active_coupon: Option<Coupon>,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
pub struct MenuQuery {
    /// Category name, or `all`
    pub category: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MenuResponse {
    pub success: bool,
    pub message: Option<String>,
    pub foods: Vec<Food>,
    pub categories: Vec<String>,
    pub current_category: String,
    pub search: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CategoriesResponse {
    pub success: bool,
    pub message: Option<String>,
    pub categories: Vec<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct FoodDetailsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub food: Option<Food>,
    pub related_foods: Vec<Food>,
}

#[derive(Deserialize, IntoParams, Debug)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// An order line with the food name resolved.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OrderLine {
    pub order_item_id: i32,
    pub food_id: i32,
    pub food_name: String,
    pub quantity: i32,
    pub price: f64,
    pub line_total: f64,
    pub special_instructions: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct OrderDetails {
    pub order: Order,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderLine>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct OrderDetailsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub details: Option<OrderDetails>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct OrderListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub orders: Vec<Order>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct KdsItem {
    pub name: String,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct KdsOrder {
    pub id: i32,
    pub order_number: String,
    pub customer_name: String,
    pub location: String,
    pub status: OrderStatus,
    /// RFC 3339
    pub created_at: String,
    pub items: Vec<KdsItem>,
    pub special_instructions: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct KdsResponse {
    pub success: bool,
    pub message: Option<String>,
    pub orders: Vec<KdsOrder>,
}

/// Body for both order and service-request status changes.
#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Deserialize, IntoParams, Debug, Default)]
pub struct StatusFilterQuery {
    /// A status value, or `all`
    pub status: Option<String>,
    /// Substring search (order number or name/email depending on the list)
    pub q: Option<String>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct ServiceRequestBody {
    pub service_type: String,
    pub description: Option<String>,
}

impl Validate for ServiceRequestBody {
    fn validate(&self) -> Result<(), String> {
        first_error([
            ServiceType::parse(&self.service_type)
                .map(|_| ())
                .ok_or_else(|| "Invalid service type".to_string()),
            validators::max_length("Details", self.description.as_deref(), 500),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
pub struct ServiceRequestView {
    pub request_id: i32,
    pub user_id: i32,
    pub user_name: String,
    pub location: Option<String>,
    pub service_type: ServiceType,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ServiceListResponse {
    pub success: bool,
    pub message: Option<String>,
    pub requests: Vec<ServiceRequestView>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Default)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}
