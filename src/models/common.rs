use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::OrderStatus"]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Fixed display order used by the dashboard distribution.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "confirmed" => Some(OrderStatus::Confirmed),
            "preparing" => Some(OrderStatus::Preparing),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "#0d6efd",
            OrderStatus::Confirmed => "#0dcaf0",
            OrderStatus::Preparing => "#ffc107",
            OrderStatus::Delivered => "#198754",
            OrderStatus::Cancelled => "#dc3545",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Preparing => 2,
            OrderStatus::Delivered => 3,
            OrderStatus::Cancelled => 4,
        }
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Statuses only move forward along pending -> confirmed -> preparing -> delivered.
    /// Cancellation is reachable from pending and confirmed only; delivered and
    /// cancelled are terminal. Re-applying the current status is accepted.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }
        match next {
            OrderStatus::Cancelled => self.is_cancellable(),
            _ => {
                !matches!(self, OrderStatus::Cancelled | OrderStatus::Delivered)
                    && next.rank() > self.rank()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::PaymentMethod"]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    RoomCharge,
    Cash,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::RoomCharge => "room_charge",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::ServiceType"]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Cleaning,
    Water,
    Cutlery,
    Condiments,
    Manager,
    Other,
}

impl ServiceType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cleaning" => Some(ServiceType::Cleaning),
            "water" => Some(ServiceType::Water),
            "cutlery" => Some(ServiceType::Cutlery),
            "condiments" => Some(ServiceType::Condiments),
            "manager" => Some(ServiceType::Manager),
            "other" => Some(ServiceType::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::db::schema::sql_types::ServiceStatus"]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ServiceStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(ServiceStatus::Pending),
            "in_progress" => Some(ServiceStatus::InProgress),
            "completed" => Some(ServiceStatus::Completed),
            "cancelled" => Some(ServiceStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub order_id: i32,
    pub order_number: String,
    pub user_id: i32,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub coupon_code: Option<String>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: String,
    pub location: String,
    pub phone: String,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub order_number: String,
    pub user_id: i32,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub discount_amount: f64,
    pub total_amount: f64,
    pub coupon_code: Option<String>,
    pub payment_method: PaymentMethod,
    pub location: String,
    pub phone: String,
    pub special_instructions: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
#[diesel(primary_key(order_item_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub order_item_id: i32,
    pub order_id: i32,
    pub food_id: i32,
    pub quantity: i32,
    pub price: f64,
    pub special_instructions: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub food_id: i32,
    pub quantity: i32,
    pub price: f64,
    pub special_instructions: Option<String>,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::service_requests)]
#[diesel(primary_key(request_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceRequest {
    pub request_id: i32,
    pub user_id: i32,
    pub service_type: ServiceType,
    pub description: Option<String>,
    pub status: ServiceStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::service_requests)]
pub struct NewServiceRequest {
    pub user_id: i32,
    pub service_type: ServiceType,
    pub description: Option<String>,
}
