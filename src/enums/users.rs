use crate::models::admin::Food;
use crate::models::common::{Order, PaymentMethod, ServiceRequest};
use crate::models::user::{UserSummary, MAX_INSTRUCTIONS_LEN, MAX_LINE_QUANTITY};
use crate::traits::{first_error, Validate};
use crate::validators;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Full Name", &self.name, 2, 100),
            validators::email(&self.email),
            validators::phone(&self.phone),
            validators::required_length("Password", &self.password, 6, 50),
            if self.password == self.confirm_password {
                Ok(())
            } else {
                Err("Passwords must match".to_string())
            },
        ])
    }
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::email(&self.email),
            validators::required("Password", &self.password),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct LoginResponse {
    pub success: bool,
    pub message: Option<String>,
    pub token: Option<String>,
    /// `/admin` for administrators, `/` otherwise
    pub redirect: Option<String>,
    pub user: Option<UserSummary>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub phone: String,
    pub location: Option<String>,
}

impl Validate for ProfileUpdateRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Full Name", &self.name, 2, 100),
            validators::phone(&self.phone),
            validators::max_length("Table Number", self.location.as_deref(), 50),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Copy, PartialEq)]
pub struct ProfileStats {
    pub total_orders: i64,
    pub total_spent: f64,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ProfileResponse {
    pub success: bool,
    pub message: Option<String>,
    pub user: Option<UserSummary>,
    pub stats: ProfileStats,
    pub orders: Vec<Order>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone, Default)]
pub struct AddToCartRequest {
    pub quantity: Option<i32>,
    pub special_instructions: Option<String>,
}

impl Validate for AddToCartRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            match self.quantity {
                Some(q) if q < 1 => Err("Quantity must be at least 1".to_string()),
                Some(q) if q > MAX_LINE_QUANTITY => Err(format!(
                    "Quantity cannot be more than {MAX_LINE_QUANTITY}"
                )),
                _ => Ok(()),
            },
            validators::max_length(
                "Special instructions",
                self.special_instructions.as_deref(),
                MAX_INSTRUCTIONS_LEN,
            ),
        ])
    }
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct UpdateCartRequest {
    /// Below 1 removes the line
    pub quantity: i32,
}

impl Validate for UpdateCartRequest {
    fn validate(&self) -> Result<(), String> {
        if self.quantity > MAX_LINE_QUANTITY {
            return Err(format!("Quantity cannot be more than {MAX_LINE_QUANTITY}"));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct CartLine {
    pub cart_id: i32,
    pub food_id: i32,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub quantity: i32,
    pub line_total: f64,
    pub special_instructions: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CartResponse {
    pub success: bool,
    pub message: Option<String>,
    pub items: Vec<CartLine>,
    pub subtotal: f64,
    pub delivery_charge: f64,
    pub total: f64,
    pub cart_count: i64,
    /// Only filled in on the cart view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_foods: Option<Vec<Food>>,
}

#[derive(Deserialize, Serialize, ToSchema, Debug, Clone)]
pub struct CheckoutRequest {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub payment_method: PaymentMethod,
    pub special_instructions: Option<String>,
    pub coupon_code: Option<String>,
}

impl Validate for CheckoutRequest {
    fn validate(&self) -> Result<(), String> {
        first_error([
            validators::required_length("Full Name", &self.name, 2, 100),
            validators::phone(&self.phone),
            validators::required_length("Table Number", &self.location, 1, 50),
            validators::max_length(
                "Special Instructions",
                self.special_instructions.as_deref(),
                500,
            ),
        ])
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct CheckoutResponse {
    pub success: bool,
    pub message: Option<String>,
    pub order_id: Option<i32>,
    pub order_number: Option<String>,
    pub total_amount: Option<f64>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct MyServicesResponse {
    pub success: bool,
    pub message: Option<String>,
    pub requests: Vec<ServiceRequest>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ServiceCreatedResponse {
    pub success: bool,
    pub message: Option<String>,
    pub request: Option<ServiceRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register() -> RegisterRequest {
        RegisterRequest {
            name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9876543210".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn register_accepts_valid_body() {
        assert!(register().validate().is_ok());
    }

    #[test]
    fn register_reports_first_failure() {
        let mut req = register();
        req.name = "A".to_string();
        req.password = "x".to_string();
        assert_eq!(
            req.validate().unwrap_err(),
            "Full Name must be between 2 and 100 characters long"
        );

        let mut req = register();
        req.confirm_password = "secret2".to_string();
        assert_eq!(req.validate().unwrap_err(), "Passwords must match");
    }

    #[test]
    fn add_to_cart_rejects_zero_quantity() {
        let req = AddToCartRequest {
            quantity: Some(0),
            special_instructions: None,
        };
        assert!(req.validate().is_err());
        assert!(AddToCartRequest::default().validate().is_ok());
    }

    #[test]
    fn cart_quantities_are_capped() {
        let req = AddToCartRequest {
            quantity: Some(MAX_LINE_QUANTITY + 1),
            special_instructions: None,
        };
        assert_eq!(req.validate().unwrap_err(), "Quantity cannot be more than 99");

        let update = UpdateCartRequest {
            quantity: i32::MAX,
        };
        assert!(update.validate().is_err());
        assert!(UpdateCartRequest { quantity: 0 }.validate().is_ok());
        assert!(UpdateCartRequest { quantity: 99 }.validate().is_ok());
    }

    #[test]
    fn checkout_requires_location() {
        let req = CheckoutRequest {
            name: "Asha Rao".to_string(),
            phone: "9876543210".to_string(),
            location: "".to_string(),
            payment_method: PaymentMethod::Cash,
            special_instructions: None,
            coupon_code: None,
        };
        assert_eq!(req.validate().unwrap_err(), "Table Number is required");
    }
}
