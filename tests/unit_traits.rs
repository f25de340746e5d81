use tableside::enums::admin::AdminUserUpdateRequest;
use tableside::enums::users::{CheckoutRequest, LoginRequest, RegisterRequest};
use tableside::models::admin::NewFood;
use tableside::models::common::PaymentMethod;
use tableside::traits::{first_error, Validate};

fn register() -> RegisterRequest {
    RegisterRequest {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        password: "hunter22".to_string(),
        confirm_password: "hunter22".to_string(),
    }
}

#[test]
fn first_error_reports_the_earliest_failure() {
    let result = first_error([
        Ok(()),
        Err("first".to_string()),
        Err("second".to_string()),
    ]);
    assert_eq!(result.unwrap_err(), "first");
    assert!(first_error(Vec::new()).is_ok());
}

#[test]
fn register_request_checks_fields_in_form_order() {
    assert!(register().validate().is_ok());

    let mut req = register();
    req.name = "A".to_string();
    req.password = "x".to_string();
    assert_eq!(
        req.validate().unwrap_err(),
        "Full Name must be between 2 and 100 characters long"
    );

    let mut req = register();
    req.phone = "12345".to_string();
    assert_eq!(
        req.validate().unwrap_err(),
        "Phone Number must be between 10 and 15 characters long"
    );
}

#[test]
fn login_request_needs_both_fields() {
    let req = LoginRequest {
        email: "asha@example.com".to_string(),
        password: "  ".to_string(),
    };
    assert_eq!(req.validate().unwrap_err(), "Password is required");
}

#[test]
fn checkout_request_needs_a_table() {
    let req = CheckoutRequest {
        name: "Asha Rao".to_string(),
        phone: "9876543210".to_string(),
        location: String::new(),
        payment_method: PaymentMethod::RoomCharge,
        special_instructions: None,
        coupon_code: None,
    };
    assert_eq!(req.validate().unwrap_err(), "Table Number is required");
}

#[test]
fn admin_user_edit_allows_blank_phone() {
    let req = AdminUserUpdateRequest {
        name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: Some(String::new()),
        location: None,
        is_admin: false,
    };
    assert!(req.validate().is_ok());
}

#[test]
fn new_food_rejects_negative_price() {
    let food = NewFood {
        name: "Lemon Soda".to_string(),
        category: "Drinks".to_string(),
        price: -5.0,
        description: Some("Fresh lime with soda".to_string()),
        image: "default-food.jpg".to_string(),
        is_available: true,
    };
    assert_eq!(food.validate().unwrap_err(), "Price must be at least 0");
}
