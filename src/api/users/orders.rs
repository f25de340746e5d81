use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::UserPrincipal;
use crate::config::PricingConfig;
use crate::db::OrderOperations;
use crate::enums::common::{GeneralResponse, OrderDetailsResponse, OrderListResponse};
use crate::enums::users::{CheckoutRequest, CheckoutResponse};
use crate::traits::Validate;
use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;

#[utoipa::path(
    tag = "Orders",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed and cart emptied", body = CheckoutResponse),
        (status = 400, description = "Empty cart, invalid form or unusable coupon", body = GeneralResponse)
    ),
    summary = "Place an order from the cart"
)]
#[post("/checkout")]
pub(super) async fn checkout(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
    pricing: web::Data<PricingConfig>,
    req_data: web::Json<CheckoutRequest>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let uid = user.user_id();
    let ops = order_ops.into_inner();
    let pricing = *pricing.get_ref();
    match blocking(move || ops.checkout(uid, &req, &pricing, Utc::now())).await {
        Ok(order) => {
            info!(
                "checkout: {} placed {} for {:.2}",
                user.name(),
                order.order_number,
                order.total_amount
            );
            HttpResponse::Ok().json(CheckoutResponse {
                success: true,
                message: Some("Order placed successfully!".to_string()),
                order_id: Some(order.order_id),
                order_number: Some(order.order_number),
                total_amount: Some(order.total_amount),
            })
        }
        Err(e) => error_response("ORDERS: checkout()", &e),
    }
}

#[utoipa::path(
    tag = "Orders",
    responses(
        (status = 200, description = "The caller's orders, newest first", body = OrderListResponse)
    ),
    summary = "My orders"
)]
#[get("")]
pub(super) async fn my_orders(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
) -> impl Responder {
    let uid = user.user_id();
    let ops = order_ops.into_inner();
    match blocking(move || ops.get_user_orders(uid)).await {
        Ok(orders) => HttpResponse::Ok().json(OrderListResponse {
            success: true,
            message: None,
            orders,
        }),
        Err(e) => error_response("ORDERS: my_orders()", &e),
    }
}

#[utoipa::path(
    tag = "Orders",
    params(
        ("id", description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order with its lines", body = OrderDetailsResponse),
        (status = 403, description = "Order belongs to someone else"),
        (status = 404, description = "No such order")
    ),
    summary = "Order details"
)]
#[get("/{id}")]
pub(super) async fn order_details(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let (id, uid, is_admin) = (path.into_inner().0, user.user_id(), user.is_admin());
    let ops = order_ops.into_inner();
    match blocking(move || ops.get_order_details(id, uid, is_admin)).await {
        Ok(details) => HttpResponse::Ok().json(OrderDetailsResponse {
            success: true,
            message: None,
            details: Some(details),
        }),
        Err(e) => error_response("ORDERS: order_details()", &e),
    }
}

#[utoipa::path(
    tag = "Orders",
    params(
        ("id", description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order cancelled", body = GeneralResponse),
        (status = 400, description = "Order is past the cancellable stage", body = GeneralResponse),
        (status = 403, description = "Order belongs to someone else"),
        (status = 404, description = "No such order")
    ),
    summary = "Cancel one of my orders"
)]
#[post("/{id}/cancel")]
pub(super) async fn cancel_order(
    user: UserPrincipal,
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let (id, uid) = (path.into_inner().0, user.user_id());
    let ops = order_ops.into_inner();
    match blocking(move || ops.cancel_order(uid, id)).await {
        Ok(order) => {
            info!("cancel_order: {} cancelled by user {}", order.order_number, uid);
            HttpResponse::Ok().json(GeneralResponse::ok("Order cancelled successfully"))
        }
        Err(e) => error_response("ORDERS: cancel_order()", &e),
    }
}
