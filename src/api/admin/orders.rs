use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::AdminPrincipal;
use crate::db::OrderOperations;
use crate::enums::admin::AdminOrderListResponse;
use crate::enums::common::{
    GeneralResponse, KdsResponse, OrderDetailsResponse, StatusFilterQuery, StatusUpdateRequest,
};
use crate::models::common::OrderStatus;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Admin",
    params(StatusFilterQuery),
    responses(
        (status = 200, description = "Orders with customer names, newest first", body = AdminOrderListResponse)
    ),
    summary = "List orders"
)]
#[get("")]
pub(super) async fn list_orders(
    _admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
    query: web::Query<StatusFilterQuery>,
) -> impl Responder {
    let StatusFilterQuery { status, q } = query.into_inner();
    // `all` and unrecognised values both list everything.
    let status = status.as_deref().and_then(OrderStatus::parse);
    let q = q.filter(|s| !s.trim().is_empty());

    let ops = order_ops.into_inner();
    match blocking(move || ops.list_orders(status, q.as_deref())).await {
        Ok(orders) => HttpResponse::Ok().json(AdminOrderListResponse {
            success: true,
            message: None,
            orders,
        }),
        Err(e) => error_response("ADMIN: list_orders()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Order to print"),
    ),
    responses(
        (status = 200, description = "Order, customer and lines", body = OrderDetailsResponse),
        (status = 404, description = "No such order")
    ),
    summary = "Receipt data for an order"
)]
#[get("/{id}/receipt")]
pub(super) async fn order_receipt(
    admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let ops = order_ops.into_inner();
    match blocking(move || ops.get_order_details(id, admin.user_id, true)).await {
        Ok(details) => HttpResponse::Ok().json(OrderDetailsResponse {
            success: true,
            message: None,
            details: Some(details),
        }),
        Err(e) => error_response("ADMIN: order_receipt()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Order to move"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status changed", body = GeneralResponse),
        (status = 400, description = "Unknown status or forbidden transition", body = GeneralResponse),
        (status = 404, description = "No such order")
    ),
    summary = "Advance an order through the kitchen"
)]
#[post("/{id}/status")]
pub(super) async fn update_order_status(
    admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<StatusUpdateRequest>,
) -> impl Responder {
    let Some(next) = OrderStatus::parse(req_data.status.trim()) else {
        return validation_response(format!("Unknown order status '{}'", req_data.status));
    };

    let id = path.into_inner().0;
    let ops = order_ops.into_inner();
    match blocking(move || ops.update_status(id, next)).await {
        Ok(order) => {
            info!(
                "update_order_status: admin {} moved {} to {}",
                admin.user_id,
                order.order_number,
                next.as_str()
            );
            HttpResponse::Ok().json(GeneralResponse::ok(format!(
                "Order status updated to {}",
                next.label()
            )))
        }
        Err(e) => error_response("ADMIN: update_order_status()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Open orders for the kitchen display, oldest first", body = KdsResponse)
    ),
    summary = "Kitchen display feed"
)]
#[get("/orders")]
pub(super) async fn kds_orders(
    _admin: AdminPrincipal,
    order_ops: web::Data<OrderOperations>,
) -> impl Responder {
    let ops = order_ops.into_inner();
    match blocking(move || ops.get_kds_orders()).await {
        Ok(orders) => HttpResponse::Ok().json(KdsResponse {
            success: true,
            message: None,
            orders,
        }),
        Err(e) => error_response("ADMIN: kds_orders()", &e),
    }
}
