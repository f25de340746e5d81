use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::AdminPrincipal;
use crate::db::CouponOperations;
use crate::enums::admin::{CouponListResponse, CouponRequest, CouponResponse, DeleteCountResponse};
use crate::enums::common::GeneralResponse;
use crate::traits::Validate;
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use chrono::Utc;

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Every coupon, newest first", body = CouponListResponse)
    ),
    summary = "List coupons"
)]
#[get("")]
pub(super) async fn list_coupons(
    _admin: AdminPrincipal,
    coupon_ops: web::Data<CouponOperations>,
) -> impl Responder {
    let ops = coupon_ops.into_inner();
    match blocking(move || ops.get_all_coupons()).await {
        Ok(coupons) => HttpResponse::Ok().json(CouponListResponse {
            success: true,
            message: None,
            coupons,
        }),
        Err(e) => error_response("ADMIN: list_coupons()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    request_body = CouponRequest,
    responses(
        (status = 200, description = "Coupon created", body = CouponResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse),
        (status = 409, description = "Code already exists", body = GeneralResponse)
    ),
    summary = "Create a coupon"
)]
#[post("")]
pub(super) async fn add_coupon(
    _admin: AdminPrincipal,
    coupon_ops: web::Data<CouponOperations>,
    req_data: web::Json<CouponRequest>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }
    let coupon = match req.into_new_coupon(Utc::now()) {
        Ok(c) => c,
        Err(msg) => return validation_response(msg),
    };

    let ops = coupon_ops.into_inner();
    match blocking(move || ops.add_coupon(coupon)).await {
        Ok(coupon) => HttpResponse::Ok().json(CouponResponse {
            success: true,
            message: Some(format!("Coupon {} created successfully!", coupon.code)),
            coupon: Some(coupon),
        }),
        Err(e) => error_response("ADMIN: add_coupon()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Coupon to delete"),
    ),
    responses(
        (status = 200, description = "Coupon deleted", body = GeneralResponse),
        (status = 404, description = "No such coupon")
    ),
    summary = "Delete a coupon"
)]
#[delete("/{id}")]
pub(super) async fn delete_coupon(
    _admin: AdminPrincipal,
    coupon_ops: web::Data<CouponOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let ops = coupon_ops.into_inner();
    match blocking(move || ops.remove_coupon(id)).await {
        Ok(coupon) => HttpResponse::Ok().json(GeneralResponse::ok(format!(
            "Coupon {} deleted successfully!",
            coupon.code
        ))),
        Err(e) => error_response("ADMIN: delete_coupon()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Number of expired coupons removed", body = DeleteCountResponse)
    ),
    summary = "Purge expired coupons"
)]
#[post("/delete-expired")]
pub(super) async fn delete_expired_coupons(
    admin: AdminPrincipal,
    coupon_ops: web::Data<CouponOperations>,
) -> impl Responder {
    let ops = coupon_ops.into_inner();
    match blocking(move || ops.remove_expired(Utc::now())).await {
        Ok(deleted) => {
            info!("delete_expired_coupons: admin {} purged {}", admin.user_id, deleted);
            HttpResponse::Ok().json(DeleteCountResponse {
                success: true,
                message: Some(format!("Deleted {deleted} expired coupon(s)")),
                deleted,
            })
        }
        Err(e) => error_response("ADMIN: delete_expired_coupons()", &e),
    }
}
