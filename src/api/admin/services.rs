use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::AdminPrincipal;
use crate::db::ServiceOperations;
use crate::enums::admin::NotificationsResponse;
use crate::enums::common::{
    GeneralResponse, ServiceListResponse, StatusFilterQuery, StatusUpdateRequest,
};
use crate::models::common::ServiceStatus;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Admin",
    params(StatusFilterQuery),
    responses(
        (status = 200, description = "Service requests with the guest's name and table", body = ServiceListResponse)
    ),
    summary = "List service requests"
)]
#[get("")]
pub(super) async fn list_requests(
    _admin: AdminPrincipal,
    service_ops: web::Data<ServiceOperations>,
    query: web::Query<StatusFilterQuery>,
) -> impl Responder {
    let status = query.into_inner().status;
    let status = status.as_deref().and_then(ServiceStatus::parse);
    let ops = service_ops.into_inner();
    match blocking(move || ops.list_requests(status)).await {
        Ok(requests) => HttpResponse::Ok().json(ServiceListResponse {
            success: true,
            message: None,
            requests,
        }),
        Err(e) => error_response("ADMIN: list_requests()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Service request to update"),
    ),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Status changed", body = GeneralResponse),
        (status = 400, description = "Unknown status", body = GeneralResponse),
        (status = 404, description = "No such request")
    ),
    summary = "Update a service request"
)]
#[post("/{id}/status")]
pub(super) async fn update_request_status(
    _admin: AdminPrincipal,
    service_ops: web::Data<ServiceOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<StatusUpdateRequest>,
) -> impl Responder {
    let Some(next) = ServiceStatus::parse(req_data.status.trim()) else {
        return validation_response(format!("Unknown service status '{}'", req_data.status));
    };

    let id = path.into_inner().0;
    let ops = service_ops.into_inner();
    match blocking(move || ops.update_status(id, next)).await {
        Ok(_) => HttpResponse::Ok().json(GeneralResponse::ok("Service request status updated")),
        Err(e) => error_response("ADMIN: update_request_status()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Pending service requests", body = NotificationsResponse)
    ),
    summary = "Notification badge counts"
)]
#[get("/notifications")]
pub(super) async fn notifications(
    _admin: AdminPrincipal,
    service_ops: web::Data<ServiceOperations>,
) -> impl Responder {
    let ops = service_ops.into_inner();
    match blocking(move || ops.pending_count()).await {
        Ok(services) => HttpResponse::Ok().json(NotificationsResponse {
            success: true,
            message: None,
            services,
        }),
        Err(e) => error_response("ADMIN: notifications()", &e),
    }
}
