use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::UserPrincipal;
use crate::db::ServiceOperations;
use crate::enums::common::{GeneralResponse, ServiceRequestBody};
use crate::enums::users::{MyServicesResponse, ServiceCreatedResponse};
use crate::models::common::ServiceType;
use crate::traits::Validate;
use actix_web::{get, post, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Services",
    responses(
        (status = 200, description = "The caller's service requests, newest first", body = MyServicesResponse)
    ),
    summary = "My service requests"
)]
#[get("")]
pub(super) async fn my_requests(
    user: UserPrincipal,
    service_ops: web::Data<ServiceOperations>,
) -> impl Responder {
    let uid = user.user_id();
    let ops = service_ops.into_inner();
    match blocking(move || ops.get_user_requests(uid)).await {
        Ok(requests) => HttpResponse::Ok().json(MyServicesResponse {
            success: true,
            message: None,
            requests,
        }),
        Err(e) => error_response("SERVICES: my_requests()", &e),
    }
}

#[utoipa::path(
    tag = "Services",
    request_body = ServiceRequestBody,
    responses(
        (status = 200, description = "Request submitted", body = ServiceCreatedResponse),
        (status = 400, description = "Unknown service type or details too long", body = GeneralResponse)
    ),
    summary = "Call staff to the table"
)]
#[post("")]
pub(super) async fn create_request(
    user: UserPrincipal,
    service_ops: web::Data<ServiceOperations>,
    req_data: web::Json<ServiceRequestBody>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }
    let Some(kind) = ServiceType::parse(&req.service_type) else {
        return validation_response("Invalid service type".to_string());
    };

    let uid = user.user_id();
    let ops = service_ops.into_inner();
    match blocking(move || ops.create_request(uid, kind, req.description)).await {
        Ok(request) => {
            info!(
                "create_request: user {} asked for {}",
                uid, req.service_type
            );
            HttpResponse::Ok().json(ServiceCreatedResponse {
                success: true,
                message: Some(
                    "Service request submitted successfully! Our staff will attend to you shortly."
                        .to_string(),
                ),
                request: Some(request),
            })
        }
        Err(e) => error_response("SERVICES: create_request()", &e),
    }
}
