use crate::api::errors::{blocking, error_response, validation_response};
use crate::db::NewsletterOperations;
use crate::enums::common::{GeneralResponse, SubscribeRequest};
use crate::validators;
use actix_web::{post, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Newsletter",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscribed", body = GeneralResponse),
        (status = 400, description = "Missing or invalid email", body = GeneralResponse),
        (status = 409, description = "Already subscribed", body = GeneralResponse)
    ),
    summary = "Subscribe to the newsletter"
)]
#[post("")]
pub(super) async fn subscribe(
    newsletter_ops: web::Data<NewsletterOperations>,
    req_data: web::Json<SubscribeRequest>,
) -> impl Responder {
    let email = req_data
        .into_inner()
        .email
        .map(|e| e.trim().to_lowercase())
        .unwrap_or_default();
    if email.is_empty() {
        return validation_response("Email is required".to_string());
    }
    if let Err(msg) = validators::email(&email) {
        return validation_response(msg);
    }

    let ops = newsletter_ops.into_inner();
    let addr = email.clone();
    match blocking(move || ops.subscribe(&addr)).await {
        Ok(_) => {
            info!("subscribe: new newsletter subscriber {}", email);
            HttpResponse::Ok().json(GeneralResponse::ok("Successfully subscribed!"))
        }
        Err(e) => error_response("NEWSLETTER: subscribe()", &e),
    }
}
