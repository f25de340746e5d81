use crate::api::errors::{blocking, error_response};
use crate::auth::AdminPrincipal;
use crate::db::{subscribers_csv, NewsletterOperations, RepositoryError};
use crate::enums::admin::SubscriberListResponse;
use crate::enums::common::GeneralResponse;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{delete, get, web, HttpResponse, Responder};

pub(super) fn csv_attachment(filename: String, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(filename)],
        })
        .body(body)
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Subscribers, newest first", body = SubscriberListResponse)
    ),
    summary = "List newsletter subscribers"
)]
#[get("")]
pub(super) async fn list_subscribers(
    _admin: AdminPrincipal,
    newsletter_ops: web::Data<NewsletterOperations>,
) -> impl Responder {
    let ops = newsletter_ops.into_inner();
    match blocking(move || ops.get_all_subscribers()).await {
        Ok(subscribers) => HttpResponse::Ok().json(SubscriberListResponse {
            success: true,
            message: None,
            subscribers,
        }),
        Err(e) => error_response("ADMIN: list_subscribers()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Subscriber to remove"),
    ),
    responses(
        (status = 200, description = "Subscriber removed", body = GeneralResponse),
        (status = 404, description = "No such subscriber")
    ),
    summary = "Remove a subscriber"
)]
#[delete("/{id}")]
pub(super) async fn delete_subscriber(
    _admin: AdminPrincipal,
    newsletter_ops: web::Data<NewsletterOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let ops = newsletter_ops.into_inner();
    match blocking(move || ops.remove_subscriber(id)).await {
        Ok(_) => HttpResponse::Ok().json(GeneralResponse::ok("Subscriber removed successfully!")),
        Err(e) => error_response("ADMIN: delete_subscriber()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "`email,subscribed_at` CSV attachment", body = String, content_type = "text/csv")
    ),
    summary = "Export subscribers"
)]
#[get("/export")]
pub(super) async fn export_subscribers(
    _admin: AdminPrincipal,
    newsletter_ops: web::Data<NewsletterOperations>,
) -> impl Responder {
    let ops = newsletter_ops.into_inner();
    let result = blocking(move || {
        let subscribers = ops.get_all_subscribers()?;
        subscribers_csv(&subscribers).map_err(|e| RepositoryError::WorkerError(e.to_string()))
    })
    .await;

    match result {
        Ok(body) => csv_attachment("newsletter_subscribers.csv".to_string(), body),
        Err(e) => error_response("ADMIN: export_subscribers()", &e),
    }
}
