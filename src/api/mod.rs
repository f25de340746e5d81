pub mod admin;
mod common;
mod errors;
pub mod users;

use crate::AppState;
use actix_web::guard::{Guard, GuardContext};
use actix_web::http::header;
use actix_web::{get, web, HttpResponse, Responder};
pub(crate) use errors::default_error_handler;
use utoipa::OpenApi;
use utoipa_actix_web::service_config::ServiceConfig;

/// Matches `application/json`, with or without parameters such as a charset.
pub struct ContentTypeHeader;

impl Guard for ContentTypeHeader {
    fn check(&self, ctx: &GuardContext<'_>) -> bool {
        ctx.head()
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    }
}

#[derive(OpenApi)]
#[openapi(info(
    title = "Tableside API",
    description = "In-venue ordering, table service requests and the staff back office."
))]
pub struct ApiDoc;

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Server is running", body = String))
)]
#[get("/")]
async fn root_endpoint() -> impl Responder {
    HttpResponse::Ok().body("Server up!")
}

#[utoipa::path(
    tag = "Health",
    responses((status = 200, description = "Liveness check", body = String))
)]
#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(default_error_handler)
}

async fn openapi_json(api: web::Data<utoipa::openapi::OpenApi>) -> impl Responder {
    HttpResponse::Ok().json(api.get_ref())
}

/// Serves the document collected from the `#[utoipa::path]` handlers.
pub fn openapi_resource(api: utoipa::openapi::OpenApi) -> actix_web::Resource {
    web::resource("/api-docs/openapi.json")
        .app_data(web::Data::new(api))
        .route(web::get().to(openapi_json))
}

pub fn configure(cfg: &mut ServiceConfig, state: &AppState) {
    cfg.service(root_endpoint)
        .service(health)
        .configure(|cfg| {
            common::config(cfg, &state.food_ops, &state.coupon_ops, &state.newsletter_ops)
        })
        .configure(|cfg| {
            users::config(
                cfg,
                users::UserScopes {
                    user_ops: &state.user_ops,
                    cart_ops: &state.cart_ops,
                    food_ops: &state.food_ops,
                    order_ops: &state.order_ops,
                    service_ops: &state.service_ops,
                    session: &state.session,
                    pricing: state.pricing,
                },
            )
        })
        .configure(|cfg| {
            admin::config(
                cfg,
                admin::AdminScopes {
                    food_ops: &state.food_ops,
                    order_ops: &state.order_ops,
                    user_ops: &state.user_ops,
                    coupon_ops: &state.coupon_ops,
                    service_ops: &state.service_ops,
                    newsletter_ops: &state.newsletter_ops,
                    analytics_ops: &state.analytics_ops,
                },
            )
        });
}
