use crate::api::ContentTypeHeader;
use crate::db::{CouponOperations, FoodOperations, NewsletterOperations};
use actix_web::middleware::NormalizePath;
use actix_web::web;
use menu::*;
use newsletter::*;
use utoipa_actix_web::scope;
use utoipa_actix_web::service_config::ServiceConfig;

mod menu;
mod newsletter;

pub(super) fn config(
    cfg: &mut ServiceConfig,
    food_ops: &FoodOperations,
    coupon_ops: &CouponOperations,
    newsletter_ops: &NewsletterOperations,
) {
    cfg.service(
        scope::scope("/home")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(food_ops.clone()))
            .app_data(web::Data::new(coupon_ops.clone()))
            .service(home),
    )
    .service(
        scope::scope("/menu")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(food_ops.clone()))
            .service(browse_menu)
            .service(get_categories)
            .service(food_details),
    )
    .service(
        scope::scope("/api")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(food_ops.clone()))
            .service(api_foods)
            .service(api_search),
    )
    .service(
        scope::scope("/subscribe")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(newsletter_ops.clone()))
            .guard(ContentTypeHeader)
            .service(subscribe),
    );
}
