mod account;
mod cart;
mod orders;
mod services;

use crate::auth::SessionConfig;
use crate::config::PricingConfig;
use crate::db::{
    CartOperations, FoodOperations, OrderOperations, ServiceOperations, UserOperations,
};
use account::*;
use actix_web::middleware::NormalizePath;
use actix_web::web;
use cart::*;
use orders::*;
use services::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

pub struct UserScopes<'a> {
    pub user_ops: &'a UserOperations,
    pub cart_ops: &'a CartOperations,
    pub food_ops: &'a FoodOperations,
    pub order_ops: &'a OrderOperations,
    pub service_ops: &'a ServiceOperations,
    pub session: &'a SessionConfig,
    pub pricing: PricingConfig,
}

/// Mixed scopes leave body checks to the JSON extractor; a scope-level
/// content-type guard would hide the body-less routes that share the prefix.
pub fn config(cfg: &mut ServiceConfig, ctx: UserScopes<'_>) {
    cfg.service(
        scope::scope("/auth")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.user_ops.clone()))
            .app_data(web::Data::new(ctx.session.clone()))
            .service(register)
            .service(login)
            .service(logout),
    )
    .service(
        scope::scope("/users")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.user_ops.clone()))
            .service(get_profile)
            .service(update_profile),
    )
    .service(
        scope::scope("/cart")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.cart_ops.clone()))
            .app_data(web::Data::new(ctx.food_ops.clone()))
            .app_data(web::Data::new(ctx.pricing))
            .service(view_cart)
            .service(add_to_cart)
            .service(update_cart)
            .service(remove_from_cart),
    )
    .service(
        scope::scope("/orders")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.order_ops.clone()))
            .app_data(web::Data::new(ctx.pricing))
            .service(checkout)
            .service(my_orders)
            .service(order_details)
            .service(cancel_order),
    )
    .service(
        scope::scope("/services")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.service_ops.clone()))
            .service(my_requests)
            .service(create_request),
    );
}
