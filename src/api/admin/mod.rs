use crate::db::{
    AnalyticsOperations, CouponOperations, FoodOperations, NewsletterOperations, OrderOperations,
    ServiceOperations, UserOperations,
};
use actix_web::middleware::NormalizePath;
use actix_web::web;
use coupons::*;
use dashboard::*;
use foods::*;
use newsletter::*;
use orders::*;
use services::*;
use users::*;
use utoipa_actix_web::{scope, service_config::ServiceConfig};

mod coupons;
mod dashboard;
mod foods;
mod newsletter;
mod orders;
mod services;
mod users;

pub struct AdminScopes<'a> {
    pub food_ops: &'a FoodOperations,
    pub order_ops: &'a OrderOperations,
    pub user_ops: &'a UserOperations,
    pub coupon_ops: &'a CouponOperations,
    pub service_ops: &'a ServiceOperations,
    pub newsletter_ops: &'a NewsletterOperations,
    pub analytics_ops: &'a AnalyticsOperations,
}

pub fn config(cfg: &mut ServiceConfig, ctx: AdminScopes<'_>) {
    cfg.service(
        scope::scope("/admin")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(ctx.food_ops.clone()))
            .app_data(web::Data::new(ctx.order_ops.clone()))
            .app_data(web::Data::new(ctx.user_ops.clone()))
            .app_data(web::Data::new(ctx.coupon_ops.clone()))
            .app_data(web::Data::new(ctx.service_ops.clone()))
            .app_data(web::Data::new(ctx.newsletter_ops.clone()))
            .app_data(web::Data::new(ctx.analytics_ops.clone()))
            .service(
                scope::scope("/foods")
                    .service(list_foods)
                    .service(add_food)
                    .service(edit_food)
                    .service(delete_food),
            )
            .service(
                scope::scope("/orders")
                    .service(list_orders)
                    .service(order_receipt)
                    .service(update_order_status),
            )
            .service(scope::scope("/kds").service(kds_orders))
            .service(
                scope::scope("/users")
                    .service(list_users)
                    .service(edit_user)
                    .service(delete_user),
            )
            .service(
                scope::scope("/coupons")
                    .service(list_coupons)
                    .service(add_coupon)
                    .service(delete_expired_coupons)
                    .service(delete_coupon),
            )
            .service(
                scope::scope("/services")
                    .service(list_requests)
                    .service(update_request_status),
            )
            .service(
                scope::scope("/newsletter")
                    .service(list_subscribers)
                    .service(export_subscribers)
                    .service(delete_subscriber),
            )
            .service(view_dashboard)
            .service(export_sales)
            .service(notifications),
    );
}
