use crate::api::errors::{blocking, error_response};
use crate::db::{CouponOperations, FoodOperations};
use crate::enums::common::{
    CategoriesResponse, FoodDetailsResponse, HomeResponse, MenuQuery, MenuResponse, SearchQuery,
};
use crate::models::admin::Food;
use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;

#[utoipa::path(
    tag = "Menu",
    responses(
        (status = 200, description = "Featured foods, categories and the current offer", body = HomeResponse)
    ),
    summary = "Landing page data"
)]
#[get("")]
pub(super) async fn home(
    food_ops: web::Data<FoodOperations>,
    coupon_ops: web::Data<CouponOperations>,
) -> impl Responder {
    let foods = food_ops.into_inner();
    let coupons = coupon_ops.into_inner();
    let result = blocking(move || {
        Ok((
            foods.get_featured_foods()?,
            foods.get_categories()?,
            coupons.get_active_coupon(Utc::now())?,
        ))
    })
    .await;

    match result {
        Ok((featured_foods, categories, active_coupon)) => HttpResponse::Ok().json(HomeResponse {
            success: true,
            message: None,
            featured_foods,
            categories,
            active_coupon,
        }),
        Err(e) => error_response("MENU: home()", &e),
    }
}

#[utoipa::path(
    tag = "Menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Available foods matching the filters", body = MenuResponse)
    ),
    summary = "Browse the menu"
)]
#[get("")]
pub(super) async fn browse_menu(
    food_ops: web::Data<FoodOperations>,
    query: web::Query<MenuQuery>,
) -> impl Responder {
    let MenuQuery { category, search } = query.into_inner();
    let current_category = category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| "all".to_string());
    let search = search.unwrap_or_default();

    let ops = food_ops.into_inner();
    let (cat, term) = (current_category.clone(), search.clone());
    let result = blocking(move || {
        Ok((
            ops.get_available_foods(Some(&cat), Some(&term), None)?,
            ops.get_categories()?,
        ))
    })
    .await;

    match result {
        Ok((foods, categories)) => HttpResponse::Ok().json(MenuResponse {
            success: true,
            message: None,
            foods,
            categories,
            current_category,
            search,
        }),
        Err(e) => error_response("MENU: browse_menu()", &e),
    }
}

#[utoipa::path(
    tag = "Menu",
    responses(
        (status = 200, description = "Distinct food categories", body = CategoriesResponse)
    ),
    summary = "List menu categories"
)]
#[get("/categories")]
pub(super) async fn get_categories(food_ops: web::Data<FoodOperations>) -> impl Responder {
    let ops = food_ops.into_inner();
    match blocking(move || ops.get_categories()).await {
        Ok(categories) => HttpResponse::Ok().json(CategoriesResponse {
            success: true,
            message: None,
            categories,
        }),
        Err(e) => error_response("MENU: get_categories()", &e),
    }
}

#[utoipa::path(
    tag = "Menu",
    params(
        ("id", description = "Unique id of the food"),
    ),
    responses(
        (status = 200, description = "Food with related suggestions", body = FoodDetailsResponse),
        (status = 404, description = "No such food")
    ),
    summary = "Food details"
)]
#[get("/{id}")]
pub(super) async fn food_details(
    food_ops: web::Data<FoodOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let ops = food_ops.into_inner();
    let result = blocking(move || {
        let food = ops.get_food(id)?;
        let related = ops.get_related_foods(&food)?;
        Ok((food, related))
    })
    .await;

    match result {
        Ok((food, related_foods)) => HttpResponse::Ok().json(FoodDetailsResponse {
            success: true,
            message: None,
            food: Some(food),
            related_foods,
        }),
        Err(e) => error_response("MENU: food_details()", &e),
    }
}

#[utoipa::path(
    tag = "Menu",
    responses(
        (status = 200, description = "Every available food", body = Vec<Food>)
    ),
    summary = "Available foods as a plain list"
)]
#[get("/foods")]
pub(super) async fn api_foods(food_ops: web::Data<FoodOperations>) -> impl Responder {
    let ops = food_ops.into_inner();
    match blocking(move || ops.get_available_foods(None, None, None)).await {
        Ok(foods) => HttpResponse::Ok().json(foods),
        Err(e) => error_response("MENU: api_foods()", &e),
    }
}

#[utoipa::path(
    tag = "Menu",
    params(SearchQuery),
    responses(
        (status = 200, description = "Up to ten matches; empty for queries under two characters", body = Vec<Food>)
    ),
    summary = "Quick search over name and description"
)]
#[get("/search")]
pub(super) async fn api_search(
    food_ops: web::Data<FoodOperations>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let q = query.into_inner().q.unwrap_or_default();
    let ops = food_ops.into_inner();
    match blocking(move || ops.search_foods(&q)).await {
        Ok(foods) => HttpResponse::Ok().json(foods),
        Err(e) => error_response("MENU: api_search()", &e),
    }
}
