use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::UserPrincipal;
use crate::config::PricingConfig;
use crate::db::{CartOperations, FoodOperations, RepositoryError};
use crate::enums::users::{AddToCartRequest, CartLine, CartResponse, UpdateCartRequest};
use crate::services::pricing::{compute_totals, subtotal};
use crate::traits::Validate;
use actix_web::{get, post, web, HttpResponse, Responder};

fn cart_response(lines: Vec<CartLine>, pricing: &PricingConfig, message: Option<String>) -> CartResponse {
    let totals = compute_totals(
        subtotal(lines.iter().map(|l| (l.price, l.quantity))),
        pricing,
        None,
    );
    CartResponse {
        success: true,
        message,
        cart_count: lines.len() as i64,
        items: lines,
        subtotal: totals.subtotal,
        delivery_charge: totals.delivery_charge,
        total: totals.total,
        recommended_foods: None,
    }
}

async fn load_cart(ops: &web::Data<CartOperations>, uid: i32) -> Result<Vec<CartLine>, RepositoryError> {
    let ops = ops.clone().into_inner();
    blocking(move || ops.get_cart(uid)).await
}

#[utoipa::path(
    tag = "Cart",
    responses(
        (status = 200, description = "Cart lines with totals and a few available foods to add", body = CartResponse)
    ),
    summary = "View the cart"
)]
#[get("")]
pub(super) async fn view_cart(
    user: UserPrincipal,
    cart_ops: web::Data<CartOperations>,
    food_ops: web::Data<FoodOperations>,
    pricing: web::Data<PricingConfig>,
) -> impl Responder {
    let lines = match load_cart(&cart_ops, user.user_id()).await {
        Ok(lines) => lines,
        Err(e) => return error_response("CART: view_cart()", &e),
    };
    let ops = food_ops.into_inner();
    match blocking(move || ops.get_recommended_foods()).await {
        Ok(foods) => {
            let mut resp = cart_response(lines, &pricing, None);
            resp.recommended_foods = Some(foods);
            HttpResponse::Ok().json(resp)
        }
        Err(e) => error_response("CART: view_cart()", &e),
    }
}

#[utoipa::path(
    tag = "Cart",
    params(
        ("food_id", description = "Food to add"),
    ),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Food added or merged into the cart", body = CartResponse),
        (status = 400, description = "Food not available or bad quantity"),
        (status = 404, description = "No such food")
    ),
    summary = "Add a food to the cart"
)]
#[post("/add/{food_id}")]
pub(super) async fn add_to_cart(
    user: UserPrincipal,
    cart_ops: web::Data<CartOperations>,
    pricing: web::Data<PricingConfig>,
    path: web::Path<(i32,)>,
    req_data: Option<web::Json<AddToCartRequest>>,
) -> impl Responder {
    let req = req_data.map(|j| j.into_inner()).unwrap_or_default();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let (uid, fid) = (user.user_id(), path.into_inner().0);
    let qty = req.quantity.unwrap_or(1);
    let ops = cart_ops.clone().into_inner();
    let added = blocking(move || ops.add_to_cart(uid, fid, qty, req.special_instructions)).await;

    let food = match added {
        Ok((food, _)) => food,
        Err(e) => return error_response("CART: add_to_cart()", &e),
    };
    match load_cart(&cart_ops, uid).await {
        Ok(lines) => HttpResponse::Ok().json(cart_response(
            lines,
            &pricing,
            Some(format!("{} added to cart!", food.name)),
        )),
        Err(e) => error_response("CART: add_to_cart()", &e),
    }
}

#[utoipa::path(
    tag = "Cart",
    params(
        ("cart_id", description = "Cart line to change"),
    ),
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Quantity changed, or line removed when below 1", body = CartResponse),
        (status = 400, description = "Quantity above the per-line limit"),
        (status = 403, description = "Line belongs to another user"),
        (status = 404, description = "No such cart line")
    ),
    summary = "Change a cart line quantity"
)]
#[post("/update/{cart_id}")]
pub(super) async fn update_cart(
    user: UserPrincipal,
    cart_ops: web::Data<CartOperations>,
    pricing: web::Data<PricingConfig>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateCartRequest>,
) -> impl Responder {
    if let Err(msg) = req_data.validate() {
        return validation_response(msg);
    }
    let (uid, cid, qty) = (user.user_id(), path.into_inner().0, req_data.quantity);
    let ops = cart_ops.clone().into_inner();
    let message = match blocking(move || ops.update_quantity(uid, cid, qty)).await {
        Ok(msg) => msg,
        Err(e) => return error_response("CART: update_cart()", &e),
    };
    match load_cart(&cart_ops, uid).await {
        Ok(lines) => {
            HttpResponse::Ok().json(cart_response(lines, &pricing, Some(message.to_string())))
        }
        Err(e) => error_response("CART: update_cart()", &e),
    }
}

#[utoipa::path(
    tag = "Cart",
    params(
        ("cart_id", description = "Cart line to remove"),
    ),
    responses(
        (status = 200, description = "Line removed", body = CartResponse),
        (status = 403, description = "Line belongs to another user"),
        (status = 404, description = "No such cart line")
    ),
    summary = "Remove a cart line"
)]
#[post("/remove/{cart_id}")]
pub(super) async fn remove_from_cart(
    user: UserPrincipal,
    cart_ops: web::Data<CartOperations>,
    pricing: web::Data<PricingConfig>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let (uid, cid) = (user.user_id(), path.into_inner().0);
    let ops = cart_ops.clone().into_inner();
    if let Err(e) = blocking(move || ops.remove_item(uid, cid)).await {
        return error_response("CART: remove_from_cart()", &e);
    }
    match load_cart(&cart_ops, uid).await {
        Ok(lines) => HttpResponse::Ok().json(cart_response(
            lines,
            &pricing,
            Some("Item removed from cart".to_string()),
        )),
        Err(e) => error_response("CART: remove_from_cart()", &e),
    }
}
