use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::AdminPrincipal;
use crate::db::FoodOperations;
use crate::enums::admin::{FoodListResponse, FoodResponse};
use crate::enums::common::GeneralResponse;
use crate::models::admin::{NewFood, UpdateFood};
use crate::traits::Validate;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

#[utoipa::path(
    tag = "Admin",
    responses(
        (status = 200, description = "Every food, available or not", body = FoodListResponse),
        (status = 403, description = "Not an admin")
    ),
    summary = "List all foods"
)]
#[get("")]
pub(super) async fn list_foods(
    _admin: AdminPrincipal,
    food_ops: web::Data<FoodOperations>,
) -> impl Responder {
    let ops = food_ops.into_inner();
    match blocking(move || ops.get_all_foods()).await {
        Ok(foods) => HttpResponse::Ok().json(FoodListResponse {
            success: true,
            message: None,
            foods,
        }),
        Err(e) => error_response("ADMIN: list_foods()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    request_body = NewFood,
    responses(
        (status = 200, description = "Food created", body = FoodResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse)
    ),
    summary = "Add a food"
)]
#[post("")]
pub(super) async fn add_food(
    admin: AdminPrincipal,
    food_ops: web::Data<FoodOperations>,
    req_data: web::Json<NewFood>,
) -> impl Responder {
    let food = req_data.into_inner();
    if let Err(msg) = food.validate() {
        return validation_response(msg);
    }

    let ops = food_ops.into_inner();
    match blocking(move || ops.add_food(food)).await {
        Ok(food) => {
            info!("add_food: admin {} added '{}'", admin.user_id, food.name);
            HttpResponse::Ok().json(FoodResponse {
                success: true,
                message: Some("Food item added successfully!".to_string()),
                food: Some(food),
            })
        }
        Err(e) => error_response("ADMIN: add_food()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Food to edit"),
    ),
    request_body = UpdateFood,
    responses(
        (status = 200, description = "Food updated", body = FoodResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse),
        (status = 404, description = "No such food")
    ),
    summary = "Edit a food"
)]
#[put("/{id}")]
pub(super) async fn edit_food(
    _admin: AdminPrincipal,
    food_ops: web::Data<FoodOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateFood>,
) -> impl Responder {
    let changes = req_data.into_inner();
    if let Err(msg) = changes.validate() {
        return validation_response(msg);
    }

    let id = path.into_inner().0;
    let ops = food_ops.into_inner();
    match blocking(move || ops.update_food(id, changes)).await {
        Ok(food) => HttpResponse::Ok().json(FoodResponse {
            success: true,
            message: Some("Food item updated successfully!".to_string()),
            food: Some(food),
        }),
        Err(e) => error_response("ADMIN: edit_food()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Food to delete"),
    ),
    responses(
        (status = 200, description = "Food deleted", body = GeneralResponse),
        (status = 404, description = "No such food"),
        (status = 409, description = "Food appears on past orders", body = GeneralResponse)
    ),
    summary = "Delete a food"
)]
#[delete("/{id}")]
pub(super) async fn delete_food(
    admin: AdminPrincipal,
    food_ops: web::Data<FoodOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let id = path.into_inner().0;
    let ops = food_ops.into_inner();
    match blocking(move || ops.remove_food(id)).await {
        Ok(food) => {
            info!("delete_food: admin {} removed '{}'", admin.user_id, food.name);
            HttpResponse::Ok().json(GeneralResponse::ok("Food item deleted successfully!"))
        }
        Err(e) => error_response("ADMIN: delete_food()", &e),
    }
}
