use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::AdminPrincipal;
use crate::db::UserOperations;
use crate::enums::admin::{AdminUserUpdateRequest, UserListResponse, UserResponse};
use crate::enums::common::{GeneralResponse, StatusFilterQuery};
use crate::models::user::{AdminUserChanges, UserSummary};
use crate::traits::Validate;
use actix_web::{delete, get, put, web, HttpResponse, Responder};

fn blank_to_none(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[utoipa::path(
    tag = "Admin",
    params(StatusFilterQuery),
    responses(
        (status = 200, description = "Accounts matching `q` on name or email, newest first", body = UserListResponse)
    ),
    summary = "List user accounts"
)]
#[get("")]
pub(super) async fn list_users(
    _admin: AdminPrincipal,
    user_ops: web::Data<UserOperations>,
    query: web::Query<StatusFilterQuery>,
) -> impl Responder {
    let q = blank_to_none(query.into_inner().q);
    let ops = user_ops.into_inner();
    match blocking(move || ops.list_users(q.as_deref())).await {
        Ok(users) => HttpResponse::Ok().json(UserListResponse {
            success: true,
            message: None,
            users: users.iter().map(UserSummary::from).collect(),
        }),
        Err(e) => error_response("ADMIN: list_users()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Account to edit"),
    ),
    request_body = AdminUserUpdateRequest,
    responses(
        (status = 200, description = "Account updated; `message` carries any warning", body = UserResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse),
        (status = 404, description = "No such user"),
        (status = 409, description = "Email taken by another account", body = GeneralResponse)
    ),
    summary = "Edit a user account"
)]
#[put("/{id}")]
pub(super) async fn edit_user(
    admin: AdminPrincipal,
    user_ops: web::Data<UserOperations>,
    path: web::Path<(i32,)>,
    req_data: web::Json<AdminUserUpdateRequest>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let changes = AdminUserChanges {
        name: req.name.trim().to_string(),
        email: req.email.trim().to_lowercase(),
        phone: blank_to_none(req.phone),
        location: blank_to_none(req.location),
        is_admin: req.is_admin,
    };
    let (acting, target) = (admin.user_id, path.into_inner().0);
    let ops = user_ops.into_inner();
    match blocking(move || ops.admin_update_user(acting, target, changes)).await {
        Ok((user, warning)) => {
            if let Some(w) = &warning {
                warn!("edit_user: admin {}: {}", acting, w);
            }
            HttpResponse::Ok().json(UserResponse {
                success: true,
                message: Some(warning.unwrap_or_else(|| "User updated successfully!".to_string())),
                user: Some(UserSummary::from(&user)),
            })
        }
        Err(e) => error_response("ADMIN: edit_user()", &e),
    }
}

#[utoipa::path(
    tag = "Admin",
    params(
        ("id", description = "Account to delete"),
    ),
    responses(
        (status = 200, description = "Account and its cart, orders and requests deleted", body = GeneralResponse),
        (status = 400, description = "Admins cannot delete themselves", body = GeneralResponse),
        (status = 404, description = "No such user")
    ),
    summary = "Delete a user account"
)]
#[delete("/{id}")]
pub(super) async fn delete_user(
    admin: AdminPrincipal,
    user_ops: web::Data<UserOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let (acting, target) = (admin.user_id, path.into_inner().0);
    let ops = user_ops.into_inner();
    match blocking(move || ops.delete_user(acting, target)).await {
        Ok(user) => {
            info!("delete_user: admin {} removed {}", acting, user.email);
            HttpResponse::Ok().json(GeneralResponse::ok("User deleted successfully!"))
        }
        Err(e) => error_response("ADMIN: delete_user()", &e),
    }
}
