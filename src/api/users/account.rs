use crate::api::errors::{blocking, error_response, validation_response};
use crate::auth::password::{hash_password, verify_password};
use crate::auth::session_jwt::issue_session_token;
use crate::auth::{SessionConfig, UserPrincipal};
use crate::db::{RepositoryError, UserOperations};
use crate::enums::common::GeneralResponse;
use crate::enums::users::{
    LoginRequest, LoginResponse, ProfileResponse, ProfileUpdateRequest,
    RegisterRequest,
};
use crate::models::user::{NewUser, ProfileChanges, UserSummary};
use crate::traits::Validate;
use actix_web::{get, post, put, web, HttpResponse, Responder};
use log::{debug, error};

const INVALID_LOGIN: &str = "Invalid email or password!";

#[utoipa::path(
    tag = "User",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User account successfully created", body = GeneralResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse),
        (status = 409, description = "Email already registered", body = GeneralResponse)
    ),
    summary = "Register a new user account"
)]
#[post("/register")]
pub(super) async fn register(
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<RegisterRequest>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let email = req.email.trim().to_lowercase();
    let ops = user_ops.into_inner();
    let new_email = email.clone();
    let result = blocking(move || {
        let password_hash = hash_password(&req.password)
            .map_err(|e| RepositoryError::WorkerError(e.to_string()))?;
        ops.create_user(NewUser {
            name: req.name.trim().to_string(),
            email: new_email,
            password_hash,
            phone: Some(req.phone.trim().to_string()),
            location: None,
            is_admin: false,
        })
    })
    .await;

    match result {
        Ok(_) => {
            debug!("register: successfully created user account with email '{}'", email);
            HttpResponse::Ok().json(GeneralResponse::ok(
                "Registration successful! Redirecting to login...",
            ))
        }
        Err(e) => error_response(&format!("register: account for '{email}'"), &e),
    }
}

#[utoipa::path(
    tag = "User",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User authenticated successfully", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = LoginResponse)
    ),
    summary = "Authenticate and receive a session token"
)]
#[post("/login")]
pub(super) async fn login(
    user_ops: web::Data<UserOperations>,
    session_cfg: web::Data<SessionConfig>,
    req_body: web::Json<LoginRequest>,
) -> impl Responder {
    let req = req_body.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let email = req.email.trim().to_lowercase();
    let ops = user_ops.into_inner();
    let lookup_email = email.clone();
    // Unknown email and wrong password produce the same answer.
    let result = blocking(move || match ops.get_user_by_email(&lookup_email) {
        Ok(user) if verify_password(&req.password, &user.password_hash) => Ok(Some(user)),
        Ok(_) | Err(RepositoryError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    })
    .await;

    match result {
        Ok(Some(user)) => match issue_session_token(user.user_id, &session_cfg) {
            Ok(token) => {
                info!("login: {} signed in", email);
                let redirect = if user.is_admin { "/admin" } else { "/" };
                HttpResponse::Ok().json(LoginResponse {
                    success: true,
                    message: Some(format!("Welcome back, {}!", user.name)),
                    token: Some(token),
                    redirect: Some(redirect.to_string()),
                    user: Some(UserSummary::from(&user)),
                })
            }
            Err(e) => {
                error!("login: failed to issue session token for '{}': {}", email, e);
                HttpResponse::InternalServerError()
                    .json(GeneralResponse::error("Unable to start a session"))
            }
        },
        Ok(None) => {
            debug!("login: authentication failed for email '{}'", email);
            HttpResponse::Unauthorized().json(LoginResponse {
                success: false,
                message: Some(INVALID_LOGIN.to_string()),
                token: None,
                redirect: None,
                user: None,
            })
        }
        Err(e) => error_response("login", &e),
    }
}

#[utoipa::path(
    tag = "User",
    responses(
        (status = 200, description = "Session ended", body = GeneralResponse)
    ),
    summary = "Log out"
)]
#[post("/logout")]
pub(super) async fn logout(user: UserPrincipal) -> impl Responder {
    // Tokens are stateless; the client discards its copy.
    debug!("logout: user {} signed out", user.user_id());
    HttpResponse::Ok().json(GeneralResponse::ok("You have been logged out."))
}

#[utoipa::path(
    tag = "User",
    responses(
        (status = 200, description = "Profile, order stats and order history", body = ProfileResponse)
    ),
    summary = "Current user's profile"
)]
#[get("/profile")]
pub(super) async fn get_profile(
    user: UserPrincipal,
    user_ops: web::Data<UserOperations>,
) -> impl Responder {
    let uid = user.user_id();
    let ops = user_ops.into_inner();
    match blocking(move || ops.get_profile(uid)).await {
        Ok((account, stats, orders)) => HttpResponse::Ok().json(ProfileResponse {
            success: true,
            message: None,
            user: Some(UserSummary::from(&account)),
            stats,
            orders,
        }),
        Err(e) => error_response("get_profile", &e),
    }
}

#[utoipa::path(
    tag = "User",
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid form data", body = GeneralResponse)
    ),
    summary = "Update the current user's profile"
)]
#[put("/profile")]
pub(super) async fn update_profile(
    user: UserPrincipal,
    user_ops: web::Data<UserOperations>,
    req_data: web::Json<ProfileUpdateRequest>,
) -> impl Responder {
    let req = req_data.into_inner();
    if let Err(msg) = req.validate() {
        return validation_response(msg);
    }

    let uid = user.user_id();
    let ops = user_ops.into_inner();
    let changes = ProfileChanges {
        name: req.name.trim().to_string(),
        phone: Some(req.phone.trim().to_string()),
        location: req
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    };
    let result = blocking(move || {
        ops.update_profile(uid, changes)?;
        ops.get_profile(uid)
    })
    .await;

    match result {
        Ok((account, stats, orders)) => HttpResponse::Ok().json(ProfileResponse {
            success: true,
            message: Some("Profile updated successfully!".to_string()),
            user: Some(UserSummary::from(&account)),
            stats,
            orders,
        }),
        Err(e) => error_response("update_profile", &e),
    }
}

