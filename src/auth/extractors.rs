use crate::auth::principal::Principal;
use actix_web::dev::Payload;
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpMessage, HttpRequest};
use futures::future::{ready, Ready};

/// Any signed-in account. Admins are also guests and may order.
pub struct UserPrincipal {
    user_id: i32,
    name: String,
    is_admin: bool,
}

impl UserPrincipal {
    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

impl FromRequest for UserPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Principal>() {
            Some(p) => ready(Ok(UserPrincipal {
                user_id: p.user_id(),
                name: p.name().to_string(),
                is_admin: p.is_admin(),
            })),
            None => ready(Err(ErrorUnauthorized("missing principal"))),
        }
    }
}

pub struct AdminPrincipal {
    pub user_id: i32,
}

impl FromRequest for AdminPrincipal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        if let Some(p) = req.extensions().get::<Principal>() {
            if let Principal::Admin { user_id, .. } = p {
                return ready(Ok(AdminPrincipal { user_id: *user_id }));
            }
            return ready(Err(actix_web::error::ErrorForbidden(
                "Access denied. Admin privileges required.",
            )));
        }
        ready(Err(ErrorUnauthorized("missing principal")))
    }
}
