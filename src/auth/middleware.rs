use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{error::ErrorUnauthorized, http::header, Error, HttpMessage};
use futures::future::LocalBoxFuture;

use crate::auth::config::SessionConfig;
use crate::auth::session_jwt::verify_session_token;
use crate::auth::Principal;
use crate::db::UserOperations;

/// Exact paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/health",
    "/home",
    "/auth/register",
    "/auth/login",
    "/api/foods",
    "/api/search",
    "/subscribe",
];

/// Path prefixes reachable without a session.
const PUBLIC_PREFIXES: &[&str] = &["/menu", "/api-docs"];

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PREFIXES
            .iter()
            .any(|p| path == *p || path.starts_with(&format!("{p}/")))
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Clone)]
pub struct AuthLayer {
    session_cfg: SessionConfig,
    user_ops: UserOperations,
}

impl AuthLayer {
    pub fn new(session_cfg: SessionConfig, user_ops: UserOperations) -> Self {
        Self {
            session_cfg,
            user_ops,
        }
    }

    /// Verifies the token and reloads the account so role changes and
    /// deletions take effect on the next request.
    async fn resolve(&self, token: &str) -> Result<Principal, Error> {
        let user_id = verify_session_token(token, &self.session_cfg).map_err(|e| {
            debug!("AuthLayer: rejected session token: {}", e);
            ErrorUnauthorized("invalid session")
        })?;

        let user_ops = self.user_ops.clone();
        let user = actix_web::web::block(move || user_ops.get_user(user_id))
            .await
            .map_err(|_| ErrorUnauthorized("session lookup failed"))?
            .map_err(|e| {
                warn!("AuthLayer: session for user {} not usable: {}", user_id, e);
                ErrorUnauthorized("session user not found")
            })?;

        Ok(if user.is_admin {
            Principal::Admin {
                user_id: user.user_id,
                name: user.name,
            }
        } else {
            Principal::User {
                user_id: user.user_id,
                name: user.name,
            }
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddleware {
            service: Rc::new(service),
            inner: self.clone(),
        }))
    }
}

pub struct AuthMiddleware<S> {
    service: Rc<S>,
    inner: AuthLayer,
}

impl<S, B> Service<ServiceRequest> for AuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let public = is_public_path(req.path());
        let token = bearer_token(&req);
        let inner = self.inner.clone();
        let srv = self.service.clone();

        Box::pin(async move {
            match token {
                Some(token) => match inner.resolve(&token).await {
                    Ok(principal) => {
                        req.extensions_mut().insert(principal);
                    }
                    // A stale token on a public page is ignored.
                    Err(e) if !public => return Err(e),
                    Err(_) => {}
                },
                None if !public => {
                    return Err(ErrorUnauthorized("missing or invalid auth header"));
                }
                None => {}
            }
            srv.call(req).await
        })
    }
}
