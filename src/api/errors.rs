use crate::db::RepositoryError;
use crate::enums::common::GeneralResponse;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpRequest, HttpResponse};

pub(crate) fn default_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    error!("Error in request: {} \n Error: {}", req.full_url(), err);
    let body = GeneralResponse::error(format!("Invalid request body: {err}"));
    actix_web::error::InternalError::from_response(err, HttpResponse::BadRequest().json(body))
        .into()
}

pub(crate) fn status_for(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
        RepositoryError::Forbidden(_) => StatusCode::FORBIDDEN,
        RepositoryError::Conflict(_) => StatusCode::CONFLICT,
        RepositoryError::ValidationError(_)
        | RepositoryError::NotAvailable(_, _)
        | RepositoryError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        RepositoryError::DatabaseError(_)
        | RepositoryError::ConnectionPoolError(_)
        | RepositoryError::WorkerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Envelope for a failed operation. Storage failures are logged in full but
/// reported generically.
pub(crate) fn error_response(context: &str, err: &RepositoryError) -> HttpResponse {
    let status = status_for(err);
    let message = if status.is_server_error() {
        error!("{}: {}", context, err);
        "Something went wrong, please try again".to_string()
    } else {
        debug!("{}: {}", context, err);
        match err {
            RepositoryError::InvalidTransition(msg) if msg.contains("->") => err.to_string(),
            RepositoryError::ValidationError(msg)
            | RepositoryError::Conflict(msg)
            | RepositoryError::InvalidTransition(msg) => msg.clone(),
            other => other.to_string(),
        }
    };
    HttpResponse::build(status).json(GeneralResponse::error(message))
}

pub(crate) fn validation_response(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(GeneralResponse::error(message))
}

/// Runs a synchronous repository call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, RepositoryError>
where
    F: FnOnce() -> Result<T, RepositoryError> + Send + 'static,
    T: Send + 'static,
{
    match web::block(f).await {
        Ok(res) => res,
        Err(e) => Err(RepositoryError::WorkerError(e.to_string())),
    }
}
