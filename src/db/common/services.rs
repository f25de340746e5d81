use crate::db::{DbConnection, RepositoryError};
use crate::enums::common::ServiceRequestView;
use crate::models::common::{NewServiceRequest, ServiceRequest, ServiceStatus, ServiceType};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use diesel::PgConnection;
use log::error;

#[derive(Clone)]
pub struct ServiceOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl ServiceOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_request(
        &self,
        uid: i32,
        kind: ServiceType,
        details: Option<String>,
    ) -> Result<ServiceRequest, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_request: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::service_requests::dsl::*;

        diesel::insert_into(service_requests)
            .values(&NewServiceRequest {
                user_id: uid,
                service_type: kind,
                description: details.filter(|d| !d.trim().is_empty()),
            })
            .returning(ServiceRequest::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("create_request: error inserting request for user {}: {}", uid, e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Newest first.
    pub fn get_user_requests(&self, uid: i32) -> Result<Vec<ServiceRequest>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::service_requests::dsl::*;
        service_requests
            .filter(user_id.eq(uid))
            .order_by((created_at.desc(), request_id.desc()))
            .select(ServiceRequest::as_select())
            .load::<ServiceRequest>(conn.connection())
            .map_err(|e| {
                error!("get_user_requests: error fetching requests for user {}: {}", uid, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn list_requests(
        &self,
        status_filter: Option<ServiceStatus>,
    ) -> Result<Vec<ServiceRequestView>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_requests: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{service_requests, users};

        let mut query = service_requests::table
            .inner_join(users::table)
            .order_by((
                service_requests::created_at.desc(),
                service_requests::request_id.desc(),
            ))
            .select((ServiceRequest::as_select(), users::name, users::location))
            .into_boxed();
        if let Some(s) = status_filter {
            query = query.filter(service_requests::status.eq(s));
        }

        let rows = query
            .load::<(ServiceRequest, String, Option<String>)>(conn.connection())
            .map_err(|e| {
                error!("list_requests: error fetching requests: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows
            .into_iter()
            .map(|(req, user_name, location)| ServiceRequestView {
                request_id: req.request_id,
                user_id: req.user_id,
                user_name,
                location,
                service_type: req.service_type,
                description: req.description,
                status: req.status,
                created_at: req.created_at,
            })
            .collect())
    }

    pub fn update_status(
        &self,
        id: i32,
        next: ServiceStatus,
    ) -> Result<ServiceRequest, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::service_requests::dsl::*;
        diesel::update(service_requests.find(id))
            .set(status.eq(next))
            .returning(ServiceRequest::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("service_requests: {id}")),
                other => {
                    error!("update_status: error updating request {}: {}", id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn pending_count(&self) -> Result<i64, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::service_requests::dsl::*;
        service_requests
            .filter(status.eq(ServiceStatus::Pending))
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)
    }
}
