use crate::db::errors::RepositoryError;
use crate::db::schema::coupons::dsl::*;
use crate::db::DbConnection;
use crate::models::admin::{Coupon, NewCoupon};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use log::error;

#[derive(Clone)]
pub struct CouponOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl CouponOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn get_all_coupons(&self) -> Result<Vec<Coupon>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_coupons: failed to acquire DB connection: {}", e);
            e
        })?;

        coupons
            .order_by((created_at.desc(), coupon_id.desc()))
            .select(Coupon::as_select())
            .load::<Coupon>(conn.connection())
            .map_err(|e| {
                error!("get_all_coupons: error fetching coupons: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn add_coupon(&self, coupon: NewCoupon) -> Result<Coupon, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_coupon: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(coupons)
            .values(&coupon)
            .returning(Coupon::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    RepositoryError::Conflict(format!("Coupon code {} already exists", coupon.code))
                }
                other => {
                    error!("add_coupon: error inserting coupon '{}': {}", coupon.code, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn remove_coupon(&self, id: i32) -> Result<Coupon, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("remove_coupon: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::delete(coupons.filter(coupon_id.eq(id)))
            .returning(Coupon::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("coupons: {id}")),
                other => {
                    error!("remove_coupon: error deleting coupon {}: {}", id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    /// Deletes every coupon whose window closed before `now`.
    pub fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("remove_expired: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::delete(coupons.filter(valid_to.lt(now)))
            .execute(conn.connection())
            .map_err(|e| {
                error!("remove_expired: error deleting expired coupons: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// The newest active coupon whose window contains `now`.
    pub fn get_active_coupon(&self, now: DateTime<Utc>) -> Result<Option<Coupon>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        coupons
            .filter(active.eq(true))
            .filter(valid_from.le(now))
            .filter(valid_to.ge(now))
            .order_by((created_at.desc(), coupon_id.desc()))
            .select(Coupon::as_select())
            .first::<Coupon>(conn.connection())
            .optional()
            .map_err(|e| {
                error!("get_active_coupon: error fetching coupon: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }
}

/// Locks the coupon row for the rest of the transaction and checks it can be
/// redeemed. Used by checkout.
pub(crate) fn lock_redeemable(
    conn: &mut PgConnection,
    raw_code: &str,
    now: DateTime<Utc>,
) -> Result<Coupon, RepositoryError> {
    let wanted = raw_code.trim().to_uppercase();
    let coupon = coupons
        .filter(code.eq(&wanted))
        .select(Coupon::as_select())
        .for_update()
        .first::<Coupon>(conn)
        .optional()?
        .ok_or_else(|| RepositoryError::ValidationError(format!("Invalid coupon code {wanted}")))?;

    if !coupon.is_redeemable_at(now) {
        return Err(RepositoryError::ValidationError(format!(
            "Coupon {wanted} is expired or fully redeemed"
        )));
    }
    Ok(coupon)
}

pub(crate) fn mark_redeemed(conn: &mut PgConnection, id: i32) -> Result<(), RepositoryError> {
    diesel::update(coupons.find(id))
        .set(used_count.eq(used_count + 1))
        .execute(conn)?;
    Ok(())
}
