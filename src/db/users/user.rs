use crate::db::errors::RepositoryError;
use crate::db::DbConnection;
use crate::enums::users::ProfileStats;
use crate::models::common::Order;
use crate::models::user::{AdminUserChanges, NewUser, ProfileChanges, User};
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use log::error;

#[derive(Clone)]
pub struct UserOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl UserOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn create_user(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        diesel::insert_into(users)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    RepositoryError::Conflict("Email already registered!".to_string())
                }
                other => {
                    error!(
                        "create_user: error inserting new user with email '{}': {}",
                        new_user.email, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn get_user(&self, id: i32) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_user: failed to acquire DB connection for id '{}': {}",
                id, e
            );
            e
        })?;

        use crate::db::schema::users::dsl::*;
        users
            .find(id)
            .select(User::as_select())
            .get_result::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("users: {id}")),
                other => RepositoryError::DatabaseError(other),
            })
    }

    pub fn get_user_by_email(&self, email_addr: &str) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::users::dsl::*;
        users
            .filter(email.eq(email_addr))
            .select(User::as_select())
            .first::<User>(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(email_addr.to_string()),
                other => {
                    error!(
                        "get_user_by_email: error fetching user with email '{}': {}",
                        email_addr, other
                    );
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    /// The account, its lifetime order stats and its orders newest first.
    pub fn get_profile(
        &self,
        id: i32,
    ) -> Result<(User, ProfileStats, Vec<Order>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_profile: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{orders, users};

        let user = users::table
            .find(id)
            .select(User::as_select())
            .get_result::<User>(conn.connection())
            .map_err(|e| RepositoryError::from_diesel(e, &format!("users: {id}")))?;

        let (total_orders, total_spent): (i64, Option<f64>) = orders::table
            .filter(orders::user_id.eq(id))
            .select((count_star(), sum(orders::total_amount)))
            .get_result(conn.connection())
            .map_err(|e| {
                error!("get_profile: error computing stats for user {}: {}", id, e);
                RepositoryError::DatabaseError(e)
            })?;

        let user_orders = orders::table
            .filter(orders::user_id.eq(id))
            .order_by(orders::created_at.desc())
            .select(Order::as_select())
            .load::<Order>(conn.connection())
            .map_err(RepositoryError::DatabaseError)?;

        Ok((
            user,
            ProfileStats {
                total_orders,
                total_spent: crate::services::pricing::round_money(total_spent.unwrap_or(0.0)),
            },
            user_orders,
        ))
    }

    pub fn update_profile(
        &self,
        id: i32,
        changes: ProfileChanges,
    ) -> Result<User, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_profile: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;
        diesel::update(users.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("update_profile: error updating user {}: {}", id, e);
                RepositoryError::from_diesel(e, &format!("users: {id}"))
            })
    }

    /// Newest first. `q` matches name or email, case-insensitively.
    pub fn list_users(&self, q: Option<&str>) -> Result<Vec<User>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_users: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;
        let mut query = users
            .select(User::as_select())
            .order_by(created_at.desc())
            .into_boxed();
        if let Some(term) = q.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{term}%");
            query = query.filter(name.ilike(pattern.clone()).or(email.ilike(pattern)));
        }
        query.load::<User>(conn.connection()).map_err(|e| {
            error!("list_users: error fetching users: {}", e);
            RepositoryError::DatabaseError(e)
        })
    }

    /// Returns the updated row and, when the acting admin tried to drop their
    /// own admin flag, the warning to show. The flag is kept in that case.
    pub fn admin_update_user(
        &self,
        acting_user_id: i32,
        target_id: i32,
        mut changes: AdminUserChanges,
    ) -> Result<(User, Option<String>), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("admin_update_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::users::dsl::*;

        conn.connection().transaction(|conn| {
            users
                .find(target_id)
                .select(user_id)
                .get_result::<i32>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("users: {target_id}")))?;

            let taken: i64 = users
                .filter(email.eq(&changes.email))
                .filter(user_id.ne(target_id))
                .count()
                .get_result(conn)
                .map_err(RepositoryError::DatabaseError)?;
            if taken > 0 {
                return Err(RepositoryError::Conflict(
                    "Email already registered by another user!".to_string(),
                ));
            }

            let mut warning = None;
            if acting_user_id == target_id && !changes.is_admin {
                changes.is_admin = true;
                warning = Some("You cannot remove your own admin privileges.".to_string());
            }

            let updated = diesel::update(users.find(target_id))
                .set(&changes)
                .returning(User::as_returning())
                .get_result(conn)
                .map_err(|e| {
                    error!("admin_update_user: error updating user {}: {}", target_id, e);
                    RepositoryError::from_diesel(e, &format!("users: {target_id}"))
                })?;
            Ok((updated, warning))
        })
    }

    /// Removes the account with its cart, service requests and orders.
    pub fn delete_user(&self, acting_user_id: i32, target_id: i32) -> Result<User, RepositoryError> {
        if acting_user_id == target_id {
            return Err(RepositoryError::ValidationError(
                "You cannot delete your own account!".to_string(),
            ));
        }

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("delete_user: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{cart_items, orders, service_requests, users};

        conn.connection().transaction(|conn| {
            let user = users::table
                .find(target_id)
                .select(User::as_select())
                .get_result::<User>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("users: {target_id}")))?;

            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(target_id)))
                .execute(conn)?;
            diesel::delete(service_requests::table.filter(service_requests::user_id.eq(target_id)))
                .execute(conn)?;
            // order_items cascade with their order
            let removed_orders =
                diesel::delete(orders::table.filter(orders::user_id.eq(target_id))).execute(conn)?;
            diesel::delete(users::table.find(target_id)).execute(conn)?;

            info!(
                "delete_user: removed user {} with {} orders",
                user.email, removed_orders
            );
            Ok(user)
        })
    }
}
