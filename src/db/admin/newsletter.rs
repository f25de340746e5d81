use crate::db::errors::RepositoryError;
use crate::db::schema::newsletter::dsl::*;
use crate::db::DbConnection;
use crate::models::admin::Subscriber;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error};
use log::error;

#[derive(Clone)]
pub struct NewsletterOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl NewsletterOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn subscribe(&self, addr: &str) -> Result<Subscriber, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("subscribe: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(newsletter)
            .values(email.eq(addr))
            .returning(Subscriber::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    RepositoryError::Conflict("You are already subscribed!".to_string())
                }
                other => {
                    error!("subscribe: error inserting subscriber '{}': {}", addr, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    pub fn get_all_subscribers(&self) -> Result<Vec<Subscriber>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        newsletter
            .order_by((created_at.desc(), subscriber_id.desc()))
            .select(Subscriber::as_select())
            .load::<Subscriber>(conn.connection())
            .map_err(|e| {
                error!("get_all_subscribers: error fetching subscribers: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn remove_subscriber(&self, id: i32) -> Result<Subscriber, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        diesel::delete(newsletter.filter(subscriber_id.eq(id)))
            .returning(Subscriber::as_returning())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("newsletter: {id}")),
                other => RepositoryError::DatabaseError(other),
            })
    }
}

/// `ID,Email,Subscribed Date` with dates as `%Y-%m-%d %H:%M`.
pub fn subscribers_csv(subscribers: &[Subscriber]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["ID", "Email", "Subscribed Date"])?;
    for sub in subscribers {
        writer.write_record([
            sub.subscriber_id.to_string(),
            sub.email.clone(),
            sub.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn csv_has_header_and_rows() {
        let subs = vec![Subscriber {
            subscriber_id: 3,
            email: "guest@example.com".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 1, 18, 30, 12).unwrap(),
        }];
        let out = subscribers_csv(&subs).unwrap();
        assert_eq!(
            out,
            "ID,Email,Subscribed Date\n3,guest@example.com,2025-05-01 18:30\n"
        );
    }
}
