use crate::db::{DbConnection, RepositoryError};
use crate::enums::admin::{DailySales, DashboardTotals, OrderWithCustomer, StatusSlice};
use crate::models::common::{Order, OrderStatus};
use crate::services::sales::{daily_totals, day_label, SalesWindow};
use chrono::{DateTime, Utc};
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use log::error;
use std::collections::HashMap;

const RECENT_ORDERS: i64 = 10;

/// One non-cancelled order with its customer and `(food name, quantity)` lines.
#[derive(Debug, Clone)]
pub struct SalesRow {
    pub order: Order,
    pub customer_name: String,
    pub items: Vec<(String, i32)>,
}

#[derive(Clone)]
pub struct AnalyticsOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl AnalyticsOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn get_totals(&self) -> Result<DashboardTotals, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_totals: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{foods, orders, users};

        let conn = conn.connection();
        Ok(DashboardTotals {
            total_users: users::table.count().get_result(conn)?,
            total_orders: orders::table.count().get_result(conn)?,
            total_foods: foods::table.count().get_result(conn)?,
            pending_orders: orders::table
                .filter(orders::status.eq(OrderStatus::Pending))
                .count()
                .get_result(conn)?,
        })
    }

    /// Per-day sum of non-cancelled order totals across the window.
    pub fn get_daily_sales(&self, window: &SalesWindow) -> Result<Vec<DailySales>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::orders::dsl::*;

        let (from, to) = window.bounds();
        let rows: Vec<(DateTime<Utc>, f64)> = orders
            .filter(created_at.ge(from))
            .filter(created_at.lt(to))
            .filter(status.ne(OrderStatus::Cancelled))
            .select((created_at, total_amount))
            .load(conn.connection())
            .map_err(|e| {
                error!("get_daily_sales: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(daily_totals(window, &rows)
            .into_iter()
            .map(|(date, total)| DailySales {
                date,
                label: day_label(date),
                total,
            })
            .collect())
    }

    /// Order counts for every status in display order, zero-filled.
    pub fn get_status_distribution(&self) -> Result<Vec<StatusSlice>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::orders::dsl::*;

        let counts: HashMap<OrderStatus, i64> = orders
            .group_by(status)
            .select((status, count_star()))
            .load::<(OrderStatus, i64)>(conn.connection())
            .map_err(|e| {
                error!("get_status_distribution: error counting orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?
            .into_iter()
            .collect();

        Ok(OrderStatus::ALL
            .iter()
            .map(|s| StatusSlice {
                status: *s,
                label: s.label().to_string(),
                color: s.color().to_string(),
                count: counts.get(s).copied().unwrap_or(0),
            })
            .collect())
    }

    pub fn get_recent_orders(&self) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::{orders, users};

        let rows = orders::table
            .inner_join(users::table)
            .order_by((orders::created_at.desc(), orders::order_id.desc()))
            .limit(RECENT_ORDERS)
            .select((Order::as_select(), users::name))
            .load::<(Order, String)>(conn.connection())
            .map_err(|e| {
                error!("get_recent_orders: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;
        Ok(rows
            .into_iter()
            .map(|(order, customer_name)| OrderWithCustomer {
                order,
                customer_name,
            })
            .collect())
    }

    /// Non-cancelled orders in the window, newest first, with their lines.
    pub fn get_sales_rows(&self, window: &SalesWindow) -> Result<Vec<SalesRow>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_sales_rows: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{foods, order_items, orders, users};

        let (from, to) = window.bounds();
        let found: Vec<(Order, String)> = orders::table
            .inner_join(users::table)
            .filter(orders::created_at.ge(from))
            .filter(orders::created_at.lt(to))
            .filter(orders::status.ne(OrderStatus::Cancelled))
            .order_by((orders::created_at.desc(), orders::order_id.desc()))
            .select((Order::as_select(), users::name))
            .load(conn.connection())?;

        let ids: Vec<i32> = found.iter().map(|(o, _)| o.order_id).collect();
        let mut lines: HashMap<i32, Vec<(String, i32)>> = HashMap::new();
        for (oid, food_name, qty) in order_items::table
            .inner_join(foods::table)
            .filter(order_items::order_id.eq_any(ids))
            .order_by(order_items::order_item_id.asc())
            .select((order_items::order_id, foods::name, order_items::quantity))
            .load::<(i32, String, i32)>(conn.connection())?
        {
            lines.entry(oid).or_default().push((food_name, qty));
        }

        Ok(found
            .into_iter()
            .map(|(order, customer_name)| SalesRow {
                items: lines.remove(&order.order_id).unwrap_or_default(),
                order,
                customer_name,
            })
            .collect())
    }
}

/// `Order ID,Date,Customer,Items,Total Amount,Status,Payment Method`.
pub fn sales_csv(rows: &[SalesRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Order ID",
        "Date",
        "Customer",
        "Items",
        "Total Amount",
        "Status",
        "Payment Method",
    ])?;
    for row in rows {
        let items = row
            .items
            .iter()
            .map(|(name, qty)| format!("{name} x{qty}"))
            .collect::<Vec<_>>()
            .join(", ");
        writer.write_record([
            row.order.order_number.clone(),
            row.order.created_at.format("%Y-%m-%d %H:%M").to_string(),
            row.customer_name.clone(),
            items,
            format!("{:.2}", row.order.total_amount),
            row.order.status.as_str().to_string(),
            row.order.payment_method.as_str().to_string(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
