use crate::config::PricingConfig;
use crate::db::admin::coupon::{lock_redeemable, mark_redeemed};
use crate::db::{DbConnection, RepositoryError};
use crate::enums::admin::OrderWithCustomer;
use crate::enums::common::{KdsItem, KdsOrder, OrderDetails, OrderLine};
use crate::enums::users::CheckoutRequest;
use crate::models::admin::Food;
use crate::models::common::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus};
use crate::models::user::CartItem;
use crate::services::pricing::{compute_totals, generate_order_number, round_money, subtotal};
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use log::{debug, error};
use std::collections::HashMap;

#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Turns the user's cart into an order. Order, lines, the user's default
    /// location, cart removal and coupon usage are committed together.
    pub fn checkout(
        &self,
        uid: i32,
        req: &CheckoutRequest,
        pricing: &PricingConfig,
        now: DateTime<Utc>,
    ) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("checkout: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{cart_items, foods, order_items, orders, users};

        conn.connection().transaction(|conn| {
            let cart = cart_items::table
                .inner_join(foods::table)
                .filter(cart_items::user_id.eq(uid))
                .order_by(cart_items::cart_id.asc())
                .select((CartItem::as_select(), Food::as_select()))
                .load::<(CartItem, Food)>(conn)?;

            if cart.is_empty() {
                return Err(RepositoryError::ValidationError(
                    "Your cart is empty!".to_string(),
                ));
            }
            if let Some((_, food)) = cart.iter().find(|(_, food)| !food.is_available) {
                return Err(RepositoryError::NotAvailable(
                    food.name.clone(),
                    "remove it from your cart to continue".to_string(),
                ));
            }

            let cart_subtotal = subtotal(cart.iter().map(|(item, food)| (food.price, item.quantity)));

            let coupon = match req
                .coupon_code
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
            {
                Some(raw) => Some(lock_redeemable(conn, raw, now)?),
                None => None,
            };
            let totals = compute_totals(
                cart_subtotal,
                pricing,
                coupon.as_ref().map(|c| (c.discount_type, c.value)),
            );

            let new_order = NewOrder {
                order_number: generate_order_number(now, &mut rand::thread_rng()),
                user_id: uid,
                subtotal: totals.subtotal,
                delivery_charge: totals.delivery_charge,
                discount_amount: totals.discount,
                total_amount: totals.total,
                coupon_code: coupon.as_ref().map(|c| c.code.clone()),
                payment_method: req.payment_method,
                location: req.location.trim().to_string(),
                phone: req.phone.trim().to_string(),
                special_instructions: req
                    .special_instructions
                    .clone()
                    .filter(|s| !s.trim().is_empty()),
            };
            let order = diesel::insert_into(orders::table)
                .values(&new_order)
                .returning(Order::as_returning())
                .get_result(conn)
                .map_err(|e| {
                    error!("checkout: error inserting order for user {}: {}", uid, e);
                    RepositoryError::from_diesel(e, "orders")
                })?;

            let lines: Vec<NewOrderItem> = cart
                .iter()
                .map(|(item, food)| NewOrderItem {
                    order_id: order.order_id,
                    food_id: food.food_id,
                    quantity: item.quantity,
                    price: food.price,
                    special_instructions: item.special_instructions.clone(),
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&lines)
                .execute(conn)?;

            diesel::update(users::table.find(uid))
                .set(users::location.eq(Some(new_order.location.clone())))
                .execute(conn)?;

            diesel::delete(cart_items::table.filter(cart_items::user_id.eq(uid))).execute(conn)?;

            if let Some(c) = &coupon {
                mark_redeemed(conn, c.coupon_id)?;
            }

            info!(
                "checkout: order {} placed by user {} for {:.2}",
                order.order_number, uid, order.total_amount
            );
            Ok(order)
        })
    }

    /// Newest first.
    pub fn get_user_orders(&self, uid: i32) -> Result<Vec<Order>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_user_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        orders
            .filter(user_id.eq(uid))
            .order_by((created_at.desc(), order_id.desc()))
            .select(Order::as_select())
            .load::<Order>(conn.connection())
            .map_err(|e| {
                error!("get_user_orders: error fetching orders for user {}: {}", uid, e);
                RepositoryError::DatabaseError(e)
            })
    }

    fn load_details(conn: &mut PgConnection, id: i32) -> Result<OrderDetails, RepositoryError> {
        use crate::db::schema::{foods, order_items, orders, users};

        let (order, customer_name, customer_email) = orders::table
            .inner_join(users::table)
            .filter(orders::order_id.eq(id))
            .select((Order::as_select(), users::name, users::email))
            .get_result::<(Order, String, String)>(conn)
            .map_err(|e| RepositoryError::from_diesel(e, &format!("orders: {id}")))?;

        let items = order_items::table
            .inner_join(foods::table)
            .filter(order_items::order_id.eq(id))
            .order_by(order_items::order_item_id.asc())
            .select((OrderItem::as_select(), foods::name))
            .load::<(OrderItem, String)>(conn)?
            .into_iter()
            .map(|(item, food_name)| OrderLine {
                order_item_id: item.order_item_id,
                food_id: item.food_id,
                food_name,
                quantity: item.quantity,
                price: item.price,
                line_total: round_money(item.price * f64::from(item.quantity)),
                special_instructions: item.special_instructions,
            })
            .collect();

        Ok(OrderDetails {
            order,
            customer_name,
            customer_email,
            items,
        })
    }

    /// Owners see their own orders; admins see every order.
    pub fn get_order_details(
        &self,
        id: i32,
        viewer_id: i32,
        viewer_is_admin: bool,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_order_details: failed to acquire DB connection: {}", e);
            e
        })?;

        let details = Self::load_details(conn.connection(), id)?;
        if details.order.user_id != viewer_id && !viewer_is_admin {
            return Err(RepositoryError::Forbidden(format!(
                "order {id} belongs to another user"
            )));
        }
        Ok(details)
    }

    pub fn cancel_order(&self, uid: i32, id: i32) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("cancel_order: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        conn.connection().transaction(|conn| {
            let order = orders
                .find(id)
                .select(Order::as_select())
                .for_update()
                .get_result::<Order>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("orders: {id}")))?;

            if order.user_id != uid {
                return Err(RepositoryError::Forbidden(format!(
                    "order {id} belongs to another user"
                )));
            }
            if !order.status.is_cancellable() {
                return Err(RepositoryError::InvalidTransition(
                    "Order cannot be cancelled at this stage".to_string(),
                ));
            }

            diesel::update(orders.find(id))
                .set(status.eq(OrderStatus::Cancelled))
                .returning(Order::as_returning())
                .get_result(conn)
                .map_err(RepositoryError::DatabaseError)
        })
    }

    /// Newest first. `q` is a case-insensitive order number fragment.
    pub fn list_orders(
        &self,
        status_filter: Option<OrderStatus>,
        q: Option<&str>,
    ) -> Result<Vec<OrderWithCustomer>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("list_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{orders, users};

        let mut query = orders::table
            .inner_join(users::table)
            .order_by((orders::created_at.desc(), orders::order_id.desc()))
            .select((Order::as_select(), users::name))
            .into_boxed();
        if let Some(s) = status_filter {
            query = query.filter(orders::status.eq(s));
        }
        if let Some(term) = q.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(orders::order_number.ilike(format!("%{term}%")));
        }

        let rows = query
            .load::<(Order, String)>(conn.connection())
            .map_err(|e| {
                error!("list_orders: error fetching orders: {}", e);
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

    /// Applies a forward-only status change. Re-applying the current status
    /// succeeds without touching the row.
    pub fn update_status(&self, id: i32, next: OrderStatus) -> Result<Order, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_status: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::orders::dsl::*;

        conn.connection().transaction(|conn| {
            let order = orders
                .find(id)
                .select(Order::as_select())
                .for_update()
                .get_result::<Order>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("orders: {id}")))?;

            if order.status == next {
                return Ok(order);
            }
            if !order.status.can_transition_to(next) {
                return Err(RepositoryError::InvalidTransition(format!(
                    "{} -> {}",
                    order.status.as_str(),
                    next.as_str()
                )));
            }

            debug!(
                "update_status: order {} {} -> {}",
                order.order_number,
                order.status.as_str(),
                next.as_str()
            );
            diesel::update(orders.find(id))
                .set(status.eq(next))
                .returning(Order::as_returning())
                .get_result(conn)
                .map_err(RepositoryError::DatabaseError)
        })
    }

    /// Confirmed and preparing orders, oldest first, for the kitchen display.
    pub fn get_kds_orders(&self) -> Result<Vec<KdsOrder>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_kds_orders: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{foods, order_items, orders, users};

        let active: Vec<(Order, String)> = orders::table
            .inner_join(users::table)
            .filter(orders::status.eq_any(vec![OrderStatus::Confirmed, OrderStatus::Preparing]))
            .order_by((orders::created_at.asc(), orders::order_id.asc()))
            .select((Order::as_select(), users::name))
            .load(conn.connection())
            .map_err(|e| {
                error!("get_kds_orders: error fetching orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let ids: Vec<i32> = active.iter().map(|(o, _)| o.order_id).collect();
        let mut items_by_order: HashMap<i32, Vec<KdsItem>> = HashMap::new();
        for (oid, food_name, qty, notes) in order_items::table
            .inner_join(foods::table)
            .filter(order_items::order_id.eq_any(ids))
            .order_by(order_items::order_item_id.asc())
            .select((
                order_items::order_id,
                foods::name,
                order_items::quantity,
                order_items::special_instructions,
            ))
            .load::<(i32, String, i32, Option<String>)>(conn.connection())?
        {
            items_by_order.entry(oid).or_default().push(KdsItem {
                name: food_name,
                quantity: qty,
                special_instructions: notes,
            });
        }

        Ok(active
            .into_iter()
            .map(|(order, customer_name)| KdsOrder {
                id: order.order_id,
                items: items_by_order.remove(&order.order_id).unwrap_or_default(),
                order_number: order.order_number,
                customer_name,
                location: order.location,
                status: order.status,
                created_at: order.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                special_instructions: order.special_instructions,
            })
            .collect())
    }
}
