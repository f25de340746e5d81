use crate::db::errors::RepositoryError;
use crate::db::DbConnection;
use crate::enums::users::CartLine;
use crate::models::admin::Food;
use crate::models::user::{CartItem, NewCartItem, MAX_INSTRUCTIONS_LEN, MAX_LINE_QUANTITY};
use crate::services::pricing::round_money;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use log::error;

/// Joins a new instruction onto an existing one with `"; "`.
pub fn merge_instructions(existing: Option<String>, incoming: Option<&str>) -> Option<String> {
    match incoming.map(str::trim).filter(|s| !s.is_empty()) {
        None => existing,
        Some(new) => match existing.filter(|s| !s.is_empty()) {
            Some(old) => Some(format!("{old}; {new}")),
            None => Some(new.to_string()),
        },
    }
}

fn check_quantity(qty: i32) -> Result<(), RepositoryError> {
    if qty > MAX_LINE_QUANTITY {
        return Err(RepositoryError::ValidationError(format!(
            "Quantity cannot be more than {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

fn check_instructions(value: Option<&str>) -> Result<(), RepositoryError> {
    match value {
        Some(v) if v.chars().count() > MAX_INSTRUCTIONS_LEN => {
            Err(RepositoryError::ValidationError(format!(
                "Special instructions cannot be longer than {MAX_INSTRUCTIONS_LEN} characters"
            )))
        }
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct CartOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl CartOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Cart rows joined with their food, oldest first.
    pub fn get_cart(&self, uid: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_cart: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{cart_items, foods};

        let rows = cart_items::table
            .inner_join(foods::table)
            .filter(cart_items::user_id.eq(uid))
            .order_by(cart_items::cart_id.asc())
            .select((CartItem::as_select(), Food::as_select()))
            .load::<(CartItem, Food)>(conn.connection())
            .map_err(|e| {
                error!("get_cart: error loading cart for user {}: {}", uid, e);
                RepositoryError::DatabaseError(e)
            })?;

        Ok(rows
            .into_iter()
            .map(|(item, food)| CartLine {
                cart_id: item.cart_id,
                food_id: food.food_id,
                name: food.name,
                image: food.image,
                price: food.price,
                quantity: item.quantity,
                line_total: round_money(food.price * f64::from(item.quantity)),
                special_instructions: item.special_instructions,
            })
            .collect())
    }

    pub fn cart_count(&self, uid: i32) -> Result<i64, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        use crate::db::schema::cart_items::dsl::*;
        cart_items
            .filter(user_id.eq(uid))
            .count()
            .get_result(conn.connection())
            .map_err(RepositoryError::DatabaseError)
    }

    /// Adds `qty` of a food, merging into the existing row for that food.
    pub fn add_to_cart(
        &self,
        uid: i32,
        fid: i32,
        qty: i32,
        instructions: Option<String>,
    ) -> Result<(Food, CartItem), RepositoryError> {
        if qty < 1 {
            return Err(RepositoryError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }
        check_quantity(qty)?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_to_cart: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::{cart_items, foods};

        conn.connection().transaction(|conn| {
            let food = foods::table
                .find(fid)
                .select(Food::as_select())
                .get_result::<Food>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("foods: {fid}")))?;

            if !food.is_available {
                return Err(RepositoryError::NotAvailable(
                    food.name.clone(),
                    "currently off the menu".to_string(),
                ));
            }

            let existing = cart_items::table
                .filter(cart_items::user_id.eq(uid))
                .filter(cart_items::food_id.eq(fid))
                .select(CartItem::as_select())
                .for_update()
                .first::<CartItem>(conn)
                .optional()?;

            let item = match existing {
                Some(row) => {
                    let quantity = row.quantity.checked_add(qty).ok_or_else(|| {
                        RepositoryError::ValidationError(format!(
                            "Quantity cannot be more than {MAX_LINE_QUANTITY}"
                        ))
                    })?;
                    check_quantity(quantity)?;
                    let merged = merge_instructions(
                        row.special_instructions.clone(),
                        instructions.as_deref(),
                    );
                    check_instructions(merged.as_deref())?;
                    diesel::update(cart_items::table.find(row.cart_id))
                        .set((
                            cart_items::quantity.eq(quantity),
                            cart_items::special_instructions.eq(merged),
                        ))
                        .returning(CartItem::as_returning())
                        .get_result(conn)?
                }
                None => {
                    let merged = merge_instructions(None, instructions.as_deref());
                    check_instructions(merged.as_deref())?;
                    diesel::insert_into(cart_items::table)
                        .values(&NewCartItem {
                            user_id: uid,
                            food_id: fid,
                            quantity: qty,
                            special_instructions: merged,
                        })
                        .returning(CartItem::as_returning())
                        .get_result(conn)?
                }
            };

            debug!(
                "add_to_cart: user {} now has {} x {}",
                uid, item.quantity, food.name
            );
            Ok((food, item))
        })
    }

    fn owned_row(
        conn: &mut PgConnection,
        uid: i32,
        cid: i32,
    ) -> Result<CartItem, RepositoryError> {
        use crate::db::schema::cart_items;

        let row = cart_items::table
            .find(cid)
            .select(CartItem::as_select())
            .get_result::<CartItem>(conn)
            .map_err(|e| RepositoryError::from_diesel(e, &format!("cart_items: {cid}")))?;
        if row.user_id != uid {
            return Err(RepositoryError::Forbidden(format!(
                "cart item {cid} belongs to another user"
            )));
        }
        Ok(row)
    }

    /// A quantity below 1 removes the row. Returns the message to show.
    pub fn update_quantity(
        &self,
        uid: i32,
        cid: i32,
        qty: i32,
    ) -> Result<&'static str, RepositoryError> {
        check_quantity(qty)?;
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("update_quantity: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::cart_items;

        conn.connection().transaction(|conn| {
            let row = Self::owned_row(conn, uid, cid)?;
            if qty < 1 {
                diesel::delete(cart_items::table.find(row.cart_id)).execute(conn)?;
                Ok("Item removed from cart")
            } else {
                diesel::update(cart_items::table.find(row.cart_id))
                    .set(cart_items::quantity.eq(qty))
                    .execute(conn)?;
                Ok("Cart updated")
            }
        })
    }

    pub fn remove_item(&self, uid: i32, cid: i32) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("remove_item: failed to acquire DB connection: {}", e);
            e
        })?;

        use crate::db::schema::cart_items;

        conn.connection().transaction(|conn| {
            let row = Self::owned_row(conn, uid, cid)?;
            diesel::delete(cart_items::table.find(row.cart_id)).execute(conn)?;
            Ok(())
        })
    }
}
