use crate::db::errors::RepositoryError;
use crate::db::schema::foods::dsl::*;
use crate::db::DbConnection;
use crate::models::admin::{Food, NewFood, UpdateFood};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error;
use log::error;

pub const FEATURED_LIMIT: i64 = 8;
pub const RELATED_LIMIT: i64 = 4;
pub const RECOMMENDED_LIMIT: i64 = 4;
pub const SEARCH_LIMIT: i64 = 10;

#[derive(Clone)]
pub struct FoodOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl FoodOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    pub fn add_food(&self, food: NewFood) -> Result<Food, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("add_food: failed to acquire DB connection: {}", e);
            e
        })?;

        diesel::insert_into(foods)
            .values(&food)
            .returning(Food::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("add_food: error inserting food '{}': {}", food.name, e);
                RepositoryError::DatabaseError(e)
            })
    }

    pub fn update_food(&self, id: i32, changes: UpdateFood) -> Result<Food, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "update_food: failed to acquire DB connection for id {}: {}",
                id, e
            );
            e
        })?;

        // An empty changeset is rejected by diesel, so treat it as a read.
        if changes == UpdateFood::default() {
            return foods
                .find(id)
                .select(Food::as_select())
                .get_result(conn.connection())
                .map_err(|e| RepositoryError::from_diesel(e, &format!("foods: {id}")));
        }

        diesel::update(foods.filter(food_id.eq(id)))
            .set(&changes)
            .returning(Food::as_returning())
            .get_result(conn.connection())
            .map_err(|e| {
                error!("update_food: error updating food with id {}: {}", id, e);
                match e {
                    Error::NotFound => RepositoryError::NotFound(format!("foods: {id}")),
                    other => RepositoryError::DatabaseError(other),
                }
            })
    }

    /// Foods referenced by past order lines cannot be removed; mark them
    /// unavailable instead.
    pub fn remove_food(&self, id: i32) -> Result<Food, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "remove_food: failed to acquire DB connection for id {}: {}",
                id, e
            );
            e
        })?;

        use crate::db::schema::order_items;

        conn.connection().transaction(|conn| {
            let referenced: i64 = order_items::table
                .filter(order_items::food_id.eq(id))
                .count()
                .get_result(conn)?;
            let food = foods
                .find(id)
                .select(Food::as_select())
                .get_result::<Food>(conn)
                .map_err(|e| RepositoryError::from_diesel(e, &format!("foods: {id}")))?;
            if referenced > 0 {
                return Err(RepositoryError::Conflict(format!(
                    "{} appears in {} past order lines; mark it unavailable instead",
                    food.name, referenced
                )));
            }

            diesel::delete(foods.filter(food_id.eq(id))).execute(conn)?;
            Ok(food)
        })
    }

    pub fn get_food(&self, id: i32) -> Result<Food, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        foods
            .find(id)
            .select(Food::as_select())
            .get_result(conn.connection())
            .map_err(|e| match e {
                Error::NotFound => RepositoryError::NotFound(format!("foods: {id}")),
                other => {
                    error!("get_food: error fetching food with id {}: {}", id, other);
                    RepositoryError::DatabaseError(other)
                }
            })
    }

    /// Every food, newest first.
    pub fn get_all_foods(&self) -> Result<Vec<Food>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_foods: failed to acquire DB connection: {}", e);
            e
        })?;

        foods
            .order_by((created_at.desc(), food_id.desc()))
            .select(Food::as_select())
            .load::<Food>(conn.connection())
            .map_err(|e| {
                error!("get_all_foods: error fetching foods: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }

    /// Available foods, optionally narrowed to a category (`all` means any)
    /// and a case-insensitive match on name or description.
    pub fn get_available_foods(
        &self,
        category_filter: Option<&str>,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<Food>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_available_foods: failed to acquire DB connection: {}", e);
            e
        })?;

        let mut query = foods
            .filter(is_available.eq(true))
            .order_by(food_id.asc())
            .select(Food::as_select())
            .into_boxed();

        if let Some(cat) = category_filter.filter(|c| !c.is_empty() && *c != "all") {
            query = query.filter(category.eq(cat.to_string()));
        }
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            let pattern = format!("%{term}%");
            query = query.filter(name.ilike(pattern.clone()).or(description.ilike(pattern)));
        }
        if let Some(n) = limit {
            query = query.limit(n);
        }

        query.load::<Food>(conn.connection()).map_err(|e| {
            error!("get_available_foods: error fetching foods: {}", e);
            RepositoryError::DatabaseError(e)
        })
    }

    /// Up to 8 available foods for the landing page.
    pub fn get_featured_foods(&self) -> Result<Vec<Food>, RepositoryError> {
        self.get_available_foods(None, None, Some(FEATURED_LIMIT))
    }

    /// First few available foods, shown under the cart.
    pub fn get_recommended_foods(&self) -> Result<Vec<Food>, RepositoryError> {
        self.get_available_foods(None, None, Some(RECOMMENDED_LIMIT))
    }

    /// Fewer than two characters never matches.
    pub fn search_foods(&self, q: &str) -> Result<Vec<Food>, RepositoryError> {
        if q.trim().chars().count() < 2 {
            return Ok(Vec::new());
        }
        self.get_available_foods(None, Some(q), Some(SEARCH_LIMIT))
    }

    pub fn get_related_foods(&self, food: &Food) -> Result<Vec<Food>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        foods
            .filter(category.eq(&food.category))
            .filter(is_available.eq(true))
            .filter(food_id.ne(food.food_id))
            .order_by(food_id.asc())
            .limit(RELATED_LIMIT)
            .select(Food::as_select())
            .load::<Food>(conn.connection())
            .map_err(|e| {
                error!(
                    "get_related_foods: error fetching foods related to {}: {}",
                    food.food_id, e
                );
                RepositoryError::DatabaseError(e)
            })
    }

    /// Distinct categories across the whole menu, sorted.
    pub fn get_categories(&self) -> Result<Vec<String>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;

        foods
            .select(category)
            .distinct()
            .order_by(category.asc())
            .load::<String>(conn.connection())
            .map_err(|e| {
                error!("get_categories: error fetching categories: {}", e);
                RepositoryError::DatabaseError(e)
            })
    }
}
