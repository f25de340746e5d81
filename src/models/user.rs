use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Selectable, PartialEq, Debug, Clone, Identifiable)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(primary_key(user_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::users)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub is_admin: bool,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChanges {
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::db::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct AdminUserChanges {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub is_admin: bool,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, Serialize, ToSchema)]
#[diesel(table_name = crate::db::schema::cart_items)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(primary_key(cart_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItem {
    pub cart_id: i32,
    pub user_id: i32,
    pub food_id: i32,
    pub quantity: i32,
    pub special_instructions: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::cart_items)]
pub struct NewCartItem {
    pub user_id: i32,
    pub food_id: i32,
    pub quantity: i32,
    pub special_instructions: Option<String>,
}

/// Most units of one food a cart line may hold.
pub const MAX_LINE_QUANTITY: i32 = 99;
/// Width of the `special_instructions` column on cart and order lines.
pub const MAX_INSTRUCTIONS_LEN: usize = 500;

/// Public view of a user row; never carries the password hash.
#[derive(Deserialize, Serialize, Debug, Clone, ToSchema)]
pub struct UserSummary {
    pub user_id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            location: user.location.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
