//! Startup data: the admin account and a starter menu.

use crate::db::{DbConnection, DbPool, RepositoryError};
use crate::models::admin::{NewFood, DEFAULT_FOOD_IMAGE};
use crate::models::user::NewUser;
use diesel::prelude::*;

const SAMPLE_FOODS: [(&str, &str, f64, &str); 6] = [
    (
        "Club Sandwich",
        "sandwich",
        450.0,
        "Triple-decker sandwich with chicken, bacon, lettuce, tomato, and mayo. Served with fries.",
    ),
    (
        "Caesar Salad",
        "starters",
        350.0,
        "Crisp romaine lettuce, parmesan cheese, croutons, and caesar dressing.",
    ),
    (
        "Grilled Salmon",
        "main-course",
        850.0,
        "Fresh Atlantic salmon grilled to perfection, served with asparagus and lemon butter sauce.",
    ),
    (
        "Butter Chicken",
        "main-course",
        650.0,
        "Tender chicken cooked in a rich tomato and butter gravy. Served with naan.",
    ),
    (
        "Continental Breakfast",
        "breakfast",
        550.0,
        "Assorted pastries, toast, butter, jam, fresh fruit, and coffee or tea.",
    ),
    (
        "Cappuccino",
        "beverages",
        250.0,
        "Freshly brewed espresso with steamed milk and foam.",
    ),
];

pub fn sample_foods() -> Vec<NewFood> {
    SAMPLE_FOODS
        .iter()
        .map(|(name, category, price, description)| NewFood {
            name: name.to_string(),
            category: category.to_string(),
            price: *price,
            description: Some(description.to_string()),
            image: DEFAULT_FOOD_IMAGE.to_string(),
            is_available: true,
        })
        .collect()
}

/// Creates the admin account when missing and restores its admin flag when
/// it was revoked. `admin_hash` is only used for a new account.
pub fn ensure_admin(
    pool: &DbPool,
    admin_email: &str,
    admin_hash: &str,
) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    use crate::db::schema::users::dsl::*;

    let existing = users
        .filter(email.eq(admin_email))
        .select((user_id, is_admin))
        .first::<(i32, bool)>(conn.connection())
        .optional()?;

    match existing {
        Some((_, true)) => {}
        Some((id, false)) => {
            diesel::update(users.find(id))
                .set(is_admin.eq(true))
                .execute(conn.connection())?;
            warn!("ensure_admin: restored admin flag on {}", admin_email);
        }
        None => {
            diesel::insert_into(users)
                .values(&NewUser {
                    name: "Admin".to_string(),
                    email: admin_email.to_string(),
                    password_hash: admin_hash.to_string(),
                    phone: Some("1234567890".to_string()),
                    location: Some("Front Desk".to_string()),
                    is_admin: true,
                })
                .execute(conn.connection())?;
            info!("ensure_admin: created admin account {}", admin_email);
        }
    }
    Ok(())
}

/// Inserts the starter menu only into an empty `foods` table. Returns the
/// number of rows added.
pub fn seed_sample_foods(pool: &DbPool) -> Result<usize, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    use crate::db::schema::foods::dsl::*;

    let existing: i64 = foods.count().get_result(conn.connection())?;
    if existing > 0 {
        return Ok(0);
    }
    let added = diesel::insert_into(foods)
        .values(&sample_foods())
        .execute(conn.connection())?;
    info!("seed_sample_foods: added {} sample foods", added);
    Ok(added)
}
