//! Repository for the `users_addresses` table.

use sqlx::PgPool;
use userdir_core::types::{DbId, Timestamp};

use crate::models::address::{Address, NewAddress};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "user_id, address_type, valid_from, post_code, city, country_code, \
                       street, building_number, created_at, updated_at";

/// Provides CRUD operations for user addresses.
pub struct AddressRepo;

impl AddressRepo {
    /// List a user's addresses, most recent `valid_from` first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Address>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users_addresses \
             WHERE user_id = $1 \
             ORDER BY valid_from DESC"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new address, returning the created row.
    ///
    /// Fails with a unique violation if the user already has an address of
    /// this type with the same `valid_from`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO users_addresses \
                (user_id, address_type, valid_from, post_code, city, country_code, street, building_number) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(user_id)
            .bind(&input.address_type)
            .bind(input.valid_from)
            .bind(&input.post_code)
            .bind(&input.city)
            .bind(&input.country_code)
            .bind(&input.street)
            .bind(&input.building_number)
            .fetch_one(pool)
            .await
    }

    /// Rewrite the address keyed by `(user_id, old_type, old_valid_from)`.
    ///
    /// Every column may change, including the key itself. Returns `None` if
    /// no row matches the old key.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        old_type: &str,
        old_valid_from: Timestamp,
        input: &NewAddress,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!(
            "UPDATE users_addresses SET \
                address_type = $4, \
                valid_from = $5, \
                post_code = $6, \
                city = $7, \
                country_code = $8, \
                street = $9, \
                building_number = $10 \
             WHERE user_id = $1 AND address_type = $2 AND valid_from = $3 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(user_id)
            .bind(old_type)
            .bind(old_valid_from)
            .bind(&input.address_type)
            .bind(input.valid_from)
            .bind(&input.post_code)
            .bind(&input.city)
            .bind(&input.country_code)
            .bind(&input.street)
            .bind(&input.building_number)
            .fetch_optional(pool)
            .await
    }

    /// Delete every address of `address_type` for a user, whatever its
    /// `valid_from`. Returns the number of rows removed.
    pub async fn delete_by_type(
        pool: &PgPool,
        user_id: DbId,
        address_type: &str,
    ) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM users_addresses WHERE user_id = $1 AND address_type = $2")
                .bind(user_id)
                .bind(address_type)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }
}
