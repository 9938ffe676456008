//! The storage client behind every directory operation.

use chrono::Utc;
use userdir_core::address::validate_address_type;
use userdir_core::error::CoreError;
use userdir_core::types::DbId;

use crate::error::DbError;
use crate::lazy;
use crate::models::address::{Address, EditAddress, NewAddress};
use crate::models::user::{User, UserListing};
use crate::repositories::{AddressRepo, UserRepo};
use crate::schema::{ADDRESSES_TABLE, USERS_TABLE};
use crate::DbPool;

/// Owns the connection pool and exposes the user/address operations.
///
/// Construct one at startup and share it (it is cheap to clone). Reads and
/// address creation initialize the schema on first use; edits and deletes
/// assume it exists.
#[derive(Debug, Clone)]
pub struct Directory {
    pool: DbPool,
}

impl Directory {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Close every pooled connection. Outstanding clones become unusable.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// All users, newest first.
    pub async fn list_users(&self) -> Result<UserListing, DbError> {
        let started_at = Utc::now();
        let pool = &self.pool;

        let result = lazy::with_schema(pool, USERS_TABLE, || UserRepo::list(pool)).await?;

        Ok(UserListing {
            users: result.value,
            started_at_ms: result
                .initialized_at
                .unwrap_or(started_at)
                .timestamp_millis(),
        })
    }

    /// A single user, including `updated_at`.
    pub async fn get_user(&self, id: DbId) -> Result<User, DbError> {
        let pool = &self.pool;
        lazy::with_schema(pool, USERS_TABLE, || UserRepo::find_by_id(pool, id))
            .await?
            .value
            .ok_or_else(|| CoreError::not_found("User", id).into())
    }

    /// A user's addresses, most recent `valid_from` first.
    pub async fn user_addresses(&self, user_id: DbId) -> Result<Vec<Address>, DbError> {
        let pool = &self.pool;
        let result = lazy::with_schema(pool, ADDRESSES_TABLE, || {
            AddressRepo::list_for_user(pool, user_id)
        })
        .await?;
        Ok(result.value)
    }

    /// Validate and insert a new address.
    pub async fn create_address(
        &self,
        user_id: DbId,
        input: NewAddress,
    ) -> Result<Address, DbError> {
        let input = input.validated()?;
        let pool = &self.pool;
        let input = &input;

        let result = lazy::with_schema(pool, ADDRESSES_TABLE, || {
            AddressRepo::create(pool, user_id, input)
        })
        .await?;

        tracing::info!(
            user_id,
            address_type = %result.value.address_type,
            valid_from = %result.value.valid_from,
            "Created address"
        );
        Ok(result.value)
    }

    /// Validate and apply an edit, possibly moving the address to a new key.
    ///
    /// Returns `Ok(None)` when no address matches the old key.
    pub async fn edit_address(
        &self,
        user_id: DbId,
        input: EditAddress,
    ) -> Result<Option<Address>, DbError> {
        validate_address_type(&input.old_address_type)?;
        let address = input.address.validated()?;

        let updated = AddressRepo::update(
            &self.pool,
            user_id,
            &input.old_address_type,
            input.old_valid_from,
            &address,
        )
        .await?;

        if updated.is_none() {
            tracing::debug!(
                user_id,
                old_address_type = %input.old_address_type,
                old_valid_from = %input.old_valid_from,
                "No address matched the edit key"
            );
        }
        Ok(updated)
    }

    /// Delete every address of `address_type` for a user, across all
    /// `valid_from` versions. Returns the number removed.
    pub async fn delete_addresses(
        &self,
        user_id: DbId,
        address_type: &str,
    ) -> Result<u64, DbError> {
        validate_address_type(address_type)?;
        let deleted = AddressRepo::delete_by_type(&self.pool, user_id, address_type).await?;
        tracing::info!(user_id, address_type, deleted, "Deleted addresses");
        Ok(deleted)
    }
}
