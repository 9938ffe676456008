//! Address entity model and DTOs.
//!
//! Addresses are keyed by `(user_id, address_type, valid_from)`. An edit names
//! the row by its old type and date, and may move it to a new key.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use userdir_core::address::{normalize_country_code, validate_address_type};
use userdir_core::error::CoreError;
use userdir_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `users_addresses` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Address {
    pub user_id: DbId,
    pub address_type: String,
    pub valid_from: Timestamp,
    pub post_code: String,
    pub city: String,
    pub country_code: String,
    pub street: String,
    pub building_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the writable address fields. The owning user comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewAddress {
    pub address_type: String,
    #[serde(deserialize_with = "userdir_core::valid_from::deserialize")]
    pub valid_from: Timestamp,
    #[validate(length(min = 1, max = 6, message = "Post code must be 1 to 6 characters"))]
    pub post_code: String,
    #[validate(length(min = 1, max = 60, message = "City must be 1 to 60 characters"))]
    pub city: String,
    pub country_code: String,
    #[validate(length(min = 1, max = 100, message = "Street must be 1 to 100 characters"))]
    pub street: String,
    #[validate(length(
        min = 1,
        max = 60,
        message = "Building number must be 1 to 60 characters"
    ))]
    pub building_number: String,
}

impl NewAddress {
    /// Check every field and upper-case the country code.
    ///
    /// The country code is checked first so a malformed code is always the
    /// reported error.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.country_code = normalize_country_code(&self.country_code)?;
        validate_address_type(&self.address_type)?;
        self.validate()?;
        Ok(self)
    }
}

/// DTO for editing an address, identified by its current type and date.
#[derive(Debug, Clone, Deserialize)]
pub struct EditAddress {
    pub old_address_type: String,
    #[serde(deserialize_with = "userdir_core::valid_from::deserialize")]
    pub old_valid_from: Timestamp,
    #[serde(flatten)]
    pub address: NewAddress,
}
