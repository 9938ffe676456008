//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - `FromRow` + `Serialize` entity structs matching the database rows
//! - `Deserialize` input DTOs for writes, where the entity has any

pub mod address;
pub mod user;
