//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument. They return raw
//! `sqlx::Error`; classification and lazy initialization happen in
//! [`crate::Directory`].

pub mod address_repo;
pub mod user_repo;

pub use address_repo::AddressRepo;
pub use user_repo::UserRepo;
