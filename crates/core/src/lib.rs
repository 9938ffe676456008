//! Domain types, constants, and validation shared by the user directory crates.
//!
//! Nothing in here performs I/O; the database and HTTP layers build on it.

pub mod address;
pub mod error;
pub mod pagination;
pub mod types;
pub mod user;
pub mod valid_from;
