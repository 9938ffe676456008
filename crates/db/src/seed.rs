//! Deterministic seed data: twenty users, each with one HOME address.
//!
//! Not idempotent. `users.email` is unique, so a second run fails with a
//! unique violation; [`crate::schema::ensure_schema_and_seed`] relies on that
//! to roll back a racing initialization instead of duplicating rows.

use sqlx::{PgConnection, Postgres, QueryBuilder};
use userdir_core::address::ADDRESS_TYPE_HOME;
use userdir_core::user::USER_STATUS_ACTIVE;

/// `(first_name, last_name)` of every seeded user, in insertion order.
pub const SEED_USERS: &[(&str, &str)] = &[
    ("John", "Doe"),
    ("Jane", "Smith"),
    ("Alice", "Johnson"),
    ("Bob", "Brown"),
    ("Charlie", "Davis"),
    ("Emily", "Clark"),
    ("Frank", "Miller"),
    ("Grace", "Wilson"),
    ("Henry", "Moore"),
    ("Ivy", "Taylor"),
    ("Jack", "Anderson"),
    ("Karen", "Thomas"),
    ("Leo", "Martinez"),
    ("Mia", "Harris"),
    ("Nathan", "White"),
    ("Olivia", "Lopez"),
    ("Peter", "Young"),
    ("Quinn", "Hall"),
    ("Ryan", "Allen"),
    ("Sophia", "King"),
];

/// The single address every seeded user receives.
pub struct SeedAddress {
    pub post_code: &'static str,
    pub city: &'static str,
    pub country_code: &'static str,
    pub street: &'static str,
    pub building_number: &'static str,
}

pub const SEED_ADDRESS: SeedAddress = SeedAddress {
    post_code: "123456",
    city: "Sample City",
    country_code: "USA",
    street: "Main Street",
    building_number: "10A",
};

/// Rows written by [`seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: u64,
    pub addresses: u64,
}

/// `John Doe` -> `john.doe@example.com`.
pub fn seed_email(first_name: &str, last_name: &str) -> String {
    format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    )
}

/// `John Doe` -> `JD`.
pub fn seed_initials(first_name: &str, last_name: &str) -> String {
    first_name
        .chars()
        .take(1)
        .chain(last_name.chars().take(1))
        .collect::<String>()
        .to_uppercase()
}

/// Insert the seed users, then one HOME address per seeded user dated now.
pub async fn seed(conn: &mut PgConnection) -> Result<SeedReport, sqlx::Error> {
    let mut users = QueryBuilder::<Postgres>::new(
        "INSERT INTO users (first_name, last_name, initials, email, status) ",
    );
    users.push_values(SEED_USERS, |mut row, &(first, last)| {
        row.push_bind(first)
            .push_bind(last)
            .push_bind(seed_initials(first, last))
            .push_bind(seed_email(first, last))
            .push_bind(USER_STATUS_ACTIVE);
    });
    let inserted_users = users.build().execute(&mut *conn).await?.rows_affected();
    tracing::info!(count = inserted_users, "Inserted seed users");

    let emails: Vec<String> = SEED_USERS
        .iter()
        .map(|(first, last)| seed_email(first, last))
        .collect();

    let inserted_addresses = sqlx::query(
        "INSERT INTO users_addresses \
            (user_id, address_type, valid_from, post_code, city, country_code, street, building_number) \
         SELECT id, $1, CURRENT_TIMESTAMP, $2, $3, $4, $5, $6 \
         FROM users \
         WHERE email = ANY($7)",
    )
    .bind(ADDRESS_TYPE_HOME)
    .bind(SEED_ADDRESS.post_code)
    .bind(SEED_ADDRESS.city)
    .bind(SEED_ADDRESS.country_code)
    .bind(SEED_ADDRESS.street)
    .bind(SEED_ADDRESS.building_number)
    .bind(&emails)
    .execute(&mut *conn)
    .await?
    .rows_affected();
    tracing::info!(count = inserted_addresses, "Inserted seed addresses");

    Ok(SeedReport {
        users: inserted_users,
        addresses: inserted_addresses,
    })
}
