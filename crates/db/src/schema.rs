//! Schema initializer.
//!
//! The directory has no migration step: the tables are created the first time
//! a query finds them missing (see [`crate::lazy`]). Every statement in
//! [`ensure_schema`] is safe to run against a database that already has the
//! schema. Seeding is not, see [`crate::seed`].

use sqlx::PgConnection;

use crate::seed;
use crate::DbPool;

pub const USERS_TABLE: &str = "users";
pub const ADDRESSES_TABLE: &str = "users_addresses";

/// Shared trigger function that stamps `updated_at` on every row update.
pub const TOUCH_UPDATED_AT_FN: &str = "update_updated_at_column";

const CREATE_USERS: &str = "\
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    first_name VARCHAR(60),
    last_name VARCHAR(100) NOT NULL,
    initials VARCHAR(30),
    email VARCHAR(100) UNIQUE NOT NULL,
    status VARCHAR(8) NOT NULL DEFAULT 'ACTIVE' CHECK (status IN ('ACTIVE', 'INACTIVE')),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL
)";

const CREATE_ADDRESSES: &str = "\
CREATE TABLE IF NOT EXISTS users_addresses (
    user_id INT REFERENCES users(id) ON DELETE CASCADE,
    address_type VARCHAR(7) NOT NULL CHECK (address_type IN ('HOME', 'INVOICE', 'POST', 'WORK')),
    valid_from TIMESTAMP NOT NULL,
    post_code VARCHAR(6) NOT NULL,
    city VARCHAR(60) NOT NULL,
    country_code VARCHAR(3) NOT NULL,
    street VARCHAR(100) NOT NULL,
    building_number VARCHAR(60) NOT NULL,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
    PRIMARY KEY (user_id, address_type, valid_from)
)";

const CREATE_TOUCH_FN: &str = "\
CREATE OR REPLACE FUNCTION update_updated_at_column()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = CURRENT_TIMESTAMP;
    RETURN NEW;
END;
$$ LANGUAGE plpgsql";

/// `(trigger name, table)` pairs attached to [`TOUCH_UPDATED_AT_FN`].
pub const UPDATED_AT_TRIGGERS: &[(&str, &str)] = &[
    ("trigger_users_updated_at", USERS_TABLE),
    ("trigger_users_addresses_updated_at", ADDRESSES_TABLE),
];

/// PostgreSQL has no `CREATE TRIGGER IF NOT EXISTS`, so guard on `pg_trigger`.
fn create_trigger_sql(trigger: &str, table: &str) -> String {
    format!(
        "DO $$
BEGIN
    IF NOT EXISTS (
        SELECT 1 FROM pg_trigger
        WHERE tgname = '{trigger}'
          AND tgrelid = '{table}'::regclass
    ) THEN
        CREATE TRIGGER {trigger}
        BEFORE UPDATE ON {table}
        FOR EACH ROW
        EXECUTE FUNCTION {TOUCH_UPDATED_AT_FN}();
    END IF;
END
$$"
    )
}

/// Create both tables, the touch function, and its triggers where missing.
pub async fn ensure_schema(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS).execute(&mut *conn).await?;
    tracing::info!(table = USERS_TABLE, "Ensured table");

    sqlx::query(CREATE_ADDRESSES).execute(&mut *conn).await?;
    tracing::info!(table = ADDRESSES_TABLE, "Ensured table");

    sqlx::query(CREATE_TOUCH_FN).execute(&mut *conn).await?;
    tracing::info!(function = TOUCH_UPDATED_AT_FN, "Created or replaced function");

    for (trigger, table) in UPDATED_AT_TRIGGERS {
        sqlx::query(&create_trigger_sql(trigger, table))
            .execute(&mut *conn)
            .await?;
        tracing::info!(trigger, table, "Ensured trigger");
    }

    Ok(())
}

/// Create the schema and insert the seed data in one transaction.
///
/// Only call this when a table was just found missing: the seed step fails
/// with a unique violation if the seed users already exist, and the whole
/// transaction is rolled back.
pub async fn ensure_schema_and_seed(pool: &DbPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    ensure_schema(&mut *tx).await?;
    let report = seed::seed(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!(
        users = report.users,
        addresses = report.addresses,
        "Schema initialized and seeded"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_sql_is_guarded_by_existence_check() {
        let sql = create_trigger_sql("trigger_users_updated_at", "users");
        assert!(sql.contains("IF NOT EXISTS"));
        assert!(sql.contains("tgname = 'trigger_users_updated_at'"));
        assert!(sql.contains("BEFORE UPDATE ON users"));
        assert!(sql.contains("EXECUTE FUNCTION update_updated_at_column()"));
    }

    #[test]
    fn check_constraints_match_domain_constants() {
        for status in userdir_core::user::VALID_USER_STATUSES {
            assert!(CREATE_USERS.contains(&format!("'{status}'")));
        }
        for address_type in userdir_core::address::VALID_ADDRESS_TYPES {
            assert!(CREATE_ADDRESSES.contains(&format!("'{address_type}'")));
        }
    }

    #[test]
    fn every_table_gets_a_trigger() {
        let tables: Vec<_> = UPDATED_AT_TRIGGERS.iter().map(|(_, t)| *t).collect();
        assert_eq!(tables, vec![USERS_TABLE, ADDRESSES_TABLE]);
    }
}
