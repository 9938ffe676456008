/// User primary keys are PostgreSQL SERIAL.
pub type DbId = i32;

/// All timestamps are PostgreSQL `TIMESTAMP` (no time zone).
pub type Timestamp = chrono::NaiveDateTime;
