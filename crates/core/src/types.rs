/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All persisted timestamps are UTC; conversion to the business timezone
/// happens at the service boundary (see [`crate::calendar`]).
pub type Timestamp = chrono::DateTime<chrono::Utc>;
