/// Row identifiers are UUIDs assigned by the hosted backend.
pub type RecordId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
