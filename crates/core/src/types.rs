/// All document identifiers are application-minted UUIDs.
pub type Id = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
