use chrono::{SubsecRound, Utc};

/// All document and catalog identifiers are UUIDs.
pub type DocId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (start, completion, purchase) carry no time component.
pub type Date = chrono::NaiveDate;

/// The current time at the microsecond precision Postgres keeps, so a freshly
/// built document matches what is read back from the store.
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}
