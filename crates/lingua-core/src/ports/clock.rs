use chrono::{DateTime, Utc};

/// Source of the current time, used for `published_at` and row timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
