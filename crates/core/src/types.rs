/// Milliseconds since the Unix epoch, UTC.
pub type Timestamp = i64;

/// Current wall-clock time as a [`Timestamp`].
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis()
}
