use chrono::NaiveDateTime;

/// One successfully parsed access-log line. The offset in the raw line is
/// discarded during parsing, so the timestamp is naive server-local time
/// with second precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub router: String,
    pub timestamp: NaiveDateTime,
    pub request: String,
    pub status_code: String,
}
